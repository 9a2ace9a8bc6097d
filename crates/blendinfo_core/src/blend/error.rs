use thiserror::Error;

use crate::blend::{FormatVersion, PointerSize};

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, BlendError>;

/// Coarse error classes callers use to pick a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// Stream is not a `.blend` container at all.
	Format,
	/// Stream is a container variant this reader does not know.
	UnsupportedVariant,
	/// Stream ended before a fixed-size read or skip completed.
	Truncated,
	/// Stream content is structurally invalid.
	Corrupt,
	/// Underlying stream or decompressor failure.
	Io,
}

impl ErrorKind {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Format => "format",
			Self::UnsupportedVariant => "unsupported_variant",
			Self::Truncated => "truncated",
			Self::Corrupt => "corrupt",
			Self::Io => "io",
		}
	}
}

/// Errors produced while sniffing and scanning `.blend` streams.
#[derive(Debug, Error)]
pub enum BlendError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Stream did not start with `BLENDER`.
	#[error("not a .blend file (magic={magic:?})")]
	InvalidMagic {
		/// Leading bytes that were read instead of the signature.
		magic: [u8; 7],
	},
	/// Header digits or separators were malformed.
	#[error("invalid header: {reason}")]
	InvalidHeader {
		/// Short description of the malformed field.
		reason: &'static str,
	},
	/// Pointer-size marker is neither `_` nor `-`.
	#[error("unsupported pointer size marker {marker:#04x}")]
	UnsupportedPointerMarker {
		/// Raw marker byte.
		marker: u8,
	},
	/// Endianness marker is neither `v` nor `V`.
	#[error("unsupported endianness marker {marker:#04x}")]
	UnsupportedEndianMarker {
		/// Raw marker byte.
		marker: u8,
	},
	/// Extended header declared a size this reader does not know.
	#[error("unsupported header size {header_size}")]
	UnsupportedHeaderSize {
		/// Declared header size.
		header_size: usize,
	},
	/// Unsupported container format version.
	#[error("unsupported file format version {version} (expected 1)")]
	UnsupportedFormatVersion {
		/// Parsed format version.
		version: u16,
	},
	/// No block-header layout exists for this header combination.
	#[error("no block header layout for {format_version:?} headers with {pointer_size:?} pointers")]
	UnsupportedLayout {
		/// Requested format version.
		format_version: FormatVersion,
		/// Requested pointer width.
		pointer_size: PointerSize,
	},
	/// Not enough bytes remained for a fixed-size read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: u64,
		/// Requested bytes.
		need: usize,
		/// Bytes that were still available.
		rem: usize,
	},
	/// Block payload ran past the end of the stream.
	#[error("block payload at offset {at} declares {len} bytes, only {avail} available")]
	TruncatedPayload {
		/// Offset of the payload start.
		at: u64,
		/// Declared payload length.
		len: u64,
		/// Bytes that could be consumed before EOF.
		avail: u64,
	},
	/// Block payload length was negative.
	#[error("negative block length {len}")]
	NegativeBlockLength {
		/// Parsed signed length.
		len: i64,
	},
	/// Block element count was negative.
	#[error("negative block count {nr}")]
	NegativeBlockCount {
		/// Parsed signed element count.
		nr: i64,
	},
	/// Payload read refused because it exceeds the configured ceiling.
	#[error("block payload at offset {at} is {len} bytes, limit {limit}")]
	PayloadTooLarge {
		/// Offset of the payload start.
		at: u64,
		/// Declared payload length.
		len: u64,
		/// Configured ceiling.
		limit: u64,
	},
	/// Payload requested when no block header is pending.
	#[error("no block payload pending")]
	NoPendingPayload,
	/// Block code argument was invalid.
	#[error("invalid block code: {code}")]
	InvalidBlockCode {
		/// User-provided code string.
		code: String,
	},
}

impl BlendError {
	/// Classify this error for caller-facing reporting.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Io(_) => ErrorKind::Io,
			Self::InvalidMagic { .. } | Self::InvalidHeader { .. } => ErrorKind::Format,
			Self::UnsupportedPointerMarker { .. }
			| Self::UnsupportedEndianMarker { .. }
			| Self::UnsupportedHeaderSize { .. }
			| Self::UnsupportedFormatVersion { .. }
			| Self::UnsupportedLayout { .. } => ErrorKind::UnsupportedVariant,
			Self::UnexpectedEof { .. } | Self::TruncatedPayload { .. } => ErrorKind::Truncated,
			Self::NegativeBlockLength { .. }
			| Self::NegativeBlockCount { .. }
			| Self::PayloadTooLarge { .. }
			| Self::NoPendingPayload
			| Self::InvalidBlockCode { .. } => ErrorKind::Corrupt,
		}
	}

	/// Return `true` for errors that mean "not a file this reader understands".
	pub fn is_unsupported_file(&self) -> bool {
		matches!(self.kind(), ErrorKind::Format | ErrorKind::UnsupportedVariant)
	}

	/// Return `true` for errors that mean "corrupt or incomplete file".
	pub fn is_corrupt_file(&self) -> bool {
		matches!(self.kind(), ErrorKind::Truncated | ErrorKind::Corrupt)
	}
}
