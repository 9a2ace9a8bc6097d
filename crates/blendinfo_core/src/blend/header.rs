use std::io::Read;

use crate::blend::bytes::read_full;
use crate::blend::{BHeadLayout, BlendError, Result};

/// Byte endianness marker stored in blend headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
	/// Little-endian byte order (`v` marker).
	Little,
	/// Big-endian byte order (`V` marker).
	Big,
}

impl Endianness {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Little => "little",
			Self::Big => "big",
		}
	}

	fn from_marker(byte: u8) -> Result<Self> {
		match byte {
			b'v' => Ok(Self::Little),
			b'V' => Ok(Self::Big),
			marker => Err(BlendError::UnsupportedEndianMarker { marker }),
		}
	}
}

/// Width of addresses written by the process that saved the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerSize {
	/// 32-bit writer (`_` marker).
	Four,
	/// 64-bit writer (`-` marker).
	Eight,
}

impl PointerSize {
	/// Width in bytes.
	pub fn bytes(self) -> usize {
		match self {
			Self::Four => 4,
			Self::Eight => 8,
		}
	}

	fn from_marker(byte: u8) -> Result<Self> {
		match byte {
			b'_' => Ok(Self::Four),
			b'-' => Ok(Self::Eight),
			marker => Err(BlendError::UnsupportedPointerMarker { marker }),
		}
	}
}

/// Container header generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatVersion {
	/// 12-byte header without an explicit format field.
	Legacy,
	/// Header carrying an explicit size and format version (`BLENDER17-01v0500`).
	Extended,
}

impl FormatVersion {
	/// Numeric format marker (`0` for legacy headers).
	pub fn number(self) -> u16 {
		match self {
			Self::Legacy => 0,
			Self::Extended => 1,
		}
	}
}

/// Parsed blend file header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendHeader {
	/// Total file header size in bytes.
	pub header_size: usize,
	/// Header generation, which decides the block-header layout.
	pub format_version: FormatVersion,
	/// Blender version encoded as decimal digits (for example `500` or `260`).
	pub version: u16,
	/// Pointer width.
	pub pointer_size: PointerSize,
	/// File byte order.
	pub endianness: Endianness,
}

impl BlendHeader {
	/// Leading file signature.
	pub const MAGIC: &'static [u8; 7] = b"BLENDER";
	/// Exact size of legacy headers (`BLENDER-v302` style).
	pub const LEGACY_SIZE: usize = 12;
	/// Exact size of extended headers (`BLENDER17-01v0500` style).
	pub const EXTENDED_SIZE: usize = 17;
	/// Only extended format version this reader understands.
	pub const EXTENDED_FORMAT_VERSION: u16 = 1;

	/// Read exactly one header from the front of `reader`.
	///
	/// Leaves `reader` positioned on the first block header. Never consumes
	/// bytes beyond the header, even when it turns out to be invalid.
	pub fn sniff<R: Read>(reader: &mut R) -> Result<Self> {
		let mut buf = [0_u8; Self::EXTENDED_SIZE];
		let got = read_full(reader, &mut buf[..Self::LEGACY_SIZE])?;
		let prefix = &buf[..got];

		check_magic(prefix)?;
		if got < Self::LEGACY_SIZE {
			return Err(header_eof(got, Self::LEGACY_SIZE));
		}

		let header_size = if prefix[7].is_ascii_digit() {
			extended_header_size(prefix)?
		} else {
			Self::LEGACY_SIZE
		};

		let extra = read_full(reader, &mut buf[Self::LEGACY_SIZE..header_size])?;
		let total = Self::LEGACY_SIZE + extra;
		let header = Self::parse(&buf[..total])?;
		tracing::debug!(
			version = header.version,
			format = ?header.format_version,
			pointer_size = header.pointer_size.bytes(),
			endianness = header.endianness.as_str(),
			"sniffed blend header"
		);
		Ok(header)
	}

	/// Parse a blend header from the beginning of `bytes`.
	pub fn parse(bytes: &[u8]) -> Result<Self> {
		check_magic(bytes)?;
		let kind = bytes.get(7).copied().ok_or_else(|| header_eof(bytes.len(), Self::LEGACY_SIZE))?;
		if kind.is_ascii_digit() {
			return Self::parse_extended(bytes);
		}

		Self::parse_legacy(bytes)
	}

	/// Return `true` when multi-byte fields are little-endian.
	pub fn is_little_endian(self) -> bool {
		self.endianness == Endianness::Little
	}

	/// Select the block-header layout implied by this header.
	pub fn layout(self) -> Result<BHeadLayout> {
		BHeadLayout::select(self.format_version, self.pointer_size)
	}

	/// Render the numeric version as `major.minor` (`300` becomes `3.0`).
	pub fn version_label(self) -> String {
		format!("{}.{}", self.version / 100, self.version % 100)
	}

	fn parse_extended(bytes: &[u8]) -> Result<Self> {
		let header_size = extended_header_size(bytes)?;
		let header = bytes.get(0..header_size).ok_or_else(|| header_eof(bytes.len(), header_size))?;

		if header[9] != b'-' {
			return Err(BlendError::InvalidHeader { reason: "missing format separator" });
		}

		let format_version = parse_digits(&header[10..12]).ok_or(BlendError::InvalidHeader { reason: "format version digits" })?;
		if format_version != Self::EXTENDED_FORMAT_VERSION {
			return Err(BlendError::UnsupportedFormatVersion { version: format_version });
		}

		let endianness = Endianness::from_marker(header[12])?;
		let version = parse_version(&header[13..17])?;

		Ok(Self {
			header_size,
			format_version: FormatVersion::Extended,
			version,
			pointer_size: PointerSize::Eight,
			endianness,
		})
	}

	fn parse_legacy(bytes: &[u8]) -> Result<Self> {
		let header = bytes
			.get(0..Self::LEGACY_SIZE)
			.ok_or_else(|| header_eof(bytes.len(), Self::LEGACY_SIZE))?;
		let pointer_size = PointerSize::from_marker(header[7])?;
		let endianness = Endianness::from_marker(header[8])?;
		let version = parse_version(&header[9..12])?;

		Ok(Self {
			header_size: Self::LEGACY_SIZE,
			format_version: FormatVersion::Legacy,
			version,
			pointer_size,
			endianness,
		})
	}
}

fn check_magic(bytes: &[u8]) -> Result<()> {
	let n = bytes.len().min(BlendHeader::MAGIC.len());
	if bytes[..n] != BlendHeader::MAGIC[..n] {
		let mut magic = [0_u8; 7];
		magic[..n].copy_from_slice(&bytes[..n]);
		return Err(BlendError::InvalidMagic { magic });
	}
	if n < BlendHeader::MAGIC.len() {
		return Err(header_eof(n, BlendHeader::LEGACY_SIZE));
	}
	Ok(())
}

fn extended_header_size(bytes: &[u8]) -> Result<usize> {
	let digits = bytes.get(7..9).ok_or_else(|| header_eof(bytes.len(), BlendHeader::EXTENDED_SIZE))?;
	let header_size = parse_digits(digits).ok_or(BlendError::InvalidHeader { reason: "header size digits" })? as usize;
	if header_size != BlendHeader::EXTENDED_SIZE {
		return Err(BlendError::UnsupportedHeaderSize { header_size });
	}
	Ok(header_size)
}

fn header_eof(have: usize, need: usize) -> BlendError {
	BlendError::UnexpectedEof {
		at: 0,
		need,
		rem: have,
	}
}

fn parse_version(bytes: &[u8]) -> Result<u16> {
	match parse_digits(bytes) {
		Some(0) | None => Err(BlendError::InvalidHeader { reason: "version digits" }),
		Some(version) => Ok(version),
	}
}

fn parse_digits(bytes: &[u8]) -> Option<u16> {
	if bytes.is_empty() {
		return None;
	}

	let mut value = 0_u16;
	for byte in bytes {
		if !byte.is_ascii_digit() {
			return None;
		}
		value = value * 10 + u16::from(*byte - b'0');
	}
	Some(value)
}
