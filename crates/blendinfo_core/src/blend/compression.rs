use std::io::{BufRead, Read};

use crate::blend::Result;

/// zstd frame magic used by compressed `.blend` files.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];
/// gzip member magic used by older compressed `.blend` files.
pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Decoded byte stream handed to the header sniffer.
pub type BlendStream = Box<dyn Read + Send>;

/// Compression mode detected for a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
	/// Raw uncompressed stream.
	None,
	/// gzip-compressed stream.
	Gzip,
	/// zstd-compressed stream.
	Zstd,
}

impl Compression {
	/// Render compression mode as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Gzip => "gzip",
			Self::Zstd => "zstd",
		}
	}

	/// Classify a stream by its leading bytes.
	///
	/// Anything that is not a known compressor is treated as raw and left to
	/// the header sniffer to accept or reject.
	pub fn detect(prefix: &[u8]) -> Self {
		if prefix.starts_with(&ZSTD_MAGIC) {
			Self::Zstd
		} else if prefix.starts_with(&GZIP_MAGIC) {
			Self::Gzip
		} else {
			Self::None
		}
	}
}

/// Peek at `reader` without consuming it and wrap it in a matching decoder.
pub fn decode_stream<R: BufRead + Send + 'static>(mut reader: R) -> Result<(Compression, BlendStream)> {
	let compression = Compression::detect(reader.fill_buf()?);
	tracing::debug!(compression = compression.as_str(), "detected stream compression");

	let stream: BlendStream = match compression {
		Compression::None => Box::new(reader),
		Compression::Gzip => Box::new(flate2::bufread::MultiGzDecoder::new(reader)),
		Compression::Zstd => Box::new(zstd::stream::read::Decoder::with_buffer(reader)?),
	};
	Ok((compression, stream))
}
