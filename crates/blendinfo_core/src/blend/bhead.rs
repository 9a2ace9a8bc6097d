use crate::blend::bytes::Cursor;
use crate::blend::{BlendError, Endianness, FormatVersion, PointerSize, Result};

/// Code of the terminal block.
pub const ENDB: [u8; 4] = *b"ENDB";

/// Parsed block header, widened to a layout-independent shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BHead {
	/// Four-byte block code.
	pub code: [u8; 4],
	/// SDNA struct index for payload interpretation.
	pub sdna_nr: u32,
	/// Stored address identifier used for pointer relocation.
	///
	/// Opaque: never a file offset and never dereferenced here.
	pub old: u64,
	/// Payload byte length.
	pub len: u64,
	/// Number of elements stored in payload.
	pub nr: u64,
}

impl BHead {
	/// Return `true` when this is the terminal `ENDB` block.
	pub fn is_endb(&self) -> bool {
		self.code == ENDB
	}
}

/// On-disk block-header encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BHeadLayout {
	/// Legacy header, 4-byte pointers: `code, len:i32, old:u32, sdna:u32, nr:i32`.
	Small4,
	/// Legacy header, 8-byte pointers: `code, len:i32, old:u64, sdna:u32, nr:i32`.
	Small8,
	/// Extended header: `code, sdna:u32, old:u64, len:i64, nr:i64`.
	Large8,
}

impl BHeadLayout {
	/// Pick the layout used by files with this header combination.
	pub fn select(format_version: FormatVersion, pointer_size: PointerSize) -> Result<Self> {
		match (format_version, pointer_size) {
			(FormatVersion::Legacy, PointerSize::Four) => Ok(Self::Small4),
			(FormatVersion::Legacy, PointerSize::Eight) => Ok(Self::Small8),
			(FormatVersion::Extended, PointerSize::Eight) => Ok(Self::Large8),
			(FormatVersion::Extended, PointerSize::Four) => Err(BlendError::UnsupportedLayout {
				format_version,
				pointer_size,
			}),
		}
	}

	/// Exact encoded size of one block header.
	pub const fn byte_size(self) -> usize {
		match self {
			Self::Small4 => 20,
			Self::Small8 => 24,
			Self::Large8 => 32,
		}
	}

	/// Width of the stored `old` address.
	pub fn pointer_size(self) -> PointerSize {
		match self {
			Self::Small4 => PointerSize::Four,
			Self::Small8 | Self::Large8 => PointerSize::Eight,
		}
	}

	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Small4 => "bhead4",
			Self::Small8 => "small_bhead8",
			Self::Large8 => "large_bhead8",
		}
	}

	/// Decode one block header from the front of `bytes`.
	pub fn decode(self, bytes: &[u8], endianness: Endianness) -> Result<BHead> {
		self.decode_at(bytes, endianness, 0)
	}

	/// Decode like [`Self::decode`], reporting errors against stream offset `at`.
	pub fn decode_at(self, bytes: &[u8], endianness: Endianness, at: u64) -> Result<BHead> {
		let raw = bytes.get(..self.byte_size()).ok_or(BlendError::UnexpectedEof {
			at,
			need: self.byte_size(),
			rem: bytes.len(),
		})?;
		let mut cursor = Cursor::with_base(raw, at);

		match self {
			Self::Small4 | Self::Small8 => decode_small(&mut cursor, self.pointer_size(), endianness),
			Self::Large8 => decode_large(&mut cursor, endianness),
		}
	}
}

fn decode_small(cursor: &mut Cursor<'_>, pointer_size: PointerSize, endianness: Endianness) -> Result<BHead> {
	let code = cursor.read_code4()?;
	let len = non_negative_len(i64::from(cursor.read_i32(endianness)?))?;
	let old = cursor.read_ptr(pointer_size, endianness)?;
	let sdna_nr = cursor.read_u32(endianness)?;
	let nr = non_negative_nr(i64::from(cursor.read_i32(endianness)?))?;

	Ok(BHead {
		code,
		sdna_nr,
		old,
		len,
		nr,
	})
}

fn decode_large(cursor: &mut Cursor<'_>, endianness: Endianness) -> Result<BHead> {
	let code = cursor.read_code4()?;
	let sdna_nr = cursor.read_u32(endianness)?;
	let old = cursor.read_u64(endianness)?;
	let len = non_negative_len(cursor.read_i64(endianness)?)?;
	let nr = non_negative_nr(cursor.read_i64(endianness)?)?;

	Ok(BHead {
		code,
		sdna_nr,
		old,
		len,
		nr,
	})
}

fn non_negative_len(len: i64) -> Result<u64> {
	u64::try_from(len).map_err(|_| BlendError::NegativeBlockLength { len })
}

fn non_negative_nr(nr: i64) -> Result<u64> {
	u64::try_from(nr).map_err(|_| BlendError::NegativeBlockCount { nr })
}

#[cfg(test)]
mod tests;
