use std::io::Read;

use crate::blend::bytes::Cursor;
use crate::blend::{BlockScanner, Endianness, REND, Result};

/// Code of the embedded preview block.
pub const TEST: [u8; 4] = *b"TEST";

/// Embedded file preview image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
	/// Width in pixels.
	pub width: u32,
	/// Height in pixels.
	pub height: u32,
	/// Row-major RGBA pixels, bottom row first as written by Blender.
	pub rgba: Vec<u8>,
}

impl Thumbnail {
	/// Decode a `TEST` payload, returning `None` for implausible dimensions
	/// or a payload too short for them.
	pub fn decode(payload: &[u8], endianness: Endianness) -> Option<Self> {
		let mut cursor = Cursor::new(payload);
		let width = cursor.read_i32(endianness).ok()?;
		let height = cursor.read_i32(endianness).ok()?;
		let pixel_bytes = pixel_bytes(width, height)?;
		let rgba = cursor.read_exact(pixel_bytes).ok()?;

		Some(Self {
			width: width as u32,
			height: height as u32,
			rgba: rgba.to_vec(),
		})
	}
}

fn pixel_bytes(width: i32, height: i32) -> Option<usize> {
	if width <= 0 || height <= 0 {
		return None;
	}
	let pixels = usize::try_from(width).ok()?.checked_mul(usize::try_from(height).ok()?)?;
	if pixels >= usize::MAX / 16 {
		return None;
	}
	Some(pixels * 4)
}

/// Look for the preview block in the leading run of `REND` blocks.
///
/// Blender writes the preview directly after render info, so the search
/// stops at the first block that is neither.
pub fn read_thumbnail<R: Read>(blocks: &mut BlockScanner<R>) -> Result<Option<Thumbnail>> {
	while let Some(head) = blocks.next() {
		let head = head?;
		if head.code == TEST {
			let payload = blocks.read_payload()?;
			return Ok(Thumbnail::decode(&payload, blocks.endianness()));
		}
		if head.code != REND {
			break;
		}
	}
	Ok(None)
}
