use std::io::Read;

use crate::blend::bytes::Cursor;
use crate::blend::{BlendHeader, BlockScanner, Endianness, Result};

/// Code of render-info blocks, one per scene marked for rendering.
pub const REND: [u8; 4] = *b"REND";

/// Frame range and name of one scene, read from a `REND` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneRange {
	/// First frame of the render range.
	pub start_frame: i32,
	/// Last frame of the render range.
	pub end_frame: i32,
	/// Scene name without the ID prefix.
	pub name: String,
}

impl SceneRange {
	/// Decode a `REND` payload: two frame numbers, then a NUL-padded name.
	///
	/// The name field fills the remainder of the payload, so both the 64-byte
	/// and 256-byte name widths decode without knowing the writer version.
	pub fn decode(payload: &[u8], endianness: Endianness) -> Result<Self> {
		let mut cursor = Cursor::new(payload);
		let start_frame = cursor.read_i32(endianness)?;
		let end_frame = cursor.read_i32(endianness)?;
		let field = cursor.read_rest();
		let name = field.split(|byte| *byte == 0).next().unwrap_or_default();

		Ok(Self {
			start_frame,
			end_frame,
			name: String::from_utf8_lossy(name).into_owned(),
		})
	}
}

/// Collect payloads of every remaining block with `code`.
///
/// Other blocks are skipped without being read into memory.
pub fn extract_payloads<R: Read>(blocks: &mut BlockScanner<R>, code: [u8; 4]) -> Result<Vec<Vec<u8>>> {
	let mut out = Vec::new();
	while let Some(head) = blocks.next() {
		if head?.code == code {
			out.push(blocks.read_payload()?);
		}
	}
	Ok(out)
}

/// Decode every remaining `REND` block.
pub fn scene_ranges<R: Read>(blocks: &mut BlockScanner<R>) -> Result<Vec<SceneRange>> {
	let endianness = blocks.endianness();
	extract_payloads(blocks, REND)?
		.iter()
		.map(|payload| SceneRange::decode(payload, endianness))
		.collect()
}

/// Sniff `reader` and return its scene ranges; empty when it has none.
pub fn read_scene_ranges<R: Read>(mut reader: R) -> Result<Vec<SceneRange>> {
	let header = BlendHeader::sniff(&mut reader)?;
	let mut blocks = BlockScanner::after_header(reader, header)?;
	scene_ranges(&mut blocks)
}

#[cfg(test)]
mod tests;
