use std::io::Read;

use crate::blend::{BlockScanner, Result};

/// Code of the file-globals block.
pub const GLOB: [u8; 4] = *b"GLOB";

/// Last version whose `GLOB` block predates the subversion string.
pub const LAST_VERSION_WITHOUT_SUBVERSION: u16 = 242;

/// Parse the file subversion from the leading `%4d` text of a `GLOB` payload.
///
/// The subversion string is the first member of the globals struct, so it can
/// be read without any schema.
pub fn parse_subversion(payload: &[u8]) -> Option<u16> {
	let raw = payload.get(..4)?;
	let text = std::str::from_utf8(raw).ok()?;
	text.trim_matches(|ch: char| ch == ' ' || ch == '\0').parse().ok()
}

/// Find the first `GLOB` block and return its subversion.
///
/// Returns `None` for files written by `version` 242 and older, and for files
/// without a readable `GLOB` block.
pub fn read_subversion<R: Read>(blocks: &mut BlockScanner<R>, version: u16) -> Result<Option<u16>> {
	if version <= LAST_VERSION_WITHOUT_SUBVERSION {
		return Ok(None);
	}

	while let Some(head) = blocks.next() {
		if head?.code == GLOB {
			let payload = blocks.read_payload()?;
			return Ok(parse_subversion(&payload));
		}
	}
	Ok(None)
}
