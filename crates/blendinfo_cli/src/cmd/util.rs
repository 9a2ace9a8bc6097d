use std::path::Path;

use blendinfo::blend::{BlendFile, Result};

use crate::cmd::Options;

/// Open `path` with the shared command options applied.
pub(crate) fn open(path: &Path, options: &Options) -> Result<BlendFile> {
	Ok(BlendFile::open(path)?.with_payload_limit(options.max_payload))
}

/// Render an old address as fixed-width hex.
pub(crate) fn ptr_hex(ptr: u64) -> String {
	format!("0x{ptr:016x}")
}

/// Print a serializable value as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(value: &T) {
	match serde_json::to_string_pretty(value) {
		Ok(text) => println!("{text}"),
		Err(err) => tracing::error!(%err, "failed to serialize json output"),
	}
}
