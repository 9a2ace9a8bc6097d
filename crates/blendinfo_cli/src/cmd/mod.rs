/// Block directory listing command.
pub mod blocks;
/// File-level information command.
pub mod info;
/// Render-info scene listing command.
pub mod scenes;
/// Shared CLI helpers.
pub(crate) mod util;

#[cfg(test)]
pub(crate) mod test_support;

/// Options shared by every command.
pub struct Options {
	/// Payload read ceiling in bytes.
	pub max_payload: u64,
}
