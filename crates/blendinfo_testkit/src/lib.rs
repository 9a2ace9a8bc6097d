//! Shared test helpers for workspace crates.
//!
//! [`BlendBuilder`] writes synthetic `.blend` byte streams for every header
//! and block-header variant, so tests never depend on checked-in binaries.

use std::fs;
use std::path::{Path, PathBuf};

/// Scene name field width in legacy render-info records.
pub const LEGACY_SCENE_NAME_LEN: usize = 64;
/// Scene name field width in extended render-info records.
pub const EXTENDED_SCENE_NAME_LEN: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
	Small4,
	Small8,
	Large8,
}

/// Builder for synthetic blend file bytes.
#[derive(Debug, Clone)]
pub struct BlendBuilder {
	bytes: Vec<u8>,
	layout: Layout,
	big_endian: bool,
	next_old: u64,
}

impl BlendBuilder {
	/// Start a legacy 12-byte header (`BLENDER_V170`, `BLENDER-v300`, ...).
	pub fn legacy(pointer_size: usize, big_endian: bool, version: u16) -> Self {
		let (marker, layout) = match pointer_size {
			4 => (b'_', Layout::Small4),
			8 => (b'-', Layout::Small8),
			other => panic!("unsupported pointer size {other}"),
		};
		let mut bytes = b"BLENDER".to_vec();
		bytes.push(marker);
		bytes.push(if big_endian { b'V' } else { b'v' });
		bytes.extend_from_slice(format!("{version:03}").as_bytes());

		Self {
			bytes,
			layout,
			big_endian,
			next_old: 0x1000,
		}
	}

	/// Start a 17-byte extended little-endian header (`BLENDER17-01v0500`).
	pub fn extended(version: u16) -> Self {
		let bytes = format!("BLENDER17-01v{version:04}").into_bytes();
		Self {
			bytes,
			layout: Layout::Large8,
			big_endian: false,
			next_old: 0x1000,
		}
	}

	/// Size of the file header written so far.
	pub fn header_len(&self) -> usize {
		match self.layout {
			Layout::Large8 => 17,
			Layout::Small4 | Layout::Small8 => 12,
		}
	}

	/// Size of one encoded block header.
	pub fn bhead_len(&self) -> usize {
		match self.layout {
			Layout::Small4 => 20,
			Layout::Small8 => 24,
			Layout::Large8 => 32,
		}
	}

	/// Append a block header declaring `len` bytes, without any payload.
	pub fn bhead(mut self, code: [u8; 4], len: i64, old: u64, sdna_nr: u32, nr: i64) -> Self {
		self.bytes.extend_from_slice(&code);
		match self.layout {
			Layout::Small4 | Layout::Small8 => {
				let len = self.i32(len as i32);
				self.bytes.extend_from_slice(&len);
				if self.layout == Layout::Small4 {
					let old = self.u32(old as u32);
					self.bytes.extend_from_slice(&old);
				} else {
					let old = self.u64(old);
					self.bytes.extend_from_slice(&old);
				}
				let sdna_nr = self.u32(sdna_nr);
				self.bytes.extend_from_slice(&sdna_nr);
				let nr = self.i32(nr as i32);
				self.bytes.extend_from_slice(&nr);
			}
			Layout::Large8 => {
				let sdna_nr = self.u32(sdna_nr);
				self.bytes.extend_from_slice(&sdna_nr);
				let old = self.u64(old);
				self.bytes.extend_from_slice(&old);
				let len = self.u64(len as u64);
				self.bytes.extend_from_slice(&len);
				let nr = self.u64(nr as u64);
				self.bytes.extend_from_slice(&nr);
			}
		}
		self
	}

	/// Append a complete block with an automatically assigned old address.
	pub fn block(mut self, code: [u8; 4], sdna_nr: u32, nr: i64, payload: &[u8]) -> Self {
		let old = self.next_old;
		self.next_old += 0x100;
		self.bhead(code, payload.len() as i64, old, sdna_nr, nr).raw(payload)
	}

	/// Append a `REND` render-info block for one scene.
	pub fn rend(self, start_frame: i32, end_frame: i32, name: &str) -> Self {
		let name_len = match self.layout {
			Layout::Large8 => EXTENDED_SCENE_NAME_LEN,
			Layout::Small4 | Layout::Small8 => LEGACY_SCENE_NAME_LEN,
		};
		let mut payload = Vec::with_capacity(8 + name_len);
		payload.extend_from_slice(&self.i32(start_frame));
		payload.extend_from_slice(&self.i32(end_frame));
		let mut field = vec![0_u8; name_len];
		let take = name.len().min(name_len - 1);
		field[..take].copy_from_slice(&name.as_bytes()[..take]);
		payload.extend_from_slice(&field);
		self.block(*b"REND", 0, 1, &payload)
	}

	/// Append a `TEST` thumbnail block with a deterministic pixel pattern.
	pub fn thumbnail(self, width: i32, height: i32) -> Self {
		let mut payload = Vec::new();
		payload.extend_from_slice(&self.i32(width));
		payload.extend_from_slice(&self.i32(height));
		let pixels = (width.max(0) as usize) * (height.max(0) as usize);
		for idx in 0..pixels {
			payload.extend_from_slice(&[(idx % 251) as u8, 0x40, 0x80, 0xFF]);
		}
		self.block(*b"TEST", 0, 1, &payload)
	}

	/// Append a `GLOB` block whose payload starts with a `%4d` subversion.
	pub fn glob(self, subversion: u16) -> Self {
		let mut payload = format!("{subversion:4}").into_bytes();
		payload.resize(64, 0);
		self.block(*b"GLOB", 1, 1, &payload)
	}

	/// Append an `ENDB` terminator.
	pub fn endb(self) -> Self {
		self.bhead(*b"ENDB", 0, 0, 0, 0)
	}

	/// Append raw bytes.
	pub fn raw(mut self, bytes: &[u8]) -> Self {
		self.bytes.extend_from_slice(bytes);
		self
	}

	/// Finish and return the encoded stream.
	pub fn build(self) -> Vec<u8> {
		self.bytes
	}

	fn i32(&self, value: i32) -> [u8; 4] {
		if self.big_endian { value.to_be_bytes() } else { value.to_le_bytes() }
	}

	fn u32(&self, value: u32) -> [u8; 4] {
		if self.big_endian { value.to_be_bytes() } else { value.to_le_bytes() }
	}

	fn u64(&self, value: u64) -> [u8; 8] {
		if self.big_endian { value.to_be_bytes() } else { value.to_le_bytes() }
	}
}

/// The four header/layout combinations seen in real files, each with one
/// `REND` scene (`1..250`, `Scene`) and a terminator.
pub fn standard_fixtures() -> Vec<(&'static str, Vec<u8>)> {
	vec![
		("small8_le", BlendBuilder::legacy(8, false, 300).rend(1, 250, "Scene").endb().build()),
		("large8_le", BlendBuilder::extended(500).rend(1, 250, "Scene").endb().build()),
		("small4_le", BlendBuilder::legacy(4, false, 260).rend(1, 250, "Scene").endb().build()),
		("small4_be", BlendBuilder::legacy(4, true, 170).rend(1, 250, "Scene").endb().build()),
	]
}

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve the workspace target directory.
pub fn target_dir() -> PathBuf {
	std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| workspace_root().join("target"))
}

/// Write `bytes` to a scratch fixture file and return its path.
///
/// Names must be unique per test since tests run in parallel.
pub fn write_fixture(name: &str, bytes: &[u8]) -> PathBuf {
	let dir = target_dir().join("blendinfo-fixtures");
	fs::create_dir_all(&dir).expect("fixture dir is creatable");
	let path = dir.join(name);
	fs::write(&path, bytes).expect("fixture is writable");
	path
}
