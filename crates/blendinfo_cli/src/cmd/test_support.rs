use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::OnceLock;

use blendinfo_testkit::{target_dir as workspace_target_dir, write_fixture};

static BLENDINFO_BIN: OnceLock<PathBuf> = OnceLock::new();

/// Write a fixture for a CLI test and return its path as a string argument.
pub(crate) fn fixture_arg(name: &str, bytes: &[u8]) -> String {
	write_fixture(name, bytes).to_string_lossy().into_owned()
}

pub(crate) fn run_blendinfo(args: &[&str]) -> Output {
	Command::new(blendinfo_bin()).args(args).output().expect("blendinfo command executes")
}

pub(crate) fn run_blendinfo_json(args: &[&str]) -> serde_json::Value {
	let output = run_blendinfo(args);
	assert!(
		output.status.success(),
		"blendinfo command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

fn blendinfo_bin() -> &'static PathBuf {
	BLENDINFO_BIN.get_or_init(resolve_blendinfo_bin)
}

fn resolve_blendinfo_bin() -> PathBuf {
	if let Ok(path) = std::env::var("CARGO_BIN_EXE_blendinfo") {
		return PathBuf::from(path);
	}

	let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
	let target_dir = workspace_target_dir();

	let mut bin = target_dir.join("debug");
	bin.push(if cfg!(windows) { "blendinfo.exe" } else { "blendinfo" });

	let status = Command::new("cargo")
		.current_dir(&manifest_dir)
		.args(["build", "--quiet", "--bin", "blendinfo"])
		.status()
		.expect("cargo build executes");
	assert!(status.success(), "failed to build blendinfo binary at {}", bin.display());

	bin
}
