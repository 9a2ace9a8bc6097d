use blendinfo_testkit::BlendBuilder;

use crate::cmd::test_support::{fixture_arg, run_blendinfo, run_blendinfo_json};

#[test]
fn info_json_reports_header_and_records() {
	let bytes = BlendBuilder::extended(500)
		.rend(1, 250, "Scene")
		.thumbnail(2, 3)
		.glob(7)
		.block(*b"DNA1", 0, 1, b"SDNA")
		.endb()
		.build();
	let fixture = fixture_arg("cli_info_extended.blend", &bytes);
	let json = run_blendinfo_json(&["info", &fixture, "--json"]);

	assert_eq!(json["compression"], "none");
	assert_eq!(json["header_size"], 17);
	assert_eq!(json["format_version"], 1);
	assert_eq!(json["version"], 500);
	assert_eq!(json["version_label"], "5.0");
	assert_eq!(json["subversion"], 7);
	assert_eq!(json["bhead_layout"], "large_bhead8");
	assert_eq!(json["endianness"], "little");
	assert_eq!(json["pointer_size"], 8);
	assert_eq!(json["block_count"], 5);
	assert_eq!(json["has_dna1"], true);
	assert_eq!(json["has_endb"], true);
	assert_eq!(json["last_code"], "ENDB");
	assert_eq!(json["thumbnail"]["width"], 2);
	assert_eq!(json["thumbnail"]["height"], 3);
	assert_eq!(json["scenes"][0]["name"], "Scene");
	assert_eq!(json["scenes"][0]["end_frame"], 250);
}

#[test]
fn info_json_handles_big_endian_legacy_files() {
	let bytes = BlendBuilder::legacy(4, true, 170).rend(10, 20, "Test Scene").endb().build();
	let fixture = fixture_arg("cli_info_small4_be.blend", &bytes);
	let json = run_blendinfo_json(&["info", &fixture, "--json"]);

	assert_eq!(json["format_version"], 0);
	assert_eq!(json["bhead_layout"], "bhead4");
	assert_eq!(json["endianness"], "big");
	assert_eq!(json["pointer_size"], 4);
	assert!(json["subversion"].is_null());
	assert!(json["thumbnail"].is_null());
	assert_eq!(json["scenes"][0]["start_frame"], 10);
	assert_eq!(json["scenes"][0]["name"], "Test Scene");
}

#[test]
fn info_reports_unsupported_and_corrupt_files() {
	let fixture = fixture_arg("cli_info_foreign.blend", b"not a blend file at all");
	let output = run_blendinfo(&["info", &fixture]);
	assert!(!output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("error: unsupported file"), "stderr: {stderr}");

	let bytes = BlendBuilder::legacy(8, false, 300).rend(1, 250, "Scene").build();
	let fixture = fixture_arg("cli_info_truncated.blend", &bytes[..bytes.len() - 3]);
	let output = run_blendinfo(&["info", &fixture]);
	assert!(!output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("error: corrupt or incomplete file"), "stderr: {stderr}");
}
