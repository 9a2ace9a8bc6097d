use blendinfo_testkit::{BlendBuilder, standard_fixtures};

use crate::blend::{BlendHeader, BlockScanner, Endianness, ErrorKind, SceneRange, extract_payloads, read_scene_ranges};

fn scene(start_frame: i32, end_frame: i32, name: &str) -> SceneRange {
	SceneRange {
		start_frame,
		end_frame,
		name: name.to_owned(),
	}
}

#[test]
fn extracts_default_scene_from_every_fixture() {
	for (name, bytes) in standard_fixtures() {
		let scenes = read_scene_ranges(bytes.as_slice()).expect("scan succeeds");
		assert_eq!(scenes, vec![scene(1, 250, "Scene")], "{name}");
	}
}

#[test]
fn extracts_renamed_scene() {
	let bytes = BlendBuilder::legacy(8, false, 300).rend(10, 20, "Test Scene").endb().build();
	let scenes = read_scene_ranges(bytes.as_slice()).expect("scan succeeds");
	assert_eq!(scenes, vec![scene(10, 20, "Test Scene")]);
}

#[test]
fn extracts_every_scene_in_file_order() {
	let bytes = BlendBuilder::legacy(4, true, 249)
		.rend(1, 100, "Main")
		.rend(-5, 5, "Negative")
		.block(*b"GLOB", 0, 1, &[0_u8; 32])
		.rend(7, 7, "Late")
		.endb()
		.build();

	let scenes = read_scene_ranges(bytes.as_slice()).expect("scan succeeds");
	assert_eq!(scenes, vec![scene(1, 100, "Main"), scene(-5, 5, "Negative"), scene(7, 7, "Late")]);
}

#[test]
fn missing_records_are_an_empty_result() {
	let bytes = BlendBuilder::extended(500).block(*b"GLOB", 0, 1, &[0_u8; 16]).endb().build();
	let scenes = read_scene_ranges(bytes.as_slice()).expect("scan succeeds");
	assert!(scenes.is_empty());

	let bytes = BlendBuilder::legacy(8, false, 300).build();
	let scenes = read_scene_ranges(bytes.as_slice()).expect("empty body scans");
	assert!(scenes.is_empty());
}

#[test]
fn records_after_endb_are_ignored() {
	let bytes = BlendBuilder::legacy(8, false, 300).endb().rend(1, 2, "Hidden").build();
	let scenes = read_scene_ranges(bytes.as_slice()).expect("scan succeeds");
	assert!(scenes.is_empty());
}

#[test]
fn bad_files_propagate_errors() {
	let err = read_scene_ranges(&b"GIF89a..."[..]).expect_err("not a blend");
	assert_eq!(err.kind(), ErrorKind::Format);

	let bytes = BlendBuilder::legacy(8, false, 300).rend(1, 250, "Scene").build();
	let err = read_scene_ranges(&bytes[..bytes.len() - 1]).expect_err("cut payload");
	assert_eq!(err.kind(), ErrorKind::Truncated);
}

#[test]
fn decode_handles_unterminated_and_short_names() {
	let mut payload = Vec::new();
	payload.extend_from_slice(&3_i32.to_be_bytes());
	payload.extend_from_slice(&9_i32.to_be_bytes());
	payload.extend_from_slice(b"NoNul");
	let decoded = SceneRange::decode(&payload, Endianness::Big).expect("payload decodes");
	assert_eq!(decoded, scene(3, 9, "NoNul"));

	let err = SceneRange::decode(&payload[..6], Endianness::Big).expect_err("short payload fails");
	assert_eq!(err.kind(), ErrorKind::Truncated);
}

#[test]
fn extract_payloads_filters_by_code() {
	let bytes = BlendBuilder::extended(500)
		.block(*b"DATA", 0, 1, b"one")
		.block(*b"GLOB", 0, 1, b"skip me")
		.block(*b"DATA", 0, 1, b"two")
		.endb()
		.build();

	let mut reader = bytes.as_slice();
	let header = BlendHeader::sniff(&mut reader).expect("header sniffs");
	let mut blocks = BlockScanner::after_header(reader, header).expect("layout");
	let payloads = extract_payloads(&mut blocks, *b"DATA").expect("scan succeeds");
	assert_eq!(payloads, vec![b"one".to_vec(), b"two".to_vec()]);
}
