use crate::blend::{BHead, BHeadLayout, BlendError, BlendHeader, Endianness, ErrorKind, FormatVersion, PointerSize};

#[test]
fn select_covers_every_header_combination() {
	let cases = [
		(FormatVersion::Legacy, PointerSize::Four, BHeadLayout::Small4, 20),
		(FormatVersion::Legacy, PointerSize::Eight, BHeadLayout::Small8, 24),
		(FormatVersion::Extended, PointerSize::Eight, BHeadLayout::Large8, 32),
	];

	for (format_version, pointer_size, expected, size) in cases {
		let first = BHeadLayout::select(format_version, pointer_size).expect("layout selects");
		let second = BHeadLayout::select(format_version, pointer_size).expect("layout selects again");
		assert_eq!(first, expected);
		assert_eq!(first, second);
		assert_eq!(first.byte_size(), size);
		assert_eq!(first.pointer_size(), pointer_size);
	}
}

#[test]
fn select_rejects_extended_four_byte_pointers() {
	let err = BHeadLayout::select(FormatVersion::Extended, PointerSize::Four).expect_err("no such layout");
	assert_eq!(err.kind(), ErrorKind::UnsupportedVariant);
}

#[test]
fn header_implies_layout() {
	let header = BlendHeader::parse(b"BLENDER17-01v0500").expect("header parses");
	assert_eq!(header.layout().expect("layout"), BHeadLayout::Large8);
	let header = BlendHeader::parse(b"BLENDER_V170").expect("header parses");
	assert_eq!(header.layout().expect("layout"), BHeadLayout::Small4);
}

#[test]
fn decodes_large_little_endian_bhead() {
	let mut bytes = Vec::new();
	bytes.extend_from_slice(b"TEST");
	bytes.extend_from_slice(&3_u32.to_le_bytes());
	bytes.extend_from_slice(&0x1122_3344_5566_7788_u64.to_le_bytes());
	bytes.extend_from_slice(&16_i64.to_le_bytes());
	bytes.extend_from_slice(&2_i64.to_le_bytes());

	let head = BHeadLayout::Large8.decode(&bytes, Endianness::Little).expect("bhead decodes");
	assert_eq!(
		head,
		BHead {
			code: *b"TEST",
			sdna_nr: 3,
			old: 0x1122_3344_5566_7788,
			len: 16,
			nr: 2,
		}
	);
}

#[test]
fn decodes_small8_little_endian_bhead() {
	let mut bytes = Vec::new();
	bytes.extend_from_slice(b"REND");
	bytes.extend_from_slice(&72_i32.to_le_bytes());
	bytes.extend_from_slice(&0x7FFE_0000_1234_u64.to_le_bytes());
	bytes.extend_from_slice(&0_u32.to_le_bytes());
	bytes.extend_from_slice(&1_i32.to_le_bytes());

	let head = BHeadLayout::Small8.decode(&bytes, Endianness::Little).expect("bhead decodes");
	assert_eq!(head.code, *b"REND");
	assert_eq!(head.len, 72);
	assert_eq!(head.old, 0x7FFE_0000_1234);
	assert_eq!(head.sdna_nr, 0);
	assert_eq!(head.nr, 1);
}

#[test]
fn small4_decodes_identically_in_both_byte_orders() {
	let encode = |to_bytes_i: fn(i32) -> [u8; 4], to_bytes_u: fn(u32) -> [u8; 4]| {
		let mut bytes = Vec::new();
		bytes.extend_from_slice(b"TEST");
		bytes.extend_from_slice(&to_bytes_i(12));
		bytes.extend_from_slice(&to_bytes_u(0x99AA_BBCC));
		bytes.extend_from_slice(&to_bytes_u(7));
		bytes.extend_from_slice(&to_bytes_i(1));
		bytes
	};

	let big = encode(i32::to_be_bytes, u32::to_be_bytes);
	let little = encode(i32::to_le_bytes, u32::to_le_bytes);
	let from_big = BHeadLayout::Small4.decode(&big, Endianness::Big).expect("big-endian decodes");
	let from_little = BHeadLayout::Small4.decode(&little, Endianness::Little).expect("little-endian decodes");

	assert_eq!(from_big, from_little);
	assert_eq!(from_big.len, 12);
	assert_eq!(from_big.old, 0x99AA_BBCC);
	assert_eq!(from_big.sdna_nr, 7);
	assert_eq!(from_big.nr, 1);
}

#[test]
fn decode_ignores_trailing_bytes() {
	let mut bytes = vec![0_u8; BHeadLayout::Small4.byte_size()];
	bytes[..4].copy_from_slice(b"ENDB");
	bytes.extend_from_slice(b"payload");
	let head = BHeadLayout::Small4.decode(&bytes, Endianness::Little).expect("bhead decodes");
	assert!(head.is_endb());
	assert_eq!(head.len, 0);
}

#[test]
fn decode_rejects_short_input() {
	for layout in [BHeadLayout::Small4, BHeadLayout::Small8, BHeadLayout::Large8] {
		let bytes = vec![0_u8; layout.byte_size() - 1];
		let err = layout.decode(&bytes, Endianness::Little).expect_err("short input fails");
		assert_eq!(err.kind(), ErrorKind::Truncated);
	}
}

#[test]
fn decode_rejects_negative_length() {
	let mut bytes = Vec::new();
	bytes.extend_from_slice(b"DATA");
	bytes.extend_from_slice(&(-1_i32).to_be_bytes());
	bytes.extend_from_slice(&[0_u8; 12]);

	let err = BHeadLayout::Small4.decode(&bytes, Endianness::Big).expect_err("negative len fails");
	assert!(matches!(err, BlendError::NegativeBlockLength { len: -1 }));
	assert_eq!(err.kind(), ErrorKind::Corrupt);
}
