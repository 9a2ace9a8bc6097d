use std::io::Read;

use crate::blend::bytes::{Cursor, read_full, skip};
use crate::blend::{BlendError, Endianness, PointerSize, parse_block_code, render_code};

#[test]
fn cursor_reads_both_byte_orders() {
	let bytes = [0x01, 0x02, 0x03, 0x04, 0x01, 0x02, 0x03, 0x04];
	let mut cursor = Cursor::new(&bytes);
	assert_eq!(cursor.read_u32(Endianness::Little).expect("le read"), 0x0403_0201);
	assert_eq!(cursor.read_u32(Endianness::Big).expect("be read"), 0x0102_0304);
	assert_eq!(cursor.remaining(), 0);
}

#[test]
fn cursor_widens_four_byte_pointers() {
	let bytes = 0xDEAD_BEEF_u32.to_be_bytes();
	let mut cursor = Cursor::new(&bytes);
	let ptr = cursor.read_ptr(PointerSize::Four, Endianness::Big).expect("ptr read");
	assert_eq!(ptr, 0xDEAD_BEEF);
}

#[test]
fn cursor_short_read_reports_absolute_offset() {
	let bytes = [0_u8; 3];
	let mut cursor = Cursor::with_base(&bytes, 100);
	let err = cursor.read_i32(Endianness::Little).expect_err("short read fails");
	assert!(matches!(err, BlendError::UnexpectedEof { at: 100, need: 4, rem: 3 }));
}

#[test]
fn read_full_distinguishes_clean_and_partial_eof() {
	let mut empty: &[u8] = &[];
	let mut buf = [0_u8; 4];
	assert_eq!(read_full(&mut empty, &mut buf).expect("read"), 0);

	let mut short: &[u8] = &[1, 2];
	assert_eq!(read_full(&mut short, &mut buf).expect("read"), 2);
	assert_eq!(&buf[..2], &[1, 2]);
}

#[test]
fn skip_stops_at_eof() {
	let mut data: &[u8] = &[0, 1, 2, 3, 4];
	assert_eq!(skip(&mut data, 2).expect("skip"), 2);
	assert_eq!(skip(&mut data, 10).expect("skip"), 3);

	let mut rest = Vec::new();
	data.read_to_end(&mut rest).expect("read rest");
	assert!(rest.is_empty());
}

#[test]
fn block_codes_round_trip_through_labels() {
	let code = parse_block_code("SC").expect("code parses");
	assert_eq!(code, [b'S', b'C', 0, 0]);
	assert_eq!(render_code(code), "SC");
	assert_eq!(render_code([0, 0, 0, 0]), "....");
	assert_eq!(render_code([b'D', b'A', 0x01, b'A']), "DA.A");
}

#[test]
fn rejects_overlong_block_code() {
	let err = parse_block_code("SCENE").expect_err("too long");
	assert!(matches!(err, BlendError::InvalidBlockCode { .. }));
}
