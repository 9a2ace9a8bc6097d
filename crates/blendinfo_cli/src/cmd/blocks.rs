use std::path::PathBuf;

use blendinfo::blend::{BHead, Result, parse_block_code, render_code};

use crate::cmd::Options;
use crate::cmd::util::{emit_json, open, ptr_hex};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub code: Option<String>,
	#[arg(long)]
	pub limit: Option<usize>,
	#[arg(long)]
	pub json: bool,
}

/// List block headers in file order, optionally filtered by code.
pub fn run(args: Args, options: &Options) -> Result<()> {
	let Args { path, code, limit, json } = args;
	let code = code.as_deref().map(parse_block_code).transpose()?;

	let blend = open(&path, options)?;
	let layout = blend.layout();
	let mut blocks = blend.blocks();

	let mut rows = Vec::new();
	let mut index = 0_usize;
	while let Some(head) = blocks.next() {
		let head = head?;
		if code.is_none_or(|code| code == head.code) {
			rows.push(BlockRow {
				index,
				offset: blocks.last_offset(),
				head,
			});
			if limit.is_some_and(|limit| rows.len() >= limit) {
				break;
			}
		}
		index += 1;
	}

	if json {
		let payload = BlocksJson {
			path: path.display().to_string(),
			bhead_layout: layout.as_str(),
			blocks: rows.iter().map(BlockJson::from).collect(),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("bhead_layout: {}", layout.as_str());
	println!("blocks: {}", rows.len());
	println!("idx\toffset\tcode\tlen\told\tsdna\tnr");
	for row in &rows {
		println!(
			"{}\t{}\t{}\t{}\t{}\t{}\t{}",
			row.index,
			row.offset,
			render_code(row.head.code),
			row.head.len,
			ptr_hex(row.head.old),
			row.head.sdna_nr,
			row.head.nr
		);
	}

	Ok(())
}

struct BlockRow {
	index: usize,
	offset: u64,
	head: BHead,
}

#[derive(serde::Serialize)]
struct BlockJson {
	index: usize,
	offset: u64,
	code: String,
	len: u64,
	old: String,
	sdna: u32,
	nr: u64,
}

impl From<&BlockRow> for BlockJson {
	fn from(row: &BlockRow) -> Self {
		Self {
			index: row.index,
			offset: row.offset,
			code: render_code(row.head.code),
			len: row.head.len,
			old: ptr_hex(row.head.old),
			sdna: row.head.sdna_nr,
			nr: row.head.nr,
		}
	}
}

#[derive(serde::Serialize)]
struct BlocksJson {
	path: String,
	bhead_layout: &'static str,
	blocks: Vec<BlockJson>,
}
