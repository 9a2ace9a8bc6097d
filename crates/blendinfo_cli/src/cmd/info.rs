use std::path::{Path, PathBuf};

use blendinfo::blend::{BlendSummary, Result, render_code};

use crate::cmd::Options;
use crate::cmd::util::{emit_json, open};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Print header fields, block statistics and named records.
pub fn run(args: Args, options: &Options) -> Result<()> {
	let Args { path, json } = args;

	let summary = open(&path, options)?.summarize()?;

	if json {
		emit_json(&InfoJson::new(&path, &summary));
		return Ok(());
	}

	let header = summary.header;
	println!("path: {}", path.display());
	println!("compression: {}", summary.compression.as_str());
	println!("header_size: {}", header.header_size);
	println!("format_version: {}", header.format_version.number());
	println!("version: {} ({})", header.version, header.version_label());
	println!("subversion: {}", summary.subversion.map_or_else(|| "-".to_owned(), |value| value.to_string()));
	println!("bhead_layout: {}", summary.layout.as_str());
	println!("endianness: {}", header.endianness.as_str());
	println!("pointer_size: {}", header.pointer_size.bytes());
	println!("block_count: {}", summary.stats.block_count);
	println!("payload_bytes: {}", summary.stats.payload_bytes);
	println!("has_dna1: {}", summary.stats.has_dna1);
	println!("has_endb: {}", summary.stats.has_endb);
	println!("last_code: {}", render_code(summary.stats.last_code));
	match summary.thumbnail {
		Some((width, height)) => println!("thumbnail: {width}x{height}"),
		None => println!("thumbnail: none"),
	}

	println!("scenes:");
	for scene in &summary.scenes {
		println!("  {}: {}..{}", scene.name, scene.start_frame, scene.end_frame);
	}

	println!("top_codes:");
	for (code, count) in summary.stats.top_codes().into_iter().take(12) {
		println!("  {}: {}", render_code(code), count);
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct ThumbnailJson {
	width: u32,
	height: u32,
}

#[derive(serde::Serialize)]
struct SceneJson {
	name: String,
	start_frame: i32,
	end_frame: i32,
}

#[derive(serde::Serialize)]
struct CodeCountJson {
	code: String,
	count: u32,
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	compression: &'static str,
	header_size: usize,
	format_version: u16,
	version: u16,
	version_label: String,
	subversion: Option<u16>,
	bhead_layout: &'static str,
	endianness: &'static str,
	pointer_size: usize,
	block_count: u32,
	payload_bytes: u64,
	has_dna1: bool,
	has_endb: bool,
	last_code: String,
	thumbnail: Option<ThumbnailJson>,
	scenes: Vec<SceneJson>,
	top_codes: Vec<CodeCountJson>,
}

impl InfoJson {
	fn new(path: &Path, summary: &BlendSummary) -> Self {
		let header = summary.header;
		Self {
			path: path.display().to_string(),
			compression: summary.compression.as_str(),
			header_size: header.header_size,
			format_version: header.format_version.number(),
			version: header.version,
			version_label: header.version_label(),
			subversion: summary.subversion,
			bhead_layout: summary.layout.as_str(),
			endianness: header.endianness.as_str(),
			pointer_size: header.pointer_size.bytes(),
			block_count: summary.stats.block_count,
			payload_bytes: summary.stats.payload_bytes,
			has_dna1: summary.stats.has_dna1,
			has_endb: summary.stats.has_endb,
			last_code: render_code(summary.stats.last_code),
			thumbnail: summary.thumbnail.map(|(width, height)| ThumbnailJson { width, height }),
			scenes: summary
				.scenes
				.iter()
				.map(|scene| SceneJson {
					name: scene.name.clone(),
					start_frame: scene.start_frame,
					end_frame: scene.end_frame,
				})
				.collect(),
			top_codes: summary
				.stats
				.top_codes()
				.into_iter()
				.map(|(code, count)| CodeCountJson {
					code: render_code(code),
					count,
				})
				.collect(),
		}
	}
}

#[cfg(test)]
mod tests;
