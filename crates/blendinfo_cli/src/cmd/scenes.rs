use std::path::PathBuf;

use blendinfo::blend::Result;

use crate::cmd::Options;
use crate::cmd::util::{emit_json, open};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Print the frame range of every scene with render info.
pub fn run(args: Args, options: &Options) -> Result<()> {
	let Args { path, json } = args;
	let scenes = open(&path, options)?.scene_ranges()?;

	if json {
		let payload = ScenesJson {
			path: path.display().to_string(),
			scenes: scenes
				.into_iter()
				.map(|scene| SceneJson {
					name: scene.name,
					start_frame: scene.start_frame,
					end_frame: scene.end_frame,
				})
				.collect(),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("start\tend\tname");
	for scene in &scenes {
		println!("{}\t{}\t{}", scene.start_frame, scene.end_frame, scene.name);
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct SceneJson {
	name: String,
	start_frame: i32,
	end_frame: i32,
}

#[derive(serde::Serialize)]
struct ScenesJson {
	path: String,
	scenes: Vec<SceneJson>,
}
