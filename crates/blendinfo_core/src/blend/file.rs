use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::blend::block::DEFAULT_PAYLOAD_LIMIT;
use crate::blend::{
	BHead, BHeadLayout, BlendHeader, BlendStream, BlockScanner, Compression, GLOB, LAST_VERSION_WITHOUT_SUBVERSION, REND, Result, SceneRange, TEST,
	Thumbnail, decode_stream, parse_subversion, read_thumbnail, scene_ranges,
};

/// Opened blend stream with its sniffed header.
///
/// Scanning consumes the stream; open the file again to scan it twice.
pub struct BlendFile {
	/// Parsed file header.
	pub header: BlendHeader,
	/// Compression mode detected for source bytes.
	pub compression: Compression,
	layout: BHeadLayout,
	stream: BlendStream,
	payload_limit: u64,
}

impl BlendFile {
	/// Open a blend file from disk, decompressing it on the fly if needed.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		tracing::debug!(path = %path.display(), "opening blend file");
		let file = File::open(path)?;
		Self::from_buf_reader(BufReader::new(file))
	}

	/// Wrap an arbitrary stream positioned at the start of a blend file.
	pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Result<Self> {
		Self::from_buf_reader(BufReader::new(reader))
	}

	fn from_buf_reader<R: std::io::BufRead + Send + 'static>(reader: R) -> Result<Self> {
		let (compression, mut stream) = decode_stream(reader)?;
		let header = BlendHeader::sniff(&mut stream)?;
		let layout = header.layout()?;

		Ok(Self {
			header,
			compression,
			layout,
			stream,
			payload_limit: DEFAULT_PAYLOAD_LIMIT,
		})
	}

	/// Set the ceiling for payload reads made by this file's scanners.
	pub fn with_payload_limit(mut self, limit: u64) -> Self {
		self.payload_limit = limit;
		self
	}

	/// Block-header layout selected by the header.
	pub fn layout(&self) -> BHeadLayout {
		self.layout
	}

	/// Iterate block headers in file order.
	pub fn blocks(self) -> BlockScanner<BlendStream> {
		BlockScanner::new(self.stream, self.layout, self.header.endianness)
			.starting_at(self.header.header_size as u64)
			.with_payload_limit(self.payload_limit)
	}

	/// Return all `REND` scene ranges.
	pub fn scene_ranges(self) -> Result<Vec<SceneRange>> {
		scene_ranges(&mut self.blocks())
	}

	/// Return the embedded preview image, if any.
	pub fn thumbnail(self) -> Result<Option<Thumbnail>> {
		read_thumbnail(&mut self.blocks())
	}

	/// Scan basic block distribution statistics.
	pub fn scan_block_stats(self) -> Result<BlockStats> {
		let mut stats = BlockStats::default();
		for head in self.blocks() {
			stats.record(&head?);
		}
		Ok(stats)
	}

	/// Collect header, statistics and every named record in one pass.
	pub fn summarize(self) -> Result<BlendSummary> {
		let header = self.header;
		let compression = self.compression;
		let layout = self.layout;
		let endianness = header.endianness;

		let mut stats = BlockStats::default();
		let mut scenes = Vec::new();
		let mut thumbnail = None;
		let mut subversion = None;
		let mut leading_rend = true;

		let mut blocks = self.blocks();
		while let Some(head) = blocks.next() {
			let head = head?;
			stats.record(&head);

			if head.code == REND {
				scenes.push(SceneRange::decode(&blocks.read_payload()?, endianness)?);
			} else if head.code == TEST && leading_rend {
				thumbnail = Thumbnail::decode(&blocks.read_payload()?, endianness).map(|thumb| (thumb.width, thumb.height));
			} else if head.code == GLOB && subversion.is_none() && header.version > LAST_VERSION_WITHOUT_SUBVERSION {
				subversion = parse_subversion(&blocks.read_payload()?);
			}

			if head.code != REND {
				leading_rend = false;
			}
		}

		Ok(BlendSummary {
			header,
			compression,
			layout,
			stats,
			scenes,
			thumbnail,
			subversion,
		})
	}
}

/// Aggregate block-level counts from a linear scan.
#[derive(Debug, Clone, Default)]
pub struct BlockStats {
	/// Number of parsed blocks.
	pub block_count: u32,
	/// Whether a `DNA1` block was seen.
	pub has_dna1: bool,
	/// Whether an `ENDB` terminator block was seen.
	pub has_endb: bool,
	/// Code of the final block visited.
	pub last_code: [u8; 4],
	/// Total declared payload bytes.
	pub payload_bytes: u64,
	/// Frequency table by block code.
	pub codes: HashMap<[u8; 4], u32>,
}

impl BlockStats {
	/// Account for one block header.
	pub fn record(&mut self, head: &BHead) {
		self.block_count += 1;
		self.last_code = head.code;
		self.payload_bytes += head.len;
		*self.codes.entry(head.code).or_insert(0) += 1;
		if head.code == *b"DNA1" {
			self.has_dna1 = true;
		}
		if head.is_endb() {
			self.has_endb = true;
		}
	}

	/// Code counts ordered by frequency, then by code.
	pub fn top_codes(&self) -> Vec<([u8; 4], u32)> {
		let mut entries: Vec<_> = self.codes.iter().map(|(code, count)| (*code, *count)).collect();
		entries.sort_by(|left, right| right.1.cmp(&left.1).then_with(|| left.0.cmp(&right.0)));
		entries
	}
}

/// Everything cheaply knowable about a file without schema decoding.
#[derive(Debug, Clone)]
pub struct BlendSummary {
	/// Parsed file header.
	pub header: BlendHeader,
	/// Compression mode of the source.
	pub compression: Compression,
	/// Selected block-header layout.
	pub layout: BHeadLayout,
	/// Block statistics.
	pub stats: BlockStats,
	/// Render-info scene ranges.
	pub scenes: Vec<SceneRange>,
	/// Preview dimensions, when a valid preview is embedded.
	pub thumbnail: Option<(u32, u32)>,
	/// File subversion from the globals block.
	pub subversion: Option<u16>,
}
