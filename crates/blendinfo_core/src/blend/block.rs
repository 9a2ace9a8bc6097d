use std::io::Read;

use crate::blend::bytes::{read_full, skip};
use crate::blend::{BHead, BHeadLayout, BlendError, BlendHeader, Endianness, Result};

/// Default ceiling for [`BlockScanner::read_payload`].
pub const DEFAULT_PAYLOAD_LIMIT: u64 = 512 * 1024 * 1024;

const MAX_BHEAD_SIZE: usize = BHeadLayout::Large8.byte_size();

#[derive(Debug, Clone, Copy)]
struct Pending {
	at: u64,
	len: u64,
}

/// Pull-based iterator over block headers in a stream.
///
/// Payloads are skipped lazily: the payload of the header produced last is
/// discarded on the next pull unless [`Self::read_payload`] takes it first.
/// Iteration ends after an `ENDB` block, at a clean EOF between blocks, or
/// after the first error.
pub struct BlockScanner<R> {
	reader: R,
	layout: BHeadLayout,
	endianness: Endianness,
	offset: u64,
	last_offset: u64,
	pending: Option<Pending>,
	payload_limit: u64,
	done: bool,
}

impl<R: Read> BlockScanner<R> {
	/// Create a scanner over `reader`, positioned on the first block header.
	pub fn new(reader: R, layout: BHeadLayout, endianness: Endianness) -> Self {
		Self {
			reader,
			layout,
			endianness,
			offset: 0,
			last_offset: 0,
			pending: None,
			payload_limit: DEFAULT_PAYLOAD_LIMIT,
			done: false,
		}
	}

	/// Create a scanner for a stream that `header` was just sniffed from.
	pub fn after_header(reader: R, header: BlendHeader) -> Result<Self> {
		let layout = header.layout()?;
		Ok(Self::new(reader, layout, header.endianness).starting_at(header.header_size as u64))
	}

	/// Report offsets relative to a stream that already consumed `offset` bytes.
	pub fn starting_at(mut self, offset: u64) -> Self {
		self.offset = offset;
		self.last_offset = offset;
		self
	}

	/// Set the ceiling for payload reads.
	pub fn with_payload_limit(mut self, limit: u64) -> Self {
		self.payload_limit = limit;
		self
	}

	/// Active block-header layout.
	pub fn layout(&self) -> BHeadLayout {
		self.layout
	}

	/// Byte order used for multi-byte fields.
	pub fn endianness(&self) -> Endianness {
		self.endianness
	}

	/// Stream offset of the next unread byte.
	pub fn offset(&self) -> u64 {
		self.offset
	}

	/// Stream offset where the header produced last started.
	pub fn last_offset(&self) -> u64 {
		self.last_offset
	}

	/// Read the payload of the header produced last instead of skipping it.
	pub fn read_payload(&mut self) -> Result<Vec<u8>> {
		let pending = self.pending.ok_or(BlendError::NoPendingPayload)?;
		if pending.len > self.payload_limit {
			return Err(BlendError::PayloadTooLarge {
				at: pending.at,
				len: pending.len,
				limit: self.payload_limit,
			});
		}
		self.pending = None;

		let len = usize::try_from(pending.len).map_err(|_| BlendError::PayloadTooLarge {
			at: pending.at,
			len: pending.len,
			limit: self.payload_limit,
		})?;
		let mut payload = vec![0_u8; len];
		let got = read_full(&mut self.reader, &mut payload)?;
		self.offset += got as u64;
		if got < len {
			self.done = true;
			return Err(BlendError::TruncatedPayload {
				at: pending.at,
				len: pending.len,
				avail: got as u64,
			});
		}

		Ok(payload)
	}

	/// Release the underlying stream.
	pub fn into_inner(self) -> R {
		self.reader
	}

	fn skip_pending(&mut self) -> Result<()> {
		let Some(pending) = self.pending.take() else {
			return Ok(());
		};

		let skipped = skip(&mut self.reader, pending.len)?;
		self.offset += skipped;
		if skipped < pending.len {
			return Err(BlendError::TruncatedPayload {
				at: pending.at,
				len: pending.len,
				avail: skipped,
			});
		}
		Ok(())
	}

	fn next_head(&mut self) -> Result<Option<BHead>> {
		self.skip_pending()?;

		let size = self.layout.byte_size();
		let mut buf = [0_u8; MAX_BHEAD_SIZE];
		let got = read_full(&mut self.reader, &mut buf[..size])?;
		if got == 0 {
			tracing::debug!(offset = self.offset, "block stream ended without ENDB");
			return Ok(None);
		}
		if got < size {
			return Err(BlendError::UnexpectedEof {
				at: self.offset,
				need: size,
				rem: got,
			});
		}

		let head = self.layout.decode_at(&buf[..size], self.endianness, self.offset)?;
		self.last_offset = self.offset;
		self.offset += size as u64;
		self.pending = Some(Pending {
			at: self.offset,
			len: head.len,
		});

		tracing::trace!(
			offset = self.last_offset,
			code = ?head.code,
			len = head.len,
			sdna_nr = head.sdna_nr,
			nr = head.nr,
			"block header"
		);
		if head.is_endb() {
			tracing::debug!(offset = self.last_offset, "reached ENDB");
			self.done = true;
		}

		Ok(Some(head))
	}
}

impl<R: Read> Iterator for BlockScanner<R> {
	type Item = Result<BHead>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}

		match self.next_head() {
			Ok(Some(head)) => Some(Ok(head)),
			Ok(None) => {
				self.done = true;
				None
			}
			Err(err) => {
				self.done = true;
				Some(Err(err))
			}
		}
	}
}

impl<R: Read> std::iter::FusedIterator for BlockScanner<R> {}
