mod bhead;
mod block;
mod bytes;
mod compression;
mod error;
mod extract;
mod file;
mod globals;
mod header;
mod thumb;

/// Block header record, layouts, and the terminator code.
pub use bhead::{BHead, BHeadLayout, ENDB};
/// Lazy block directory scanner.
pub use block::{BlockScanner, DEFAULT_PAYLOAD_LIMIT};
/// Block code label helpers.
pub use bytes::{parse_block_code, render_code};
/// Compression detection and stream decoding.
pub use compression::{BlendStream, Compression, GZIP_MAGIC, ZSTD_MAGIC, decode_stream};
/// Error and result aliases.
pub use error::{BlendError, ErrorKind, Result};
/// Named-record extraction for render info.
pub use extract::{REND, SceneRange, extract_payloads, read_scene_ranges, scene_ranges};
/// File abstraction, block statistics, and one-pass summaries.
pub use file::{BlendFile, BlendSummary, BlockStats};
/// File-globals subversion extraction.
pub use globals::{GLOB, LAST_VERSION_WITHOUT_SUBVERSION, parse_subversion, read_subversion};
/// File header representation.
pub use header::{BlendHeader, Endianness, FormatVersion, PointerSize};
/// Embedded preview extraction.
pub use thumb::{TEST, Thumbnail, read_thumbnail};
