//! Lightweight reader for Blender `.blend` headers and block directories.
//!
//! Sniffs the file header, walks block headers without decoding payloads,
//! and pulls out the few records readable without the SDNA schema.

/// Header sniffing, block scanning, and named-record extraction.
pub mod blend;
