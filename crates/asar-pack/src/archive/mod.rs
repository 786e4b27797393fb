//! ASAR archive packing.
//!
//! An archive is a length-prefixed JSON directory header followed by the
//! member payloads, concatenated in input order:
//!
//! ```text
//! [16-byte size prefix][directory JSON][1..=4 zero bytes][payload 1][payload 2]...
//! ```
//!
//! Each file record in the directory carries its `size`, its `offset` from the
//! end of the header (a decimal string, exact beyond 2^53) and, unless disabled,
//! an `integrity` record with SHA-256 digests of the whole payload and of each
//! 4 MiB block.
//!
//! # Determinism
//!
//! Output depends only on the members and options: the same input always
//! produces the same bytes. Directory entries appear in insertion order.
//!
//! # Modules
//!
//! - [`mod@pack`]: entry points (`pack`, `pack_buffers`, `pack_archive`)
//! - [`member`]: member input and validation
//! - [`path`]: member name splitting
//! - [`integrity`]: block-chunked SHA-256
//! - [`directory`]: directory tree
//! - [`header`]: header encoding
//! - [`options`]: pack options
//! - [`errors`]: error types

pub mod directory;
pub mod errors;
pub mod header;
pub mod integrity;
pub mod member;
pub mod options;
pub mod pack;
pub mod path;

// Re-exports for convenience
pub use directory::{Directory, DirectoryNode, FileEntry};
pub use errors::{ErrorCode, PackError, PackResult, PathConflict, PathViolation};
pub use header::{encode_header, HeaderSizes, PREFIX_LEN};
pub use integrity::{Integrity, ALGORITHM, BLOCK_SIZE};
pub use member::{ArchiveMember, MemberData};
pub use options::{PackOptions, PackOptionsOverrides, MAX_SAFE_INTEGER};
pub use pack::{pack, pack_archive, pack_buffers, PackedArchive};
pub use path::split_member_name;
