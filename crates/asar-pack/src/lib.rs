pub mod archive;

// Convenience re-exports
pub use archive::{
    pack, pack_archive, pack_buffers, ArchiveMember, Directory, DirectoryNode, ErrorCode,
    FileEntry, HeaderSizes, Integrity, MemberData, PackError, PackOptions, PackOptionsOverrides,
    PackResult, PackedArchive, PathConflict, PathViolation,
};
