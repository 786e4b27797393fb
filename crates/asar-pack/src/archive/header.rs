//! Archive header encoding.
//!
//! ```text
//! offset 0   : u32 LE = 4
//! offset 4   : u32 LE = L + 8 + padding
//! offset 8   : u32 LE = L + 4 + padding
//! offset 12  : u32 LE = L              (directory text length)
//! offset 16  : L bytes of directory JSON
//! offset 16+L: padding zero bytes (1..=4)
//! ```
//!
//! The prefix is two nested length-prefixed envelopes around the directory
//! text. Readers of the format depend on all four values.

use super::directory::DirectoryNode;
use super::errors::{PackError, PackResult};

/// Length of the fixed size prefix.
pub const PREFIX_LEN: usize = 16;

/// Sizes recorded in the header prefix, all derived from the directory length.
///
/// Only built by [`HeaderSizes::for_directory`] or [`HeaderSizes::parse`], so
/// the prefix fields always fit in a `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderSizes {
    directory_len: u32,
    padding: u32,
}

impl HeaderSizes {
    /// Derive the sizes for a directory text of `directory_len` bytes.
    pub fn for_directory(directory_len: usize) -> PackResult<Self> {
        let too_large = || PackError::HeaderTooLarge {
            directory_bytes: directory_len,
        };
        let len = u32::try_from(directory_len).map_err(|_| too_large())?;
        let padding = 4 - (len % 4);
        // The outer envelope is the largest field; it must fit too.
        len.checked_add(8 + padding).ok_or_else(too_large)?;
        Ok(Self {
            directory_len: len,
            padding,
        })
    }

    /// Byte length of the directory text (L).
    pub fn directory_len(&self) -> u32 {
        self.directory_len
    }

    /// Zero bytes after the directory text, in `1..=4`.
    pub fn padding(&self) -> u32 {
        self.padding
    }

    /// The four prefix fields, in order.
    pub fn fields(&self) -> [u32; 4] {
        let padded = self.directory_len + self.padding;
        [4, padded + 8, padded + 4, self.directory_len]
    }

    /// Total header length including prefix and padding.
    pub fn header_len(&self) -> usize {
        PREFIX_LEN + self.directory_len as usize + self.padding as usize
    }

    pub fn encode_prefix(&self) -> [u8; PREFIX_LEN] {
        let mut prefix = [0u8; PREFIX_LEN];
        for (chunk, field) in prefix.chunks_exact_mut(4).zip(self.fields()) {
            chunk.copy_from_slice(&field.to_le_bytes());
        }
        prefix
    }

    /// Decode and cross-check a prefix produced by [`HeaderSizes::encode_prefix`].
    pub fn parse(prefix: &[u8]) -> Option<Self> {
        let prefix = prefix.get(..PREFIX_LEN)?;
        let mut fields = [0u32; 4];
        for (field, chunk) in fields.iter_mut().zip(prefix.chunks_exact(4)) {
            *field = u32::from_le_bytes(chunk.try_into().ok()?);
        }
        let sizes = Self::for_directory(fields[3] as usize).ok()?;
        (sizes.fields() == fields).then_some(sizes)
    }
}

/// Serialize the directory tree into its header bytes.
pub fn encode_header(root: &DirectoryNode) -> PackResult<Vec<u8>> {
    let text = serde_json::to_vec(root)?;
    let sizes = HeaderSizes::for_directory(text.len())?;

    tracing::debug!(
        directory_bytes = sizes.directory_len,
        padding = sizes.padding,
        "encoded archive header"
    );

    let mut header = Vec::with_capacity(sizes.header_len());
    header.extend_from_slice(&sizes.encode_prefix());
    header.extend_from_slice(&text);
    header.resize(sizes.header_len(), 0);
    Ok(header)
}
