//! Archive assembly and output.

use std::borrow::Cow;
use std::io::Write;

use super::directory::{Directory, FileEntry};
use super::errors::{PackError, PackResult};
use super::header;
use super::member::{sanitize_member, ArchiveMember};
use super::options::{PackOptions, MAX_SAFE_INTEGER};
use super::path::split_member_name;

/// A packed archive: header plus payload buffers in input order.
///
/// Payloads borrowed from the input stay borrowed until [`PackedArchive::to_vec`]
/// or until they are written out.
#[derive(Debug, Clone)]
pub struct PackedArchive<'a> {
    header: Vec<u8>,
    payloads: Vec<Cow<'a, [u8]>>,
    directory: Directory,
}

impl<'a> PackedArchive<'a> {
    /// Header bytes (prefix, directory text and padding).
    pub fn header(&self) -> &[u8] {
        &self.header
    }

    pub fn payloads(&self) -> &[Cow<'a, [u8]>] {
        &self.payloads
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Length of the full image in bytes.
    pub fn total_len(&self) -> u64 {
        self.payloads
            .iter()
            .fold(self.header.len() as u64, |acc, p| acc + p.len() as u64)
    }

    /// `[header, payload_1, ..., payload_n]`.
    pub fn into_buffers(self) -> Vec<Cow<'a, [u8]>> {
        let mut buffers = Vec::with_capacity(self.payloads.len() + 1);
        buffers.push(Cow::Owned(self.header));
        buffers.extend(self.payloads);
        buffers
    }

    /// Concatenate header and payloads into one image.
    pub fn to_vec(&self) -> Vec<u8> {
        let capacity = self.header.len() + self.payloads.iter().map(|p| p.len()).sum::<usize>();
        let mut image = Vec::with_capacity(capacity);
        image.extend_from_slice(&self.header);
        for payload in &self.payloads {
            image.extend_from_slice(payload);
        }
        image
    }

    /// Write the image sequentially without concatenating it first.
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        writer.write_all(&self.header)?;
        for payload in &self.payloads {
            writer.write_all(payload)?;
        }
        writer.flush()
    }
}

/// Pack `members` into an archive, keeping header and payloads separate.
///
/// # Process
///
/// 1. Validate each member (name, payload shape)
/// 2. Compute integrity unless disabled
/// 3. Insert into the directory at the normalized path
/// 4. Check the cumulative payload size
/// 5. Encode the header
///
/// # Errors
///
/// Any invalid member, rejected name or path collision aborts the call, as
/// does exceeding `options.max_archive_bytes` (capped at 2^53 - 1).
pub fn pack_archive<'a, I>(members: I, options: &PackOptions) -> PackResult<PackedArchive<'a>>
where
    I: IntoIterator<Item = ArchiveMember<'a>>,
{
    let mut directory = Directory::new();
    let mut payloads: Vec<Cow<'a, [u8]>> = Vec::new();
    let mut byte_offset: u64 = 0;

    for (index, member) in members.into_iter().enumerate() {
        let member = sanitize_member(member, index, options.integrity)?;

        let components =
            split_member_name(&member.name).map_err(|reason| PackError::InvalidPath {
                index,
                name: member.name.to_string(),
                reason,
            })?;

        let size = member.buffer.len() as u64;
        directory
            .insert(
                &components,
                FileEntry {
                    size,
                    offset: byte_offset.to_string(),
                    integrity: member.integrity,
                },
            )
            .map_err(|conflict| PackError::DuplicatePath {
                index,
                name: member.name.to_string(),
                conflict,
            })?;

        tracing::debug!(
            index,
            name = %member.name,
            size,
            offset = byte_offset,
            "added archive member"
        );

        byte_offset = byte_offset.saturating_add(size);
        payloads.push(member.buffer);
    }

    let limit = effective_limit(options);
    if byte_offset > limit {
        return Err(PackError::ArchiveTooLarge {
            total_bytes: byte_offset,
            limit,
        });
    }

    let header = header::encode_header(directory.root())?;

    tracing::debug!(
        members = payloads.len(),
        header_bytes = header.len(),
        payload_bytes = byte_offset,
        "packed archive"
    );

    Ok(PackedArchive {
        header,
        payloads,
        directory,
    })
}

/// The configured ceiling, never above [`MAX_SAFE_INTEGER`].
fn effective_limit(options: &PackOptions) -> u64 {
    options.max_archive_bytes.min(MAX_SAFE_INTEGER)
}

/// Pack `members` and return `[header, payload_1, ..., payload_n]` without
/// concatenating them.
pub fn pack_buffers<'a, I>(members: I, options: &PackOptions) -> PackResult<Vec<Cow<'a, [u8]>>>
where
    I: IntoIterator<Item = ArchiveMember<'a>>,
{
    pack_archive(members, options).map(PackedArchive::into_buffers)
}

/// Pack `members` into a single archive image.
///
/// # Example
///
/// ```
/// use asar_pack::archive::{pack, ArchiveMember, PackOptions};
///
/// let image = pack(
///     [ArchiveMember::new("a.txt", "hi")],
///     &PackOptions::default().without_integrity(),
/// )
/// .unwrap();
///
/// let directory = br#"{"files":{"a.txt":{"size":2,"offset":"0"}}}"#;
/// assert_eq!(&image[16..16 + directory.len()], directory);
/// assert!(image.ends_with(b"hi"));
/// ```
pub fn pack<'a, I>(members: I, options: &PackOptions) -> PackResult<Vec<u8>>
where
    I: IntoIterator<Item = ArchiveMember<'a>>,
{
    pack_archive(members, options).map(|archive| archive.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::errors::{ErrorCode, PathConflict};

    #[test]
    fn test_offsets_accumulate_in_input_order() {
        let archive = pack_archive(
            [
                ArchiveMember::new("b", "12345"),
                ArchiveMember::new("a/c", ""),
                ArchiveMember::new("a/d", "xyz"),
            ],
            &PackOptions::default().without_integrity(),
        )
        .unwrap();

        let dir = archive.directory();
        assert_eq!(dir.get(&["b"]).unwrap().offset, "0");
        assert_eq!(dir.get(&["a", "c"]).unwrap().offset, "5");
        assert_eq!(dir.get(&["a", "d"]).unwrap().offset, "5");
        assert_eq!(dir.get(&["a", "d"]).unwrap().size, 3);
    }

    #[test]
    fn test_buffers_keep_borrowed_payloads() {
        let data = vec![9u8; 64];
        let buffers = pack_buffers(
            [ArchiveMember::new("blob", &data)],
            &PackOptions::default(),
        )
        .unwrap();
        assert_eq!(buffers.len(), 2);
        assert!(matches!(buffers[0], Cow::Owned(_)));
        assert!(matches!(buffers[1], Cow::Borrowed(_)));
        assert_eq!(buffers[1].as_ptr(), data.as_ptr());
    }

    #[test]
    fn test_duplicate_after_normalization() {
        let err = pack(
            [ArchiveMember::new("./world", ""), ArchiveMember::new("world", "")],
            &PackOptions::default(),
        )
        .unwrap_err();
        match err {
            PackError::DuplicatePath {
                index,
                name,
                conflict,
            } => {
                assert_eq!(index, 1);
                assert_eq!(name, "world");
                assert_eq!(conflict, PathConflict::Duplicate);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_limit_is_checked_on_payload_total() {
        let options = PackOptions {
            integrity: false,
            max_archive_bytes: 4,
        };
        let ok = pack([ArchiveMember::new("a", "1234")], &options);
        assert!(ok.is_ok());

        let err = pack(
            [ArchiveMember::new("a", "123"), ArchiveMember::new("b", "45")],
            &options,
        )
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ArchiveTooLarge);
    }

    #[test]
    fn test_limit_above_safe_integer_is_capped() {
        let options = PackOptions {
            integrity: false,
            max_archive_bytes: u64::MAX,
        };
        assert_eq!(effective_limit(&options), MAX_SAFE_INTEGER);
        assert_eq!(effective_limit(&PackOptions::default()), MAX_SAFE_INTEGER);

        let small = PackOptions {
            integrity: false,
            max_archive_bytes: 10,
        };
        assert_eq!(effective_limit(&small), 10);
    }

    #[test]
    fn test_write_to_matches_to_vec() {
        let archive = pack_archive(
            [ArchiveMember::new("x", "abc"), ArchiveMember::new("y/z", "de")],
            &PackOptions::default(),
        )
        .unwrap();
        let mut written = Vec::new();
        archive.write_to(&mut written).unwrap();
        assert_eq!(written, archive.to_vec());
        assert_eq!(written.len() as u64, archive.total_len());
    }
}
