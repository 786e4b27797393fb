//! Archive member input and boundary validation.

use std::borrow::Cow;

use super::errors::{PackError, PackResult};
use super::integrity::{self, Integrity};

/// Payload of a member, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberData<'a> {
    /// Raw bytes, borrowed or owned.
    Bytes(Cow<'a, [u8]>),
    /// Text, stored as its UTF-8 encoding.
    Text(Cow<'a, str>),
    /// A window of `byte_length` bytes starting at `byte_offset` in `buffer`.
    View {
        buffer: &'a [u8],
        byte_offset: usize,
        byte_length: usize,
    },
}

impl<'a> MemberData<'a> {
    /// Resolve to the exact bytes this payload denotes.
    ///
    /// Borrowed input stays borrowed. A view outside its buffer is rejected.
    fn into_bytes(self) -> Result<Cow<'a, [u8]>, String> {
        match self {
            Self::Bytes(bytes) => Ok(bytes),
            Self::Text(Cow::Borrowed(text)) => Ok(Cow::Borrowed(text.as_bytes())),
            Self::Text(Cow::Owned(text)) => Ok(Cow::Owned(text.into_bytes())),
            Self::View {
                buffer,
                byte_offset,
                byte_length,
            } => byte_offset
                .checked_add(byte_length)
                .and_then(|end| buffer.get(byte_offset..end))
                .map(Cow::Borrowed)
                .ok_or_else(|| {
                    format!(
                        "view [{byte_offset}, +{byte_length}) is outside its {} byte buffer",
                        buffer.len()
                    )
                }),
        }
    }
}

impl<'a> From<&'a [u8]> for MemberData<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Bytes(Cow::Borrowed(bytes))
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for MemberData<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Self::Bytes(Cow::Borrowed(bytes.as_slice()))
    }
}

impl<'a> From<&'a Vec<u8>> for MemberData<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Self::Bytes(Cow::Borrowed(bytes.as_slice()))
    }
}

impl From<Vec<u8>> for MemberData<'_> {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(Cow::Owned(bytes))
    }
}

impl<'a> From<&'a str> for MemberData<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(Cow::Borrowed(text))
    }
}

impl From<String> for MemberData<'_> {
    fn from(text: String) -> Self {
        Self::Text(Cow::Owned(text))
    }
}

/// One named payload to be stored in the archive.
///
/// # Example
///
/// ```
/// use asar_pack::archive::{ArchiveMember, MemberData};
///
/// let bytes = vec![0u8; 30];
/// let member = ArchiveMember::new("lib/pack.js", "export {}");
/// let view = ArchiveMember::new(
///     "world",
///     MemberData::View { buffer: &bytes, byte_offset: 0, byte_length: 10 },
/// )
/// .with_integrity_source("world (canonical)");
/// # let _ = (member, view);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveMember<'a> {
    pub name: Cow<'a, str>,
    pub data: MemberData<'a>,
    /// Hashed instead of `data` when present
    pub integrity_source: Option<MemberData<'a>>,
}

impl<'a> ArchiveMember<'a> {
    pub fn new(name: impl Into<Cow<'a, str>>, data: impl Into<MemberData<'a>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
            integrity_source: None,
        }
    }

    pub fn with_integrity_source(mut self, source: impl Into<MemberData<'a>>) -> Self {
        self.integrity_source = Some(source.into());
        self
    }
}

/// A member that passed validation. Its buffer is not modified afterwards.
#[derive(Debug, Clone)]
pub(crate) struct SanitizedMember<'a> {
    pub name: Cow<'a, str>,
    pub buffer: Cow<'a, [u8]>,
    pub integrity: Option<Integrity>,
}

pub(crate) fn sanitize_member(
    member: ArchiveMember<'_>,
    index: usize,
    with_integrity: bool,
) -> PackResult<SanitizedMember<'_>> {
    let ArchiveMember {
        name,
        data,
        integrity_source,
    } = member;

    if name.is_empty() {
        return Err(PackError::InvalidMember {
            index,
            reason: "`name` must be a non empty string".into(),
        });
    }

    let buffer = data.into_bytes().map_err(|e| PackError::InvalidMember {
        index,
        reason: format!("`data`: {e}"),
    })?;

    let integrity = if with_integrity {
        match integrity_source {
            Some(source) => {
                let source = source.into_bytes().map_err(|e| PackError::InvalidMember {
                    index,
                    reason: format!("`integrity_source`: {e}"),
                })?;
                Some(integrity::compute(&source))
            }
            None => Some(integrity::compute(&buffer)),
        }
    } else {
        None
    };

    Ok(SanitizedMember {
        name,
        buffer,
        integrity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::errors::ErrorCode;

    #[test]
    fn test_text_is_utf8_encoded() {
        let member = sanitize_member(ArchiveMember::new("a", "h\u{e9}"), 0, false).unwrap();
        assert_eq!(member.buffer.as_ref(), &[b'h', 0xc3, 0xa9]);
        assert!(member.integrity.is_none());
    }

    #[test]
    fn test_borrowed_bytes_are_not_copied() {
        let data = vec![1u8, 2, 3];
        let member = sanitize_member(ArchiveMember::new("a", &data), 0, false).unwrap();
        assert!(matches!(member.buffer, Cow::Borrowed(_)));
        assert_eq!(member.buffer.as_ptr(), data.as_ptr());
    }

    #[test]
    fn test_view_selects_window() {
        let buffer: Vec<u8> = (0u8..30).collect();
        let member = sanitize_member(
            ArchiveMember::new(
                "world",
                MemberData::View {
                    buffer: &buffer,
                    byte_offset: 5,
                    byte_length: 10,
                },
            ),
            0,
            false,
        )
        .unwrap();
        assert_eq!(member.buffer.as_ref(), &buffer[5..15]);
    }

    #[test]
    fn test_view_outside_buffer_rejected() {
        let buffer = [0u8; 30];
        for (byte_offset, byte_length) in [(0, 31), (25, 10), (usize::MAX, 2)] {
            let err = sanitize_member(
                ArchiveMember::new(
                    "world",
                    MemberData::View {
                        buffer: &buffer,
                        byte_offset,
                        byte_length,
                    },
                ),
                4,
                true,
            )
            .unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidMember);
            assert_eq!(err.member_index(), Some(4));
        }
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = sanitize_member(ArchiveMember::new("", "x"), 2, true).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidMember);
        assert!(err.to_string().contains("members[2]"));
    }

    #[test]
    fn test_integrity_source_is_hashed_instead_of_data() {
        let member = sanitize_member(
            ArchiveMember::new("a", "payload").with_integrity_source("abc"),
            0,
            true,
        )
        .unwrap();
        let integrity = member.integrity.unwrap();
        assert_eq!(
            integrity.hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(member.buffer.as_ref(), b"payload");
    }

    #[test]
    fn test_integrity_source_ignored_when_disabled() {
        let buffer = [0u8; 4];
        let member = sanitize_member(
            ArchiveMember::new("a", "payload").with_integrity_source(MemberData::View {
                buffer: &buffer,
                byte_offset: 8,
                byte_length: 1,
            }),
            0,
            false,
        )
        .unwrap();
        assert!(member.integrity.is_none());
    }
}
