//! Member name splitting.
//!
//! Names use either separator and may start with a root marker (`/`, `\`,
//! `C:`, `C:\`). The marker is consumed and contributes no component.
//! Parsing does not depend on the host platform.

use super::errors::PathViolation;

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Split off the root marker, returning `(root, rest)`.
fn split_root(name: &str) -> (&str, &str) {
    let bytes = name.as_bytes();

    let root_len = if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        if name[2..].starts_with(is_separator) {
            3
        } else {
            2
        }
    } else {
        name.len() - name.trim_start_matches(is_separator).len()
    };

    name.split_at(root_len)
}

/// Split a member name into root-to-leaf components.
///
/// Components are taken leaf first. `..` is always rejected. `.` terminates the
/// walk only when it is the outermost component and there is no root marker
/// (`./a`); in any other position it is rejected.
pub fn split_member_name(name: &str) -> Result<Vec<&str>, PathViolation> {
    let (root, rest) = split_root(name);

    let mut components = Vec::new();
    let mut remaining = rest.rsplit(is_separator).filter(|c| !c.is_empty()).peekable();

    while let Some(component) = remaining.next() {
        match component {
            ".." => return Err(PathViolation::ParentDir),
            "." => {
                if remaining.peek().is_none() && root.is_empty() {
                    break;
                }
                return Err(PathViolation::CurrentDir);
            }
            _ => components.push(component),
        }
    }

    if components.is_empty() {
        return Err(PathViolation::NoFileName);
    }

    components.reverse();
    Ok(components)
}
