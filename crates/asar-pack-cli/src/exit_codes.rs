//! Exit codes of the `asar-pack` binary.
//! Input rejected by the packer exits with `PackError::exit_code()` (1).

pub const SUCCESS: i32 = 0;
pub const INTERNAL_ERROR: i32 = 2; // I/O or configuration failure
