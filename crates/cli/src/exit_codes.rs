// Exit code registry (single source of truth)

/// Command completed.
pub const EXIT_SUCCESS: u8 = 0;
/// General failure (model rejected the operation).
pub const EXIT_ERROR: u8 = 1;
/// Bad arguments: row/column out of range.
pub const EXIT_USAGE: u8 = 2;
/// Load or save failed; the store's message goes to stderr.
pub const EXIT_IO: u8 = 3;
/// The table loaded but contains validation errors (`check`).
pub const EXIT_INVALID: u8 = 4;
