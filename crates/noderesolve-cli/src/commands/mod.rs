pub mod parse;
pub mod resolve;
pub mod version;

/// Exit code when a specifier does not resolve or cannot be parsed.
pub const EXIT_NOT_FOUND: i32 = 1;
