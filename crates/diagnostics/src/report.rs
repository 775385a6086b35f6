//! The standardized failure channel.
//!
//! Every failure, whatever its origin, is reported as exactly one line
//! `ERROR -- <message>\n` on the diagnostic stream, followed by process exit
//! with [`EXIT_STATUS`].

use std::io::{self, Write};

/// Exit status for every failure.
pub const EXIT_STATUS: i32 = 66;

/// Prefix of the failure line.
pub const PREFIX: &str = "ERROR -- ";

/// Format the failure line for `message`, including the trailing newline.
///
/// The message is embedded verbatim (no escaping of control characters).
pub fn error_line(message: &str) -> String {
    format!("{PREFIX}{message}\n")
}

/// Write the failure line for `message` to `out` in a single write, then flush.
pub fn write_error<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    out.write_all(error_line(message).as_bytes())?;
    out.flush()
}
