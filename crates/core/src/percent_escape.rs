//! Percent escape processing for NOSJ complex strings.
//!
//! A `%` followed by two hex digits (`%XY`) represents the single raw byte
//! `0xXY`. Every other character passes through as its UTF-8 bytes. A `%` not
//! followed by two hex digits is an error.

/// A percent escape validation error at a specific byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PercentEscapeError {
    /// Byte offset of the `%` within the content string.
    pub offset: usize,
    /// Human-readable description of the error.
    pub message: String,
}

/// Decode percent escapes in `content` into raw bytes.
///
/// Returns `Err(errors)` listing every malformed escape. Unlike a lenient
/// decoder, nothing is returned for partially valid input.
pub fn decode_percent_escapes(content: &str) -> Result<Vec<u8>, Vec<PercentEscapeError>> {
    let mut output = Vec::with_capacity(content.len());
    let mut errors = Vec::new();
    let bytes = content.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            output.push(bytes[i]);
            i += 1;
            continue;
        }
        if i + 2 < bytes.len() {
            let (h1, h2) = (bytes[i + 1], bytes[i + 2]);
            if h1.is_ascii_hexdigit() && h2.is_ascii_hexdigit() {
                output.push(hex_pair_to_byte(h1, h2));
            } else {
                errors.push(invalid_escape(content, i));
            }
            i += 3;
        } else {
            errors.push(incomplete_escape(i));
            break;
        }
    }

    if errors.is_empty() {
        Ok(output)
    } else {
        Err(errors)
    }
}

/// Encode `bytes` so that every byte outside `[A-Za-z0-9]` becomes `%XY`.
pub fn encode_percent_escapes(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(bytes.len() * 3);
    for &b in bytes {
        if b.is_ascii_alphanumeric() {
            out.push(b as char);
        } else {
            out.push('%');
            out.push(HEX[usize::from(b >> 4)] as char);
            out.push(HEX[usize::from(b & 0x0F)] as char);
        }
    }
    out
}

fn invalid_escape(content: &str, offset: usize) -> PercentEscapeError {
    // The two bytes after '%' may split a multi-byte character.
    let shown = String::from_utf8_lossy(&content.as_bytes()[offset..offset + 3]);
    PercentEscapeError {
        offset,
        message: format!("invalid escape '{shown}' at offset {offset}"),
    }
}

fn incomplete_escape(offset: usize) -> PercentEscapeError {
    PercentEscapeError {
        offset,
        message: format!("incomplete escape at offset {offset}"),
    }
}

fn hex_pair_to_byte(h1: u8, h2: u8) -> u8 {
    (hex_digit_value(h1) << 4) | hex_digit_value(h2)
}

fn hex_digit_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'A'..=b'F' => b - b'A' + 10,
        b'a'..=b'f' => b - b'a' + 10,
        _ => unreachable!("hex_digit_value called with non-hex byte: {}", b),
    }
}
