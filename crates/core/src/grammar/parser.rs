use super::{
    ast::{Map, Value},
    diag::{LineIndex, Span, codes},
};
use crate::{DEFAULT_MAX_DEPTH, error::NosjError, leaf::is_valid_key};

/// Parser settings.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct ParseConfig {
    /// Deepest map nesting accepted (top-level map = 1).
    pub max_depth: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseConfig {
    /// Override the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

// ─── Public API ─────────────────────────────────────────────────────────────

/// Parse a NOSJ document with default settings.
///
/// The result is always [`Value::Map`]; leaves inside it are left undecoded.
pub fn parse_str(input: &str) -> Result<Value, NosjError> {
    parse_document(input, &ParseConfig::default()).map(Value::Map)
}

/// Parse a NOSJ document and return its top-level map.
pub fn parse_document(input: &str, config: &ParseConfig) -> Result<Map, NosjError> {
    let map = Parser::new(input, config).parse()?;
    tracing::debug!(bytes = input.len(), pairs = map.len(), "parsed document");
    Ok(map)
}

// ─── Parser Implementation ─────────────────────────────────────────────────

/// Whitespace permitted around the top-level map only.
fn is_outer_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

/// Bytes that end a leaf token.
fn is_leaf_terminator(b: u8) -> bool {
    matches!(b, b',' | b'>' | b')')
}

/// Bytes that end a key run.
fn is_key_terminator(b: u8) -> bool {
    matches!(b, b':' | b'(' | b'<') || is_leaf_terminator(b)
}

/// Single left-to-right cursor over the input. Every production consumes
/// exactly the bytes it owns; there is no backtracking.
struct Parser<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, config: &ParseConfig) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            max_depth: config.max_depth,
        }
    }

    // ── Main productions ────────────────────────────────────────────────

    /// `document := outer-ws? map outer-ws? EOF`
    fn parse(mut self) -> Result<Map, NosjError> {
        self.skip_outer_ws();
        let map = self.parse_map(1)?;
        self.skip_outer_ws();
        if !self.at_end() {
            return Err(self.error(
                codes::PARSER_TRAILING_CONTENT,
                "trailing characters after top-level map".to_string(),
            ));
        }
        Ok(map)
    }

    /// `map := "(<" pairs? ">)"`
    fn parse_map(&mut self, depth: usize) -> Result<Map, NosjError> {
        if depth > self.max_depth {
            return Err(NosjError::DepthExceeded {
                limit: self.max_depth,
                span: Some(Span::new(self.pos, self.next_char_end())),
            });
        }
        self.expect(b'(')?;
        self.expect(b'<')?;

        let mut map = Map::new();
        if self.peek() == Some(b'>') {
            self.pos += 1;
            self.expect(b')')?;
            return Ok(map);
        }

        loop {
            let (key, value) = self.parse_pair(depth)?;
            map.insert(key, value);
            if self.peek() != Some(b',') {
                break;
            }
            self.pos += 1;
        }

        self.expect(b'>')?;
        self.expect(b')')?;
        Ok(map)
    }

    /// `pair := key ":" value`
    fn parse_pair(&mut self, depth: usize) -> Result<(&'a str, Value), NosjError> {
        let key = self.parse_key()?;
        self.expect(b':')?;
        let value = self.parse_value(depth)?;
        Ok((key, value))
    }

    /// `key := [a-z]+`
    ///
    /// The key is scanned as the whole run up to the next structural byte, so
    /// a key with a disallowed character is reported verbatim as an invalid
    /// key rather than as a missing separator.
    fn parse_key(&mut self) -> Result<&'a str, NosjError> {
        let start = self.pos;
        while self.peek().is_some_and(|b| !is_key_terminator(b)) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error(
                codes::PARSER_MISSING_KEY,
                format!("expected lowercase key but found '{}'", self.found()),
            ));
        }
        let key = &self.input[start..self.pos];
        if !is_valid_key(key) {
            tracing::trace!(offset = start, "invalid key");
            return Err(NosjError::InvalidKey {
                key: key.to_string(),
            });
        }
        Ok(key)
    }

    /// `value := map | leaf-token`
    fn parse_value(&mut self, depth: usize) -> Result<Value, NosjError> {
        if self.peek() == Some(b'(') {
            return self.parse_map(depth + 1).map(Value::Map);
        }
        let start = self.pos;
        while self.peek().is_some_and(|b| !is_leaf_terminator(b)) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error(
                codes::PARSER_MISSING_VALUE,
                format!("expected value but found '{}'", self.found()),
            ));
        }
        // Terminators are ASCII, so `pos` always lands on a char boundary.
        Ok(Value::leaf(&self.input[start..self.pos]))
    }

    // ── Cursor helpers ──────────────────────────────────────────────────

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_outer_ws(&mut self) {
        while self.peek().is_some_and(is_outer_ws) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, want: u8) -> Result<(), NosjError> {
        if self.peek() == Some(want) {
            self.pos += 1;
            return Ok(());
        }
        Err(self.error(
            codes::PARSER_EXPECTED_TOKEN,
            format!("expected '{}' but found '{}'", want as char, self.found()),
        ))
    }

    /// The character at the cursor, or `EOF`.
    fn found(&self) -> String {
        self.input[self.pos..]
            .chars()
            .next()
            .map_or_else(|| "EOF".to_string(), |c| c.to_string())
    }

    /// Byte offset one past the character at the cursor.
    fn next_char_end(&self) -> usize {
        self.input[self.pos..]
            .chars()
            .next()
            .map_or(self.pos, |c| self.pos + c.len_utf8())
    }

    fn error(&self, code: &'static str, diagnosis: String) -> NosjError {
        let (line, col) = LineIndex::new(self.input).line_col(self.pos);
        tracing::trace!(code, offset = self.pos, "parse failed");
        NosjError::Parse {
            code,
            message: format!("{diagnosis} at line {}, column {}", line + 1, col + 1),
            span: Span::new(self.pos, self.next_char_end()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flat_map() {
        let map = parse_document("(<a:1010,b:abcds>)", &ParseConfig::default()).unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(map.get("a").and_then(Value::as_leaf), Some("1010"));
    }

    #[test]
    fn error_position_is_one_indexed() {
        let err = parse_str("(<a(<>)>)").unwrap_err();
        assert_eq!(
            err.to_string(),
            "NOSJ parse error: expected ':' but found '(' at line 1, column 4"
        );
        assert_eq!(err.span(), Some(Span::new(3, 4)));
    }

    #[test]
    fn error_position_after_newlines() {
        let err = parse_str("\n\n(<a:1>)x").unwrap_err();
        assert_eq!(
            err.to_string(),
            "NOSJ parse error: trailing characters after top-level map at line 3, column 8"
        );
    }

    #[test]
    fn found_reports_whole_multibyte_char() {
        let err = parse_str("(<a:1>é").unwrap_err();
        assert!(err.to_string().contains("found 'é'"), "{err}");
        assert_eq!(err.span(), Some(Span::new(6, 8)));
    }

    #[test]
    fn key_with_disallowed_char_is_reported_verbatim() {
        let err = parse_str("(<a 1:0>)").unwrap_err();
        assert_eq!(err.to_string(), "Invalid key format: a 1");
        assert_eq!(err.code(), codes::INVALID_KEY);
    }

    #[test]
    fn depth_limit_counts_top_level_as_one() {
        let config = ParseConfig::default().with_max_depth(2);
        assert!(parse_document("(<a:(<>)>)", &config).is_ok());
        let err = parse_document("(<a:(<b:(<>)>)>)", &config).unwrap_err();
        assert_eq!(err.code(), codes::DEPTH_EXCEEDED);
        assert_eq!(err.span(), Some(Span::new(8, 9)));
    }
}
