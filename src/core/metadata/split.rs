//! core::metadata::split
//!
//! Two-region splitter separating the metadata block from the body.
//!
//! # Algorithm
//!
//! The raw text is scanned once with a brace-depth counter. The region opens
//! when depth goes 0 -> 1 at the first `{` and closes when depth returns to
//! 0. Everything before the opening brace and everything after the closing
//! one is body, in original order.
//!
//! Inside the region the scanner tracks JSON string literals (with `\`
//! escapes), so a brace inside a quoted value never moves the depth. Outside
//! the region nothing is interpreted.
//!
//! Only the first top-level group is metadata. A single line terminator
//! directly after the closing brace is the block/body separator and is
//! dropped.

use super::schema::CodecError;

/// Result of splitting a raw document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSource<'a> {
    /// The metadata region, braces included. `None` if no `{` was found.
    pub metadata: Option<&'a str>,
    /// All characters outside the region.
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    Code,
    InString,
    Escaped,
}

/// Split `raw` into its metadata region and body.
///
/// # Errors
///
/// - [`CodecError::UnbalancedDelimiters`] if a `}` appears before any `{`
/// - [`CodecError::MalformedMetadata`] if the region opens but never closes
///
/// # Example
///
/// ```
/// use folio::core::metadata::split::split;
///
/// let source = split("{\"Title\": \"a{b}c\"}\nbody text").unwrap();
/// assert_eq!(source.metadata, Some("{\"Title\": \"a{b}c\"}"));
/// assert_eq!(source.body, "body text");
/// ```
pub fn split(raw: &str) -> Result<SplitSource<'_>, CodecError> {
    let mut start = None;
    let mut depth: usize = 0;
    let mut lexeme = Lexeme::Code;

    for (offset, c) in raw.char_indices() {
        let Some(open) = start else {
            match c {
                '{' => {
                    start = Some(offset);
                    depth = 1;
                }
                '}' => return Err(CodecError::UnbalancedDelimiters { offset }),
                _ => {}
            }
            continue;
        };

        lexeme = match (lexeme, c) {
            (Lexeme::Escaped, _) => Lexeme::InString,
            (Lexeme::InString, '\\') => Lexeme::Escaped,
            (Lexeme::InString, '"') => Lexeme::Code,
            (Lexeme::InString, _) => Lexeme::InString,
            (Lexeme::Code, '"') => Lexeme::InString,
            (Lexeme::Code, '{') => {
                depth += 1;
                Lexeme::Code
            }
            (Lexeme::Code, '}') => {
                depth -= 1;
                if depth == 0 {
                    let end = offset + c.len_utf8();
                    let rest = &raw[end..];
                    let rest = rest
                        .strip_prefix("\r\n")
                        .or_else(|| rest.strip_prefix('\n'))
                        .unwrap_or(rest);

                    let mut body = String::with_capacity(open + rest.len());
                    body.push_str(&raw[..open]);
                    body.push_str(rest);

                    return Ok(SplitSource {
                        metadata: Some(&raw[open..end]),
                        body,
                    });
                }
                Lexeme::Code
            }
            (Lexeme::Code, _) => Lexeme::Code,
        };
    }

    if start.is_some() {
        return Err(CodecError::MalformedMetadata(
            "metadata block is never closed".into(),
        ));
    }

    Ok(SplitSource {
        metadata: None,
        body: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_block_and_body() {
        let source = split("{\"Title\": \"x\"}\n# Heading\ntext\n").unwrap();
        assert_eq!(source.metadata, Some("{\"Title\": \"x\"}"));
        assert_eq!(source.body, "# Heading\ntext\n");
    }

    #[test]
    fn nested_braces_stay_in_region() {
        let raw = "{\"Title\":\"a{b}c\", \"Extra\": {\"k\": {}}}tail";
        let source = split(raw).unwrap();
        assert_eq!(
            source.metadata,
            Some("{\"Title\":\"a{b}c\", \"Extra\": {\"k\": {}}}")
        );
        assert_eq!(source.body, "tail");
    }

    #[test]
    fn quoted_unbalanced_brace_does_not_close_region() {
        let raw = "{\"Title\": \"close } early\"}body";
        let source = split(raw).unwrap();
        assert_eq!(source.metadata, Some("{\"Title\": \"close } early\"}"));
        assert_eq!(source.body, "body");
    }

    #[test]
    fn escaped_quote_keeps_string_open() {
        let raw = r#"{"Title": "say \"}\" now"}body"#;
        let source = split(raw).unwrap();
        assert_eq!(source.metadata, Some(r#"{"Title": "say \"}\" now"}"#));
        assert_eq!(source.body, "body");
    }

    #[test]
    fn preamble_is_body() {
        let source = split("intro\n{\"a\": 1}\nrest").unwrap();
        assert_eq!(source.metadata, Some("{\"a\": 1}"));
        assert_eq!(source.body, "intro\nrest");
    }

    #[test]
    fn later_groups_are_body() {
        let source = split("{}\ncode { x } and }").unwrap();
        assert_eq!(source.metadata, Some("{}"));
        assert_eq!(source.body, "code { x } and }");
    }

    #[test]
    fn only_one_separator_is_dropped() {
        let source = split("{}\n\nparagraph").unwrap();
        assert_eq!(source.body, "\nparagraph");

        let source = split("{}\r\nwindows").unwrap();
        assert_eq!(source.body, "windows");

        let source = split("{}no newline").unwrap();
        assert_eq!(source.body, "no newline");
    }

    #[test]
    fn no_block_is_all_body() {
        let source = split("just text\n").unwrap();
        assert!(source.metadata.is_none());
        assert_eq!(source.body, "just text\n");
    }

    #[test]
    fn close_before_open_is_unbalanced() {
        let err = split("}{\"Title\": \"x\"}").unwrap_err();
        assert_eq!(err, CodecError::UnbalancedDelimiters { offset: 0 });

        let err = split("ab}").unwrap_err();
        assert_eq!(err, CodecError::UnbalancedDelimiters { offset: 2 });
    }

    #[test]
    fn unterminated_block_is_malformed() {
        let err = split("{\"Title\": \"x\"").unwrap_err();
        assert!(matches!(err, CodecError::MalformedMetadata(_)));

        let err = split("{\"Title\": \"x}").unwrap_err();
        assert!(matches!(err, CodecError::MalformedMetadata(_)));
    }

    #[test]
    fn multibyte_text_around_block() {
        let source = split("é{\"T\": \"ü\"}\nñ").unwrap();
        assert_eq!(source.metadata, Some("{\"T\": \"ü\"}"));
        assert_eq!(source.body, "éñ");
    }
}
