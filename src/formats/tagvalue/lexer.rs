//! Lexer for the tag/value text format.
//!
//! Turns raw text into a sequential stream of `(tag, value, line)` tokens.
//! Values spanning multiple physical lines are delimited by
//! `<text>…</text>`; internal newlines are preserved verbatim. Blank lines
//! and `#` comment lines are skipped. An unrecognized tag becomes an
//! [`Token::Unrecognized`] token rather than aborting the scan, so the
//! parser decides whether it is fatal.

use crate::errors::SpdxError;

/// The fixed tag vocabulary of the SPDX tag/value grammar.
pub const KNOWN_TAGS: &[&str] = &[
    // Document
    "SPDXVersion",
    "DataLicense",
    "SPDXID",
    "DocumentName",
    "DocumentNamespace",
    "DocumentComment",
    "ExternalDocumentRef",
    // Creation info
    "LicenseListVersion",
    "Creator",
    "Created",
    "CreatorComment",
    // Package
    "PackageName",
    "PackageVersion",
    "PackageFileName",
    "PackageSupplier",
    "PackageOriginator",
    "PackageDownloadLocation",
    "FilesAnalyzed",
    "PackageVerificationCode",
    "PackageChecksum",
    "PackageSourceInfo",
    "PackageLicenseConcluded",
    "PackageLicenseInfoFromFiles",
    "PackageLicenseDeclared",
    "PackageLicenseComments",
    "PackageCopyrightText",
    "PackageSummary",
    "PackageDescription",
    "PackageComment",
    // File
    "FileName",
    "FileType",
    "FileChecksum",
    "LicenseConcluded",
    "LicenseInfoInFile",
    "LicenseComments",
    "FileCopyrightText",
    "FileComment",
    "FileNotice",
    "FileContributor",
    "FileDependency",
    // Extracted license
    "LicenseID",
    "ExtractedText",
    "LicenseName",
    "LicenseCrossReference",
    "LicenseComment",
    // Snippet
    "SnippetSPDXID",
    "SnippetName",
    "SnippetComment",
    "SnippetCopyrightText",
    "SnippetLicenseConcluded",
    "LicenseInfoInSnippet",
    "SnippetFromFileSPDXID",
    // Review
    "Reviewer",
    "ReviewDate",
    "ReviewComment",
    // Annotation
    "Annotator",
    "AnnotationDate",
    "AnnotationComment",
    "AnnotationType",
    "SPDXREF",
    // Relationship
    "Relationship",
    "RelationshipComment",
];

pub(crate) const TEXT_OPEN: &str = "<text>";
pub(crate) const TEXT_CLOSE: &str = "</text>";

/// One lexed item. `line` is 1-based and points at the line the tag
/// appeared on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Pair {
        tag: &'static str,
        value: String,
        line: usize,
    },
    Unrecognized {
        tag: String,
        line: usize,
    },
}

/// Tokenize tag/value text. CRLF and LF line endings are both accepted.
pub fn lex(input: &str) -> Result<Vec<Token>, SpdxError> {
    let lines: Vec<&str> = input.lines().map(|l| l.trim_end_matches('\r')).collect();
    let mut tokens = Vec::new();
    let mut index = 0;

    while index < lines.len() {
        let line_number = index + 1;
        let line = lines[index].trim();
        index += 1;

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (tag, rest) = line.split_once(':').ok_or_else(|| {
            SpdxError::lexical(
                line_number,
                format!("Malformed line, expected 'Tag: value': '{}'", line),
            )
        })?;
        let tag = tag.trim();
        let rest = rest.trim();

        let value = if let Some(opened) = rest.strip_prefix(TEXT_OPEN) {
            if let Some(inner) = opened.strip_suffix(TEXT_CLOSE) {
                // Single-line <text>…</text>
                inner.to_string()
            } else {
                let mut value = opened.to_string();
                let mut closed = false;
                while index < lines.len() {
                    let continuation = lines[index];
                    index += 1;
                    if let Some(last) = continuation.trim_end().strip_suffix(TEXT_CLOSE) {
                        value.push('\n');
                        value.push_str(last);
                        closed = true;
                        break;
                    }
                    value.push('\n');
                    value.push_str(continuation);
                }
                if !closed {
                    return Err(SpdxError::lexical(
                        line_number,
                        format!("Unterminated <text> block for tag '{}'", tag),
                    ));
                }
                value
            }
        } else {
            rest.to_string()
        };

        match KNOWN_TAGS.iter().find(|&&known| known == tag) {
            Some(&known) => tokens.push(Token::Pair {
                tag: known,
                value,
                line: line_number,
            }),
            None => tokens.push(Token::Unrecognized {
                tag: tag.to_string(),
                line: line_number,
            }),
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lex_simple_pairs() {
        let tokens = lex("SPDXVersion: SPDX-2.1\nDataLicense: CC0-1.0\n").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Pair {
                    tag: "SPDXVersion",
                    value: "SPDX-2.1".to_string(),
                    line: 1,
                },
                Token::Pair {
                    tag: "DataLicense",
                    value: "CC0-1.0".to_string(),
                    line: 2,
                },
            ]
        );
    }

    #[test]
    fn test_lex_skips_blank_lines_and_comments() {
        let tokens = lex("\n# a comment\n\nSPDXVersion: SPDX-2.1\n").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(
            tokens[0],
            Token::Pair {
                tag: "SPDXVersion",
                value: "SPDX-2.1".to_string(),
                line: 4,
            }
        );
    }

    #[test]
    fn test_lex_crlf_line_endings() {
        let tokens = lex("SPDXVersion: SPDX-2.1\r\nDocumentName: name\r\n").unwrap();
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_lex_multiline_text_block_preserves_newlines() {
        let input = "DocumentComment: <text>first line\nsecond line\nthird</text>\n";
        let tokens = lex(input).unwrap();
        assert_eq!(
            tokens,
            vec![Token::Pair {
                tag: "DocumentComment",
                value: "first line\nsecond line\nthird".to_string(),
                line: 1,
            }]
        );
    }

    #[test]
    fn test_lex_single_line_text_block() {
        let tokens = lex("FileCopyrightText: <text>Copyright 2014 Acme Inc.</text>\n").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Pair {
                tag: "FileCopyrightText",
                value: "Copyright 2014 Acme Inc.".to_string(),
                line: 1,
            }]
        );
    }

    #[test]
    fn test_lex_unterminated_text_block_is_fatal() {
        let err = lex("DocumentComment: <text>never closed\nFileName: ./x\n").unwrap_err();
        match err {
            SpdxError::Lexical { line, .. } => assert_eq!(line, 1),
            other => panic!("expected lexical error, got {:?}", other),
        }
    }

    #[test]
    fn test_lex_unrecognized_tag_is_a_token_not_an_error() {
        let tokens = lex("SPDXVersion: SPDX-2.1\nBogusTag: whatever\n").unwrap();
        assert_eq!(
            tokens[1],
            Token::Unrecognized {
                tag: "BogusTag".to_string(),
                line: 2,
            }
        );
    }

    #[test]
    fn test_lex_line_without_colon_is_fatal() {
        let err = lex("SPDXVersion SPDX-2.1\n").unwrap_err();
        assert!(matches!(err, SpdxError::Lexical { line: 1, .. }));
    }
}
