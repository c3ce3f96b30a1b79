//! Relaxed-input cleanup for hand-edited record files.
//!
//! The on-disk format is a JSON superset: `//` line comments, `/* */`
//! block comments, and trailing commas are all permitted, since records
//! are meant to be edited by hand. [`strip`] rewrites such a document to
//! plain JSON while keeping every remaining byte at its original offset,
//! so parse errors still point at the right place in the file.

use logos::Logos;

/// Surface shapes the scanner cares about. String literals are matched as
/// opaque units so comment markers inside them are never touched;
/// everything else in the document passes through untokenized.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    #[regex(r#""([^"\\]|\\.)*""#)]
    Str,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    #[token(",")]
    Comma,

    #[token("]")]
    CloseBracket,

    #[token("}")]
    CloseBrace,
}

/// Rewrite a relaxed JSON document to plain JSON, in place byte-for-byte.
///
/// Comments are blanked to spaces (newlines inside block comments are
/// kept, preserving line numbers), and a comma whose next significant
/// token is `]` or `}` is blanked as a trailing comma. The output has the
/// same length as the input.
pub fn strip(source: &str) -> String {
    let mut output = source.as_bytes().to_vec();
    let mut pending_comma: Option<std::ops::Range<usize>> = None;
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(RawToken::LineComment | RawToken::BlockComment) => {
                // Comments between a comma and a closer do not make the
                // comma non-trailing, so the pending span survives.
                blank(&mut output, span);
            }
            Ok(RawToken::Comma) => pending_comma = Some(span),
            Ok(RawToken::CloseBracket | RawToken::CloseBrace) => {
                if let Some(comma) = pending_comma.take() {
                    blank(&mut output, comma);
                }
            }
            Ok(RawToken::Str) | Err(()) => pending_comma = None,
        }
    }

    String::from_utf8(output).unwrap_or_else(|_| source.to_string())
}

fn blank(bytes: &mut [u8], span: std::ops::Range<usize>) {
    for byte in &mut bytes[span] {
        if *byte != b'\n' {
            *byte = b' ';
        }
    }
}
