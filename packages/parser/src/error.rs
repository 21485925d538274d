//! Error types for the module parser and code generation

use std::ops::Range;
use thiserror::Error;

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Parse error with location and context
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected token at {span:?}: expected {expected}, found {found}")]
    UnexpectedToken {
        span: Range<usize>,
        expected: String,
        found: String,
    },

    #[error("Unexpected end of input at {pos}: expected {expected}")]
    UnexpectedEof { pos: usize, expected: String },

    #[error("Invalid syntax at {span:?}: {message}")]
    InvalidSyntax { span: Range<usize>, message: String },

    #[error("Lexer error at {span:?}: unexpected character")]
    LexError { span: Range<usize> },

    #[error("Closing tag </{found}> at {span:?} does not match <{expected}>")]
    MismatchedClosingTag {
        span: Range<usize>,
        expected: String,
        found: String,
    },
}

impl ParseError {
    pub fn unexpected_token(span: Range<usize>, expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::UnexpectedToken {
            span,
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn unexpected_eof(pos: usize, expected: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            pos,
            expected: expected.into(),
        }
    }

    pub fn invalid_syntax(span: Range<usize>, message: impl Into<String>) -> Self {
        Self::InvalidSyntax {
            span,
            message: message.into(),
        }
    }

    pub fn lex_error(span: Range<usize>) -> Self {
        Self::LexError { span }
    }

    /// Byte range the error points at
    pub fn span(&self) -> Range<usize> {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::InvalidSyntax { span, .. }
            | ParseError::LexError { span }
            | ParseError::MismatchedClosingTag { span, .. } => span.clone(),
            ParseError::UnexpectedEof { pos, .. } => *pos..*pos,
        }
    }

    fn label(&self) -> String {
        match self {
            ParseError::UnexpectedToken { expected, .. } => format!("expected {}", expected),
            ParseError::UnexpectedEof { expected, .. } => format!("expected {}", expected),
            ParseError::InvalidSyntax { message, .. } => message.clone(),
            ParseError::LexError { .. } => "unexpected character".to_string(),
            ParseError::MismatchedClosingTag { expected, .. } => format!("expected </{}>", expected),
        }
    }
}

/// Failure reported by a code generator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerateError {
    #[error("Cannot generate {node}: {message}")]
    Unsupported { node: String, message: String },

    #[error("Code generation failed: {0}")]
    Failed(String),
}

/// Pretty-print an error with source context using ariadne
#[cfg(feature = "pretty-errors")]
pub fn format_error(source: &str, filename: &str, error: &ParseError) -> String {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let mut span = error.span();
    if span.is_empty() {
        span = span.start.saturating_sub(1)..source.len().min(span.start.max(1));
    }

    let mut output = Vec::new();
    let report = Report::build(ReportKind::Error, filename, span.start)
        .with_message(error.to_string())
        .with_label(
            Label::new((filename, span))
                .with_color(Color::Red)
                .with_message(error.label()),
        )
        .finish();

    if report
        .write((filename, Source::from(source)), &mut output)
        .is_err()
    {
        return error.to_string();
    }

    String::from_utf8(output).unwrap_or_else(|_| error.to_string())
}

/// Plain rendering when ariadne is not compiled in
#[cfg(not(feature = "pretty-errors"))]
pub fn format_error(_source: &str, filename: &str, error: &ParseError) -> String {
    format!("{}: {} ({})", filename, error, error.label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_of_eof_is_empty() {
        let err = ParseError::unexpected_eof(12, "'}'");
        assert_eq!(err.span(), 12..12);
    }

    #[test]
    fn test_format_error_mentions_message() {
        let source = "export default function App() {\n  return <div></span>;\n}\n";
        let err = ParseError::MismatchedClosingTag {
            span: 46..53,
            expected: "div".to_string(),
            found: "span".to_string(),
        };

        let rendered = format_error(source, "App.tsx", &err);
        assert!(rendered.contains("does not match"));
    }
}
