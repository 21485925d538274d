//! Lexer for the script side of a module using logos
//!
//! JSX bodies are scanned by hand in the parser because their text content is
//! context sensitive. Everything between JSX (statements, attribute
//! expressions, function parameters) goes through this lexer.

use logos::Logos;
use std::fmt;
use std::ops::Range;

/// Script-level token
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token<'src> {
    // Keywords
    #[token("export")]
    Export,
    #[token("default")]
    Default,
    #[token("function")]
    Function,
    #[token("async")]
    Async,
    #[token("return")]
    Return,

    // Identifiers
    #[regex(r"[\p{L}_$][\p{L}\p{N}_$]*", |lex| lex.slice())]
    Ident(&'src str),

    // Literals (quotes kept, the parser only ever copies them verbatim)
    #[regex(r#""([^"\\\n]|\\.)*""#, |lex| lex.slice())]
    String(&'src str),

    #[regex(r"'([^'\\\n]|\\.)*'", |lex| lex.slice())]
    SingleQuoteString(&'src str),

    #[regex(r"`([^`\\]|\\.)*`", |lex| lex.slice())]
    Template(&'src str),

    #[regex(r"[0-9][0-9a-zA-Z_.]*", |lex| lex.slice())]
    Number(&'src str),

    // Comments
    #[regex(r"//[^\n]*", |lex| lex.slice())]
    LineComment(&'src str),

    #[regex(r"/\*[^*]*\*+(?:[^/*][^*]*\*+)*/", |lex| lex.slice())]
    BlockComment(&'src str),

    // Punctuation
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("<")]
    LAngle,
    #[token(">")]
    RAngle,
    #[token("/")]
    Slash,
    #[token("=")]
    Equals,
    #[token("=>")]
    Arrow,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("...")]
    Spread,
    #[token(":")]
    Colon,
    #[token("?")]
    Question,

    // Remaining operator characters, one at a time
    #[regex(r"[!&|+\-*%^~@#\\]", |lex| lex.slice())]
    Operator(&'src str),
}

impl<'src> Token<'src> {
    pub fn is_comment(&self) -> bool {
        matches!(self, Token::LineComment(_) | Token::BlockComment(_))
    }

    /// Keywords that begin a new statement when they open a line
    pub fn starts_statement(&self) -> bool {
        match self {
            Token::Export | Token::Function | Token::Async | Token::Return => true,
            Token::Ident(name) => matches!(
                *name,
                "import"
                    | "const"
                    | "let"
                    | "var"
                    | "class"
                    | "if"
                    | "for"
                    | "while"
                    | "do"
                    | "switch"
                    | "try"
                    | "throw"
                    | "type"
                    | "interface"
                    | "enum"
                    | "declare"
            ),
            _ => false,
        }
    }

    /// Identifiers that continue a statement after a closing brace
    pub fn continues_statement(&self) -> bool {
        match self {
            Token::Ident(name) => matches!(*name, "else" | "catch" | "finally" | "while"),
            Token::Dot
            | Token::Comma
            | Token::LParen
            | Token::LBracket
            | Token::Question
            | Token::Colon
            | Token::Equals
            | Token::Arrow
            | Token::Operator(_)
            | Token::RParen
            | Token::RBracket => true,
            _ => false,
        }
    }

    /// Whether a `<` following this token opens a JSX element
    pub fn precedes_expression(&self) -> bool {
        matches!(
            self,
            Token::LParen
                | Token::LBrace
                | Token::LBracket
                | Token::Equals
                | Token::Arrow
                | Token::Comma
                | Token::Colon
                | Token::Question
                | Token::Semicolon
                | Token::Return
                | Token::Default
                | Token::Operator(_)
        )
    }
}

impl<'src> fmt::Display for Token<'src> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Export => write!(f, "export"),
            Token::Default => write!(f, "default"),
            Token::Function => write!(f, "function"),
            Token::Async => write!(f, "async"),
            Token::Return => write!(f, "return"),
            Token::Ident(s) => write!(f, "identifier '{}'", s),
            Token::String(s) | Token::SingleQuoteString(s) => write!(f, "string {}", s),
            Token::Template(_) => write!(f, "template literal"),
            Token::Number(n) => write!(f, "number {}", n),
            Token::LineComment(_) | Token::BlockComment(_) => write!(f, "comment"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::LAngle => write!(f, "<"),
            Token::RAngle => write!(f, ">"),
            Token::Slash => write!(f, "/"),
            Token::Equals => write!(f, "="),
            Token::Arrow => write!(f, "=>"),
            Token::Semicolon => write!(f, ";"),
            Token::Comma => write!(f, ","),
            Token::Dot => write!(f, "."),
            Token::Spread => write!(f, "..."),
            Token::Colon => write!(f, ":"),
            Token::Question => write!(f, "?"),
            Token::Operator(op) => write!(f, "{}", op),
        }
    }
}

/// Lex the first token at `offset`, comments included.
///
/// Returns the token with its absolute byte range, `Ok(None)` at end of input,
/// or the range of an unrecognized character.
pub fn lex_at(source: &str, offset: usize) -> Result<Option<(Token<'_>, Range<usize>)>, Range<usize>> {
    let mut lexer = Token::lexer(&source[offset..]);
    match lexer.next() {
        None => Ok(None),
        Some(result) => {
            let span = lexer.span();
            let range = offset + span.start..offset + span.end;
            match result {
                Ok(token) => Ok(Some((token, range))),
                Err(()) => Err(range),
            }
        }
    }
}

/// Tokenize a whole source string, dropping comments and unknown characters
pub fn tokenize(source: &str) -> Vec<(Token<'_>, Range<usize>)> {
    Token::lexer(source)
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|token| (token, span)))
        .filter(|(token, _)| !token.is_comment())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_and_identifiers() {
        let tokens = tokenize("export default function App exports");

        assert_eq!(tokens[0].0, Token::Export);
        assert_eq!(tokens[1].0, Token::Default);
        assert_eq!(tokens[2].0, Token::Function);
        assert_eq!(tokens[3].0, Token::Ident("App"));
        assert_eq!(tokens[4].0, Token::Ident("exports"));
    }

    #[test]
    fn test_strings_keep_quotes() {
        let tokens = tokenize(r#""a \"b\"" 'c' `d ${e}`"#);

        assert_eq!(tokens[0].0, Token::String(r#""a \"b\"""#));
        assert_eq!(tokens[1].0, Token::SingleQuoteString("'c'"));
        assert_eq!(tokens[2].0, Token::Template("`d ${e}`"));
    }

    #[test]
    fn test_arrow_and_spread() {
        let tokens = tokenize("(...props) => x");

        assert_eq!(tokens[1].0, Token::Spread);
        assert_eq!(tokens[4].0, Token::Arrow);
    }

    #[test]
    fn test_lex_at_reports_comments_and_offsets() {
        let source = "a /* note */ b";
        let (token, range) = lex_at(source, 1).unwrap().unwrap();

        assert_eq!(token, Token::BlockComment("/* note */"));
        assert_eq!(range, 2..12);
        assert!(lex_at(source, source.len()).unwrap().is_none());
    }

    #[test]
    fn test_comments_dropped_by_tokenize() {
        let tokens = tokenize("// header\nconst a = 1;");

        assert_eq!(tokens[0].0, Token::Ident("const"));
    }
}
