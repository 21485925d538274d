use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::id_generator::IDGenerator;
use crate::lexer::{lex_at, Token};
use std::ops::Range;

/// Default path used to seed keys when the caller has none
pub const DEFAULT_MODULE_PATH: &str = "/module.tsx";

type Spanned<'src> = (Token<'src>, Range<usize>);

/// Parser for JSX modules.
///
/// Script code is lexed lazily at the current offset with the logos lexer;
/// JSX is scanned character by character. Only default-exported functions,
/// their `return` statements and JSX trees are modelled, everything else is
/// kept as verbatim statement text.
pub struct Parser<'src> {
    source: &'src str,
    pos: usize,
    id_generator: IDGenerator,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, id_generator: IDGenerator) -> Self {
        Self {
            source,
            pos: 0,
            id_generator,
        }
    }

    /// Hand back the key generator so later edits keep issuing unique keys
    pub fn into_id_generator(self) -> IDGenerator {
        self.id_generator
    }

    /// Parse a complete module
    pub fn parse_module(&mut self) -> ParseResult<Module> {
        let mut module = Module::new();

        loop {
            let comments = self.take_comments()?;
            match self.peek()? {
                None => {
                    module.trailing_comments = comments;
                    break;
                }
                Some((token, range)) => {
                    let statement = self.parse_top_level_statement(token, range.start, comments)?;
                    module.statements.push(statement);
                }
            }
        }

        Ok(module)
    }

    fn parse_top_level_statement(
        &mut self,
        token: Token<'src>,
        start: usize,
        leading_comments: Vec<String>,
    ) -> ParseResult<Statement> {
        let is_export_default = token == Token::Export
            && matches!(self.peek_after(start)?, Some((Token::Default, _)));

        let kind = if is_export_default {
            self.advance()?; // export
            self.advance()?; // default
            StatementKind::ExportDefault {
                declaration: self.parse_export_default(start)?,
            }
        } else {
            self.skip_statement()?;
            StatementKind::Opaque {
                code: self.source[start..self.pos].trim_end().to_string(),
            }
        };

        Ok(Statement {
            kind,
            leading_comments,
            span: Span::new(start, self.pos, self.id_generator.new_id()),
        })
    }

    /// Parse what follows `export default`
    fn parse_export_default(&mut self, start: usize) -> ParseResult<ExportDefaultDeclaration> {
        let (first, first_range) = self
            .peek()?
            .ok_or_else(|| ParseError::unexpected_eof(self.source.len(), "exported declaration"))?;

        let (is_async, function_range) = match first {
            Token::Async => match self.peek_after(first_range.start)? {
                Some((Token::Function, range)) => (true, Some(range)),
                _ => (false, None),
            },
            Token::Function => (false, Some(first_range.clone())),
            _ => (false, None),
        };

        // Only plain `function name(...)` declarations are modelled
        let modelled = match &function_range {
            Some(range) => matches!(
                self.peek_after(range.start)?,
                Some((Token::Ident(_), _)) | Some((Token::LParen, _)) | Some((Token::LAngle, _))
            ),
            None => false,
        };

        if !modelled {
            let code_start = first_range.start;
            self.skip_statement()?;
            return Ok(ExportDefaultDeclaration::Other {
                code: self.source[code_start..self.pos].trim_end().to_string(),
            });
        }

        if is_async {
            self.advance()?;
        }
        self.expect(Token::Function)?;
        Ok(ExportDefaultDeclaration::Function(
            self.parse_function(start, is_async)?,
        ))
    }

    /// Parse a function declaration after the `function` keyword
    fn parse_function(&mut self, start: usize, is_async: bool) -> ParseResult<FunctionDeclaration> {
        let name = match self.peek()? {
            Some((Token::Ident(name), _)) => {
                self.advance()?;
                Some(name.to_string())
            }
            _ => None,
        };

        let params_start = self.peek_start()?;
        if let Some((Token::LAngle, _)) = self.peek()? {
            self.advance()?;
            self.skip_type_arguments()?;
        }
        self.expect(Token::LParen)?;
        self.skip_until_close(Token::RParen)?;
        let params = self.source[params_start..self.pos].to_string();

        let return_type = if let Some((Token::Colon, _)) = self.peek()? {
            self.advance()?;
            Some(self.scan_return_type()?)
        } else {
            None
        };

        self.expect(Token::LBrace)?;
        let (body, body_trailing_comments) = self.parse_block_body()?;

        Ok(FunctionDeclaration {
            is_async,
            name,
            params,
            return_type,
            body,
            body_trailing_comments,
            span: Span::new(start, self.pos, self.id_generator.new_id()),
        })
    }

    /// Scan a return type annotation up to the function body
    fn scan_return_type(&mut self) -> ParseResult<String> {
        let start = self.peek_start()?;
        let mut first = true;

        loop {
            let (token, range) = self
                .peek()?
                .ok_or_else(|| ParseError::unexpected_eof(self.source.len(), "function body"))?;

            match token {
                Token::LBrace if !first => break,
                Token::LBrace => {
                    self.advance()?;
                    self.skip_until_close(Token::RBrace)?;
                }
                Token::LParen => {
                    self.advance()?;
                    self.skip_until_close(Token::RParen)?;
                }
                Token::LBracket => {
                    self.advance()?;
                    self.skip_until_close(Token::RBracket)?;
                }
                Token::LAngle => {
                    self.advance()?;
                    self.skip_type_arguments()?;
                }
                Token::Semicolon | Token::RBrace => {
                    return Err(ParseError::unexpected_token(range, "function body", token.to_string()));
                }
                _ => {
                    self.advance()?;
                }
            }
            first = false;
        }

        Ok(self.source[start..self.pos].trim_end().to_string())
    }

    /// Skip `<...>` type arguments after the opening angle was consumed
    fn skip_type_arguments(&mut self) -> ParseResult<()> {
        let mut depth = 1usize;
        while depth > 0 {
            match self.advance()? {
                Some((Token::LAngle, _)) => depth += 1,
                Some((Token::RAngle, _)) => depth -= 1,
                Some((Token::LBrace, _)) => self.skip_until_close(Token::RBrace)?,
                Some((Token::LParen, _)) => self.skip_until_close(Token::RParen)?,
                Some((Token::LBracket, _)) => self.skip_until_close(Token::RBracket)?,
                Some(_) => {}
                None => return Err(ParseError::unexpected_eof(self.source.len(), "'>'")),
            }
        }
        Ok(())
    }

    /// Parse block statements after `{` up to and including the closing `}`
    fn parse_block_body(&mut self) -> ParseResult<(Vec<Statement>, Vec<String>)> {
        let mut statements = Vec::new();

        loop {
            let comments = self.take_comments()?;
            let (token, range) = self
                .peek()?
                .ok_or_else(|| ParseError::unexpected_eof(self.source.len(), "'}'"))?;

            if token == Token::RBrace {
                self.advance()?;
                return Ok((statements, comments));
            }

            let start = range.start;
            let kind = if token == Token::Return {
                self.parse_return()?
            } else {
                self.skip_statement()?;
                StatementKind::Opaque {
                    code: self.source[start..self.pos].trim_end().to_string(),
                }
            };

            statements.push(Statement {
                kind,
                leading_comments: comments,
                span: Span::new(start, self.pos, self.id_generator.new_id()),
            });
        }
    }

    fn parse_return(&mut self) -> ParseResult<StatementKind> {
        self.expect(Token::Return)?;

        let argument = match self.peek()? {
            None | Some((Token::RBrace, _)) => None,
            Some((Token::Semicolon, _)) => {
                self.advance()?;
                None
            }
            Some((_, range)) if self.newline_before(range.start) => None,
            Some((_, range)) => Some(self.parse_return_argument(range.start)?),
        };

        Ok(StatementKind::Return { argument })
    }

    fn parse_return_argument(&mut self, start: usize) -> ParseResult<Expression> {
        if let Some(jsx) = self.try_jsx_argument()? {
            return Ok(jsx);
        }

        self.skip_statement()?;
        let code = self.source[start..self.pos].trim_end();
        let code = code.strip_suffix(';').unwrap_or(code).trim_end().to_string();

        Ok(Expression::Other {
            code,
            span: Span::new(start, self.pos, self.id_generator.new_id()),
        })
    }

    /// `<jsx>` or `(<jsx>)` forming the whole return argument
    fn try_jsx_argument(&mut self) -> ParseResult<Option<Expression>> {
        let saved = (self.pos, self.id_generator.clone());

        let parenthesized = matches!(self.peek()?, Some((Token::LParen, _)));
        if parenthesized {
            self.advance()?;
        }

        let lt_start = match self.peek()? {
            Some((Token::LAngle, range)) if self.looks_like_element(range.end) => range.start,
            _ => {
                self.restore(saved);
                return Ok(None);
            }
        };

        self.pos = lt_start;
        let element = self.parse_jsx_element()?;

        if parenthesized {
            match self.peek()? {
                Some((Token::RParen, _)) => {
                    self.advance()?;
                }
                _ => {
                    self.restore(saved);
                    return Ok(None);
                }
            }
        }

        match self.peek()? {
            None | Some((Token::RBrace, _)) => {}
            Some((Token::Semicolon, _)) => {
                self.advance()?;
            }
            Some((_, range)) if self.newline_before(range.start) => {}
            Some(_) => {
                self.restore(saved);
                return Ok(None);
            }
        }

        Ok(Some(Expression::Jsx {
            element,
            parenthesized,
        }))
    }

    /// Consume one statement the parser does not model
    fn skip_statement(&mut self) -> ParseResult<()> {
        let mut stack: Vec<Token<'src>> = Vec::new();
        let mut expression_position = true;
        let mut first = true;
        let mut closed_block = false;

        loop {
            let Some((token, range)) = self.peek()? else {
                if stack.is_empty() {
                    return Ok(());
                }
                let expected = stack.last().map(|t| format!("'{}'", t)).unwrap_or_default();
                return Err(ParseError::unexpected_eof(self.source.len(), expected));
            };

            if stack.is_empty() && !first {
                let newline = self.newline_before(range.start);
                if token == Token::RBrace {
                    return Ok(());
                }
                if closed_block {
                    if token == Token::Semicolon {
                        self.advance()?;
                        return Ok(());
                    }
                    if newline && !token.continues_statement() {
                        return Ok(());
                    }
                }
                if newline && token.starts_statement() {
                    return Ok(());
                }
            }
            first = false;
            closed_block = false;

            match token {
                Token::Semicolon if stack.is_empty() => {
                    self.advance()?;
                    return Ok(());
                }
                Token::LAngle if expression_position && self.looks_like_jsx(range.end) => {
                    if self.try_skip_jsx(range.start) {
                        expression_position = false;
                        continue;
                    }
                }
                Token::LBrace => stack.push(Token::RBrace),
                Token::LParen => stack.push(Token::RParen),
                Token::LBracket => stack.push(Token::RBracket),
                Token::RBrace | Token::RParen | Token::RBracket => {
                    match stack.pop() {
                        Some(expected) if expected == token => {}
                        Some(expected) => {
                            return Err(ParseError::unexpected_token(
                                range,
                                format!("'{}'", expected),
                                token.to_string(),
                            ))
                        }
                        None => {
                            return Err(ParseError::invalid_syntax(
                                range,
                                format!("unbalanced '{}'", token),
                            ))
                        }
                    }
                    closed_block = stack.is_empty() && token == Token::RBrace;
                }
                _ => {}
            }

            expression_position = token.precedes_expression();
            self.advance()?;
        }
    }

    /// Skip tokens up to and including `close`; the opener was consumed
    fn skip_until_close(&mut self, close: Token<'src>) -> ParseResult<()> {
        let mut stack = vec![close];
        let mut expression_position = true;

        while let Some(expected_close) = stack.last().cloned() {
            let (token, range) = self.peek()?.ok_or_else(|| {
                ParseError::unexpected_eof(self.source.len(), format!("'{}'", expected_close))
            })?;

            match token {
                Token::LAngle if expression_position && self.looks_like_jsx(range.end) => {
                    if self.try_skip_jsx(range.start) {
                        expression_position = false;
                        continue;
                    }
                }
                Token::LBrace => stack.push(Token::RBrace),
                Token::LParen => stack.push(Token::RParen),
                Token::LBracket => stack.push(Token::RBracket),
                Token::RBrace | Token::RParen | Token::RBracket => {
                    if token != expected_close {
                        return Err(ParseError::unexpected_token(
                            range,
                            format!("'{}'", expected_close),
                            token.to_string(),
                        ));
                    }
                    stack.pop();
                }
                _ => {}
            }

            expression_position = token.precedes_expression();
            self.advance()?;
        }

        Ok(())
    }

    // ---- JSX -----------------------------------------------------------

    /// Parse an element or fragment starting at `<`
    fn parse_jsx_node(&mut self) -> ParseResult<JsxChild> {
        let start = self.pos;
        self.expect_char('<')?;
        self.skip_whitespace();

        if self.eat_char('>') {
            let children = self.parse_jsx_children(None)?;
            return Ok(JsxChild::Fragment {
                children,
                span: Span::new(start, self.pos, self.id_generator.new_id()),
            });
        }

        Ok(JsxChild::Element(self.parse_jsx_element_after_lt(start)?))
    }

    /// Parse an element starting at `<`
    fn parse_jsx_element(&mut self) -> ParseResult<JsxElement> {
        let start = self.pos;
        self.expect_char('<')?;
        self.skip_whitespace();
        self.parse_jsx_element_after_lt(start)
    }

    fn parse_jsx_element_after_lt(&mut self, start: usize) -> ParseResult<JsxElement> {
        let name = self.scan_jsx_name()?.to_string();
        let mut attributes = Vec::new();

        loop {
            self.skip_whitespace();
            match self.peek_char() {
                None => return Err(ParseError::unexpected_eof(self.pos, "'>'")),
                Some('/') => {
                    self.pos += 1;
                    self.skip_whitespace();
                    self.expect_char('>')?;
                    return Ok(JsxElement {
                        name,
                        attributes,
                        children: Vec::new(),
                        self_closing: true,
                        span: Span::new(start, self.pos, self.id_generator.new_id()),
                    });
                }
                Some('>') => {
                    self.pos += 1;
                    break;
                }
                Some('{') => attributes.push(self.parse_jsx_spread()?),
                Some(_) => attributes.push(self.parse_jsx_attribute()?),
            }
        }

        let children = self.parse_jsx_children(Some(&name))?;

        Ok(JsxElement {
            name,
            attributes,
            children,
            self_closing: false,
            span: Span::new(start, self.pos, self.id_generator.new_id()),
        })
    }

    /// Parse children up to and including the closing tag of `name`
    /// (`None` for fragments)
    fn parse_jsx_children(&mut self, name: Option<&str>) -> ParseResult<Vec<JsxChild>> {
        let mut children = Vec::new();
        let expected = name.unwrap_or("");

        loop {
            let source: &'src str = self.source;
            let rest = &source[self.pos..];

            if rest.is_empty() {
                return Err(ParseError::unexpected_eof(self.pos, format!("</{}>", expected)));
            }

            if rest.starts_with("</") {
                let close_start = self.pos;
                self.pos += 2;
                self.skip_whitespace();
                let found = if self.peek_char() == Some('>') {
                    ""
                } else {
                    self.scan_jsx_name()?
                };
                self.skip_whitespace();
                self.expect_char('>')?;

                if found != expected {
                    return Err(ParseError::MismatchedClosingTag {
                        span: close_start..self.pos,
                        expected: expected.to_string(),
                        found: found.to_string(),
                    });
                }
                return Ok(children);
            }

            if rest.starts_with('<') {
                children.push(self.parse_jsx_node()?);
            } else if rest.starts_with('{') {
                let start = self.pos;
                let code = self.parse_jsx_braces()?;
                children.push(JsxChild::Expression {
                    code,
                    span: Span::new(start, self.pos, self.id_generator.new_id()),
                });
            } else {
                let start = self.pos;
                let len = rest.find(['<', '{']).unwrap_or(rest.len());
                self.pos += len;
                children.push(JsxChild::Text {
                    value: rest[..len].to_string(),
                    span: Span::new(start, self.pos, self.id_generator.new_id()),
                });
            }
        }
    }

    fn parse_jsx_attribute(&mut self) -> ParseResult<JsxAttribute> {
        let start = self.pos;
        let name = self.scan_jsx_name()?.to_string();
        self.skip_whitespace();

        let value = if self.eat_char('=') {
            self.skip_whitespace();
            match self.peek_char() {
                Some(quote @ ('"' | '\'')) => {
                    self.pos += 1;
                    let rest = &self.source[self.pos..];
                    let end = rest
                        .find(quote)
                        .ok_or_else(|| ParseError::unexpected_eof(self.source.len(), quote.to_string()))?;
                    let value = rest[..end].to_string();
                    self.pos += end + 1;
                    Some(AttributeValue::String { value, quote })
                }
                Some('{') => Some(AttributeValue::Expression {
                    code: self.parse_jsx_braces()?,
                }),
                Some(c) => {
                    return Err(ParseError::unexpected_token(
                        self.pos..self.pos + c.len_utf8(),
                        "attribute value",
                        c.to_string(),
                    ))
                }
                None => return Err(ParseError::unexpected_eof(self.pos, "attribute value")),
            }
        } else {
            None
        };

        Ok(JsxAttribute::Named {
            name,
            value,
            span: Span::new(start, self.pos, self.id_generator.new_id()),
        })
    }

    fn parse_jsx_spread(&mut self) -> ParseResult<JsxAttribute> {
        let start = self.pos;
        let code = self.parse_jsx_braces()?;

        if !code.trim_start().starts_with("...") {
            return Err(ParseError::invalid_syntax(
                start..self.pos,
                "expected a spread attribute",
            ));
        }

        Ok(JsxAttribute::Spread {
            code,
            span: Span::new(start, self.pos, self.id_generator.new_id()),
        })
    }

    /// Parse `{...}` and return the code between the braces
    fn parse_jsx_braces(&mut self) -> ParseResult<String> {
        self.expect_char('{')?;
        let inner_start = self.pos;
        self.skip_until_close(Token::RBrace)?;
        Ok(self.source[inner_start..self.pos - 1].to_string())
    }

    fn scan_jsx_name(&mut self) -> ParseResult<&'src str> {
        let source: &'src str = self.source;
        let rest = &source[self.pos..];

        let len = rest
            .char_indices()
            .find(|(i, c)| {
                !(c.is_alphanumeric() || matches!(c, '_' | '$') || (*i > 0 && matches!(c, '-' | '.' | ':')))
            })
            .map(|(i, _)| i)
            .unwrap_or(rest.len());

        if len == 0 || rest.starts_with(|c: char| c.is_numeric()) {
            return Err(match rest.chars().next() {
                Some(c) => ParseError::unexpected_token(self.pos..self.pos + c.len_utf8(), "JSX name", c.to_string()),
                None => ParseError::unexpected_eof(self.pos, "JSX name"),
            });
        }

        self.pos += len;
        Ok(&rest[..len])
    }

    /// Parse a JSX node at `lt_start` only to step over it; rewinds on failure
    fn try_skip_jsx(&mut self, lt_start: usize) -> bool {
        let saved = (self.pos, self.id_generator.clone());
        self.pos = lt_start;
        match self.parse_jsx_node() {
            Ok(_) => true,
            Err(_) => {
                self.restore(saved);
                false
            }
        }
    }

    fn looks_like_element(&self, after_lt: usize) -> bool {
        self.source[after_lt..]
            .chars()
            .next()
            .map_or(false, |c| c.is_alphabetic() || c == '_' || c == '$')
    }

    fn looks_like_jsx(&self, after_lt: usize) -> bool {
        self.looks_like_element(after_lt) || self.source[after_lt..].starts_with('>')
    }

    // ---- Cursor helpers ------------------------------------------------

    /// Next non-comment token without consuming it
    fn peek(&self) -> ParseResult<Option<Spanned<'src>>> {
        self.peek_from(self.pos)
    }

    /// Next non-comment token after the token starting at `start`
    fn peek_after(&self, start: usize) -> ParseResult<Option<Spanned<'src>>> {
        match self.peek_from(start)? {
            Some((_, range)) => self.peek_from(range.end),
            None => Ok(None),
        }
    }

    fn peek_from(&self, mut offset: usize) -> ParseResult<Option<Spanned<'src>>> {
        let source: &'src str = self.source;
        loop {
            match lex_at(source, offset) {
                Ok(Some((token, range))) if token.is_comment() => offset = range.end,
                Ok(next) => return Ok(next),
                Err(span) => return Err(ParseError::lex_error(span)),
            }
        }
    }

    fn peek_start(&self) -> ParseResult<usize> {
        Ok(self
            .peek()?
            .map(|(_, range)| range.start)
            .unwrap_or(self.source.len()))
    }

    fn advance(&mut self) -> ParseResult<Option<Spanned<'src>>> {
        let next = self.peek()?;
        if let Some((_, range)) = &next {
            self.pos = range.end;
        }
        Ok(next)
    }

    fn expect(&mut self, expected: Token<'src>) -> ParseResult<Range<usize>> {
        match self.advance()? {
            Some((token, range)) if token == expected => Ok(range),
            Some((token, range)) => Err(ParseError::unexpected_token(
                range,
                format!("'{}'", expected),
                token.to_string(),
            )),
            None => Err(ParseError::unexpected_eof(
                self.source.len(),
                format!("'{}'", expected),
            )),
        }
    }

    /// Collect comments at the cursor (leading comments of the next statement)
    fn take_comments(&mut self) -> ParseResult<Vec<String>> {
        let mut comments = Vec::new();
        loop {
            match lex_at(self.source, self.pos) {
                Ok(Some((token, range))) if token.is_comment() => {
                    comments.push(self.source[range.clone()].to_string());
                    self.pos = range.end;
                }
                Ok(_) => return Ok(comments),
                Err(span) => return Err(ParseError::lex_error(span)),
            }
        }
    }

    fn newline_before(&self, token_start: usize) -> bool {
        self.source[self.pos..token_start].contains('\n')
    }

    fn restore(&mut self, (pos, ids): (usize, IDGenerator)) {
        self.pos = pos;
        self.id_generator = ids;
    }

    fn peek_char(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn eat_char(&mut self, c: char) -> bool {
        if self.peek_char() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect_char(&mut self, c: char) -> ParseResult<()> {
        match self.peek_char() {
            Some(found) if found == c => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(found) => Err(ParseError::unexpected_token(
                self.pos..self.pos + found.len_utf8(),
                format!("'{}'", c),
                found.to_string(),
            )),
            None => Err(ParseError::unexpected_eof(self.pos, format!("'{}'", c))),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }
}

/// Parse a module, seeding keys from [`DEFAULT_MODULE_PATH`]
pub fn parse(source: &str) -> ParseResult<Module> {
    parse_with_path(source, DEFAULT_MODULE_PATH)
}

/// Parse a module, seeding keys from `path`
pub fn parse_with_path(source: &str, path: &str) -> ParseResult<Module> {
    Parser::new(source, IDGenerator::new(path)).parse_module()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn function(module: &Module, index: usize) -> &FunctionDeclaration {
        match &module.statements[index].kind {
            StatementKind::ExportDefault {
                declaration: ExportDefaultDeclaration::Function(function),
            } => function,
            other => panic!("expected exported function, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_default_export_with_jsx_return() {
        let source = r#"import React from "react";

export default function App({ title }: Props): JSX.Element {
  const count = 1;
  return (
    <div className="mt-[10px]" id={title}>
      Hello {title}
      <span />
    </div>
  );
}
"#;
        let module = parse(source).unwrap();

        assert_eq!(module.statements.len(), 2);
        assert!(matches!(
            &module.statements[0].kind,
            StatementKind::Opaque { code } if code == r#"import React from "react";"#
        ));

        let app = function(&module, 1);
        assert_eq!(app.name.as_deref(), Some("App"));
        assert_eq!(app.params, "({ title }: Props)");
        assert_eq!(app.return_type.as_deref(), Some("JSX.Element"));
        assert_eq!(app.body.len(), 2);

        let root = app.body[1].returned_element().unwrap();
        assert_eq!(root.name, "div");
        assert_eq!(root.string_attribute("className"), Some("mt-[10px]"));
        assert!(matches!(
            root.attribute("id"),
            Some(JsxAttribute::Named { value: Some(AttributeValue::Expression { code }), .. }) if code == "title"
        ));

        let kinds: Vec<&str> = root
            .children
            .iter()
            .map(|child| match child {
                JsxChild::Element(_) => "element",
                JsxChild::Text { .. } => "text",
                JsxChild::Expression { .. } => "expression",
                JsxChild::Fragment { .. } => "fragment",
            })
            .collect();
        assert_eq!(kinds, vec!["text", "expression", "text", "element", "text"]);
    }

    #[test]
    fn test_return_without_parentheses() {
        let module = parse("export default function A() { return <p>hi</p>; }").unwrap();
        let root = function(&module, 0).body[0].returned_element().unwrap();

        assert_eq!(root.name, "p");
        assert_eq!(root.children.len(), 1);
    }

    #[test]
    fn test_jsx_inside_opaque_statement() {
        let source = r#"const items = list.map((item) => <li key={item}>{item}'s</li>);
export default function List() {
  return <ul>{items}</ul>;
}
"#;
        let module = parse(source).unwrap();

        assert_eq!(module.statements.len(), 2);
        assert!(function(&module, 1).body[0].returned_element().is_some());
    }

    #[test]
    fn test_non_jsx_return_is_other() {
        let module = parse("export default function A() { return null; }").unwrap();

        assert!(matches!(
            &function(&module, 0).body[0].kind,
            StatementKind::Return { argument: Some(Expression::Other { code, .. }) } if code == "null"
        ));
    }

    #[test]
    fn test_fragment_return_is_other() {
        let module = parse("export default function A() { return <><b /></>; }").unwrap();

        assert!(matches!(
            &function(&module, 0).body[0].kind,
            StatementKind::Return { argument: Some(Expression::Other { .. }) }
        ));
    }

    #[test]
    fn test_export_default_expression_is_other() {
        let module = parse("export default () => <div />;\n").unwrap();

        assert!(matches!(
            &module.statements[0].kind,
            StatementKind::ExportDefault { declaration: ExportDefaultDeclaration::Other { code } }
                if code == "() => <div />;"
        ));
    }

    #[test]
    fn test_statements_without_semicolons() {
        let source = "const a = 1\nconst b = { c: 2 }\nfunction f() {\n  return 3\n}\nexport default function A() { return <i /> }\n";
        let module = parse(source).unwrap();

        assert_eq!(module.statements.len(), 4);
    }

    #[test]
    fn test_comments_are_attached() {
        let source = "// The app\nexport default function App() {\n  // root\n  return <div />;\n  // end\n}\n// eof\n";
        let module = parse(source).unwrap();

        assert_eq!(module.statements[0].leading_comments, vec!["// The app"]);
        let app = function(&module, 0);
        assert_eq!(app.body[0].leading_comments, vec!["// root"]);
        assert_eq!(app.body_trailing_comments, vec!["// end"]);
        assert_eq!(module.trailing_comments, vec!["// eof"]);
    }

    #[test]
    fn test_mismatched_closing_tag_fails() {
        let err = parse("export default function A() { return <div></span>; }").unwrap_err();

        assert!(matches!(
            err,
            ParseError::MismatchedClosingTag { ref expected, ref found, .. } if expected == "div" && found == "span"
        ));
    }

    #[test]
    fn test_unterminated_block_fails() {
        let err = parse("export default function A() { return <div />;").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_spread_and_boolean_attributes() {
        let module = parse("export default function A(p) { return <input {...p} disabled />; }").unwrap();
        let root = function(&module, 0).body[0].returned_element().unwrap();

        assert!(root.self_closing);
        assert!(matches!(&root.attributes[0], JsxAttribute::Spread { code, .. } if code == "...p"));
        assert!(matches!(&root.attributes[1], JsxAttribute::Named { name, value: None, .. } if name == "disabled"));
    }

    #[test]
    fn test_keys_are_deterministic_per_path() {
        let source = "export default function A() { return <div><b /></div>; }";
        let a = parse_with_path(source, "/a.tsx").unwrap();
        let b = parse_with_path(source, "/a.tsx").unwrap();

        assert_eq!(a, b);
    }
}
