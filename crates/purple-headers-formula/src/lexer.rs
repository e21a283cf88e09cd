//! Formula lexer
//!
//! Splits formula text into tokens that remember where they came from. Every
//! token carries a byte span into the original text, so callers can rewrite
//! individual tokens and copy everything else through unchanged.

use std::ops::Range;

use purple_headers_core::{CellAddress, CellError};

use crate::error::{FormulaError, FormulaResult};

/// Kind of a formula token
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Numeric literal (`1`, `2.5`, `1E+3`)
    Number,
    /// String literal, quotes included in the span
    Text,
    /// `TRUE` / `FALSE`
    Boolean(bool),
    /// Error literal (`#REF!`, `#N/A`, ...)
    Error(CellError),
    /// Name immediately followed by `(`
    Function,
    /// Any other name (named ranges, unknown words)
    Identifier,
    /// Cell reference such as `A1` or `$B$2`
    CellRef(CellAddress),
    /// Sheet qualifier including the trailing `!` (`Sheet1!`, `'My Sheet'!`)
    SheetPrefix(String),
    /// Arithmetic, comparison or concatenation operator
    Operator,
    Colon,
    Comma,
    Semicolon,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    /// A character the lexer does not recognize; kept as-is
    Unknown,
}

/// A token and its byte span in the source text
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

impl Token {
    /// The slice of `source` this token was read from
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.clone()]
    }
}

/// Tokenize formula text
///
/// A leading `=` is reported as an [`TokenKind::Operator`] token like any
/// other. Whitespace produces no tokens; it shows up as gaps between spans.
///
/// # Example
/// ```rust
/// use purple_headers_formula::{tokenize, TokenKind};
///
/// let tokens = tokenize("=LOG10(A1)").unwrap();
/// assert_eq!(tokens[1].kind, TokenKind::Function);
/// assert!(matches!(tokens[3].kind, TokenKind::CellRef(_)));
/// ```
pub fn tokenize(formula: &str) -> FormulaResult<Vec<Token>> {
    let mut lexer = Lexer::new(formula);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn next_token(&mut self) -> FormulaResult<Option<Token>> {
        self.skip_whitespace();

        let Some(c) = self.peek_char() else {
            return Ok(None);
        };

        let start = self.pos;
        let kind = match c {
            '"' => self.scan_string()?,
            '\'' => self.scan_quoted_sheet()?,
            c if c.is_ascii_digit()
                || (c == '.' && self.peek_char_at(1).is_some_and(|c| c.is_ascii_digit())) =>
            {
                self.scan_number()
            }
            c if c.is_ascii_alphabetic() || c == '_' || c == '$' => self.scan_identifier_or_ref(),
            '#' => self.scan_error(),
            _ => self.scan_punctuation(c),
        };

        Ok(Some(Token {
            kind,
            span: start..self.pos,
        }))
    }

    fn scan_punctuation(&mut self, c: char) -> TokenKind {
        self.advance();
        match c {
            '+' | '-' | '*' | '/' | '^' | '%' | '&' | '=' => TokenKind::Operator,
            '<' => {
                if matches!(self.peek_char(), Some('=') | Some('>')) {
                    self.advance();
                }
                TokenKind::Operator
            }
            '>' => {
                if self.peek_char() == Some('=') {
                    self.advance();
                }
                TokenKind::Operator
            }
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            _ => TokenKind::Unknown,
        }
    }

    fn scan_string(&mut self) -> FormulaResult<TokenKind> {
        let start = self.pos;
        self.advance(); // opening quote

        loop {
            match self.peek_char() {
                Some('"') if self.peek_char_at(1) == Some('"') => {
                    self.advance();
                    self.advance();
                }
                Some('"') => {
                    self.advance();
                    return Ok(TokenKind::Text);
                }
                Some(_) => self.advance(),
                None => return Err(FormulaError::parse(start, "unterminated string literal")),
            }
        }
    }

    fn scan_quoted_sheet(&mut self) -> FormulaResult<TokenKind> {
        let start = self.pos;
        self.advance(); // opening quote

        let mut name = String::new();
        loop {
            match self.peek_char() {
                Some('\'') if self.peek_char_at(1) == Some('\'') => {
                    name.push('\'');
                    self.advance();
                    self.advance();
                }
                Some('\'') => {
                    self.advance();
                    break;
                }
                Some(c) => {
                    name.push(c);
                    self.advance();
                }
                None => return Err(FormulaError::parse(start, "unterminated sheet name")),
            }
        }

        if self.peek_char() != Some('!') {
            return Err(FormulaError::parse(
                self.pos,
                format!("expected '!' after sheet name '{}'", name),
            ));
        }
        self.advance();
        Ok(TokenKind::SheetPrefix(name))
    }

    fn scan_number(&mut self) -> TokenKind {
        self.skip_digits();

        if self.peek_char() == Some('.') {
            self.advance();
            self.skip_digits();
        }

        // Only take the exponent when digits follow, so `1E` stays short
        if matches!(self.peek_char(), Some('e') | Some('E')) {
            let sign = matches!(self.peek_char_at(1), Some('+') | Some('-'));
            let digit_at = if sign { 2 } else { 1 };
            if self
                .peek_char_at(digit_at)
                .is_some_and(|c| c.is_ascii_digit())
            {
                for _ in 0..digit_at {
                    self.advance();
                }
                self.skip_digits();
            }
        }

        TokenKind::Number
    }

    fn scan_error(&mut self) -> TokenKind {
        let start = self.pos;
        self.advance(); // '#'
        while self
            .peek_char()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '!' || c == '/' || c == '?')
        {
            self.advance();
        }

        match CellError::from_str(&self.input[start..self.pos]) {
            Some(err) => TokenKind::Error(err),
            None => TokenKind::Unknown,
        }
    }

    fn scan_identifier_or_ref(&mut self) -> TokenKind {
        let start = self.pos;
        while self
            .peek_char()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$' || c == '.')
        {
            self.advance();
        }

        let text = &self.input[start..self.pos];

        match self.peek_char() {
            Some('!') => {
                self.advance();
                return TokenKind::SheetPrefix(text.to_string());
            }
            // LOG10( is a call, not a cell
            Some('(') => return TokenKind::Function,
            _ => {}
        }

        if text.eq_ignore_ascii_case("TRUE") {
            return TokenKind::Boolean(true);
        }
        if text.eq_ignore_ascii_case("FALSE") {
            return TokenKind::Boolean(false);
        }

        if is_cell_reference(text) {
            if let Ok(addr) = CellAddress::parse(text) {
                return TokenKind::CellRef(addr);
            }
        }

        TokenKind::Identifier
    }

    fn skip_digits(&mut self) {
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().is_some_and(|c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }
}

/// `[$]LETTERS[$]DIGITS` and nothing else
fn is_cell_reference(text: &str) -> bool {
    let rest = text.strip_prefix('$').unwrap_or(text);

    let letters = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()).len();
    if letters == 0 {
        return false;
    }
    let rest = &rest[letters..];
    let rest = rest.strip_prefix('$').unwrap_or(rest);

    !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit())
}
