//! Tokenizer for Kotlin seed source
//!
//! Produces just enough structure for the call parser: identifiers, string
//! and number literals, and the punctuation that delimits argument lists.
//! Comments are dropped so commented-out constructors never match.

use std::ops::Range;

/// Token categories the call parser distinguishes
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    /// Identifier or keyword
    Ident(String),
    /// String literal with escapes resolved
    Str(String),
    /// Numeric literal, raw text including any suffix
    Number(String),
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Dot,
    /// Single `=` (not `==`, `=>` or a compound assignment)
    Assign,
    /// Any other operator or symbol
    Other,
}

/// A token with its byte span and 1-based line
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
    pub line: usize,
}

/// Tokenize the whole source. Never fails: unterminated literals and
/// comments end at end of input.
pub(crate) fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            line: 1,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Token> {
        while let Some(c) = self.peek_char() {
            let start = self.pos;
            let line = self.line;

            if c.is_whitespace() {
                self.bump();
                continue;
            }

            if self.starts_with("//") {
                self.skip_line_comment();
                continue;
            }
            if self.starts_with("/*") {
                self.skip_block_comment();
                continue;
            }

            let kind = if self.starts_with("\"\"\"") {
                self.raw_string()
            } else if c == '"' {
                self.string()
            } else if c == '\'' {
                self.char_literal()
            } else if c == '`' {
                self.quoted_ident()
            } else if c.is_ascii_digit() {
                self.number()
            } else if c == '_' || c.is_alphabetic() {
                self.ident()
            } else {
                self.punct(c)
            };

            self.tokens.push(Token {
                kind,
                span: start..self.pos,
                line,
            });
        }
        self.tokens
    }

    fn peek_char(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_byte_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn starts_with(&self, pat: &str) -> bool {
        self.src[self.pos..].starts_with(pat)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek_char() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    // Kotlin block comments nest.
    fn skip_block_comment(&mut self) {
        let mut depth = 0usize;
        while self.pos < self.bytes.len() {
            if self.starts_with("/*") {
                depth += 1;
                self.pos += 2;
            } else if self.starts_with("*/") {
                depth -= 1;
                self.pos += 2;
                if depth == 0 {
                    return;
                }
            } else {
                self.bump();
            }
        }
    }

    fn raw_string(&mut self) -> TokenKind {
        self.pos += 3;
        let start = self.pos;
        while self.pos < self.bytes.len() && !self.starts_with("\"\"\"") {
            self.bump();
        }
        let content = self.src[start..self.pos].to_string();
        if self.starts_with("\"\"\"") {
            self.pos += 3;
        }
        TokenKind::Str(content)
    }

    fn string(&mut self) -> TokenKind {
        self.bump();
        let mut out = String::new();
        while let Some(c) = self.peek_char() {
            match c {
                '"' => {
                    self.bump();
                    break;
                }
                '\n' => break,
                '\\' => {
                    self.bump();
                    if let Some(escaped) = self.escape() {
                        out.push(escaped);
                    }
                }
                '$' if self.peek_byte_at(1) == Some(b'{') => {
                    let start = self.pos;
                    self.skip_template();
                    out.push_str(&self.src[start..self.pos]);
                }
                _ => {
                    self.bump();
                    out.push(c);
                }
            }
        }
        TokenKind::Str(out)
    }

    fn escape(&mut self) -> Option<char> {
        let c = self.bump()?;
        Some(match c {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'b' => '\u{8}',
            'u' => {
                let hex_end = (self.pos + 4).min(self.bytes.len());
                let hex = self.src.get(self.pos..hex_end)?;
                let decoded = u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)?;
                self.pos = hex_end;
                decoded
            }
            other => other,
        })
    }

    // `${ ... }` inside a string, copied verbatim.
    fn skip_template(&mut self) {
        self.pos += 2;
        let mut depth = 1usize;
        while let Some(c) = self.bump() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                _ => {}
            }
        }
    }

    fn char_literal(&mut self) -> TokenKind {
        self.bump();
        while let Some(c) = self.peek_char() {
            match c {
                '\'' => {
                    self.bump();
                    break;
                }
                '\n' => break,
                '\\' => {
                    self.bump();
                    self.bump();
                }
                _ => {
                    self.bump();
                }
            }
        }
        TokenKind::Other
    }

    fn quoted_ident(&mut self) -> TokenKind {
        self.bump();
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c == '`' || c == '\n' {
                break;
            }
            self.bump();
        }
        let name = self.src[start..self.pos].to_string();
        if self.peek_char() == Some('`') {
            self.bump();
        }
        TokenKind::Ident(name)
    }

    fn number(&mut self) -> TokenKind {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            let fraction_dot = c == '.'
                && self
                    .peek_byte_at(1)
                    .map(|b| b.is_ascii_digit())
                    .unwrap_or(false);
            if c.is_ascii_alphanumeric() || c == '_' || fraction_dot {
                self.bump();
            } else {
                break;
            }
        }
        TokenKind::Number(self.src[start..self.pos].to_string())
    }

    fn ident(&mut self) -> TokenKind {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c == '_' || c.is_alphanumeric() {
                self.bump();
            } else {
                break;
            }
        }
        TokenKind::Ident(self.src[start..self.pos].to_string())
    }

    fn punct(&mut self, c: char) -> TokenKind {
        self.bump();
        match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '=' => match self.peek_char() {
                Some('=') | Some('>') => {
                    self.bump();
                    TokenKind::Other
                }
                _ => TokenKind::Assign,
            },
            '!' | '<' | '>' | '+' | '-' | '*' | '/' | '%' => {
                if self.peek_char() == Some('=') {
                    self.bump();
                }
                TokenKind::Other
            }
            _ => TokenKind::Other,
        }
    }
}
