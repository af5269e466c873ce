use super::source::Source;
use crate::error::Error;
use const_format::concatcp;
use once_cell::sync::Lazy;
use regex::Regex;

/// Lexeme of the `ENDMARKER` token, also reported when input ends too early.
pub const END_LEXEME: &str = "\\0";

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub typ: TokenType,
    pub lexeme: String,
    /// Scanner position after the token was consumed, not its first byte.
    pub position: usize,
}

impl Token {
    pub fn new(typ: TokenType, lexeme: &str, position: usize) -> Self {
        Self {
            typ,
            lexeme: lexeme.to_string(),
            position,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}('{}')", self.typ, self.lexeme)
    }
}

#[allow(non_camel_case_types)]
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TokenType {
    PLUS,
    MINUS,
    STAR,
    DOUBLESTAR,
    CIRCUMFLEX,
    SLASH,
    LEFTSHIFT,
    RIGHTSHIFT,
    LPAR,
    RPAR,
    NUMBER,
    ENDMARKER,
}

/// Append-only token sequence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenList(Vec<Token>);

impl TokenList {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn add(&mut self, token: Token) {
        self.0.push(token);
    }
}

impl std::ops::Deref for TokenList {
    type Target = [Token];

    fn deref(&self) -> &[Token] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

macro_rules! alternative {
    ($t:expr) => {{
        $t
    }};
    ($t:expr, $($ts:expr),+) => {{
        concatcp!($t, "|", alternative!($($ts),+))
    }}
}

macro_rules! group {
    ($($ts:expr),+) => {{
        concatcp!(r"(", alternative!($($ts),+), ")")
    }}
}

macro_rules! maybe {
    ($($ts:expr),+) => {
        concatcp!(group!($($ts),+), r"?")
    }
}

const S_DIGITS: &str = r"[0-9](?:_?[0-9])*";
const S_FRACTION: &str = concatcp!(r"\.", S_DIGITS);
const S_WHOLE_NUMBER: &str = concatcp!("^", S_DIGITS, maybe!(S_FRACTION), "$");

/// Everything the tokenizer accepts as a `NUMBER` lexeme.
pub(super) static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(S_WHOLE_NUMBER).expect("Error compiling regex."));

pub struct Tokenizer<'a, S: Source + ?Sized> {
    source: &'a S,
    tokens: TokenList,
    pos: usize,
}

impl<'a, S: Source + ?Sized> Tokenizer<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            tokens: TokenList::new(),
            pos: 0,
        }
    }

    /// Scans the whole source, stopping at the first malformed byte.
    pub fn tokenize(mut self) -> Result<TokenList, Error> {
        while let Some(chr) = self.peek() {
            match chr {
                b'+' | b'-' => {
                    self.advance();
                    // `++` and `--` are never tokens, and neither sign may end the input.
                    match self.peek() {
                        Some(next) if next != chr => {}
                        _ => return Err(Error::unexpected_byte(Some(chr), self.pos + 1)),
                    }
                    if chr == b'+' {
                        self.push(TokenType::PLUS, "+");
                    } else {
                        self.push(TokenType::MINUS, "-");
                    }
                }
                b'*' => {
                    self.advance();
                    match self.peek() {
                        None => return Err(Error::unexpected_byte(Some(chr), self.pos)),
                        Some(b'*') => {
                            self.push(TokenType::DOUBLESTAR, "**");
                            self.advance();
                        }
                        Some(_) => self.push(TokenType::STAR, "*"),
                    }
                }
                b'<' | b'>' => {
                    self.advance();
                    if self.peek() != Some(chr) {
                        return Err(Error::unexpected_byte(Some(chr), self.pos));
                    }
                    if chr == b'<' {
                        self.push(TokenType::LEFTSHIFT, "<<");
                    } else {
                        self.push(TokenType::RIGHTSHIFT, ">>");
                    }
                    self.advance();
                }
                b'^' => self.single(TokenType::CIRCUMFLEX, "^"),
                b'/' => self.single(TokenType::SLASH, "/"),
                b'(' => self.single(TokenType::LPAR, "("),
                b')' => self.single(TokenType::RPAR, ")"),
                b' ' | b'\t' | b'\n' | b'\r' => {
                    self.advance();
                }
                b'0'..=b'9' => self.number(chr)?,
                _ => return Err(Error::unexpected_byte(Some(chr), self.pos)),
            }
        }
        self.push(TokenType::ENDMARKER, END_LEXEME);
        tracing::trace!(count = self.tokens.len(), "tokenized");
        Ok(self.tokens)
    }

    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos)
    }

    fn advance(&mut self) -> Option<u8> {
        let chr = self.peek()?;
        self.pos += 1;
        Some(chr)
    }

    fn push(&mut self, typ: TokenType, lexeme: &str) {
        self.tokens.add(Token::new(typ, lexeme, self.pos));
    }

    fn single(&mut self, typ: TokenType, lexeme: &str) {
        self.advance();
        self.push(typ, lexeme);
    }

    /// Collects digits with at most one `.` and `_` separators between digits.
    fn number(&mut self, first: u8) -> Result<(), Error> {
        let mut lexeme = String::from(char::from(first));
        let mut seen_dot = false;
        self.advance();

        while let Some(chr) = self.peek() {
            match chr {
                b'0'..=b'9' => {
                    self.advance();
                    lexeme.push(char::from(chr));
                }
                b'.' => {
                    if seen_dot {
                        return Err(Error::unexpected_byte(Some(chr), self.pos + 1));
                    }
                    seen_dot = true;
                    self.advance();
                    lexeme.push('.');
                    self.expect_digit()?;
                }
                b'_' => {
                    self.advance();
                    lexeme.push('_');
                    self.expect_digit()?;
                }
                _ => break,
            }
        }

        self.push(TokenType::NUMBER, &lexeme);
        Ok(())
    }

    fn expect_digit(&self) -> Result<(), Error> {
        match self.peek() {
            Some(chr) if chr.is_ascii_digit() => Ok(()),
            other => Err(Error::unexpected_byte(other, self.pos)),
        }
    }
}

pub fn tokenize<S: Source + ?Sized>(source: &S) -> Result<TokenList, Error> {
    Tokenizer::new(source).tokenize()
}
