//! Tokenizer for the BMFont text format
//!
//! The format is line oriented. A line is a sequence of words separated by
//! spaces, and most words are `key=value` tags. The tokenizer produces:
//!
//! | Input                          | Token                 |
//! |--------------------------------|-----------------------|
//! | `\n`                           | `Token::Newline`      |
//! | `=`                            | `Token::Equals`       |
//! | anything else up to a delimiter| `Token::Word(text)`   |
//! | end of input                   | `Token::End` (sticky) |
//!
//! Spaces and carriage returns separate tokens and are otherwise ignored.
//! Quotes get no special treatment, so a quoted value containing `=` or a
//! space is split like any other text.

use std::{
    fmt,
    io::{BufReader, Bytes, Read},
};

use crate::{error::Position, BmFontError};

/// One lexical unit of a BMFont descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A run of characters up to the next delimiter
    Word(String),
    /// A line terminator
    Newline,
    /// A lone `=`
    Equals,
    /// The input is exhausted
    End,
}

impl Token {
    /// Whether this token spells out `text` exactly (`"\n"` and `"="` match
    /// the single-character tokens)
    pub fn is(&self, text: &str) -> bool {
        match self {
            Token::Word(word) => word == text,
            Token::Newline => text == "\n",
            Token::Equals => text == "=",
            Token::End => false,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(word) => f.write_str(word),
            Token::Newline => f.write_str("\n"),
            Token::Equals => f.write_str("="),
            Token::End => f.write_str("<end of input>"),
        }
    }
}

/// Pulls tokens one at a time out of a byte source, keeping one token of
/// lookahead and the position it started at
pub struct Tokenizer<R> {
    bytes: Bytes<BufReader<R>>,
    next_byte: Option<u8>,
    current: Token,
    start: Position,
    cursor: Position,
    max_token_len: usize,
}

impl<R: Read> Tokenizer<R> {
    /// Wrap a source and load its first token
    pub fn new(source: R, max_token_len: usize) -> Result<Self, BmFontError> {
        let mut bytes = BufReader::new(source).bytes();
        let next_byte = bytes.next().transpose()?;
        let mut tokenizer = Tokenizer {
            bytes,
            next_byte,
            current: Token::Newline,
            start: Position::start(),
            cursor: Position::start(),
            max_token_len,
        };
        tokenizer.advance()?;
        Ok(tokenizer)
    }

    /// The lookahead token
    pub fn current(&self) -> &Token {
        &self.current
    }

    /// Where the lookahead token started
    pub fn position(&self) -> Position {
        self.start
    }

    /// Whether the input has been exhausted
    pub fn at_end(&self) -> bool {
        self.current == Token::End
    }

    /// Drop the lookahead token and load the next one. Does nothing once the
    /// end of input has been reached.
    pub fn advance(&mut self) -> Result<(), BmFontError> {
        if self.at_end() {
            return Ok(());
        }

        while let Some(byte @ (b' ' | b'\r')) = self.next_byte {
            if byte == b' ' {
                self.cursor.col += 1;
            }
            self.bump()?;
        }

        self.start = self.cursor;
        self.current = match self.next_byte {
            None => Token::End,
            Some(b'\n') => {
                self.cursor.line += 1;
                self.cursor.col = 1;
                self.bump()?;
                Token::Newline
            }
            Some(b'=') => {
                self.cursor.col += 1;
                self.bump()?;
                Token::Equals
            }
            Some(_) => self.read_word()?,
        };
        Ok(())
    }

    fn bump(&mut self) -> Result<(), BmFontError> {
        self.next_byte = self.bytes.next().transpose()?;
        Ok(())
    }

    fn read_word(&mut self) -> Result<Token, BmFontError> {
        let mut word = Vec::new();
        while let Some(byte) = self.next_byte {
            if matches!(byte, b'=' | b' ' | b'\r' | b'\n') {
                break;
            }
            if word.len() == self.max_token_len {
                return Err(BmFontError::TokenTooLong {
                    pos: self.start,
                    max: self.max_token_len,
                });
            }
            word.push(byte);
            self.cursor.col += 1;
            self.bump()?;
        }
        Ok(Token::Word(String::from_utf8_lossy(&word).into_owned()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::options::{ParseOptions, MAX_TOKEN_LENGTH};
    use pretty_assertions::assert_eq;

    fn tokens(text: &str) -> Vec<(Token, Position)> {
        let mut tokenizer = Tokenizer::new(text.as_bytes(), MAX_TOKEN_LENGTH).unwrap();
        let mut out = vec![];
        while !tokenizer.at_end() {
            out.push((tokenizer.current().clone(), tokenizer.position()));
            tokenizer.advance().unwrap();
        }
        out
    }

    fn word(text: &str) -> Token {
        Token::Word(text.to_string())
    }

    fn at(line: usize, col: usize) -> Position {
        Position { line, col }
    }

    #[test]
    fn test_key_value_line() {
        assert_eq!(
            tokens("info face=\"valid\"  size=8\r\nchars"),
            vec![
                (word("info"), at(1, 1)),
                (word("face"), at(1, 6)),
                (Token::Equals, at(1, 10)),
                (word("\"valid\""), at(1, 11)),
                (word("size"), at(1, 20)),
                (Token::Equals, at(1, 24)),
                (word("8"), at(1, 25)),
                (Token::Newline, at(1, 26)),
                (word("chars"), at(2, 1)),
            ]
        );
    }

    #[test]
    fn test_quoted_equals_is_not_protected() {
        let toks: Vec<Token> = tokens("file=\"a=b.png\"")
            .into_iter()
            .map(|(t, _)| t)
            .collect();
        assert_eq!(
            toks,
            vec![
                word("file"),
                Token::Equals,
                word("\"a"),
                Token::Equals,
                word("b.png\""),
            ]
        );
    }

    #[test]
    fn test_empty_input_is_end() {
        let tokenizer = Tokenizer::new("".as_bytes(), MAX_TOKEN_LENGTH).unwrap();
        assert!(tokenizer.at_end());
        let tokenizer = Tokenizer::new("  \r ".as_bytes(), MAX_TOKEN_LENGTH).unwrap();
        assert!(tokenizer.at_end());
    }

    #[test]
    fn test_end_is_sticky() {
        let mut tokenizer = Tokenizer::new("x".as_bytes(), MAX_TOKEN_LENGTH).unwrap();
        tokenizer.advance().unwrap();
        assert!(tokenizer.at_end());
        tokenizer.advance().unwrap();
        tokenizer.advance().unwrap();
        assert_eq!(tokenizer.current(), &Token::End);
    }

    #[test]
    fn test_token_length_ceiling() {
        let exact = "a".repeat(8);
        let mut tokenizer = Tokenizer::new(exact.as_bytes(), 8).unwrap();
        assert_eq!(tokenizer.current(), &word(&exact));
        tokenizer.advance().unwrap();
        assert!(tokenizer.at_end());

        let long = format!("key {}", "a".repeat(9));
        let mut tokenizer = Tokenizer::new(long.as_bytes(), 8).unwrap();
        match tokenizer.advance() {
            Err(BmFontError::TokenTooLong { pos, max }) => {
                assert_eq!(pos, at(1, 5));
                assert_eq!(max, 8);
            }
            other => panic!("expected TokenTooLong, got {:?}", other),
        }
    }

    #[test]
    fn test_default_token_length_ceiling() {
        let max = ParseOptions::default().max_token_len;
        assert_eq!(max, 1024);

        let exact = "a".repeat(max);
        let tokenizer = Tokenizer::new(exact.as_bytes(), max).unwrap();
        assert_eq!(tokenizer.current(), &word(&exact));

        let long = format!("face={}", "a".repeat(max + 1));
        let mut tokenizer = Tokenizer::new(long.as_bytes(), max).unwrap();
        tokenizer.advance().unwrap();
        match tokenizer.advance() {
            Err(BmFontError::TokenTooLong { pos, max }) => {
                assert_eq!(pos, at(1, 6));
                assert_eq!(max, 1024);
            }
            other => panic!("expected TokenTooLong, got {:?}", other),
        }
    }

    #[test]
    fn test_token_is() {
        assert!(Token::Newline.is("\n"));
        assert!(Token::Equals.is("="));
        assert!(word("page").is("page"));
        assert!(!word("pages").is("page"));
        assert!(!Token::End.is(""));
    }
}
