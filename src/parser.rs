//! Recursive-descent parser over the token stream
//!
//! A descriptor is five sections in fixed order: `info`, `common`, the
//! `page` records, `chars` with its `char` records, and an optional
//! `kernings` block with its `kerning` records. Each line is a keyword
//! followed by `key=value` tags. Tags the parser does not know are skipped,
//! so descriptors written by newer generators still load.

use std::io::Read;

use num_traits::PrimInt;

use crate::{
    error::Position,
    number::{parse_integer, IntegerError},
    options::ParseOptions,
    tokenizer::{Token, Tokenizer},
    BmFontError, Font,
};

mod fields;
mod sections;

use fields::{Check, Field, Table};

pub(crate) struct Parser<R> {
    tokens: Tokenizer<R>,
    options: ParseOptions,
}

impl<R: Read> Parser<R> {
    /// Set up a parser with the first token already loaded
    pub(crate) fn new(source: R, options: &ParseOptions) -> Result<Self, BmFontError> {
        Ok(Parser {
            tokens: Tokenizer::new(source, options.max_token_len)?,
            options: options.clone(),
        })
    }

    /// Run every section in order and require the input to end afterwards
    pub(crate) fn parse(mut self) -> Result<Font, BmFontError> {
        let mut font = Font::new();
        self.info(&mut font)?;
        let slots = self.common(&mut font)?;
        font.pages = self.pages(slots)?;
        font.glyphs = self.chars()?;
        font.kernings = self.kernings()?;

        if !self.tokens.at_end() {
            return Err(BmFontError::ExpectedEnd {
                pos: self.position(),
                got: self.current().to_string(),
            });
        }
        Ok(font)
    }

    fn current(&self) -> &Token {
        self.tokens.current()
    }

    fn position(&self) -> Position {
        self.tokens.position()
    }

    /// More tokens remain
    fn is_ready(&self) -> bool {
        !self.tokens.at_end()
    }

    fn advance(&mut self) -> Result<(), BmFontError> {
        self.tokens.advance()
    }

    /// Consume the current token if it is `token`. A mismatch is not an error.
    fn match_token(&mut self, token: &str) -> Result<bool, BmFontError> {
        if !self.current().is(token) {
            return Ok(false);
        }
        self.advance()?;
        Ok(true)
    }

    /// Consume the current token, which must be `token`
    fn expect(&mut self, token: &str) -> Result<(), BmFontError> {
        if self.match_token(token)? {
            Ok(())
        } else {
            Err(self.unexpected(token))
        }
    }

    fn unexpected(&self, expected: &str) -> BmFontError {
        match self.current() {
            Token::End => BmFontError::UnexpectedEof {
                pos: self.position(),
            },
            other => BmFontError::UnexpectedToken {
                pos: self.position(),
                got: other.to_string(),
                expected: expected.to_string(),
            },
        }
    }

    /// If the current token is `key`, consume it and the `=` after it,
    /// leaving the parser on the key's value
    fn match_key(&mut self, key: &str) -> Result<bool, BmFontError> {
        if !self.match_token(key)? {
            return Ok(false);
        }
        self.expect("=")?;
        Ok(true)
    }

    /// Skip a tag nobody asked for: the key, then `=` and the value if the
    /// key has them. Never consumes the end of the line.
    fn skip_unknown(&mut self) -> Result<(), BmFontError> {
        log::trace!(
            "Skipping unknown tag {:?} ({})",
            self.current().to_string(),
            self.position()
        );
        self.advance()?;
        if self.match_token("=")? && matches!(self.current(), Token::Word(_) | Token::Equals) {
            self.advance()?;
        }
        Ok(())
    }

    fn value_word(&self) -> Result<&str, BmFontError> {
        match self.current() {
            Token::Word(word) => Ok(word),
            _ => Err(self.unexpected("value")),
        }
    }

    /// Read the current value as an integer that must fit in `T`
    fn int_value<T: PrimInt>(&mut self) -> Result<T, BmFontError> {
        let pos = self.position();
        let text = self.value_word()?;
        let min = T::min_value().to_i64().unwrap_or(i64::MIN);
        let max = T::max_value().to_i64().unwrap_or(i64::MAX);
        let out_of_range = || BmFontError::IntegerOutOfRange {
            pos,
            got: text.to_string(),
            min,
            max,
        };

        let value = parse_integer(text).map_err(|e| match e {
            IntegerError::Invalid => BmFontError::NotAnInteger {
                pos,
                got: text.to_string(),
            },
            IntegerError::Overflow => out_of_range(),
        })?;
        let value: T = num_traits::cast(value).ok_or_else(out_of_range)?;

        self.advance()?;
        Ok(value)
    }

    /// Read the current value as text, exactly as written
    fn text_value(&mut self) -> Result<String, BmFontError> {
        let text = self.value_word()?.to_string();
        self.advance()?;
        Ok(text)
    }

    /// Read the current value as a double-quoted string, without its quotes
    fn quoted_value(&mut self) -> Result<String, BmFontError> {
        let text = self.value_word()?;
        let inner = text
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .map(str::to_string)
            .ok_or_else(|| BmFontError::ExpectedQuotedString {
                pos: self.position(),
                got: text.to_string(),
            })?;
        self.advance()?;
        Ok(inner)
    }

    /// Consume one tag, storing it through `table` if the key is listed
    fn field<T>(&mut self, target: &mut T, table: &Table<T>) -> Result<(), BmFontError> {
        let Some(&(key, field, check)) = table.iter().find(|(key, ..)| self.current().is(key))
        else {
            return self.skip_unknown();
        };
        self.advance()?;
        if check == Check::BestEffort && !self.current().is("=") {
            log::warn!("Ignoring {} without a value ({})", key, self.position());
            return Ok(());
        }
        self.expect("=")?;

        let pos = self.position();
        match (self.store(target, field), check) {
            (Err(e), Check::BestEffort) if is_bad_value(&e) => {
                log::warn!("Ignoring {} ({}): {}", key, pos, e);
                if matches!(self.current(), Token::Word(_) | Token::Equals) {
                    self.advance()?;
                }
                Ok(())
            }
            (result, _) => result,
        }
    }

    fn store<T>(&mut self, target: &mut T, field: Field<T>) -> Result<(), BmFontError> {
        match field {
            Field::I16(set) => set(target, self.int_value()?),
            Field::U8(set) => set(target, self.int_value()?),
            Field::U16(set) => set(target, self.int_value()?),
            Field::U32(set) => set(target, self.int_value()?),
            Field::Flag(set) => set(target, self.int_value::<u8>()? != 0),
            Field::Text(set) => set(target, self.text_value()?),
        }
        Ok(())
    }

    /// Consume tags up to and including the end of the line
    fn line<T>(&mut self, target: &mut T, table: &Table<T>) -> Result<(), BmFontError> {
        while self.is_ready() && !self.match_token("\n")? {
            self.field(target, table)?;
        }
        Ok(())
    }

    /// Reserve room for a declared number of records
    fn allocate<T>(
        &self,
        section: &'static str,
        declared: usize,
        limit: usize,
    ) -> Result<Vec<T>, BmFontError> {
        if declared > limit {
            return Err(BmFontError::LimitExceeded {
                section,
                declared,
                limit,
            });
        }
        let mut records = Vec::new();
        records
            .try_reserve_exact(declared)
            .map_err(|_| BmFontError::Allocation {
                section,
                count: declared,
            })?;
        Ok(records)
    }

    /// Once `actual` records of a section have been read, make sure that
    /// matches what was declared and no surplus record follows
    fn check_count(
        &self,
        section: &'static str,
        declared: usize,
        actual: usize,
    ) -> Result<(), BmFontError> {
        if actual != declared {
            return Err(BmFontError::CountMismatch {
                section,
                expected: declared,
                actual,
            });
        }
        if self.current().is(section) {
            return Err(BmFontError::TooManyRecords {
                section,
                declared,
                pos: self.position(),
            });
        }
        Ok(())
    }
}

/// Errors raised by a value that is present but unusable, before the
/// parser moves past it
fn is_bad_value(e: &BmFontError) -> bool {
    matches!(
        e,
        BmFontError::NotAnInteger { .. }
            | BmFontError::IntegerOutOfRange { .. }
            | BmFontError::UnexpectedToken { .. }
            | BmFontError::UnexpectedEof { .. }
    )
}
