use std::{collections::HashSet, io::Read};

use super::{
    fields::{Table, CHAR_FIELDS, COMMON_FIELDS, INFO_FIELDS, KERNING_FIELDS},
    Parser,
};
use crate::{BmFontError, Font, Glyph, Kerning};

impl<R: Read> Parser<R> {
    pub(super) fn info(&mut self, font: &mut Font) -> Result<(), BmFontError> {
        self.expect("info")?;
        self.line(font, INFO_FIELDS)?;
        log::debug!("Parsed info: face={} size={}", font.face, font.size);
        Ok(())
    }

    /// Returns one empty slot per declared page
    pub(super) fn common(
        &mut self,
        font: &mut Font,
    ) -> Result<Vec<Option<String>>, BmFontError> {
        self.expect("common")?;
        let mut slots = Vec::new();
        while self.is_ready() && !self.match_token("\n")? {
            if self.match_key("pages")? {
                let declared = usize::from(self.int_value::<u16>()?);
                slots = self.allocate("page", declared, self.options.max_pages)?;
                slots.resize(declared, None);
            } else {
                self.field(font, COMMON_FIELDS)?;
            }
        }
        log::debug!(
            "Parsed common: lineHeight={} base={} pages={}",
            font.line_height,
            font.base,
            slots.len()
        );
        Ok(slots)
    }

    /// Fill every slot from the `page` records. Each record needs an
    /// explicit `id` inside the declared range and a quoted `file`.
    pub(super) fn pages(
        &mut self,
        mut slots: Vec<Option<String>>,
    ) -> Result<Vec<String>, BmFontError> {
        let declared = slots.len();
        let mut read = 0;
        while read < declared {
            let line = self.position().line;
            if !self.match_token("page")? {
                break;
            }

            let mut id = None;
            let mut file = None;
            while self.is_ready() && !self.match_token("\n")? {
                if self.match_key("id")? {
                    let pos = self.position();
                    id = Some((self.int_value::<u32>()?, pos));
                } else if self.match_key("file")? {
                    file = Some(self.quoted_value()?);
                } else {
                    self.skip_unknown()?;
                }
            }

            let (id, pos) = id.ok_or(BmFontError::MissingPageField { line, field: "id" })?;
            let file = file.ok_or(BmFontError::MissingPageField {
                line,
                field: "file",
            })?;
            let slot = slots
                .get_mut(id as usize)
                .ok_or(BmFontError::PageIdOutOfRange {
                    pos,
                    id,
                    pages: declared,
                })?;
            if slot.is_some() {
                return Err(BmFontError::DuplicatePageId { pos, id });
            }
            *slot = Some(file);
            read += 1;
        }
        self.check_count("page", declared, read)?;

        // Every id was in range and distinct, so every slot is filled
        Ok(slots.into_iter().flatten().collect())
    }

    pub(super) fn chars(&mut self) -> Result<Vec<Glyph>, BmFontError> {
        self.expect("chars")?;
        let (glyphs, declared) = self.count_line("char", self.options.max_chars)?;
        let glyphs = self.records("char", glyphs, declared, CHAR_FIELDS)?;

        let mut seen = HashSet::with_capacity(glyphs.len());
        for glyph in &glyphs {
            if !seen.insert(glyph.id) {
                log::warn!("Glyph id {} is declared more than once", glyph.id);
            }
        }
        log::debug!("Parsed {} chars", glyphs.len());
        Ok(glyphs)
    }

    /// The whole section may be left out, which reads as zero pairs
    pub(super) fn kernings(&mut self) -> Result<Vec<Kerning>, BmFontError> {
        if !self.is_ready() {
            log::debug!("No kernings section");
            return Ok(Vec::new());
        }
        self.expect("kernings")?;
        let (kernings, declared) = self.count_line("kerning", self.options.max_kernings)?;
        let kernings = self.records("kerning", kernings, declared, KERNING_FIELDS)?;

        let mut seen = HashSet::with_capacity(kernings.len());
        for kerning in &kernings {
            if !seen.insert((kerning.first, kerning.second)) {
                log::warn!(
                    "Kerning pair ({}, {}) is declared more than once",
                    kerning.first,
                    kerning.second
                );
            }
        }
        log::debug!("Parsed {} kernings", kernings.len());
        Ok(kernings)
    }

    /// The rest of a `chars` or `kernings` line: its `count` sizes the
    /// record storage, every other tag is ignored
    fn count_line<T>(
        &mut self,
        section: &'static str,
        limit: usize,
    ) -> Result<(Vec<T>, usize), BmFontError> {
        let mut records = Vec::new();
        let mut declared = 0;
        while self.is_ready() && !self.match_token("\n")? {
            if self.match_key("count")? {
                declared = usize::from(self.int_value::<u16>()?);
                records = self.allocate(section, declared, limit)?;
            } else {
                self.skip_unknown()?;
            }
        }
        Ok((records, declared))
    }

    /// Read up to `declared` lines starting with the `section` keyword
    fn records<T: Default>(
        &mut self,
        section: &'static str,
        mut records: Vec<T>,
        declared: usize,
        table: &Table<T>,
    ) -> Result<Vec<T>, BmFontError> {
        while records.len() < declared && self.match_token(section)? {
            let mut record = T::default();
            self.line(&mut record, table)?;
            records.push(record);
        }
        self.check_count(section, declared, records.len())?;
        Ok(records)
    }
}
