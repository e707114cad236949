//! # bmfont-text
//!
//! A strict loader for the text flavour of the BMFont descriptor format, the
//! `.fnt` files written by AngelCode's Bitmap Font Generator and the many
//! tools that copy its output. A descriptor looks like this:
//!
//! ```text
//! info face="Arial" size=32 bold=0 italic=0
//! common lineHeight=32 base=26 scaleW=256 scaleH=256 pages=1
//! page id=0 file="arial_0.png"
//! chars count=1
//! char id=65 x=0 y=0 width=20 height=22 xoffset=0 yoffset=4 xadvance=21 page=0 chnl=15
//! kernings count=1
//! kerning first=65 second=86 amount=-2
//! ```
//!
//! Parsing is all or nothing. The declared page, char and kerning counts
//! must match the records that follow, every value must fit its field, and
//! any problem is reported as a [`BmFontError`] with its line and column.
//! Tags the parser does not know are skipped.
//!
//! ```no_run
//! # use bmfont_text::{load, BmFontError};
//! # fn main() -> Result<(), BmFontError> {
//! let font = load("arial.fnt")?;
//! let index = font.index();
//! let advance = index.advance('A' as u32, 'V' as u32);
//! # Ok(())
//! # }
//! ```
#![deny(clippy::unwrap_used, clippy::expect_used)]

mod error;
mod font;
mod number;
mod options;
mod parser;
pub mod tokenizer;

pub use crate::{
    error::{BmFontError, Position},
    font::{Font, FontIndex, Glyph, Kerning},
    options::{ParseOptions, MAX_TOKEN_LENGTH},
};
use std::{io::Read, path::PathBuf};

/// Parse a descriptor from any byte source
pub fn parse<R: Read>(source: R) -> Result<Font, BmFontError> {
    parse_with_options(source, &ParseOptions::default())
}

pub fn parse_with_options<R: Read>(
    source: R,
    options: &ParseOptions,
) -> Result<Font, BmFontError> {
    parser::Parser::new(source, options)?.parse()
}

pub fn parse_str(text: &str) -> Result<Font, BmFontError> {
    parse(text.as_bytes())
}

/// Load a descriptor file
pub fn load(filename: impl Into<PathBuf>) -> Result<Font, BmFontError> {
    load_with_options(filename, &ParseOptions::default())
}

pub fn load_with_options(
    filename: impl Into<PathBuf>,
    options: &ParseOptions,
) -> Result<Font, BmFontError> {
    let pb = filename.into();
    let file = std::fs::File::open(&pb)?;
    let mut font = parse_with_options(file, options)?;
    log::info!(
        "Loaded {}: face {}, {} pages, {} chars, {} kernings",
        pb.display(),
        font.face,
        font.page_count(),
        font.glyph_count(),
        font.kerning_count()
    );
    font.source = Some(pb);
    Ok(font)
}
