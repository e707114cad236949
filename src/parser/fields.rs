//! Tag name to field setter tables, one per line kind

use crate::{Font, Glyph, Kerning};

/// How to read a tag's value and where to store it
pub(crate) enum Field<T> {
    I16(fn(&mut T, i16)),
    U8(fn(&mut T, u8)),
    U16(fn(&mut T, u16)),
    U32(fn(&mut T, u32)),
    /// An integer in 0..=255, non-zero meaning set
    Flag(fn(&mut T, bool)),
    /// The raw token text
    Text(fn(&mut T, String)),
}

// Derive would demand T: Copy, but only fn pointers are stored
impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Field<T> {}

/// What a malformed value does to the parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Check {
    /// The parse fails
    Strict,
    /// The tag is dropped with a warning, as if it were unknown
    BestEffort,
}

pub(crate) type Table<T> = [(&'static str, Field<T>, Check)];

macro_rules! field {
    ($key:literal, $kind:ident, $target:ty, $member:ident) => {
        field!($key, $kind, $target, $member, Strict)
    };
    ($key:literal, $kind:ident, $target:ty, $member:ident, $check:ident) => {
        (
            $key,
            Field::$kind(|target: &mut $target, value| target.$member = value),
            Check::$check,
        )
    };
}

// Only face, size, the common metrics, char geometry and kerning pairs are
// strict. The other tags were never part of the core grammar.
pub(super) const INFO_FIELDS: &Table<Font> = &[
    field!("face", Text, Font, face),
    field!("size", I16, Font, size),
    field!("bold", Flag, Font, bold, BestEffort),
    field!("italic", Flag, Font, italic, BestEffort),
    field!("charset", Text, Font, charset, BestEffort),
    field!("unicode", Flag, Font, unicode, BestEffort),
    field!("stretchH", U16, Font, stretch_h, BestEffort),
    field!("smooth", Flag, Font, smooth, BestEffort),
    field!("aa", U8, Font, aa, BestEffort),
    field!("outline", U8, Font, outline, BestEffort),
];

/// `pages` is absent: it sizes the page table and is read by the section
pub(super) const COMMON_FIELDS: &Table<Font> = &[
    field!("lineHeight", U16, Font, line_height),
    field!("base", U16, Font, base),
    field!("scaleW", U16, Font, scale_w),
    field!("scaleH", U16, Font, scale_h),
    field!("packed", Flag, Font, packed, BestEffort),
    field!("alphaChnl", U8, Font, alpha_channel, BestEffort),
    field!("redChnl", U8, Font, red_channel, BestEffort),
    field!("greenChnl", U8, Font, green_channel, BestEffort),
    field!("blueChnl", U8, Font, blue_channel, BestEffort),
];

pub(super) const CHAR_FIELDS: &Table<Glyph> = &[
    field!("id", U32, Glyph, id),
    field!("x", U16, Glyph, x),
    field!("y", U16, Glyph, y),
    field!("width", U16, Glyph, width),
    field!("height", U16, Glyph, height),
    field!("xoffset", U16, Glyph, x_offset),
    field!("yoffset", U16, Glyph, y_offset),
    field!("xadvance", U16, Glyph, x_advance),
    field!("page", U8, Glyph, page, BestEffort),
    field!("chnl", U8, Glyph, channel, BestEffort),
];

pub(super) const KERNING_FIELDS: &Table<Kerning> = &[
    field!("first", U32, Kerning, first),
    field!("second", U32, Kerning, second),
    field!("amount", I16, Kerning, amount),
];
