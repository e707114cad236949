use crate::BmFontError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One glyph's location on a texture page and its placement metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Glyph {
    /// Character id, usually a Unicode codepoint
    pub id: u32,
    /// Left edge of the glyph image on its page
    pub x: u16,
    /// Top edge of the glyph image on its page
    pub y: u16,
    /// Width of the glyph image
    pub width: u16,
    /// Height of the glyph image
    pub height: u16,
    /// Horizontal offset from the pen position to the image
    pub x_offset: u16,
    /// Vertical offset from the line top to the image
    pub y_offset: u16,
    /// How far to move the pen after drawing
    pub x_advance: u16,
    /// Index of the texture page holding the image
    pub page: u8,
    /// Texture channel mask the image is stored in
    pub channel: u8,
}

impl Glyph {
    /// Pen advance after this glyph when it is followed by `next`.
    /// Scans the kerning list; use [`FontIndex::advance`] when laying out text.
    pub fn advance_with_kerning(&self, next: u32, font: &Font) -> i32 {
        i32::from(self.x_advance) + i32::from(font.kerning(self.id, next))
    }
}

/// A spacing adjustment between two adjacent glyphs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kerning {
    /// Id of the left glyph
    pub first: u32,
    /// Id of the right glyph
    pub second: u32,
    /// Horizontal adjustment applied between the two
    pub amount: i16,
}

/// A parsed BMFont descriptor
///
/// After a successful parse the collections hold exactly as many entries as
/// the descriptor declared: `pages` from `common pages=`, `glyphs` from
/// `chars count=` and `kernings` from `kernings count=` (zero when the
/// section is absent).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Font {
    /// The `face` tag, exactly as written
    pub face: String,
    /// Nominal point size; negative when the generator matched cell height
    pub size: i16,
    pub bold: bool,
    pub italic: bool,
    /// The `charset` tag, exactly as written
    pub charset: String,
    pub unicode: bool,
    /// Vertical stretch percentage
    pub stretch_h: u16,
    pub smooth: bool,
    /// Supersampling level
    pub aa: u8,
    /// Outline thickness
    pub outline: u8,

    /// Distance between lines of text
    pub line_height: u16,
    /// Distance from the line top to the baseline
    pub base: u16,
    /// Texture width
    pub scale_w: u16,
    /// Texture height
    pub scale_h: u16,
    pub packed: bool,
    pub alpha_channel: u8,
    pub red_channel: u8,
    pub green_channel: u8,
    pub blue_channel: u8,

    /// Texture file names, indexed by page id
    pub pages: Vec<String>,
    pub glyphs: Vec<Glyph>,
    pub kernings: Vec<Kerning>,

    /// File the font was loaded from, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
}

impl Font {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn kerning_count(&self) -> usize {
        self.kernings.len()
    }

    /// The texture file for a page
    pub fn page_name(&self, page: usize) -> Option<&str> {
        self.pages.get(page).map(String::as_str)
    }

    /// The first glyph declared with this id. This is a linear scan, see
    /// [`Font::index`] for repeated lookups.
    pub fn glyph(&self, id: u32) -> Option<&Glyph> {
        self.glyphs.iter().find(|g| g.id == id)
    }

    /// The kerning adjustment between two glyphs, or 0 if the pair has none.
    /// If a pair is declared more than once the last declaration wins.
    pub fn kerning(&self, first: u32, second: u32) -> i16 {
        self.kernings
            .iter()
            .rev()
            .find(|k| k.first == first && k.second == second)
            .map_or(0, |k| k.amount)
    }

    /// All kerning pairs keyed by `(first, second)`, in declaration order
    pub fn kerning_table(&self) -> IndexMap<(u32, u32), i16> {
        let mut table = IndexMap::with_capacity(self.kernings.len());
        for k in &self.kernings {
            table.insert((k.first, k.second), k.amount);
        }
        table
    }

    /// Build hashed glyph and kerning lookups for rendering
    pub fn index(&self) -> FontIndex<'_> {
        let mut glyphs = IndexMap::with_capacity(self.glyphs.len());
        for glyph in &self.glyphs {
            glyphs.entry(glyph.id).or_insert(glyph);
        }
        FontIndex {
            glyphs,
            kernings: self.kerning_table(),
        }
    }

    /// Write the parsed font as pretty-printed JSON
    pub fn save<T: Into<PathBuf>>(&self, path: T) -> Result<(), BmFontError> {
        let file = std::fs::File::create(path.into())?;
        let mut buffer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(&mut buffer, &self)?;
        Ok(())
    }
}

/// Glyphs by id and kerning amounts by pair, borrowed from a [`Font`].
/// Duplicates resolve the same way as [`Font::glyph`] and [`Font::kerning`].
#[derive(Debug, Clone)]
pub struct FontIndex<'a> {
    glyphs: IndexMap<u32, &'a Glyph>,
    kernings: IndexMap<(u32, u32), i16>,
}

impl<'a> FontIndex<'a> {
    pub fn glyph(&self, id: u32) -> Option<&'a Glyph> {
        self.glyphs.get(&id).copied()
    }

    pub fn kerning(&self, first: u32, second: u32) -> i16 {
        self.kernings.get(&(first, second)).copied().unwrap_or(0)
    }

    /// Pen advance after glyph `id` when followed by `next`, if the font has `id`
    pub fn advance(&self, id: u32, next: u32) -> Option<i32> {
        self.glyph(id)
            .map(|glyph| i32::from(glyph.x_advance) + i32::from(self.kerning(id, next)))
    }
}
