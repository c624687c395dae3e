//! Glyph lookup, caching and atlas packing over an external font service.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    error::{Error, Result},
    geom::{Point, Rect, Size},
};

/// Identifies a face at a size.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontDescriptor {
    /// Family name.
    pub family: String,
    /// Pixel size.
    pub size: u32,
    /// Bold weight.
    pub bold: bool,
    /// Italic style.
    pub italic: bool,
}

impl FontDescriptor {
    /// A regular face of `family` at `size` pixels.
    pub fn new(family: impl Into<String>, size: u32) -> Self {
        Self {
            family: family.into(),
            size,
            bold: false,
            italic: false,
        }
    }

    /// The bold variant.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// The italic variant.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self::new("sans", 12)
    }
}

/// Placement metrics for one glyph, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GlyphMetrics {
    /// Bitmap width.
    pub width: u32,
    /// Bitmap height.
    pub height: u32,
    /// Offset from the pen to the bitmap's left edge.
    pub bearing_x: i32,
    /// Offset from the baseline up to the bitmap's top edge.
    pub bearing_y: i32,
    /// Pen advance after this glyph.
    pub advance: u32,
}

/// An 8-bit coverage bitmap, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlyphBitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height` coverage values.
    pub pixels: Vec<u8>,
}

/// A rasterised glyph.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Glyph {
    /// Placement metrics.
    pub metrics: GlyphMetrics,
    /// Coverage bitmap.
    pub bitmap: GlyphBitmap,
}

/// The platform's font rasteriser.
pub trait FontService {
    /// Rasterise `ch` in `font`.
    fn lookup(&mut self, ch: char, font: &FontDescriptor) -> Result<Glyph>;

    /// Distance between consecutive baselines.
    fn line_height(&self, font: &FontDescriptor) -> u32;
}

/// Where a glyph's bitmap lives in the atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AtlasSlot {
    /// Page index.
    pub page: usize,
    /// Pixel rectangle within the page.
    pub rect: Rect,
}

/// A row of slots sharing a height.
#[derive(Debug, Clone, Copy)]
struct Shelf {
    /// Top edge within the page.
    y: u32,
    /// Height of the tallest slot.
    height: u32,
    /// Width already allocated.
    used: u32,
}

/// One atlas page.
#[derive(Debug, Clone, Default)]
struct Page {
    /// Shelves, top to bottom.
    shelves: Vec<Shelf>,
    /// Height used by the shelves.
    used: u32,
}

impl Page {
    /// Reserve `size` on this page if it fits.
    fn fit(&mut self, size: Size, page: Size) -> Option<Rect> {
        for shelf in &mut self.shelves {
            if shelf.height >= size.height && page.width - shelf.used >= size.width {
                let rect = Rect::new(shelf.used as i32, shelf.y as i32, size.width, size.height);
                shelf.used += size.width;
                return Some(rect);
            }
        }
        if page.height - self.used < size.height {
            return None;
        }
        let shelf = Shelf {
            y: self.used,
            height: size.height,
            used: size.width,
        };
        self.used += size.height;
        self.shelves.push(shelf);
        Some(Rect::new(0, shelf.y as i32, size.width, size.height))
    }
}

/// Shelf-packed texture pages for glyph bitmaps.
#[derive(Debug, Clone)]
pub struct GlyphAtlas {
    /// Dimensions of every page.
    page_size: Size,
    /// Allocated pages.
    pages: Vec<Page>,
}

impl GlyphAtlas {
    /// An empty atlas with pages of `page_size`.
    pub fn new(page_size: Size) -> Self {
        Self {
            page_size,
            pages: Vec::new(),
        }
    }

    /// Page dimensions.
    pub fn page_size(&self) -> Size {
        self.page_size
    }

    /// Number of pages in use.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Reserve space for a bitmap, opening a new page when the existing ones
    /// are full. Empty bitmaps need no space and get `None`.
    pub fn allocate(&mut self, size: Size) -> Result<Option<AtlasSlot>> {
        if !size.is_valid() {
            return Ok(None);
        }
        if !self.page_size.contains(&size) {
            return Err(Error::Font(format!(
                "glyph {}x{} exceeds atlas page {}x{}",
                size.width, size.height, self.page_size.width, self.page_size.height
            )));
        }
        let page_size = self.page_size;
        if let Some(slot) = self
            .pages
            .iter_mut()
            .enumerate()
            .find_map(|(page, p)| p.fit(size, page_size).map(|rect| AtlasSlot { page, rect }))
        {
            return Ok(Some(slot));
        }
        let mut page = Page::default();
        let rect = page
            .fit(size, page_size)
            .ok_or_else(|| Error::Internal("fresh atlas page rejected a glyph".into()))?;
        self.pages.push(page);
        tracing::debug!(pages = self.pages.len(), "new atlas page");
        Ok(Some(AtlasSlot {
            page: self.pages.len() - 1,
            rect,
        }))
    }

    /// Forget every allocation.
    pub fn clear(&mut self) {
        self.pages.clear();
    }
}

/// A cached glyph: its metrics and where its bitmap was packed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CachedGlyph {
    /// Placement metrics.
    pub metrics: GlyphMetrics,
    /// Atlas slot, `None` for empty glyphs such as spaces.
    pub slot: Option<AtlasSlot>,
}

/// A bitmap waiting to be copied into its atlas slot by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Destination.
    pub slot: AtlasSlot,
    /// Pixels.
    pub bitmap: GlyphBitmap,
}

/// A glyph positioned for drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacedGlyph {
    /// The character.
    pub ch: char,
    /// Top-left of the bitmap, relative to the layout origin.
    pub position: Point,
    /// Placement metrics.
    pub metrics: GlyphMetrics,
    /// Atlas slot holding the bitmap.
    pub slot: Option<AtlasSlot>,
}

/// Caches glyphs from a [`FontService`], packing their bitmaps into a
/// [`GlyphAtlas`]. The service is asked once per font and character.
pub struct GlyphCache<S> {
    /// Rasteriser.
    service: S,
    /// Bitmap storage.
    atlas: GlyphAtlas,
    /// Cached glyphs.
    glyphs: HashMap<(FontDescriptor, char), CachedGlyph>,
    /// Bitmaps packed but not yet uploaded.
    pending: Vec<Upload>,
}

impl<S: FontService> GlyphCache<S> {
    /// A cache over `service` with atlas pages sized from `config`.
    pub fn new(service: S, config: &Config) -> Self {
        Self {
            service,
            atlas: GlyphAtlas::new(config.atlas_size),
            glyphs: HashMap::new(),
            pending: Vec::new(),
        }
    }

    /// The wrapped service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// The atlas.
    pub fn atlas(&self) -> &GlyphAtlas {
        &self.atlas
    }

    /// Number of cached glyphs.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Drop every cached glyph and atlas allocation.
    pub fn clear(&mut self) {
        self.glyphs.clear();
        self.pending.clear();
        self.atlas.clear();
    }

    /// Bitmaps packed since the last call, for the backend to upload.
    pub fn drain_uploads(&mut self) -> Vec<Upload> {
        self.pending.drain(..).collect()
    }

    /// Distance between consecutive baselines.
    pub fn line_height(&self, font: &FontDescriptor) -> u32 {
        self.service.line_height(font)
    }

    /// Look up a glyph, asking the service on a cache miss.
    pub fn glyph(&mut self, font: &FontDescriptor, ch: char) -> Result<CachedGlyph> {
        let key = (font.clone(), ch);
        if let Some(g) = self.glyphs.get(&key) {
            return Ok(*g);
        }
        let glyph = self.service.lookup(ch, font)?;
        let bitmap = glyph.bitmap;
        if bitmap.pixels.len() as u64 != u64::from(bitmap.width) * u64::from(bitmap.height) {
            return Err(Error::Font(format!(
                "bitmap for {ch:?} holds {} bytes, expected {}x{}",
                bitmap.pixels.len(),
                bitmap.width,
                bitmap.height
            )));
        }
        let slot = self
            .atlas
            .allocate(Size::new(bitmap.width, bitmap.height))?;
        if let Some(slot) = slot {
            self.pending.push(Upload { slot, bitmap });
        }
        tracing::trace!(?ch, family = %font.family, size = font.size, ?slot, "cached glyph");
        let cached = CachedGlyph {
            metrics: glyph.metrics,
            slot,
        };
        self.glyphs.insert(key, cached);
        Ok(cached)
    }

    /// Extent of `text`: the widest line's advance by the number of lines
    /// times the line height.
    pub fn measure(&mut self, font: &FontDescriptor, text: &str) -> Result<Size> {
        let mut width = 0;
        let mut lines = 0;
        for line in text.split('\n') {
            let mut advance = 0u32;
            for ch in line.chars() {
                advance = advance.saturating_add(self.glyph(font, ch)?.metrics.advance);
            }
            width = width.max(advance);
            lines += 1;
        }
        Ok(Size::new(width, lines * self.line_height(font)))
    }

    /// Position each glyph of `text` with `origin` as the top-left of the
    /// first line. A newline returns the pen to `origin.x` one line down.
    pub fn layout(
        &mut self,
        font: &FontDescriptor,
        text: &str,
        origin: Point,
    ) -> Result<Vec<PlacedGlyph>> {
        let line_height = self.line_height(font) as i32;
        let mut out = Vec::with_capacity(text.len());
        let mut pen = origin;
        for ch in text.chars() {
            if ch == '\n' {
                pen = Point::new(origin.x, pen.y + line_height);
                continue;
            }
            let glyph = self.glyph(font, ch)?;
            let m = glyph.metrics;
            let baseline = pen.y + line_height;
            out.push(PlacedGlyph {
                ch,
                position: Point::new(pen.x + m.bearing_x, baseline - m.bearing_y),
                metrics: m,
                slot: glyph.slot,
            });
            pen.x += m.advance as i32;
        }
        Ok(out)
    }
}
