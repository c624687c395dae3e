//! Glyph cache, atlas and text layout over a synthetic font service.

#[cfg(test)]
mod tests {
    use blendint::{
        config::Config,
        error::{Error, Result},
        font::{FontDescriptor, Glyph, GlyphBitmap, GlyphCache, GlyphMetrics},
        geom::{Point, Size},
        testing::MapFontService,
    };
    use pretty_assertions::assert_eq;

    fn cache(service: MapFontService, atlas: Size) -> GlyphCache<MapFontService> {
        let config = Config {
            atlas_size: atlas,
            ..Config::default()
        };
        GlyphCache::new(service, &config)
    }

    #[test]
    fn repeated_text_hits_the_cache() -> Result<()> {
        let mut c = cache(MapFontService::new(6, 12), Size::new(64, 64));
        let font = FontDescriptor::new("mono", 12);
        c.layout(&font, "hello hello", Point::zero())?;
        // h, e, l, o and the space.
        assert_eq!(c.service().lookups(), 5);
        assert_eq!(c.len(), 5);
        c.measure(&font, "hole")?;
        assert_eq!(c.service().lookups(), 5);

        c.clear();
        assert!(c.is_empty());
        assert_eq!(c.atlas().page_count(), 0);
        Ok(())
    }

    #[test]
    fn full_pages_spill_onto_new_ones() -> Result<()> {
        // 8x6 glyphs on a 16x12 page: two per shelf, two shelves.
        let mut c = cache(MapFontService::new(8, 8), Size::new(16, 12));
        let font = FontDescriptor::default();
        let placed = c.layout(&font, "abcde", Point::zero())?;
        let pages: Vec<usize> = placed
            .iter()
            .map(|g| g.slot.map_or(usize::MAX, |s| s.page))
            .collect();
        assert_eq!(pages, vec![0, 0, 0, 0, 1]);
        assert_eq!(c.atlas().page_count(), 2);
        assert_eq!(c.drain_uploads().len(), 5);
        Ok(())
    }

    #[test]
    fn oversized_and_missing_glyphs_are_errors() {
        let big = Glyph {
            metrics: GlyphMetrics {
                width: 40,
                height: 40,
                bearing_x: 0,
                bearing_y: 40,
                advance: 40,
            },
            bitmap: GlyphBitmap {
                width: 40,
                height: 40,
                pixels: vec![0; 1600],
            },
        };
        let broken = Glyph {
            bitmap: GlyphBitmap {
                width: 2,
                height: 2,
                pixels: vec![0; 3],
            },
            ..Glyph::default()
        };
        let service = MapFontService::new(8, 16)
            .with_glyph('W', big)
            .with_glyph('?', broken)
            .without('x');
        let mut c = cache(service, Size::new(32, 32));
        let font = FontDescriptor::default();
        assert!(matches!(c.glyph(&font, 'W'), Err(Error::Font(_))));
        assert!(matches!(c.glyph(&font, '?'), Err(Error::Font(_))));
        assert!(matches!(c.measure(&font, "axe"), Err(Error::Font(_))));
        assert!(c.glyph(&font, 'a').is_ok());
    }

    #[test]
    fn layout_applies_bearings() -> Result<()> {
        let hook = Glyph {
            metrics: GlyphMetrics {
                width: 4,
                height: 14,
                bearing_x: -1,
                bearing_y: 10,
                advance: 5,
            },
            bitmap: GlyphBitmap {
                width: 4,
                height: 14,
                pixels: vec![1; 56],
            },
        };
        let mut c = cache(
            MapFontService::new(8, 16).with_glyph('j', hook),
            Size::new(64, 64),
        );
        let font = FontDescriptor::new("sans", 16).italic();
        let placed = c.layout(&font, "aj a", Point::new(2, 3))?;
        let positions: Vec<Point> = placed.iter().map(|g| g.position).collect();
        // Baseline at 3 + 16; "a" sits 12px above it.
        assert_eq!(
            positions,
            vec![
                Point::new(2, 7),
                Point::new(9, 9),
                Point::new(15, 19),
                Point::new(23, 7),
            ]
        );
        assert_eq!(placed[2].slot, None);
        assert_eq!(c.measure(&font, "aj a")?, Size::new(29, 16));
        Ok(())
    }
}
