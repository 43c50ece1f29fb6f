//! Fonts and the font-metrics collaborator.

use std::sync::Mutex;

use rustc_hash::FxHashMap;

use crate::metrics::Rect;

/// A concrete font as seen by the metrics provider and the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontDescriptor<'f> {
    pub family: &'f str,
    pub size: f64,
    pub bold: bool,
    pub italic: bool,
    pub small_caps: bool,
}

impl FontDescriptor<'_> {
    #[must_use]
    pub fn with_size(self, size: f64) -> Self {
        FontDescriptor { size, ..self }
    }

    fn style_bits(&self) -> u8 {
        u8::from(self.bold) | (u8::from(self.italic) << 1) | (u8::from(self.small_caps) << 2)
    }
}

/// Measurements of one string in one font.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    /// Horizontal advance of the caret.
    pub width: f64,
    /// Tight ink bounding box, relative to the origin on the baseline.
    /// `y` is negative for ink above the baseline.
    pub bounding_box: Rect,
    /// Font-wide ascent.
    pub ascent: f64,
    /// Font-wide descent, positive.
    pub descent: f64,
    pub x_height: f64,
    /// Height of the strikeout line above the baseline.
    pub strikeout_pos: f64,
}

/// Answers string measurement queries.
///
/// Implementations must be deterministic: the same font and string always produce the same
/// metrics. Layout relies on this to make `measure` and `draw` agree.
pub trait FontMetrics {
    fn measure_text(&self, font: &FontDescriptor<'_>, text: &str) -> TextMetrics;

    /// Identifies the device the metrics are valid for (e.g. screen vs. printer resolution).
    fn surface_key(&self) -> u64 {
        0
    }
}

impl<M: FontMetrics + ?Sized> FontMetrics for &M {
    fn measure_text(&self, font: &FontDescriptor<'_>, text: &str) -> TextMetrics {
        (**self).measure_text(font, text)
    }

    fn surface_key(&self) -> u64 {
        (**self).surface_key()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    family: Box<str>,
    size: u64,
    style: u8,
    text: Box<str>,
    surface: u64,
}

/// Memoizes the results of another [`FontMetrics`] implementation.
pub struct MetricsCache<M> {
    inner: M,
    entries: Mutex<FxHashMap<CacheKey, TextMetrics>>,
}

static_assertions::assert_impl_all!(MetricsCache<ApproxMetrics>: Send, Sync);

impl<M: FontMetrics> MetricsCache<M> {
    pub fn new(inner: M) -> Self {
        MetricsCache {
            inner,
            entries: Mutex::new(FxHashMap::default()),
        }
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |entries| entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }
}

impl<M: FontMetrics> FontMetrics for MetricsCache<M> {
    fn measure_text(&self, font: &FontDescriptor<'_>, text: &str) -> TextMetrics {
        let key = CacheKey {
            family: font.family.into(),
            size: font.size.to_bits(),
            style: font.style_bits(),
            text: text.into(),
            surface: self.inner.surface_key(),
        };
        // Measure uncached if the lock is poisoned.
        let Ok(mut entries) = self.entries.lock() else {
            return self.inner.measure_text(font, text);
        };
        if let Some(metrics) = entries.get(&key) {
            log::trace!("metrics cache hit for {text:?}");
            return *metrics;
        }
        log::trace!("metrics cache miss for {text:?}");
        let metrics = self.inner.measure_text(font, text);
        entries.insert(key, metrics);
        metrics
    }

    fn surface_key(&self) -> u64 {
        self.inner.surface_key()
    }
}

/// Deterministic font metrics based on fixed per-character advance widths.
///
/// This does not read any font files. It is good enough for command-line previews and makes
/// layout results reproducible in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxMetrics {
    surface: u64,
}

impl ApproxMetrics {
    pub const ASCENT: f64 = 0.8;
    pub const DESCENT: f64 = 0.2;
    pub const X_HEIGHT: f64 = 0.45;
    pub const STRIKEOUT: f64 = 0.25;
    /// Top of the ink box of any visible string, in em above the baseline.
    pub const INK_TOP: f64 = 0.7;
    /// Height of the ink box of any visible string, in em.
    pub const INK_HEIGHT: f64 = 0.9;

    pub fn new(surface: u64) -> Self {
        ApproxMetrics { surface }
    }

    /// Advance width of `ch` in em.
    pub fn advance(ch: char) -> f64 {
        match ch {
            c if c.is_whitespace() => 0.25,
            'i' | 'j' | 'l' | 'f' | 't' | 'r' | 'I' | '.' | ',' | ':' | ';' | '!' | '\''
            | '|' | '(' | ')' | '[' | ']' => 0.28,
            'm' | 'w' | 'M' | 'W' => 0.83,
            c if c.is_ascii_uppercase() => 0.68,
            c if c.is_ascii() => 0.5,
            _ => 0.6,
        }
    }
}

impl FontMetrics for ApproxMetrics {
    fn measure_text(&self, font: &FontDescriptor<'_>, text: &str) -> TextMetrics {
        let bold = if font.bold { 1.05 } else { 1.0 };
        let width = text.chars().map(Self::advance).sum::<f64>() * font.size * bold;
        let bounding_box = if text.chars().all(char::is_whitespace) {
            Rect::new(0.0, 0.0, width, 0.0)
        } else {
            Rect::new(
                0.0,
                -Self::INK_TOP * font.size,
                width,
                Self::INK_HEIGHT * font.size,
            )
        };
        TextMetrics {
            width,
            bounding_box,
            ascent: Self::ASCENT * font.size,
            descent: Self::DESCENT * font.size,
            x_height: Self::X_HEIGHT * font.size,
            strikeout_pos: Self::STRIKEOUT * font.size,
        }
    }

    fn surface_key(&self) -> u64 {
        self.surface
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    const FONT: FontDescriptor<'static> = FontDescriptor {
        family: "serif",
        size: 10.0,
        bold: false,
        italic: false,
        small_caps: false,
    };

    #[test]
    fn approx_widths() {
        let m = ApproxMetrics::default();
        assert_eq!(m.measure_text(&FONT, "x").width, 5.0);
        assert!((m.measure_text(&FONT, "Ai").width - 9.6).abs() < 1e-9);
        assert_eq!(m.measure_text(&FONT, " ").bounding_box.height, 0.0);
        let ink = m.measure_text(&FONT, "g").bounding_box;
        assert_eq!((ink.y, ink.height), (-7.0, 9.0));
    }

    struct Counting<'a>(&'a Cell<usize>);

    impl FontMetrics for Counting<'_> {
        fn measure_text(&self, font: &FontDescriptor<'_>, text: &str) -> TextMetrics {
            self.0.set(self.0.get() + 1);
            ApproxMetrics::default().measure_text(font, text)
        }
    }

    #[test]
    fn cache_hits_skip_the_provider() {
        let calls = Cell::new(0);
        let cache = MetricsCache::new(Counting(&calls));
        let first = cache.measure_text(&FONT, "abc");
        let second = cache.measure_text(&FONT, "abc");
        assert_eq!(first, second);
        assert_eq!(calls.get(), 1);
        cache.measure_text(&FONT.with_size(12.0), "abc");
        assert_eq!(calls.get(), 2);
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
        cache.measure_text(&FONT, "abc");
        assert_eq!(calls.get(), 3);
    }
}
