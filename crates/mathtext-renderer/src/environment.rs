//! The formatting context that is passed down the tree during layout.

use bitflags::bitflags;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum_macros::IntoStaticStr;

use crate::color::RGB;
use crate::font::FontDescriptor;
use crate::params::FontFamilies;

/// The font family role, e.g. `\mathsf` selects [`FontRole::Sans`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum FontRole {
    #[default]
    Roman,
    Sans,
    Typewriter,
    Script,
    Caligraphic,
    Blackboard,
    Fraktur,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct StyleFlags: u16 {
        const BOLD = 1;
        const ITALIC = 1 << 1;
        const UNDERLINE = 1 << 2;
        const OVERLINE = 1 << 3;
        const STRIKE = 1 << 4;
        const SMALL_CAPS = 1 << 5;
        /// Letters in math mode are set upright instead of italic.
        const UPRIGHT = 1 << 6;
    }
}

/// Formatting state for one subtree.
///
/// This is a plain value: styling nodes derive a modified copy for their children,
/// nothing is shared between siblings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MathEnv {
    pub role: FontRole,
    pub size: f64,
    pub flags: StyleFlags,
    pub color: RGB,
    pub inside_math: bool,
}

impl Default for MathEnv {
    fn default() -> Self {
        MathEnv::new(10.0, RGB::BLACK, false)
    }
}

impl MathEnv {
    pub fn new(size: f64, color: RGB, inside_math: bool) -> Self {
        MathEnv {
            role: FontRole::Roman,
            size,
            flags: StyleFlags::empty(),
            color,
            inside_math,
        }
    }

    /// The concrete font for text set in this environment.
    pub fn font<'f>(&self, families: &'f FontFamilies) -> FontDescriptor<'f> {
        FontDescriptor {
            family: families.family(self.role, self.inside_math),
            size: self.size,
            bold: self.flags.contains(StyleFlags::BOLD),
            italic: self.flags.contains(StyleFlags::ITALIC),
            small_caps: self.flags.contains(StyleFlags::SMALL_CAPS),
        }
    }

    #[inline]
    pub fn has(&self, flag: StyleFlags) -> bool {
        self.flags.contains(flag)
    }

    /// Copy with the font size multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        MathEnv {
            size: self.size * factor,
            ..*self
        }
    }

    #[must_use]
    pub fn with_role(&self, role: FontRole) -> Self {
        MathEnv { role, ..*self }
    }

    #[must_use]
    pub fn with_flags(&self, flags: StyleFlags) -> Self {
        MathEnv {
            flags: self.flags | flags,
            ..*self
        }
    }

    #[must_use]
    pub fn without_flags(&self, flags: StyleFlags) -> Self {
        MathEnv {
            flags: self.flags - flags,
            ..*self
        }
    }

    #[must_use]
    pub fn toggled(&self, flags: StyleFlags) -> Self {
        MathEnv {
            flags: self.flags ^ flags,
            ..*self
        }
    }

    #[must_use]
    pub fn with_color(&self, color: RGB) -> Self {
        MathEnv { color, ..*self }
    }

    #[must_use]
    pub fn with_math(&self, inside_math: bool) -> Self {
        MathEnv {
            inside_math,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_copies_leave_parent_untouched() {
        let parent = MathEnv::new(12.0, RGB::BLACK, true);
        let child = parent
            .scaled(0.5)
            .with_flags(StyleFlags::BOLD | StyleFlags::UPRIGHT)
            .with_role(FontRole::Sans);
        assert_eq!(parent.size, 12.0);
        assert!(parent.flags.is_empty());
        assert_eq!(child.size, 6.0);
        assert!(child.has(StyleFlags::BOLD));
        assert_eq!(child.role, FontRole::Sans);
        assert!(!child.toggled(StyleFlags::BOLD).has(StyleFlags::BOLD));
    }

    #[test]
    fn font_uses_math_family_in_math_mode() {
        let mut families = FontFamilies::default();
        families.roman.math = "STIX Two Math".to_string();
        let env = MathEnv::new(10.0, RGB::BLACK, true).with_flags(StyleFlags::ITALIC);
        let font = env.font(&families);
        assert_eq!(font.family, "STIX Two Math");
        assert!(font.italic);
        assert!(!font.bold);
        assert_eq!(env.with_math(false).font(&families).family, "serif");
    }
}
