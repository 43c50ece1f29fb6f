//! Tuning constants and font configuration for the layout engine.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum_macros::IntoStaticStr;

use crate::environment::FontRole;

/// Scaling factors used by the layout algorithms.
///
/// Factors named `*_size_factor` scale the font size of a child, factors ending in
/// `_factor` without further qualification are multiples of the x-height or of the
/// font size, as documented on each field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct LayoutParams {
    /// Height of `\left`/`\right` delimiters relative to their content.
    pub brace_factor: f64,
    /// Width of a delimiter relative to the width of `x`.
    pub brace_shrink_factor: f64,
    /// Exponent with which delimiter width grows with delimiter height.
    pub brace_width_exponent: f64,
    /// Upper bound for the width of curly braces, relative to the width of `x`.
    pub curly_brace_width_limit: f64,
    pub subsuper_size_factor: f64,
    /// Horizontal nudge of superscripts after italic content, relative to the width of a space.
    pub italic_correction_factor: f64,
    pub operatorsubsuper_size_factor: f64,
    /// Gap between an operator with limits and its scripts, relative to the x-height.
    pub operatorsubsuper_distance_factor: f64,
    /// Widening of operator and relation glyphs in math mode.
    pub mathoperator_width_factor: f64,
    /// Minimum raise of superscripts, relative to the x-height.
    pub super_shift_factor: f64,
    /// Minimum drop of subscripts, relative to the x-height.
    pub sub_shift_factor: f64,
    /// Size of the label of `\underbrace` and `\overbrace`.
    pub underbrace_factor: f64,
    /// Height of the horizontal brace of `\underbrace`, relative to the x-height.
    pub underbrace_height_factor: f64,
    /// Size of the small line of `\underset`, `\overset` and `\stackrel`.
    pub underset_factor: f64,
    pub frac_factor: f64,
    pub tfrac_factor: f64,
    /// Distance between the fraction rule and the baseline, relative to the x-height.
    pub frac_shift_factor: f64,
    /// Vertical gap between numerator and denominator, relative to the x-height.
    pub frac_gap_factor: f64,
    /// Height reserved for accents, relative to the font size.
    pub decoration_height_factor: f64,
    pub sqrt_height_factor: f64,
    /// Width of the radical sign relative to the width of `A`.
    pub sqrt_width_factor: f64,
    /// Length of the radical's top bar beyond its content, relative to the width of `x`.
    pub sqrt_overhang_factor: f64,
    pub sqrt_degree_factor: f64,
    /// Cell padding in matrices, relative to the width of `x`.
    pub matrix_gutter_factor: f64,
    /// Line width of rules, relative to the font size. Never thinner than 0.3.
    pub line_width_factor: f64,
    /// Padding of `\boxed` and `\colorbox`, relative to the font size.
    pub boxed_padding_factor: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        LayoutParams {
            brace_factor: 1.04,
            brace_shrink_factor: 0.6,
            brace_width_exponent: 0.6,
            curly_brace_width_limit: 0.9,
            subsuper_size_factor: 0.7,
            italic_correction_factor: 0.4,
            operatorsubsuper_size_factor: 0.65,
            operatorsubsuper_distance_factor: 0.25,
            mathoperator_width_factor: 1.5,
            super_shift_factor: 0.6,
            sub_shift_factor: 0.4,
            underbrace_factor: 0.75,
            underbrace_height_factor: 0.8,
            underset_factor: 0.7,
            frac_factor: 1.0,
            tfrac_factor: 0.7,
            frac_shift_factor: 0.4,
            frac_gap_factor: 0.4,
            decoration_height_factor: 0.2,
            sqrt_height_factor: 1.2,
            sqrt_width_factor: 0.8,
            sqrt_overhang_factor: 0.2,
            sqrt_degree_factor: 0.55,
            matrix_gutter_factor: 0.5,
            line_width_factor: 0.045,
            boxed_padding_factor: 0.2,
        }
    }
}

/// Which glyph table resolves symbol commands like `\alpha`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum FontEncoding {
    /// Unicode code points in the current font.
    #[default]
    #[strum(serialize = "unicode")]
    Unicode,
    /// Code points of the classic Adobe "Symbol" font.
    #[strum(serialize = "symbol-font")]
    SymbolFont,
    /// Only characters available in Latin-1; everything else is approximated.
    #[strum(serialize = "standard")]
    Standard,
}

/// Font families used for one font role, in text and in math mode.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub struct FontPair {
    pub text: String,
    pub math: String,
}

impl FontPair {
    pub fn new(text: &str, math: &str) -> Self {
        FontPair {
            text: text.to_string(),
            math: math.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct FontFamilies {
    pub roman: FontPair,
    pub sans: FontPair,
    pub typewriter: FontPair,
    pub script: FontPair,
    pub caligraphic: FontPair,
    pub blackboard: FontPair,
    pub fraktur: FontPair,
    /// Family used for glyphs of the symbol-font encoding.
    pub symbol: String,
}

impl Default for FontFamilies {
    fn default() -> Self {
        FontFamilies {
            roman: FontPair::new("serif", "serif"),
            sans: FontPair::new("sans-serif", "sans-serif"),
            typewriter: FontPair::new("monospace", "monospace"),
            script: FontPair::new("cursive", "cursive"),
            caligraphic: FontPair::new("cursive", "cursive"),
            blackboard: FontPair::new("serif", "serif"),
            fraktur: FontPair::new("fantasy", "fantasy"),
            symbol: "Symbol".to_string(),
        }
    }
}

impl FontFamilies {
    pub fn family(&self, role: FontRole, inside_math: bool) -> &str {
        let pair = match role {
            FontRole::Roman => &self.roman,
            FontRole::Sans => &self.sans,
            FontRole::Typewriter => &self.typewriter,
            FontRole::Script => &self.script,
            FontRole::Caligraphic => &self.caligraphic,
            FontRole::Blackboard => &self.blackboard,
            FontRole::Fraktur => &self.fraktur,
        };
        if inside_math { &pair.math } else { &pair.text }
    }
}
