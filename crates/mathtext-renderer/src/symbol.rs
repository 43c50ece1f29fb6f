//! Glyph tables for symbol commands like `\alpha` or `\sum`.
//!
//! Every [`FontEncoding`] has its own table. Commands that render the same in every encoding
//! (escaped characters and named functions such as `\sin`) live in a shared table that is
//! consulted last.

use bitflags::bitflags;

use crate::params::FontEncoding;

/// A style override of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tristate {
    /// Use whatever the environment says.
    #[default]
    Inherit,
    On,
    Off,
}

impl Tristate {
    #[inline]
    pub fn resolve(self, inherited: bool) -> bool {
        match self {
            Tristate::Inherit => inherited,
            Tristate::On => true,
            Tristate::Off => false,
        }
    }
}

/// The font a glyph is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphFont {
    /// The font of the current environment.
    Current,
    /// The dedicated symbol font (see [`crate::params::FontFamilies::symbol`]).
    Symbol,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SymbolFlags: u8 {
        /// The height is the font's ascent instead of the glyph's ink box.
        const HEIGHT_IS_ASCENT = 1;
        /// Relations and binary operators get extra horizontal room in math mode.
        const EXTEND_WIDTH_IN_MATH = 1 << 1;
        /// Scripts attached to this symbol go above and below it.
        const LIMITS = 1 << 2;
        /// Italic in math mode like a latin letter.
        const LETTER = 1 << 3;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolSpec {
    pub glyph: &'static str,
    pub font: GlyphFont,
    pub font_scale: f64,
    pub italic: Tristate,
    pub bold: Tristate,
    /// Upward shift relative to the x-height.
    pub y_shift: f64,
    pub flags: SymbolFlags,
}

const fn uni(glyph: &'static str) -> SymbolSpec {
    SymbolSpec {
        glyph,
        font: GlyphFont::Current,
        font_scale: 1.0,
        italic: Tristate::Inherit,
        bold: Tristate::Inherit,
        y_shift: 0.0,
        flags: SymbolFlags::empty(),
    }
}

const fn sym(glyph: &'static str) -> SymbolSpec {
    SymbolSpec {
        font: GlyphFont::Symbol,
        ..uni(glyph)
    }
}

const fn letter(glyph: &'static str) -> SymbolSpec {
    uni(glyph).with(SymbolFlags::LETTER)
}

const fn op(glyph: &'static str) -> SymbolSpec {
    uni(glyph).with(SymbolFlags::EXTEND_WIDTH_IN_MATH)
}

/// Upright operator names like `\sin`.
const fn func(name: &'static str) -> SymbolSpec {
    uni(name).upright()
}

impl SymbolSpec {
    const fn with(self, flags: SymbolFlags) -> Self {
        SymbolSpec {
            flags: self.flags.union(flags),
            ..self
        }
    }

    const fn upright(self) -> Self {
        SymbolSpec {
            italic: Tristate::Off,
            ..self
        }
    }

    const fn scaled(self, font_scale: f64) -> Self {
        SymbolSpec { font_scale, ..self }
    }

    const fn shifted(self, y_shift: f64) -> Self {
        SymbolSpec { y_shift, ..self }
    }

    const fn limits(self) -> Self {
        self.with(SymbolFlags::LIMITS)
    }

    const fn ascent_only(self) -> Self {
        self.with(SymbolFlags::HEIGHT_IS_ASCENT)
    }

    #[inline]
    pub fn has(&self, flag: SymbolFlags) -> bool {
        self.flags.contains(flag)
    }
}

/// Scale of big operators like `\sum`.
const BIG: f64 = 1.4;

static UNICODE_SYMBOLS: phf::Map<&'static str, SymbolSpec> = phf::phf_map! {
    // Greek
    "alpha" => letter("α"),
    "beta" => letter("β"),
    "gamma" => letter("γ"),
    "delta" => letter("δ"),
    "epsilon" => letter("ϵ"),
    "varepsilon" => letter("ε"),
    "zeta" => letter("ζ"),
    "eta" => letter("η"),
    "theta" => letter("θ"),
    "vartheta" => letter("ϑ"),
    "iota" => letter("ι"),
    "kappa" => letter("κ"),
    "lambda" => letter("λ"),
    "mu" => letter("μ"),
    "nu" => letter("ν"),
    "xi" => letter("ξ"),
    "omicron" => letter("ο"),
    "pi" => letter("π"),
    "varpi" => letter("ϖ"),
    "rho" => letter("ρ"),
    "varrho" => letter("ϱ"),
    "sigma" => letter("σ"),
    "varsigma" => letter("ς"),
    "tau" => letter("τ"),
    "upsilon" => letter("υ"),
    "phi" => letter("ϕ"),
    "varphi" => letter("φ"),
    "chi" => letter("χ"),
    "psi" => letter("ψ"),
    "omega" => letter("ω"),
    "Gamma" => uni("Γ").upright(),
    "Delta" => uni("Δ").upright(),
    "Theta" => uni("Θ").upright(),
    "Lambda" => uni("Λ").upright(),
    "Xi" => uni("Ξ").upright(),
    "Pi" => uni("Π").upright(),
    "Sigma" => uni("Σ").upright(),
    "Upsilon" => uni("Υ").upright(),
    "Phi" => uni("Φ").upright(),
    "Psi" => uni("Ψ").upright(),
    "Omega" => uni("Ω").upright(),
    // Relations
    "leq" => op("≤"),
    "le" => op("≤"),
    "geq" => op("≥"),
    "ge" => op("≥"),
    "neq" => op("≠"),
    "ne" => op("≠"),
    "approx" => op("≈"),
    "equiv" => op("≡"),
    "sim" => op("∼"),
    "simeq" => op("≃"),
    "cong" => op("≅"),
    "propto" => op("∝"),
    "ll" => op("≪"),
    "gg" => op("≫"),
    "prec" => op("≺"),
    "succ" => op("≻"),
    "subset" => op("⊂"),
    "supset" => op("⊃"),
    "subseteq" => op("⊆"),
    "supseteq" => op("⊇"),
    "in" => op("∈"),
    "notin" => op("∉"),
    "ni" => op("∋"),
    "perp" => op("⊥"),
    "parallel" => op("∥"),
    "mid" => op("∣"),
    "models" => op("⊨"),
    "vdash" => op("⊢"),
    // Arrows
    "to" => op("→"),
    "rightarrow" => op("→"),
    "leftarrow" => op("←"),
    "gets" => op("←"),
    "leftrightarrow" => op("↔"),
    "Rightarrow" => op("⇒"),
    "Leftarrow" => op("⇐"),
    "Leftrightarrow" => op("⇔"),
    "uparrow" => op("↑"),
    "downarrow" => op("↓"),
    "Uparrow" => op("⇑"),
    "Downarrow" => op("⇓"),
    "mapsto" => op("↦"),
    "longrightarrow" => op("⟶"),
    "longleftarrow" => op("⟵"),
    "implies" => op("⟹"),
    "iff" => op("⟺"),
    "nearrow" => op("↗"),
    "searrow" => op("↘"),
    // Binary operators
    "pm" => op("±"),
    "mp" => op("∓"),
    "times" => op("×"),
    "div" => op("÷"),
    "cdot" => op("⋅"),
    "ast" => op("∗"),
    "star" => op("⋆"),
    "circ" => op("∘"),
    "bullet" => op("•"),
    "oplus" => op("⊕"),
    "ominus" => op("⊖"),
    "otimes" => op("⊗"),
    "odot" => op("⊙"),
    "cup" => op("∪"),
    "cap" => op("∩"),
    "wedge" => op("∧"),
    "land" => op("∧"),
    "vee" => op("∨"),
    "lor" => op("∨"),
    "setminus" => op("∖"),
    "neg" => uni("¬"),
    "lnot" => uni("¬"),
    // Big operators
    "sum" => uni("∑").scaled(BIG).limits(),
    "prod" => uni("∏").scaled(BIG).limits(),
    "coprod" => uni("∐").scaled(BIG).limits(),
    "bigcup" => uni("⋃").scaled(BIG).limits(),
    "bigcap" => uni("⋂").scaled(BIG).limits(),
    "bigvee" => uni("⋁").scaled(BIG).limits(),
    "bigwedge" => uni("⋀").scaled(BIG).limits(),
    "bigoplus" => uni("⨁").scaled(BIG).limits(),
    "bigotimes" => uni("⨂").scaled(BIG).limits(),
    "bigodot" => uni("⨀").scaled(BIG).limits(),
    "int" => uni("∫").scaled(BIG).limits(),
    "iint" => uni("∬").scaled(BIG).limits(),
    "iiint" => uni("∭").scaled(BIG).limits(),
    "oint" => uni("∮").scaled(BIG).limits(),
    // Miscellaneous
    "infty" => uni("∞"),
    "partial" => uni("∂"),
    "nabla" => uni("∇"),
    "forall" => uni("∀"),
    "exists" => uni("∃"),
    "nexists" => uni("∄"),
    "emptyset" => uni("∅"),
    "varnothing" => uni("∅"),
    "hbar" => letter("ℏ"),
    "ell" => letter("ℓ"),
    "Re" => uni("ℜ"),
    "Im" => uni("ℑ"),
    "aleph" => uni("ℵ"),
    "wp" => uni("℘"),
    "angle" => uni("∠"),
    "triangle" => uni("△"),
    "prime" => uni("′"),
    "dagger" => uni("†"),
    "ddagger" => uni("‡"),
    "degree" => uni("°").ascent_only(),
    "copyright" => uni("©"),
    "euro" => uni("€"),
    "pounds" => uni("£"),
    "checkmark" => uni("✓"),
    "top" => uni("⊤"),
    "bot" => uni("⊥"),
    "surd" => uni("√"),
    "ldots" => uni("…"),
    "dots" => uni("…"),
    "cdots" => uni("⋯"),
    "vdots" => uni("⋮"),
    "ddots" => uni("⋱"),
    "clubsuit" => uni("♣"),
    "diamondsuit" => uni("♢"),
    "heartsuit" => uni("♡"),
    "spadesuit" => uni("♠"),
    // Delimiters
    "langle" => uni("⟨"),
    "rangle" => uni("⟩"),
    "lfloor" => uni("⌊"),
    "rfloor" => uni("⌋"),
    "lceil" => uni("⌈"),
    "rceil" => uni("⌉"),
    "|" => uni("‖"),
    "Vert" => uni("‖"),
};

/// Code points of the Adobe "Symbol" font.
static SYMBOL_FONT_SYMBOLS: phf::Map<&'static str, SymbolSpec> = phf::phf_map! {
    "alpha" => sym("a").with(SymbolFlags::LETTER),
    "beta" => sym("b").with(SymbolFlags::LETTER),
    "gamma" => sym("g").with(SymbolFlags::LETTER),
    "delta" => sym("d").with(SymbolFlags::LETTER),
    "epsilon" => sym("e").with(SymbolFlags::LETTER),
    "varepsilon" => sym("e").with(SymbolFlags::LETTER),
    "zeta" => sym("z").with(SymbolFlags::LETTER),
    "eta" => sym("h").with(SymbolFlags::LETTER),
    "theta" => sym("q").with(SymbolFlags::LETTER),
    "vartheta" => sym("J").with(SymbolFlags::LETTER),
    "iota" => sym("i").with(SymbolFlags::LETTER),
    "kappa" => sym("k").with(SymbolFlags::LETTER),
    "lambda" => sym("l").with(SymbolFlags::LETTER),
    "mu" => sym("m").with(SymbolFlags::LETTER),
    "nu" => sym("n").with(SymbolFlags::LETTER),
    "xi" => sym("x").with(SymbolFlags::LETTER),
    "pi" => sym("p").with(SymbolFlags::LETTER),
    "varpi" => sym("v").with(SymbolFlags::LETTER),
    "rho" => sym("r").with(SymbolFlags::LETTER),
    "sigma" => sym("s").with(SymbolFlags::LETTER),
    "varsigma" => sym("V").with(SymbolFlags::LETTER),
    "tau" => sym("t").with(SymbolFlags::LETTER),
    "upsilon" => sym("u").with(SymbolFlags::LETTER),
    "phi" => sym("f").with(SymbolFlags::LETTER),
    "varphi" => sym("j").with(SymbolFlags::LETTER),
    "chi" => sym("c").with(SymbolFlags::LETTER),
    "psi" => sym("y").with(SymbolFlags::LETTER),
    "omega" => sym("w").with(SymbolFlags::LETTER),
    "Gamma" => sym("G").upright(),
    "Delta" => sym("D").upright(),
    "Theta" => sym("Q").upright(),
    "Lambda" => sym("L").upright(),
    "Xi" => sym("X").upright(),
    "Pi" => sym("P").upright(),
    "Sigma" => sym("S").upright(),
    "Upsilon" => sym("\u{A1}").upright(),
    "Phi" => sym("F").upright(),
    "Psi" => sym("Y").upright(),
    "Omega" => sym("W").upright(),
    "leq" => sym("\u{A3}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "le" => sym("\u{A3}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "geq" => sym("\u{B3}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "ge" => sym("\u{B3}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "neq" => sym("\u{B9}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "ne" => sym("\u{B9}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "approx" => sym("\u{BB}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "equiv" => sym("\u{BA}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "propto" => sym("\u{B5}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "sim" => sym("~").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "cong" => sym("@").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "subset" => sym("\u{CC}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "supset" => sym("\u{C9}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "subseteq" => sym("\u{CD}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "supseteq" => sym("\u{CA}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "in" => sym("\u{CE}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "notin" => sym("\u{CF}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "perp" => sym("^").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "leftarrow" => sym("\u{AC}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "gets" => sym("\u{AC}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "uparrow" => sym("\u{AD}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "rightarrow" => sym("\u{AE}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "to" => sym("\u{AE}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "downarrow" => sym("\u{AF}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "leftrightarrow" => sym("\u{AB}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "Leftarrow" => sym("\u{DC}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "Uparrow" => sym("\u{DD}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "Rightarrow" => sym("\u{DE}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "implies" => sym("\u{DE}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "Downarrow" => sym("\u{DF}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "Leftrightarrow" => sym("\u{DB}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "iff" => sym("\u{DB}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "pm" => sym("\u{B1}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "times" => sym("\u{B4}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "div" => sym("\u{B8}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "cdot" => sym("\u{D7}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "bullet" => sym("\u{B7}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "ast" => sym("*").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "oplus" => sym("\u{C5}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "otimes" => sym("\u{C4}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "cup" => sym("\u{C8}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "cap" => sym("\u{C7}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "wedge" => sym("\u{D9}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "land" => sym("\u{D9}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "vee" => sym("\u{DA}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "lor" => sym("\u{DA}").with(SymbolFlags::EXTEND_WIDTH_IN_MATH),
    "neg" => sym("\u{D8}"),
    "lnot" => sym("\u{D8}"),
    "sum" => sym("\u{E5}").scaled(BIG).limits(),
    "prod" => sym("\u{D5}").scaled(BIG).limits(),
    "int" => sym("\u{F2}").scaled(BIG).limits(),
    "infty" => sym("\u{A5}"),
    "partial" => sym("\u{B6}"),
    "nabla" => sym("\u{D1}"),
    "forall" => sym("\""),
    "exists" => sym("$"),
    "emptyset" => sym("\u{C6}"),
    "varnothing" => sym("\u{C6}"),
    "aleph" => sym("\u{C0}"),
    "Re" => sym("\u{C2}"),
    "Im" => sym("\u{C1}"),
    "wp" => sym("\u{C3}"),
    "angle" => sym("\u{D0}"),
    "prime" => sym("\u{A2}"),
    "degree" => sym("\u{B0}").ascent_only(),
    "copyright" => sym("\u{D3}"),
    "surd" => sym("\u{D6}"),
    "ldots" => sym("\u{BC}"),
    "dots" => sym("\u{BC}"),
    "cdots" => sym("\u{BC}").shifted(0.4),
    "clubsuit" => sym("\u{A7}"),
    "diamondsuit" => sym("\u{A8}"),
    "heartsuit" => sym("\u{A9}"),
    "spadesuit" => sym("\u{AA}"),
    "langle" => sym("\u{E1}"),
    "rangle" => sym("\u{F1}"),
    "lfloor" => sym("\u{EB}"),
    "rfloor" => sym("\u{FB}"),
    "lceil" => sym("\u{E9}"),
    "rceil" => sym("\u{F9}"),
    "|" => sym("||"),
    "Vert" => sym("||"),
};

/// Latin-1 replacements for fonts without math glyphs.
static STANDARD_SYMBOLS: phf::Map<&'static str, SymbolSpec> = phf::phf_map! {
    "pm" => op("±"),
    "times" => op("×"),
    "div" => op("÷"),
    "cdot" => op("·"),
    "ast" => op("*"),
    "leq" => op("<="),
    "le" => op("<="),
    "geq" => op(">="),
    "ge" => op(">="),
    "neq" => op("!="),
    "ne" => op("!="),
    "sim" => op("~"),
    "approx" => op("~"),
    "to" => op("->"),
    "rightarrow" => op("->"),
    "leftarrow" => op("<-"),
    "gets" => op("<-"),
    "Rightarrow" => op("=>"),
    "Leftarrow" => op("<="),
    "mid" => op("|"),
    "neg" => uni("¬"),
    "lnot" => uni("¬"),
    "mu" => letter("µ"),
    "infty" => uni("oo").upright(),
    "degree" => uni("°").ascent_only(),
    "copyright" => uni("©"),
    "registered" => uni("®"),
    "pounds" => uni("£"),
    "yen" => uni("¥"),
    "cent" => uni("¢"),
    "S" => uni("§"),
    "P" => uni("¶"),
    "frac12" => uni("½"),
    "frac14" => uni("¼"),
    "frac34" => uni("¾"),
    "prime" => uni("'"),
    "ldots" => uni("..."),
    "dots" => uni("..."),
    "cdots" => uni("...").shifted(0.4),
    "langle" => uni("<"),
    "rangle" => uni(">"),
    "|" => uni("||"),
    "Vert" => uni("||"),
};

/// Commands that look the same in every encoding.
static COMMON_SYMBOLS: phf::Map<&'static str, SymbolSpec> = phf::phf_map! {
    "{" => uni("{"),
    "}" => uni("}"),
    "lbrace" => uni("{"),
    "rbrace" => uni("}"),
    "_" => uni("_"),
    "$" => uni("$"),
    "%" => uni("%"),
    "&" => uni("&"),
    "#" => uni("#"),
    "backslash" => uni("\\"),
    "textbackslash" => uni("\\"),
    "vert" => uni("|"),
    "colon" => uni(":"),
    "sin" => func("sin"),
    "cos" => func("cos"),
    "tan" => func("tan"),
    "cot" => func("cot"),
    "sec" => func("sec"),
    "csc" => func("csc"),
    "arcsin" => func("arcsin"),
    "arccos" => func("arccos"),
    "arctan" => func("arctan"),
    "sinh" => func("sinh"),
    "cosh" => func("cosh"),
    "tanh" => func("tanh"),
    "coth" => func("coth"),
    "log" => func("log"),
    "ln" => func("ln"),
    "lg" => func("lg"),
    "exp" => func("exp"),
    "det" => func("det"),
    "dim" => func("dim"),
    "ker" => func("ker"),
    "deg" => func("deg"),
    "gcd" => func("gcd"),
    "hom" => func("hom"),
    "arg" => func("arg"),
    "Pr" => func("Pr"),
    "lim" => func("lim").limits(),
    "liminf" => func("lim inf").limits(),
    "limsup" => func("lim sup").limits(),
    "max" => func("max").limits(),
    "min" => func("min").limits(),
    "sup" => func("sup").limits(),
    "inf" => func("inf").limits(),
    "argmin" => func("argmin").limits(),
    "argmax" => func("argmax").limits(),
};

/// Resolves `name` (without the backslash) in the table of `encoding`.
pub fn lookup(encoding: FontEncoding, name: &str) -> Option<&'static SymbolSpec> {
    let table = match encoding {
        FontEncoding::Unicode => &UNICODE_SYMBOLS,
        FontEncoding::SymbolFont => &SYMBOL_FONT_SYMBOLS,
        FontEncoding::Standard => &STANDARD_SYMBOLS,
    };
    table.get(name).or_else(|| COMMON_SYMBOLS.get(name))
}

/// Whether any encoding knows `name`.
pub fn is_known(name: &str) -> bool {
    COMMON_SYMBOLS.contains_key(name)
        || UNICODE_SYMBOLS.contains_key(name)
        || SYMBOL_FONT_SYMBOLS.contains_key(name)
        || STANDARD_SYMBOLS.contains_key(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodings_resolve_differently() {
        let uni = lookup(FontEncoding::Unicode, "leq").unwrap();
        assert_eq!(uni.glyph, "≤");
        assert_eq!(uni.font, GlyphFont::Current);
        let symbol = lookup(FontEncoding::SymbolFont, "leq").unwrap();
        assert_eq!(symbol.glyph, "\u{A3}");
        assert_eq!(symbol.font, GlyphFont::Symbol);
        assert_eq!(lookup(FontEncoding::Standard, "leq").unwrap().glyph, "<=");
    }

    #[test]
    fn shared_table_is_a_fallback() {
        for encoding in [
            FontEncoding::Unicode,
            FontEncoding::SymbolFont,
            FontEncoding::Standard,
        ] {
            let sin = lookup(encoding, "sin").unwrap();
            assert_eq!(sin.italic, Tristate::Off);
            assert!(lookup(encoding, "lim").unwrap().has(SymbolFlags::LIMITS));
        }
        assert!(lookup(FontEncoding::Standard, "alpha").is_none());
        assert!(is_known("alpha"));
        assert!(!is_known("notarealcommand"));
    }

    #[test]
    fn cdots_is_raised_in_legacy_encodings() {
        assert_eq!(lookup(FontEncoding::Standard, "cdots").unwrap().y_shift, 0.4);
        assert_eq!(lookup(FontEncoding::Unicode, "cdots").unwrap().y_shift, 0.0);
    }
}
