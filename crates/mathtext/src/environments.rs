use mathtext_renderer::ast::{BraceKind, ColumnAlign};

static ENVIRONMENTS: phf::Map<&'static str, Env> = phf::phf_map! {
    "array" => Env::Array,
    "bmatrix" => Env::BMatrix,
    "Bmatrix" => Env::Bmatrix,
    "cases" => Env::Cases,
    "matrix" => Env::Matrix,
    "pmatrix" => Env::PMatrix,
    "vmatrix" => Env::VMatrix,
    "Vmatrix" => Env::Vmatrix,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Env {
    Array,
    Cases,
    Matrix,
    BMatrix,
    Bmatrix,
    PMatrix,
    VMatrix,
    Vmatrix,
}

impl Env {
    pub(crate) fn from_str(s: &str) -> Option<Self> {
        ENVIRONMENTS.get(s).copied()
    }

    pub(crate) fn as_str(self) -> &'static str {
        ENVIRONMENTS
            .entries()
            .find_map(|(k, v)| if *v == self { Some(*k) } else { None })
            .unwrap_or("unknown")
    }

    #[inline]
    pub(crate) fn needs_column_spec(self) -> bool {
        matches!(self, Env::Array)
    }

    /// The delimiters around the content, if any.
    pub(crate) fn delimiters(self) -> Option<(BraceKind, BraceKind)> {
        match self {
            Env::Array | Env::Matrix => None,
            Env::PMatrix => Some((BraceKind::Paren, BraceKind::Paren)),
            Env::BMatrix => Some((BraceKind::Bracket, BraceKind::Bracket)),
            Env::Bmatrix => Some((BraceKind::Curly, BraceKind::Curly)),
            Env::VMatrix => Some((BraceKind::Bar, BraceKind::Bar)),
            Env::Vmatrix => Some((BraceKind::DoubleBar, BraceKind::DoubleBar)),
            Env::Cases => Some((BraceKind::Curly, BraceKind::None)),
        }
    }

    pub(crate) fn default_align(self) -> ColumnAlign {
        match self {
            Env::Cases => ColumnAlign::Left,
            _ => ColumnAlign::Center,
        }
    }
}

/// Parse an `array` column specification like `l|cr`.
///
/// Vertical rules and whitespace are accepted but not drawn.
pub(crate) fn parse_column_spec(spec: &str) -> Option<Vec<ColumnAlign>> {
    let mut columns = Vec::new();
    for ch in spec.chars() {
        match ch {
            'l' => columns.push(ColumnAlign::Left),
            'c' => columns.push(ColumnAlign::Center),
            'r' => columns.push(ColumnAlign::Right),
            '|' => {}
            ch if ch.is_ascii_whitespace() => {}
            _ => return None,
        }
    }
    Some(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_round_trip() {
        for name in ["pmatrix", "Bmatrix", "cases"] {
            assert_eq!(Env::from_str(name).map(Env::as_str), Some(name));
        }
        assert_eq!(Env::from_str("xmatrix"), None);
    }

    #[test]
    fn column_spec() {
        assert_eq!(
            parse_column_spec("l | c r"),
            Some(vec![ColumnAlign::Left, ColumnAlign::Center, ColumnAlign::Right])
        );
        assert_eq!(parse_column_spec("lx"), None);
    }
}
