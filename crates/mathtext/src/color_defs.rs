use mathtext_renderer::color::RGB;

static COLORS: phf::Map<&'static str, RGB> = phf::phf_map! {
    "black" => RGB::new(0, 0, 0),
    "white" => RGB::new(255, 255, 255),
    "red" => RGB::new(255, 0, 0),
    "green" => RGB::new(0, 128, 0),
    "lime" => RGB::new(0, 255, 0),
    "blue" => RGB::new(0, 0, 255),
    "yellow" => RGB::new(255, 255, 0),
    "cyan" => RGB::new(0, 255, 255),
    "magenta" => RGB::new(255, 0, 255),
    "gray" => RGB::new(128, 128, 128),
    "grey" => RGB::new(128, 128, 128),
    "darkgray" => RGB::new(64, 64, 64),
    "lightgray" => RGB::new(191, 191, 191),
    "orange" => RGB::new(255, 128, 0),
    "brown" => RGB::new(191, 128, 64),
    "olive" => RGB::new(128, 128, 0),
    "pink" => RGB::new(255, 191, 191),
    "purple" => RGB::new(191, 0, 64),
    "teal" => RGB::new(0, 128, 128),
    "violet" => RGB::new(128, 0, 128),
    "navy" => RGB::new(0, 0, 128),
    "maroon" => RGB::new(128, 0, 0),
};

/// Look up a color by name, or parse it from `#rgb`/`#rrggbb` notation.
pub(crate) fn get_color(name: &str) -> Option<RGB> {
    let name = name.trim();
    COLORS
        .get(name)
        .copied()
        .or_else(|| name.parse::<RGB>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_hex() {
        assert_eq!(get_color("red"), Some(RGB::new(255, 0, 0)));
        assert_eq!(get_color(" #0f0 "), Some(RGB::new(0, 255, 0)));
        assert_eq!(get_color("#123456"), Some(RGB::new(0x12, 0x34, 0x56)));
        assert_eq!(get_color("reddish"), None);
    }
}
