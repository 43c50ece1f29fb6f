use mathtext_renderer::ast::{Decoration, FracMode, InstructionKind, SpaceWidth};

/// What an instruction does, apart from symbols.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Command {
    Space(SpaceWidth),
    /// A style toggle with one argument.
    Style(InstructionKind),
    /// A color name followed by one argument.
    Color(ColorTarget),
    Frac(FracMode),
    Sqrt,
    Decoration(Decoration),
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColorTarget {
    Foreground,
    Background,
}

static COMMANDS: phf::Map<&'static str, Command> = phf::phf_map! {
    // spacing
    "," => Command::Space(SpaceWidth::Em(0.1667)),
    ":" => Command::Space(SpaceWidth::Em(0.2222)),
    ";" => Command::Space(SpaceWidth::Em(0.2778)),
    "!" => Command::Space(SpaceWidth::Em(-0.1667)),
    " " => Command::Space(SpaceWidth::Normal),
    "quad" => Command::Space(SpaceWidth::Em(1.0)),
    "qquad" => Command::Space(SpaceWidth::Em(2.0)),
    "enspace" => Command::Space(SpaceWidth::Em(0.5)),
    // styles
    "textbf" => Command::Style(InstructionKind::Bold),
    "mathbf" => Command::Style(InstructionKind::MathBold),
    "textit" => Command::Style(InstructionKind::Italic),
    "mathit" => Command::Style(InstructionKind::Italic),
    "emph" => Command::Style(InstructionKind::Emph),
    "textrm" => Command::Style(InstructionKind::Upright),
    "mathrm" => Command::Style(InstructionKind::Upright),
    "text" => Command::Style(InstructionKind::Text),
    "mbox" => Command::Style(InstructionKind::Text),
    "textsf" => Command::Style(InstructionKind::Sans),
    "mathsf" => Command::Style(InstructionKind::Sans),
    "texttt" => Command::Style(InstructionKind::Typewriter),
    "mathtt" => Command::Style(InstructionKind::Typewriter),
    "textcal" => Command::Style(InstructionKind::Caligraphic),
    "mathcal" => Command::Style(InstructionKind::Caligraphic),
    "textscript" => Command::Style(InstructionKind::Script),
    "mathscript" => Command::Style(InstructionKind::Script),
    "textbb" => Command::Style(InstructionKind::Blackboard),
    "mathbb" => Command::Style(InstructionKind::Blackboard),
    "textfrak" => Command::Style(InstructionKind::Fraktur),
    "mathfrak" => Command::Style(InstructionKind::Fraktur),
    "textsc" => Command::Style(InstructionKind::SmallCaps),
    "uline" => Command::Style(InstructionKind::Underline),
    "ul" => Command::Style(InstructionKind::Underline),
    "oline" => Command::Style(InstructionKind::Overline),
    "sout" => Command::Style(InstructionKind::Strike),
    "boxed" => Command::Style(InstructionKind::Boxed),
    "fbox" => Command::Style(InstructionKind::Boxed),
    // colors
    "textcolor" => Command::Color(ColorTarget::Foreground),
    "color" => Command::Color(ColorTarget::Foreground),
    "colorbox" => Command::Color(ColorTarget::Background),
    // stacked
    "frac" => Command::Frac(FracMode::Frac),
    "dfrac" => Command::Frac(FracMode::DFrac),
    "tfrac" => Command::Frac(FracMode::TFrac),
    "stackrel" => Command::Frac(FracMode::Stackrel),
    "underbrace" => Command::Frac(FracMode::UnderBrace),
    "overbrace" => Command::Frac(FracMode::OverBrace),
    "underset" => Command::Frac(FracMode::UnderSet),
    "overset" => Command::Frac(FracMode::OverSet),
    "sqrt" => Command::Sqrt,
    // decorations
    "vec" => Command::Decoration(Decoration::Vector),
    "hat" => Command::Decoration(Decoration::Hat),
    "widehat" => Command::Decoration(Decoration::WideHat),
    "dot" => Command::Decoration(Decoration::Dot),
    "ddot" => Command::Decoration(Decoration::DDot),
    "tilde" => Command::Decoration(Decoration::Tilde),
    "widetilde" => Command::Decoration(Decoration::WideTilde),
    "bar" => Command::Decoration(Decoration::Bar),
    "overrightarrow" => Command::Decoration(Decoration::Arrow),
    "arrow" => Command::Decoration(Decoration::Arrow),
    "overline" => Command::Decoration(Decoration::Overline),
    "ooline" => Command::Decoration(Decoration::DoubleOverline),
    "underline" => Command::Decoration(Decoration::Underline),
    "uuline" => Command::Decoration(Decoration::DoubleUnderline),
    "left" => Command::Left,
    "right" => Command::Right,
};

#[inline]
pub(crate) fn get_command(name: &str) -> Option<Command> {
    COMMANDS.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_share_meaning() {
        assert_eq!(get_command("textit"), get_command("mathit"));
        assert_eq!(get_command("text"), get_command("mbox"));
        assert_eq!(get_command("arrow"), get_command("overrightarrow"));
        assert_eq!(
            get_command("qquad"),
            Some(Command::Space(SpaceWidth::Em(2.0)))
        );
        assert_eq!(get_command("alpha"), None);
    }
}
