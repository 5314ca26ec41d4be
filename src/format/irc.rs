//! mIRC formatting control codes

use regex::Regex;
use std::sync::LazyLock;

const BOLD: char = '\x02';
const COLOR: char = '\x03';
const UNDERLINE: char = '\x1f';

/// Standard mIRC palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
    Blue,
    Green,
    Red,
    Brown,
    Purple,
    Orange,
    Yellow,
    LightGreen,
    Teal,
    LightBlue,
}

impl Color {
    /// Two-digit palette index
    pub fn code(self) -> &'static str {
        match self {
            Color::White => "00",
            Color::Black => "01",
            Color::Blue => "02",
            Color::Green => "03",
            Color::Red => "04",
            Color::Brown => "05",
            Color::Purple => "06",
            Color::Orange => "07",
            Color::Yellow => "08",
            Color::LightGreen => "09",
            Color::Teal => "10",
            Color::LightBlue => "11",
        }
    }
}

pub fn bold(s: impl std::fmt::Display) -> String {
    format!("{BOLD}{s}{BOLD}")
}

pub fn underline(s: impl std::fmt::Display) -> String {
    format!("{UNDERLINE}{s}{UNDERLINE}")
}

pub fn bold_underline(s: impl std::fmt::Display) -> String {
    bold(underline(s))
}

pub fn color(s: impl std::fmt::Display, fg: Color) -> String {
    format!("{COLOR}{}{s}{COLOR}", fg.code())
}

pub fn color_bg(s: impl std::fmt::Display, fg: Color, bg: Color) -> String {
    format!("{COLOR}{},{}{s}{COLOR}", fg.code(), bg.code())
}

static CONTROL_CODES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x03(?:\d{1,2}(?:,\d{1,2})?)?|[\x02\x0f\x16\x1d\x1f]").unwrap());

/// Remove all formatting codes, for output to plain terminals
pub fn strip(s: &str) -> String {
    CONTROL_CODES.replace_all(s, "").into_owned()
}
