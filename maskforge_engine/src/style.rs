//! Styling helpers for terminal output.
//!
//! The [`GameStyle`] trait provides a set of convenience methods for applying
//! ANSI styling via the `colored` crate. Implementations for `&str` and
//! `String` are provided so string literals can be styled directly.

use colored::{ColoredString, Colorize};

/// Convenience trait for applying color and style to text output.
pub trait GameStyle {
    fn scene_titlebar_style(&self) -> ColoredString;
    fn description_style(&self) -> ColoredString;
    fn object_style(&self) -> ColoredString;
    fn intent_style(&self) -> ColoredString;
    fn error_style(&self) -> ColoredString;
    fn suggestion_style(&self) -> ColoredString;
    fn prompt_style(&self) -> ColoredString;
}

impl GameStyle for &str {
    fn scene_titlebar_style(&self) -> ColoredString {
        self.truecolor(223, 77, 10).underline()
    }
    fn description_style(&self) -> ColoredString {
        self.italic().truecolor(102, 208, 250)
    }
    fn object_style(&self) -> ColoredString {
        self.truecolor(220, 180, 40)
    }
    fn intent_style(&self) -> ColoredString {
        self.bold().truecolor(110, 220, 110)
    }
    fn error_style(&self) -> ColoredString {
        self.truecolor(200, 50, 50)
    }
    fn suggestion_style(&self) -> ColoredString {
        self.italic().truecolor(75, 180, 255)
    }
    fn prompt_style(&self) -> ColoredString {
        self.bold().truecolor(110, 220, 110)
    }
}

impl GameStyle for String {
    fn scene_titlebar_style(&self) -> ColoredString {
        self.as_str().scene_titlebar_style()
    }
    fn description_style(&self) -> ColoredString {
        self.as_str().description_style()
    }
    fn object_style(&self) -> ColoredString {
        self.as_str().object_style()
    }
    fn intent_style(&self) -> ColoredString {
        self.as_str().intent_style()
    }
    fn error_style(&self) -> ColoredString {
        self.as_str().error_style()
    }
    fn suggestion_style(&self) -> ColoredString {
        self.as_str().suggestion_style()
    }
    fn prompt_style(&self) -> ColoredString {
        self.as_str().prompt_style()
    }
}
