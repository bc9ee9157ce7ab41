//! Terminal color utilities for dispatcher output.
//!
//! Three semantic tones cover everything the dispatcher prints: results,
//! errors and hints. Rendering is pure string formatting.

use std::io::IsTerminal;

use crate::types::ColorMode;

// ============================================================================
// ANSI Color Codes
// ============================================================================

pub const RED: u8 = 31;
pub const GREEN: u8 = 32;
pub const YELLOW: u8 = 33;

pub const ESC: char = '\u{1b}';
pub const RESET: &str = "\x1b[0m";

/// Semantic color of a rendered line.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tone {
    /// Results, banners - GREEN
    Success,
    /// Errors - RED
    Failure,
    /// Hints, epilogues - YELLOW
    Warning,
}

impl Tone {
    pub fn code(self) -> u8 {
        match self {
            Tone::Success => GREEN,
            Tone::Failure => RED,
            Tone::Warning => YELLOW,
        }
    }
}

// ============================================================================
// Color State
// ============================================================================

/// Determines if colors should be used based on ColorMode and terminal detection.
pub fn is_enabled(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal(),
    }
}

/// Colorizer that can be passed around to format functions.
#[derive(Clone, Copy, Debug)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            enabled: is_enabled(mode),
        }
    }

    pub fn plain() -> Self {
        Self { enabled: false }
    }

    /// `ESC[<weight>;<code>m text ESC[0m`, weight 1 for bold and 0 otherwise.
    pub fn paint(&self, text: &str, tone: Tone, bold: bool) -> String {
        paint(text, tone, bold, self.enabled)
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(text, Tone::Success, false)
    }

    pub fn failure(&self, text: &str) -> String {
        self.paint(text, Tone::Failure, true)
    }

    pub fn warning(&self, text: &str) -> String {
        self.paint(text, Tone::Warning, false)
    }
}

impl Default for Painter {
    fn default() -> Self {
        Self::plain()
    }
}

/// Quick color wrapper - returns colored string if enabled
pub fn paint(text: &str, tone: Tone, bold: bool, enabled: bool) -> String {
    if enabled {
        let weight = if bold { 1 } else { 0 };
        format!("{ESC}[{weight};{}m{text}{RESET}", tone.code())
    } else {
        text.to_string()
    }
}
