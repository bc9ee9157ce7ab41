use serde::Deserialize;

/// When to emit ANSI escape sequences.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color only when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "auto" => Some(ColorMode::Auto),
            "always" | "yes" | "true" => Some(ColorMode::Always),
            "never" | "no" | "false" => Some(ColorMode::Never),
            _ => None,
        }
    }
}
