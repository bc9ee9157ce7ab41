use std::sync::OnceLock;

use regex::Regex;

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex literal")
}

/// `@title`, `@version` or `@usage` followed by the rest of the line.
pub(crate) fn regex_program_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"(?m)@(title|version|usage)[ \t]+(.*?)[ \t]*$"))
}

/// `@param <type> $<name> <description>`
pub(crate) fn regex_param_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"(?m)@param[ \t]+(\S+)[ \t]+\$([A-Za-z_][A-Za-z0-9_]*)[ \t]*(.*?)[ \t]*$"))
}
