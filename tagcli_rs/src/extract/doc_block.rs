//! Doc-block parsing: program tags, method descriptions and `@param` lines.
//!
//! A doc block is free text in the usual `/** ... */` shape (decoration is
//! optional). Everything before the first `@` is the description, tag lines
//! follow.

use std::collections::HashMap;

use super::model::ProgramDescriptor;
use super::regexes::{regex_param_tag, regex_program_tag};

/// A raw `@param` tag before the type is validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamTag {
    pub declared_type: String,
    pub description: String,
}

/// Strip comment decoration from every line and drop the framing lines.
pub fn clean(doc: &str) -> String {
    doc.lines()
        .map(|line| {
            let line = line.trim();
            let line = line
                .strip_prefix("/**")
                .or_else(|| line.strip_prefix("*/"))
                .or_else(|| line.strip_prefix("///"))
                .or_else(|| line.strip_prefix('*'))
                .unwrap_or(line);
            line.strip_suffix("*/").unwrap_or(line).trim()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Read `@title`, `@version` and `@usage`. Each tag is independent; a missing
/// tag leaves its field empty.
pub fn parse_program(doc: &str) -> ProgramDescriptor {
    let mut program = ProgramDescriptor::default();
    for caps in regex_program_tag().captures_iter(&clean(doc)) {
        let slot = match &caps[1] {
            "title" => &mut program.title,
            "version" => &mut program.version,
            _ => &mut program.usage,
        };
        // First occurrence wins.
        if slot.is_empty() {
            *slot = caps[2].to_string();
        }
    }
    program
}

/// Description text: every non-empty line before the first tag.
pub fn parse_description(doc: &str) -> String {
    let cleaned = clean(doc);
    let head = match cleaned.find('@') {
        Some(idx) => &cleaned[..idx],
        None => cleaned.as_str(),
    };
    head.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// All `@param` tags keyed by parameter name (without the `$`).
pub fn parse_param_tags(doc: &str) -> HashMap<String, ParamTag> {
    let cleaned = clean(doc);
    let mut tags = HashMap::new();
    for caps in regex_param_tag().captures_iter(&cleaned) {
        tags.entry(caps[2].to_string()).or_insert_with(|| ParamTag {
            declared_type: caps[1].to_string(),
            description: caps[3].to_string(),
        });
    }
    tags
}
