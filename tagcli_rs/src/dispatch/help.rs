//! Help and error text rendering.

use crate::colors::{Painter, Tone};
use crate::error::DispatchError;
use crate::extract::{CommandMetadata, MethodDescriptor};

/// Full help: banner, usage, then every method with its options.
pub fn format_help(metadata: &CommandMetadata, painter: &Painter, epilogue: Option<&str>) -> String {
    let program = &metadata.program;
    let banner = format!("{} {}", program.title, program.version);

    let mut help = String::new();
    help.push_str(&painter.paint(banner.trim(), Tone::Success, true));
    help.push('\n');
    help.push_str(&format!("Usage: {}\n", program.usage));
    help.push_str("Methods :\n");
    for method in metadata.methods.values() {
        help.push_str(&format_method(method));
        help.push('\n');
    }

    if let Some(epilogue) = epilogue {
        help.push('\n');
        help.push_str(&painter.paint(epilogue.trim_end(), Tone::Warning, true));
        help.push('\n');
    }
    help
}

/// One method block. Continuation lines of the description are indented
/// under the name.
pub fn format_method(method: &MethodDescriptor) -> String {
    let mut block = String::new();
    let mut lines = method.description.lines();
    block.push_str(&format!(" * {}: {}\n", method.name, lines.next().unwrap_or("")));
    for line in lines {
        block.push_str(&format!("      {line}\n"));
    }

    if !method.parameters.is_empty() {
        block.push_str("    Options:\n");
        for param in &method.parameters {
            block.push_str(&format!(
                "     -{}: ({}) {}{}\n",
                param.name,
                param.kind,
                param.description,
                if param.optional { " (optional)" } else { "" }
            ));
        }
    }
    block
}

/// `Error! <message>` in bold red, plus a suggestion line when there is one.
pub fn format_error(error: &DispatchError, painter: &Painter) -> String {
    let mut out = painter.paint(&format!("Error! {error}"), Tone::Failure, true);
    out.push('\n');
    if let DispatchError::UnresolvedMethod {
        suggestion: Some(name),
    } = error
    {
        out.push_str(&painter.warning(&format!("Did you mean '{name}'?")));
        out.push('\n');
    }
    out
}
