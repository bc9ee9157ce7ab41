//! Metadata model: what the dispatcher knows about a command type.

use std::fmt;

use indexmap::IndexMap;

/// Program banner fields read from the command's doc block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramDescriptor {
    pub title: String,
    pub version: String,
    pub usage: String,
}

/// The closed set of parameter kinds a tag may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    String,
    Int,
    Bool,
    List,
}

impl ParamType {
    /// Resolve a tag spelling. `array` is accepted as an alias of `list`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "string" => Some(ParamType::String),
            "int" => Some(ParamType::Int),
            "bool" => Some(ParamType::Bool),
            "list" | "array" => Some(ParamType::List),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Int => "int",
            ParamType::Bool => "bool",
            ParamType::List => "list",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    pub name: String,
    pub kind: ParamType,
    pub optional: bool,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub name: String,
    pub description: String,
    /// Call-signature order.
    pub parameters: Vec<ParameterDescriptor>,
}

/// Everything extracted from one command type.
///
/// `methods` keeps declaration order; help rendering and method resolution
/// both iterate it front to back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandMetadata {
    pub program: ProgramDescriptor,
    pub methods: IndexMap<String, MethodDescriptor>,
}

impl CommandMetadata {
    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.get(name)
    }

    pub fn method_names(&self) -> impl Iterator<Item = &str> + Clone {
        self.methods.keys().map(String::as_str)
    }
}
