//! The registration table a command type hands to the extractor.
//!
//! Only operations listed here are exposed; any other method on the command
//! type is an internal helper the dispatcher never sees.

use crate::value::Arguments;

/// Handler for one exposed operation. `Ok` text is printed as the result,
/// `Err` is rendered as a dispatch error followed by help.
pub type Handler<C> = fn(&C, &Arguments) -> anyhow::Result<String>;

/// A command type whose operations become subcommands.
pub trait Command: Sized {
    /// Static description of the command. Must be deterministic: the
    /// dispatcher may call it more than once and expects equal tables.
    fn register() -> Registration<Self>;

    /// Extra text rendered after the method list in help output.
    fn help_epilogue(&self) -> Option<String> {
        None
    }
}

/// One declared call-signature slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub name: &'static str,
    /// The parameter has a default value in the handler.
    pub optional: bool,
}

/// An exposed operation: name, doc block, signature and handler.
pub struct Exposed<C> {
    pub name: &'static str,
    pub doc: &'static str,
    pub signature: Vec<Slot>,
    pub handler: Handler<C>,
}

impl<C> Exposed<C> {
    pub fn new(name: &'static str, doc: &'static str, handler: Handler<C>) -> Self {
        Self {
            name,
            doc,
            signature: Vec::new(),
            handler,
        }
    }

    pub fn required(mut self, name: &'static str) -> Self {
        self.signature.push(Slot {
            name,
            optional: false,
        });
        self
    }

    pub fn optional(mut self, name: &'static str) -> Self {
        self.signature.push(Slot {
            name,
            optional: true,
        });
        self
    }
}

/// The command's class-level doc block plus its exposed operations in
/// declaration order.
pub struct Registration<C> {
    pub doc: &'static str,
    pub methods: Vec<Exposed<C>>,
}

impl<C> Registration<C> {
    pub fn new(doc: &'static str) -> Self {
        Self {
            doc,
            methods: Vec::new(),
        }
    }

    pub fn expose(mut self, method: Exposed<C>) -> Self {
        self.methods.push(method);
        self
    }

    pub fn handlers(&self) -> Vec<Handler<C>> {
        self.methods.iter().map(|m| m.handler).collect()
    }
}
