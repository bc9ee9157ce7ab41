//! # tagcli
//!
//! **Doc-tag driven subcommand dispatch.** A command type lists its exposed
//! operations once, each with a doc block in the familiar tag style, and
//! tagcli turns them into subcommands with typed parameters, help output and
//! colored results.
//!
//! ## Features
//!
//! - **Registration table** - only operations listed in [`Registration`] are
//!   callable; everything else on the type stays internal
//! - **Tag extraction** - `@title`/`@version`/`@usage` for the banner,
//!   `@param <type> $<name> <description>` per parameter
//! - **Query-string arguments** - `power -x=2 -y=10`, `-divisors=[3,5]`,
//!   `-divisors[]=3 -divisors[]=5`
//! - **Lenient casting** with an opt-in strict mode
//! - **Rendered outcomes** - dispatch returns text plus status; no hidden
//!   terminal writes
//!
//! ## Quick Start
//!
//! ```rust
//! use tagcli::{Arguments, Command, DispatchConfig, Dispatcher, Exposed, Registration};
//!
//! struct Greeter;
//!
//! fn hello(_: &Greeter, args: &Arguments) -> anyhow::Result<String> {
//!     Ok(format!("hello {}", args.str("name").unwrap_or("world")))
//! }
//!
//! impl Command for Greeter {
//!     fn register() -> Registration<Self> {
//!         Registration::new("/**\n * @title Greeter\n * @version 1.0\n */").expose(
//!             Exposed::new("hello", "/** Say hello\n * @param string $name Who */", hello)
//!                 .optional("name"),
//!         )
//!     }
//! }
//!
//! let dispatcher = Dispatcher::new(Greeter, DispatchConfig::default())
//!     .with_painter(tagcli::Painter::plain());
//! let outcome = dispatcher.run(["greet", "hello", "-name=tagcli"]).unwrap();
//! assert_eq!(outcome.rendered, "hello: hello tagcli\n");
//! ```

// ============================================================================
// Core Modules
// ============================================================================

/// Metadata extraction from a command's registration table.
pub mod extract;

/// Argument parsing, binding, invocation and rendering.
pub mod dispatch;

/// Bound argument values.
pub mod value;

// ============================================================================
// Support Modules
// ============================================================================

/// Terminal color utilities.
pub mod colors;

/// Configuration file support.
pub mod config;

/// Error types.
pub mod error;

/// Shared enums.
pub mod types;

// ============================================================================
// Re-exports
// ============================================================================

pub use colors::{Painter, Tone};
pub use config::DispatchConfig;
pub use dispatch::{Argv, DispatchOutcome, Dispatcher, OptionMap, OptionValue, Status};
pub use error::{ConfigurationError, DispatchError, FatalError, MetadataError};
pub use extract::{
    Command, CommandMetadata, Exposed, Handler, MethodDescriptor, ParamType, ParameterDescriptor,
    ProgramDescriptor, Registration, extract, extract_from,
};
pub use types::ColorMode;
pub use value::{Arguments, Value};
