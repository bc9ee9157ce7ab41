//! The dispatcher: one invocation from argv to rendered output.
//!
//! ```text
//! argv ─► Argv (preflight) ─► OptionMap ─► help? ─► method lookup
//!      ─► bind + cast parameters ─► handler ─► DispatchOutcome
//! ```
//!
//! Nothing here writes to the terminal. [`Dispatcher::run`] returns a
//! [`DispatchOutcome`] and the binary decides where the text goes.
//!
//! # Module Structure
//!
//! - [`argv`] - argument vector preflight
//! - [`options`] - query-string option map
//! - [`cast`] - typed casting (lenient and strict)
//! - [`help`] - help and error rendering
//! - `suggest` - method name suggestions

pub mod argv;
pub mod cast;
pub mod help;
pub mod options;
mod suggest;

use std::ffi::OsString;

use once_cell::unsync::OnceCell;
use tracing::debug;

use crate::colors::{Painter, Tone};
use crate::config::DispatchConfig;
use crate::error::{DispatchError, FatalError, MetadataError};
use crate::extract::{Command, CommandMetadata, Handler, MethodDescriptor, extract_from};
use crate::value::Arguments;

pub use argv::Argv;
pub use options::{OptionMap, OptionValue};

/// How a dispatch attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// A method ran and returned a result.
    Completed { method: String },
    /// Help was requested (or no arguments were given).
    Help,
    /// Validation, resolution or the method itself failed.
    Failed { kind: &'static str },
}

/// Rendered result of one dispatch.
#[derive(Debug)]
pub struct DispatchOutcome {
    pub status: Status,
    pub rendered: String,
    pub error: Option<DispatchError>,
}

impl DispatchOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self.status, Status::Failed { .. })
    }

    /// 0 for results and help, 1 for dispatch errors.
    pub fn exit_code(&self) -> i32 {
        if self.is_error() { 1 } else { 0 }
    }
}

/// Metadata plus the handlers, index-aligned with `metadata.methods`.
struct CommandTable<C> {
    metadata: CommandMetadata,
    handlers: Vec<Handler<C>>,
}

/// Dispatches one invocation against a command instance.
pub struct Dispatcher<C: Command> {
    command: C,
    config: DispatchConfig,
    painter: Painter,
    table: OnceCell<CommandTable<C>>,
}

impl<C: Command> Dispatcher<C> {
    pub fn new(command: C, config: DispatchConfig) -> Self {
        let painter = Painter::new(config.color_mode());
        Self {
            command,
            config,
            painter,
            table: OnceCell::new(),
        }
    }

    /// Override the painter (tests render with a fixed color state).
    pub fn with_painter(mut self, painter: Painter) -> Self {
        self.painter = painter;
        self
    }

    pub fn command(&self) -> &C {
        &self.command
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Extracted metadata, built on first use and cached for this instance.
    pub fn metadata(&self) -> Result<&CommandMetadata, MetadataError> {
        self.table().map(|table| &table.metadata)
    }

    fn table(&self) -> Result<&CommandTable<C>, MetadataError> {
        self.table.get_or_try_init(|| {
            let registration = C::register();
            let metadata = extract_from(&registration)?;
            Ok(CommandTable {
                metadata,
                handlers: registration.handlers(),
            })
        })
    }

    /// Full help text for the command.
    pub fn help(&self) -> Result<String, MetadataError> {
        let epilogue = self.command.help_epilogue();
        Ok(help::format_help(
            self.metadata()?,
            &self.painter,
            epilogue.as_deref(),
        ))
    }

    /// Run one invocation from raw OS arguments (program name first).
    pub fn run<I, S>(&self, raw: I) -> Result<DispatchOutcome, FatalError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let argv = Argv::from_os(raw)?;
        self.run_argv(&argv)
    }

    /// Run one invocation from a checked argument vector.
    pub fn run_argv(&self, argv: &Argv) -> Result<DispatchOutcome, FatalError> {
        let table = self.table()?;
        let options = OptionMap::from_tokens(argv.arguments());
        debug!(program = argv.program(), options = options.len(), "parsed options");

        if options.wants_help() {
            return Ok(DispatchOutcome {
                status: Status::Help,
                rendered: self.help()?,
                error: None,
            });
        }

        // First method in declaration order wins, even if several are named.
        let resolved = table
            .metadata
            .methods
            .values()
            .enumerate()
            .find(|(_, method)| options.contains_key(&method.name));

        let Some((index, method)) = resolved else {
            let suggestion =
                suggest::suggest_method(&options, table.metadata.method_names()).map(str::to_string);
            return self.fail(DispatchError::UnresolvedMethod { suggestion });
        };
        debug!(method = %method.name, "resolved method");

        let arguments = match self.bind(method, &options) {
            Ok(arguments) => arguments,
            Err(err) => return self.fail(err),
        };

        let handler = table.handlers[index];
        match handler(&self.command, &arguments) {
            Ok(result) => Ok(DispatchOutcome {
                status: Status::Completed {
                    method: method.name.clone(),
                },
                rendered: format!(
                    "{}\n",
                    self.painter
                        .paint(&format!("{}: {}", method.name, result), Tone::Success, false)
                ),
                error: None,
            }),
            Err(err) => self.fail(DispatchError::MethodFailed(err)),
        }
    }

    /// Bind parameters in declared order. Stops at the first missing
    /// required parameter so the method is never partially invoked.
    fn bind(&self, method: &MethodDescriptor, options: &OptionMap) -> Result<Arguments, DispatchError> {
        let mut arguments = Arguments::new();
        for param in &method.parameters {
            match options.parameter(&param.name) {
                None if param.optional => arguments.push(param.name.as_str(), None),
                None => {
                    return Err(DispatchError::MissingRequiredParameter {
                        method: method.name.clone(),
                        parameter: param.name.clone(),
                        description: param.description.clone(),
                    });
                }
                Some(raw) => {
                    let value = cast::cast(raw, param.kind, self.config.strict).map_err(|rejected| {
                        DispatchError::InvalidParameterValue {
                            method: method.name.clone(),
                            parameter: param.name.clone(),
                            expected: rejected.expected,
                            raw: rejected.raw,
                        }
                    })?;
                    if value.is_none() {
                        debug!(parameter = %param.name, "value did not cast, bound as absent");
                    }
                    arguments.push(param.name.as_str(), value);
                }
            }
        }
        Ok(arguments)
    }

    /// Error line followed by the full help.
    fn fail(&self, error: DispatchError) -> Result<DispatchOutcome, FatalError> {
        debug!(kind = error.kind(), %error, "dispatch failed");
        let mut rendered = help::format_error(&error, &self.painter);
        rendered.push_str(&self.help()?);
        Ok(DispatchOutcome {
            status: Status::Failed { kind: error.kind() },
            rendered,
            error: Some(error),
        })
    }
}
