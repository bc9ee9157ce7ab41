//! Metadata extraction: registration table in, [`CommandMetadata`] out.
//!
//! - `model`: descriptor types
//! - `registration`: the [`Command`] trait and its table
//! - `doc_block`: tag parsing for program and method doc blocks
//! - `regexes`: compiled tag patterns

pub mod doc_block;
mod model;
mod regexes;
mod registration;

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::error::MetadataError;

pub use model::{
    CommandMetadata, MethodDescriptor, ParamType, ParameterDescriptor, ProgramDescriptor,
};
pub use registration::{Command, Exposed, Handler, Registration, Slot};

/// Extract metadata for a command type. Idempotent: the registration is
/// static, so repeated calls return equal values.
pub fn extract<C: Command>() -> Result<CommandMetadata, MetadataError> {
    extract_from(&C::register())
}

/// Extract metadata from an already-built registration table.
pub fn extract_from<C>(registration: &Registration<C>) -> Result<CommandMetadata, MetadataError> {
    let mut metadata = CommandMetadata {
        program: doc_block::parse_program(registration.doc),
        ..Default::default()
    };
    debug!(
        title = %metadata.program.title,
        version = %metadata.program.version,
        methods = registration.methods.len(),
        "extracting command metadata"
    );

    for (index, exposed) in registration.methods.iter().enumerate() {
        if exposed.name.trim().is_empty() {
            return Err(MetadataError::EmptyMethodName { index });
        }
        if metadata.methods.contains_key(exposed.name) {
            return Err(MetadataError::DuplicateMethod {
                method: exposed.name.to_string(),
            });
        }
        let method = describe_method(exposed)?;
        trace!(method = %method.name, parameters = method.parameters.len(), "exposed method");
        metadata.methods.insert(method.name.clone(), method);
    }

    Ok(metadata)
}

fn describe_method<C>(exposed: &Exposed<C>) -> Result<MethodDescriptor, MetadataError> {
    let tags = doc_block::parse_param_tags(exposed.doc);
    let mut seen = HashSet::new();
    let mut parameters = Vec::with_capacity(exposed.signature.len());

    for slot in &exposed.signature {
        if !seen.insert(slot.name) {
            return Err(MetadataError::DuplicateParameter {
                method: exposed.name.to_string(),
                parameter: slot.name.to_string(),
            });
        }
        let tag = tags
            .get(slot.name)
            .ok_or_else(|| MetadataError::UndocumentedParameter {
                method: exposed.name.to_string(),
                parameter: slot.name.to_string(),
            })?;
        let kind = ParamType::from_tag(&tag.declared_type).ok_or_else(|| {
            MetadataError::UnsupportedType {
                method: exposed.name.to_string(),
                parameter: slot.name.to_string(),
                declared: tag.declared_type.clone(),
            }
        })?;
        parameters.push(ParameterDescriptor {
            name: slot.name.to_string(),
            kind,
            optional: slot.optional,
            description: tag.description.clone(),
        });
    }

    Ok(MethodDescriptor {
        name: exposed.name.to_string(),
        description: doc_block::parse_description(exposed.doc),
        parameters,
    })
}
