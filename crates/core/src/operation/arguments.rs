//! Argument validation and extraction.
//!
//! Every check here runs before a storage request is built, so a rejected
//! invocation never reaches the store.

use serde_json::{Map, Value};

use crate::item::ItemInput;
use crate::schema::{CREATION_FIELDS, PRIMARY_KEY_ATTRIBUTE, SECONDARY_KEY_ATTRIBUTE};

use super::descriptor::{ArgumentKind, OperationDescriptor};
use super::error::{ResolverError, Result};

/// Checks arguments against the descriptor: required ones present, kinds
/// matching, nothing undeclared.
pub(crate) fn validate_arguments(
    descriptor: &OperationDescriptor,
    arguments: &Map<String, Value>,
) -> Result<()> {
    for name in arguments.keys() {
        if !descriptor.arguments.iter().any(|spec| spec.name == name) {
            return Err(ResolverError::invalid_argument(format!(
                "unexpected argument `{name}` for {}.{}",
                descriptor.type_name, descriptor.field_name
            )));
        }
    }

    for spec in descriptor.arguments {
        match arguments.get(spec.name) {
            None | Some(Value::Null) if spec.required => {
                return Err(ResolverError::invalid_argument(format!(
                    "missing required argument `{}`",
                    spec.name
                )));
            }
            None | Some(Value::Null) => {}
            Some(value) if !has_kind(value, spec.kind) => {
                return Err(ResolverError::invalid_argument(format!(
                    "argument `{}` must be {}",
                    spec.name,
                    spec.kind.describe()
                )));
            }
            Some(_) => {}
        }
    }

    Ok(())
}

fn has_kind(value: &Value, kind: ArgumentKind) -> bool {
    match kind {
        ArgumentKind::String => value.is_string(),
        ArgumentKind::Object => value.is_object(),
    }
}

/// Extracts a required, non-empty string argument.
pub(crate) fn required_string(arguments: &Map<String, Value>, name: &str) -> Result<String> {
    match arguments.get(name) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Value::String(_)) => Err(ResolverError::invalid_argument(format!(
            "`{name}` must not be empty"
        ))),
        Some(Value::Null) | None => Err(ResolverError::invalid_argument(format!(
            "missing required argument `{name}`"
        ))),
        Some(_) => Err(ResolverError::invalid_argument(format!(
            "argument `{name}` must be a string"
        ))),
    }
}

/// Extracts the `addItem` input object.
///
/// The creation fields must be non-empty strings. A supplied `id` must be a
/// non-empty string; `null` counts as absent. All other fields are kept
/// verbatim.
pub(crate) fn item_input(arguments: &Map<String, Value>, name: &str) -> Result<ItemInput> {
    let mut fields = match arguments.get(name) {
        Some(Value::Object(object)) => object.clone(),
        Some(Value::Null) | None => {
            return Err(ResolverError::invalid_argument(format!(
                "missing required argument `{name}`"
            )))
        }
        Some(_) => {
            return Err(ResolverError::invalid_argument(format!(
                "argument `{name}` must be an object"
            )))
        }
    };

    for field in CREATION_FIELDS {
        required_string(&fields, field)
            .map_err(|err| ResolverError::invalid_argument(format!("{name}: {}", message(err))))?;
    }

    let id = match fields.remove(PRIMARY_KEY_ATTRIBUTE) {
        None | Some(Value::Null) => None,
        Some(Value::String(id)) if !id.is_empty() => Some(id),
        Some(Value::String(_)) => {
            return Err(ResolverError::invalid_argument(format!(
                "{name}: `{PRIMARY_KEY_ATTRIBUTE}` must not be empty"
            )))
        }
        Some(_) => {
            return Err(ResolverError::invalid_argument(format!(
                "{name}: `{PRIMARY_KEY_ATTRIBUTE}` must be a string"
            )))
        }
    };

    let title = match fields.remove(SECONDARY_KEY_ATTRIBUTE) {
        Some(Value::String(title)) => title,
        _ => {
            return Err(ResolverError::invalid_argument(format!(
                "{name}: missing required argument `{SECONDARY_KEY_ATTRIBUTE}`"
            )))
        }
    };

    Ok(ItemInput { id, title, fields })
}

fn message(err: ResolverError) -> String {
    match err {
        ResolverError::InvalidArgument(message) => message,
        other => other.to_string(),
    }
}
