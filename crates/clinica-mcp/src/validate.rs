use serde_json::{Map, Value};

use clinica_core::{Error, ParamSpec, ToolArguments};

/// Check required parameters and bind the supplied map to the schema.
///
/// Parameters are checked in declaration order and the first required one that
/// is absent or falsy is reported. Values are not type-checked.
///
/// # Errors
///
/// Returns [`Error::MissingRequiredParameter`] naming the first missing key.
pub fn validate(specs: &[ParamSpec], params: Map<String, Value>) -> Result<ToolArguments, Error> {
    if let Some(missing) = specs
        .iter()
        .filter(|spec| spec.required)
        .find(|spec| params.get(&spec.name).is_none_or(is_falsy))
    {
        return Err(Error::MissingRequiredParameter(missing.name.clone()));
    }

    Ok(ToolArguments::bind(specs, params))
}

/// `null`, `false`, zero and the empty string count as missing.
/// Arrays and objects never do, even when empty.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
