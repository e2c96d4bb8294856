use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Declared type tag of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Number,
}

/// Schema entry for a single tool parameter.
///
/// The name is the key of the enclosing parameter map when serialized, so it
/// is not repeated in the entry itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
    #[serde(skip)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ParamType,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ParamSpec {
    /// A required parameter.
    #[must_use]
    pub fn required(name: &str, kind: ParamType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required: true,
            description: Some(description.to_string()),
        }
    }

    /// An optional parameter.
    #[must_use]
    pub fn optional(name: &str, kind: ParamType, description: &str) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind, description)
        }
    }
}

/// HTTP verb used by a tool's remote binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// The remote call a tool is bound to: a verb and a path below the API base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: HttpMethod,
    pub path: String,
}

impl Endpoint {
    #[must_use]
    pub fn get(path: &str) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.to_string(),
        }
    }

    #[must_use]
    pub fn post(path: &str) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.to_string(),
        }
    }
}

/// A supplied value for a declared parameter.
///
/// Values whose JSON shape does not match the declared tag are kept as
/// `Untyped` and forwarded unchanged; presence is the only thing checked.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Number(Number),
    Untyped(Value),
}

impl ParamValue {
    /// Classify a raw JSON value against a declared type tag.
    #[must_use]
    pub fn bind(kind: ParamType, value: Value) -> Self {
        match (kind, value) {
            (ParamType::String, Value::String(s)) => Self::Text(s),
            (ParamType::Number, Value::Number(n)) => Self::Number(n),
            (_, other) => Self::Untyped(other),
        }
    }

    /// Text form used in a query string. `None` for `null`, which is omitted.
    #[must_use]
    pub fn query_text(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.clone()),
            Self::Number(n) => Some(n.to_string()),
            Self::Untyped(value) => query_text(value),
        }
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Text(s) => Value::String(s),
            Self::Number(n) => Value::Number(n),
            Self::Untyped(value) => value,
        }
    }
}

fn query_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// Parameters of one tool invocation after validation.
///
/// Declared parameters that were supplied keep declaration order; anything
/// the schema does not mention rides along in `extra`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArguments {
    pub declared: Vec<(String, ParamValue)>,
    pub extra: Map<String, Value>,
}

impl ToolArguments {
    /// Split a raw parameter map into typed declared values and opaque extras.
    #[must_use]
    pub fn bind(specs: &[ParamSpec], mut raw: Map<String, Value>) -> Self {
        let declared = specs
            .iter()
            .filter_map(|spec| {
                raw.remove(&spec.name)
                    .map(|value| (spec.name.clone(), ParamValue::bind(spec.kind, value)))
            })
            .collect();

        Self {
            declared,
            extra: raw,
        }
    }

    /// Look up a declared parameter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.declared
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Query string pairs: declared parameters first, then extras.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let declared = self
            .declared
            .iter()
            .filter_map(|(key, value)| value.query_text().map(|text| (key.clone(), text)));
        let extra = self
            .extra
            .iter()
            .filter_map(|(key, value)| query_text(value).map(|text| (key.clone(), text)));
        declared.chain(extra).collect()
    }

    /// JSON object body carrying every supplied parameter.
    #[must_use]
    pub fn into_body(self) -> Value {
        let mut body = Map::new();
        for (key, value) in self.declared {
            body.insert(key, value.into_value());
        }
        body.extend(self.extra);
        Value::Object(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn specs() -> Vec<ParamSpec> {
        vec![
            ParamSpec::required("cnpj", ParamType::String, "CNPJ da clínica"),
            ParamSpec::optional("id_especialidade", ParamType::Number, "ID da especialidade"),
        ]
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn param_spec_serializes_without_name() {
        let spec = ParamSpec::optional("nome", ParamType::String, "Filtro por nome");
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(
            json,
            json!({"type": "string", "required": false, "description": "Filtro por nome"})
        );
    }

    #[test]
    fn bind_matches_declared_tags() {
        assert_eq!(
            ParamValue::bind(ParamType::String, json!("123")),
            ParamValue::Text("123".to_string())
        );
        assert_eq!(
            ParamValue::bind(ParamType::Number, json!(7)),
            ParamValue::Number(7.into())
        );
    }

    #[test]
    fn mismatched_shape_is_untyped_not_rejected() {
        assert_eq!(
            ParamValue::bind(ParamType::Number, json!("7")),
            ParamValue::Untyped(json!("7"))
        );
    }

    #[test]
    fn arguments_split_declared_and_extra() {
        let args = ToolArguments::bind(
            &specs(),
            object(json!({"cnpj": "1", "id_especialidade": 3, "pagina": 2})),
        );

        assert_eq!(args.declared.len(), 2);
        assert_eq!(args.get("cnpj"), Some(&ParamValue::Text("1".to_string())));
        assert_eq!(args.extra.get("pagina"), Some(&json!(2)));
    }

    #[test]
    fn query_pairs_render_text_and_skip_null() {
        let args = ToolArguments::bind(
            &specs(),
            object(json!({"id_especialidade": 12, "cnpj": "00.000", "ativo": true, "nota": null})),
        );

        assert_eq!(
            args.query_pairs(),
            vec![
                ("cnpj".to_string(), "00.000".to_string()),
                ("id_especialidade".to_string(), "12".to_string()),
                ("ativo".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn body_keeps_every_value() {
        let args = ToolArguments::bind(
            &specs(),
            object(json!({"cnpj": "1", "extra": {"a": [1, 2]}})),
        );
        assert_eq!(args.into_body(), json!({"cnpj": "1", "extra": {"a": [1, 2]}}));
    }

    #[test]
    fn http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
    }
}
