use serde::Serialize;
use serde_json::{Map, Value};

use clinica_core::Error;

/// Request type that asks for the tool catalog.
pub const LIST_TOOLS: &str = "listTools";

/// Request type that runs a single tool.
pub const EXECUTE_TOOL: &str = "executeTool";

/// Label used in error messages for a field the request does not carry.
const ABSENT: &str = "undefined";

/// One request line read from the input stream.
///
/// Fields are kept as raw JSON: any parsed line is a request, and a field of
/// the wrong shape surfaces as an error response rather than a dropped line.
#[derive(Debug, Default)]
pub struct Request {
    /// Caller-chosen correlation token. `None` when the key is absent, which
    /// is different from an explicit `null`.
    pub id: Option<Value>,
    pub kind: Option<Value>,
    pub tool: Option<Value>,
    pub parameters: Option<Value>,
}

impl From<Value> for Request {
    /// Anything other than an object carries no fields at all.
    fn from(value: Value) -> Self {
        let Value::Object(mut fields) = value else {
            return Self::default();
        };

        Self {
            id: fields.remove("id"),
            kind: fields.remove("type"),
            tool: fields.remove("tool"),
            parameters: fields.remove("parameters"),
        }
    }
}

impl Request {
    /// The request type as a string, if it is one.
    #[must_use]
    pub fn kind_str(&self) -> Option<&str> {
        self.kind.as_ref().and_then(Value::as_str)
    }

    /// Human-readable form of the request type for error messages.
    #[must_use]
    pub fn kind_label(&self) -> String {
        label(self.kind.as_ref())
    }

    /// Tool name to look up. Non-string names render as their JSON text.
    #[must_use]
    pub fn tool_label(&self) -> String {
        label(self.tool.as_ref())
    }

    /// Supplied parameters. Anything but an object counts as none supplied.
    #[must_use]
    pub fn into_parameters(self) -> Map<String, Value> {
        match self.parameters {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

fn label(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => ABSENT.to_string(),
    }
}

/// Decode one complete input line into a request.
///
/// # Errors
///
/// Returns [`Error::MalformedLine`] only when the line is not valid UTF-8 JSON.
pub fn decode_line(line: &[u8]) -> Result<Request, Error> {
    serde_json::from_slice::<Value>(line)
        .map(Request::from)
        .map_err(|e| Error::MalformedLine(e.to_string()))
}

/// One response line written to the output stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    /// Create a success response.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<Value>, message: impl Into<String>) -> Self {
        Self {
            id,
            result: None,
            error: Some(message.into()),
        }
    }

    /// Serialize as a single newline-terminated line.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if the payload cannot be encoded.
    pub fn to_line(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut line = serde_json::to_vec(self)?;
        line.push(b'\n');
        Ok(line)
    }
}
