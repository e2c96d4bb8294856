use serde_json::Value;

use clinica_core::Error;
use clinica_mcp::protocol::{EXECUTE_TOOL, LIST_TOOLS};
use clinica_mcp::{validate, Request, Response};

use crate::app_state::AppState;

/// Handle one decoded request.
///
/// Every failure along the way (unknown type, unknown tool, missing parameter,
/// remote error) becomes an error response carrying the request id.
pub async fn dispatch(state: &AppState, req: Request) -> Response {
    let id = req.id.clone();

    match route(state, req).await {
        Ok(result) => Response::success(id, result),
        Err(err) => {
            tracing::debug!(id = ?id, "request failed: {err}");
            Response::error(id, err.to_string())
        }
    }
}

async fn route(state: &AppState, req: Request) -> Result<Value, Error> {
    let kind = req.kind_str().map(str::to_string);
    tracing::debug!(id = ?req.id, kind = ?kind, "dispatching request");

    match kind.as_deref() {
        Some(LIST_TOOLS) => Ok(handle_list_tools(state)),
        Some(EXECUTE_TOOL) => handle_execute_tool(state, req).await,
        _ => Err(Error::UnknownRequestType(req.kind_label())),
    }
}

fn handle_list_tools(state: &AppState) -> Value {
    state.registry.list_result()
}

async fn handle_execute_tool(state: &AppState, req: Request) -> Result<Value, Error> {
    let name = req.tool_label();

    let tool = state
        .registry
        .get(&name)
        .ok_or_else(|| Error::ToolNotFound(name.clone()))?;

    let args = validate(&tool.parameters, req.into_parameters())?;

    tracing::debug!(
        tool = %tool.name,
        method = %tool.endpoint.method,
        path = %tool.endpoint.path,
        "invoking tool"
    );

    tool.invoke(state.api.as_ref(), args).await
}
