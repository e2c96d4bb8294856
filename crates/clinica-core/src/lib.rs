pub mod error;
pub mod traits;
pub mod types;

pub use error::Error;
pub use traits::RemoteApi;
pub use types::{Endpoint, HttpMethod, ParamSpec, ParamType, ParamValue, ToolArguments};
