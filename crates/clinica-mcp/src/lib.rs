pub mod protocol;
pub mod tools;
pub mod validate;

pub use protocol::{decode_line, Request, Response};
pub use tools::{ToolDescriptor, ToolRegistry, ToolSummary};
pub use validate::validate;
