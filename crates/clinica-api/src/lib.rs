pub mod http;

pub use http::{HttpApi, DEFAULT_BASE_URL};
