pub mod app_state;
pub mod config;
pub mod dispatcher;
pub mod stream;
