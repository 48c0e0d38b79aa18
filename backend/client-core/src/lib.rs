pub mod config;
pub mod editor;
pub mod error;
pub mod protocol;
pub mod render;
pub mod runtime;
pub mod session;
pub mod transport;

#[cfg(test)]
mod tests;

pub const DEFAULT_BACKEND_HOST: &str = "127.0.0.1:8080";
pub const DEFAULT_BACKEND_ADDRESS: &str =
    const_format::concatcp!("ws://", DEFAULT_BACKEND_HOST, "/compile");
pub const DEFAULT_FRAME_BASE_URL: &str =
    const_format::concatcp!("http://", DEFAULT_BACKEND_HOST, "/run/");
pub const DEFAULT_SOCKET_NAME: &str = "compiler";
