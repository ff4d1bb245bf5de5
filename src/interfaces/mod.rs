//! External interfaces: REST API and WebSocket streams

pub mod http;
pub mod ws;
