//! # streamdisp
//!
//! > A small [Tokio](https://tokio.rs/)-based HTTP/WebSocket server, plus a streaming
//! > dispatch engine on top of it: controller methods returning a lazy async sequence
//! > of values are exposed as bidirectional WebSocket streams or chunked HTTP streams,
//! > behind a route registry that binds parameters once at startup (no per-call
//! > reflection).
//!
//! ## Features
//! * Supports HTTP/1 and HTTP/2
//! * Robust routing
//! * Custom middlewares
//! * WebSocket-based bidirectional streaming endpoints (see [`dispatch`])
//! * Chunked HTTP streaming endpoints (see [`dispatch`])
//! * Full [Tokio](https://tokio.rs/) compatibility
//!
//! ## Example
//! ```no_run
//! use streamdisp::*;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     // Start the server
//!     let mut app = App::new();
//!
//!     // Example of a request handler
//!     app.map_get("/hello/{name}", async |name: String| {
//!          ok!("Hello {name}!")
//!     });
//!
//!     app.run().await
//! }
//! ```

mod server;
pub(crate) mod utils;

pub mod app;
pub mod http;
pub mod headers;
pub mod json;
pub mod error;
pub mod fs;
#[cfg(feature = "middleware")]
pub mod middleware;
#[cfg(feature = "tracing")]
pub mod tracing;
#[cfg(feature = "ws")]
pub mod ws;
pub mod dispatch;
#[cfg(any(test, feature = "test"))]
pub mod test;

pub use crate::app::App;
pub use crate::http::{
    response::builder::{RESPONSE_ERROR, SERVER_NAME},
    endpoints::args::{
        cancellation_token::CancellationToken,
        file::File,
        json::Json,
        path::Path,
        query::Query,
        form::Form,
    },
    BoxBody,
    UnsyncBoxBody,
    HttpBody,
    HttpRequest,
    HttpResponse,
    HttpResult,
    ResponseContext,
    Results
};

/// Route mapping helpers
pub mod routing {
    pub use crate::app::router::{RouteGroup, Route};
}


