//! Streaming controller dispatch.
//!
//! Binds controller methods that return a lazy async sequence of values
//! to a route, and exposes each one over two transports at once: a
//! WebSocket bidirectional stream (for methods that also accept
//! peer-pushed input) and a chunked HTTP stream (GET, no body; POST,
//! with a request body bound under `$body`). One [`App::map_stream_controller`]
//! call registers every route a [`ControllerRoutes`] builder produced;
//! which transport a given request gets is decided per-request, not per
//! route: an upgrade-eligible request is driven as a WebSocket, anything
//! else falls through to the chunked HTTP path.

mod http_driver;
mod param;
mod registry;
mod scheduler;
mod slot;
mod wire;
#[cfg(feature = "ws")]
mod ws_driver;

pub use registry::ControllerRoutes;
pub use param::{ScalarMap, ScalarMapExt};
pub use slot::InboundSlots;

use std::sync::Arc;

use futures_util::future::BoxFuture;
use http_body_util::BodyExt;
use hyper::Method;

use crate::app::App;
use crate::error::Error;
use crate::http::endpoints::handlers::{Handler, RouteHandler};
use crate::http::HttpResult;
use crate::{CancellationToken, HttpRequest};

use param::BODY_KEY;
use registry::Route;

#[cfg(feature = "ws")]
use crate::ws::WebSocketConnection;

/// A registered dispatch route, callable as a plain request handler.
struct DispatchRoute {
    route: Arc<Route>,
}

impl Handler for DispatchRoute {
    fn call(&self, req: HttpRequest) -> BoxFuture<HttpResult> {
        let route = self.route.clone();
        Box::pin(async move {
            let (parts, body) = req.into_parts();
            let cancel = CancellationToken::from(&parts.extensions).into_inner();

            #[cfg(feature = "ws")]
            if let Ok(conn) = WebSocketConnection::try_from(&parts) {
                let scalars = param::scalars_from_query(parts.uri.query());
                return conn.on(move |ws| async move {
                    ws_driver::drive(ws, route, scalars, cancel).await;
                });
            }

            let mut scalars = param::scalars_from_query(parts.uri.query());
            if route.has_body {
                let bytes = body.collect().await?.to_bytes();
                let text = String::from_utf8(bytes.to_vec()).map_err(Error::client_error)?;
                scalars.insert(BODY_KEY.to_owned(), text);
            }

            http_driver::drive(route, scalars, cancel).await
        })
    }
}

impl App {
    /// Registers every route built by a [`ControllerRoutes`] builder.
    ///
    /// Each route is mapped on the same verb `map_conn` uses for a plain
    /// WebSocket handler: GET under HTTP/1-only, CONNECT once HTTP/2 is in
    /// play (the WebTransport-style upgrade method for that protocol). That
    /// one registration serves both a WebSocket upgrade (when the `ws`
    /// feature is enabled and the request carries upgrade headers) and a
    /// plain chunked stream for requests that don't upgrade. A route
    /// declared with a body parameter is additionally mapped as POST, since
    /// an HTTP body is only meaningful on a method that allows one.
    pub fn map_stream_controller<C: Send + Sync + 'static>(&mut self, routes: ControllerRoutes<C>) -> &mut Self {
        let endpoints = self.pipeline_mut().endpoints_mut();
        for route in routes.into_routes() {
            let has_body = route.has_body;
            let path = route.path.clone();
            let handler: RouteHandler = Arc::new(DispatchRoute { route: Arc::new(route) });

            #[cfg(all(feature = "http1", not(feature = "http2")))]
            endpoints.map_route(Method::GET, &path, handler.clone());

            #[cfg(any(
                all(feature = "http1", feature = "http2"),
                all(feature = "http2", not(feature = "http1"))
            ))]
            endpoints.map_route(Method::CONNECT, &path, handler.clone());

            if has_body {
                endpoints.map_route(Method::POST, &path, handler);
            }
        }
        self
    }
}
