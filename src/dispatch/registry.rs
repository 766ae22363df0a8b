//! Route registry for streaming controller dispatch.
//!
//! A [`ControllerRoutes`] builder binds one controller's methods to a
//! path prefix once at startup. Each call to [`ControllerRoutes::route`]
//! erases its handler's controller type and item type behind a single
//! uniform [`BoxInvoker`] signature, so the registered [`Route`] list can
//! be handed to the existing endpoint trie without any per-request
//! reflection or downcasting: the controller factory call is baked
//! inside the closure, not resolved later from a type-erased instance.

use std::sync::Arc;

use futures_util::stream::{BoxStream, Stream, StreamExt};
use serde::Serialize;

use crate::error::Error;

use super::param::ScalarMap;
use super::slot::InboundSlots;

/// A type-erased per-invocation entry point: takes the bound scalar
/// parameters and inbound slots for one call, and returns the
/// already-JSON-encoded outbound sequence.
///
/// `Ok(payload)` is one outbound value frame; `Err` is a terminal error
/// frame; the stream ending is a normal completion.
pub(crate) type BoxInvoker =
    Arc<dyn Fn(ScalarMap, InboundSlots) -> BoxStream<'static, Result<String, Error>> + Send + Sync>;

/// One registered dispatch endpoint.
pub(crate) struct Route {
    pub(crate) path: String,
    pub(crate) inbound_names: &'static [&'static str],
    pub(crate) has_body: bool,
    /// Plain (non-protocol) HTTP GET: the response carries at most one
    /// value, taken from the first item the stream produces.
    pub(crate) plain_http: bool,
    pub(crate) invoke: BoxInvoker,
}

/// Builds the set of dispatch routes for one controller type.
///
/// `C` need not be `Clone`: the controller is constructed fresh, from
/// `factory`, once per invocation, not shared across calls.
pub struct ControllerRoutes<C> {
    prefix: String,
    factory: Arc<dyn Fn() -> C + Send + Sync>,
    routes: Vec<Route>,
}

impl<C: Send + Sync + 'static> ControllerRoutes<C> {
    /// Starts a builder for controller `C`, mounted under `prefix`.
    pub fn new(prefix: impl Into<String>, factory: impl Fn() -> C + Send + Sync + 'static) -> Self {
        Self { prefix: prefix.into(), factory: Arc::new(factory), routes: Vec::new() }
    }

    /// Registers a streaming dispatch route, reachable over both a
    /// WebSocket bidirectional stream and a chunked HTTP stream.
    ///
    /// `inbound_names` lists the names of peer-pushed stream parameters
    /// the handler expects to find in its [`InboundSlots`]; an empty
    /// slice means the method takes none. `has_body` marks a route that
    /// reads the `$body` scalar-map entry (HTTP only — a body and
    /// inbound stream parameters are mutually exclusive by construction,
    /// since a route is reached over one transport or the other, never
    /// both at once).
    pub fn route<F, S, V>(
        mut self,
        suffix: &str,
        inbound_names: &'static [&'static str],
        has_body: bool,
        handler: F,
    ) -> Self
    where
        F: Fn(C, ScalarMap, InboundSlots) -> S + Send + Sync + 'static,
        S: Stream<Item = Result<V, Error>> + Send + 'static,
        V: Serialize,
    {
        self.push_route(suffix, inbound_names, has_body, false, handler);
        self
    }

    /// Registers a dispatch route exposed only as plain HTTP: the
    /// response carries at most one value (the stream's first item),
    /// never a chunked multi-value sequence.
    pub fn plain_http_route<F, S, V>(
        mut self,
        suffix: &str,
        inbound_names: &'static [&'static str],
        has_body: bool,
        handler: F,
    ) -> Self
    where
        F: Fn(C, ScalarMap, InboundSlots) -> S + Send + Sync + 'static,
        S: Stream<Item = Result<V, Error>> + Send + 'static,
        V: Serialize,
    {
        self.push_route(suffix, inbound_names, has_body, true, handler);
        self
    }

    fn push_route<F, S, V>(
        &mut self,
        suffix: &str,
        inbound_names: &'static [&'static str],
        has_body: bool,
        plain_http: bool,
        handler: F,
    ) where
        F: Fn(C, ScalarMap, InboundSlots) -> S + Send + Sync + 'static,
        S: Stream<Item = Result<V, Error>> + Send + 'static,
        V: Serialize,
    {
        let factory = self.factory.clone();
        let path = join_path(&self.prefix, suffix);
        let invoke: BoxInvoker = Arc::new(move |scalars, slots| {
            let controller = (factory)();
            handler(controller, scalars, slots)
                .map(|item| item.and_then(|value| serde_json::to_string(&value).map_err(Error::from)))
                .boxed()
        });
        self.routes.push(Route { path, inbound_names, has_body, plain_http, invoke });
    }

    /// Consumes the builder, handing its routes to the registrar.
    pub(crate) fn into_routes(self) -> Vec<Route> {
        self.routes
    }
}

fn join_path(prefix: &str, suffix: &str) -> String {
    let segments: Vec<&str> = [prefix, suffix]
        .into_iter()
        .map(|part| part.trim_matches('/'))
        .filter(|part| !part.is_empty())
        .collect();
    format!("/{}", segments.join("/"))
}
