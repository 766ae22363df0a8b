//! Utilities for managing HTTP request scope

use crate::http::endpoints::{
    route::RoutePipeline,
    args::FromRequestRef
};
use crate::http::Parts;
use crate::error::handler::WeakErrorHandler;
use crate::{
    HttpRequest, HttpRequestMut, HttpResult,
    error::Error,
    status
};

/// Describes current HTTP context which consists of the current HTTP request data
/// and the reference to the method handler for this request
pub struct HttpContext {
    /// Current HTTP request
    request: HttpRequestMut,

    /// Current route middleware pipeline or handler that mapped to handle the HTTP request
    pipeline: Option<RoutePipeline>,
}

impl std::fmt::Debug for HttpContext {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("HttpContext(..)")
    }
}

impl HttpContext {
    /// Creates a new [`HttpContext`]
    #[inline]
    pub(crate) fn new(
        request: HttpRequest,
        pipeline: Option<RoutePipeline>,
    ) -> Self {
        Self {
            request: HttpRequestMut::new(request),
            pipeline,
        }
    }

    /// Splits [`HttpContext`] into request parts and pipeline
    #[inline]
    #[allow(dead_code)]
    pub(crate) fn into_parts(self) -> (HttpRequestMut, Option<RoutePipeline>) {
        (self.request, self.pipeline)
    }

    /// Creates a new [`HttpContext`] from request parts and pipeline
    #[inline]
    pub(crate) fn from_parts(request: HttpRequestMut, pipeline: Option<RoutePipeline>) -> Self {
        Self { request, pipeline }
    }

    /// Extracts a payload from request parts
    ///
    /// # Example
    /// ```no_run
    /// use streamdisp::{middleware::HttpContext, Query};
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Params {
    ///     id: u32,
    ///     key: String
    /// }
    ///
    /// # fn docs(ctx: HttpContext) -> std::io::Result<()> {
    /// let params: Query<Params> = ctx.extract()?;
    /// # Ok(())
    /// # }
    /// ```
    #[inline]
    pub fn extract<T: FromRequestRef>(&self) -> Result<T, Error> {
        self.request.extract()
    }

    /// Returns a read-only view of the request.
    ///
    /// This is the preferred way to inspect request data
    /// from middleware and extractors.
    #[inline]
    pub fn request(&self) -> &HttpRequest {
        self.request.as_read_only()
    }

    /// Returns a mutable request handle.
    ///
    /// Allows controlled mutation of request metadata.
    ///
    /// This method is intentionally explicit.
    #[inline]
    pub fn request_mut(&mut self) -> &mut HttpRequestMut {
        &mut self.request
    }

    /// Clones the current request head into a standalone [`Parts`] value.
    ///
    /// Used by middleware that needs to keep a copy of the request head around
    /// past the point where the request itself is consumed by `next(ctx)`.
    #[inline]
    pub(crate) fn request_parts_snapshot(&self) -> Parts {
        self.request.as_read_only().parts_snapshot()
    }

    /// Returns a weak handle to the pipeline's global error handler.
    #[inline]
    pub(crate) fn error_handler(&self) -> WeakErrorHandler {
        self.request.as_read_only()
            .extensions()
            .get::<WeakErrorHandler>()
            .cloned()
            .unwrap_or_else(std::sync::Weak::new)
    }

    /// Executes the request handler for the current HTTP request
    #[inline]
    pub(crate) async fn execute(self) -> HttpResult {
        let (request, pipeline) = self.into_parts();
        if let Some(pipeline) = pipeline {
            pipeline.call(Self { request, pipeline: None }).await
        } else {
            status!(405)
        }
    }
}

#[cfg(test)]
mod tests {
    use hyper::Request;
    use crate::HttpBody;
    use super::*;

    fn create_ctx() -> HttpContext {
        let (parts, body) = Request::get("/")
            .body(HttpBody::empty())
            .unwrap()
            .into_parts();

        HttpContext::new(
            HttpRequest::from_parts(parts, body),
            None,
        )
    }

    #[test]
    fn it_debugs() {
        let ctx = create_ctx();
        assert_eq!(format!("{ctx:?}"), "HttpContext(..)");
    }

    #[test]
    fn it_splits_into_parts() {
        let ctx = create_ctx();

        let (parts, _) = ctx.into_parts();

        assert_eq!(parts.uri(), "/")
    }
}
