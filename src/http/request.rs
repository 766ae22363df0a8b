//! HTTP request utilities

use http_body_util::BodyDataStream;
use hyper::{
    body::Incoming,
};

use crate::{
    error::Error,
    headers::{FromHeaders, Header, HeaderName},
    HttpBody,
    UnsyncBoxBody,
    BoxBody
};

use crate::http::{
    endpoints::{args::FromRequestRef, route::PathArgs}, 
    request::request_body_limit::RequestBodyLimit,
    Request,
    Parts,
    Extensions,
    Method,
    Uri,
    Version
};

use crate::headers::HeaderMap;

pub mod request_body_limit;
pub mod request_mut;

pub use request_mut::HttpRequestMut;

/// Wraps the incoming [`Request`] to enrich its functionality
pub struct HttpRequest {
    /// Inner [`Request`]
    inner: Request<HttpBody>
}

impl std::fmt::Debug for HttpRequest {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("HttpRequest(..)")
    }
}

impl HttpRequest {
    /// Creates a new [`HttpRequest`]
    pub(crate) fn new(request: Request<Incoming>) -> Self {
        Self { inner: request.map(HttpBody::incoming) }
    }

    /// Returns a reference to the associated URI.
    /// 
    /// # Example
    /// ```no_run
    /// use streamdisp::{App, HttpRequest};
    /// 
    /// let mut app = App::new();
    /// 
    /// app.map_get("/", |req: HttpRequest| async move {
    ///     assert_eq!(req.uri(), "/");
    /// });
    /// ```
    #[inline]
    pub fn uri(&self) -> &Uri {
        self.inner.uri()
    }
    
    /// Returns a reference to the associated HTTP header map.
    ///
    /// # Example
    /// ```no_run
    /// use streamdisp::{App, HttpRequest};
    ///
    /// let mut app = App::new();
    ///
    /// app.map_get("/", |req: HttpRequest| async move {
    ///     assert!(req.headers().is_empty());
    /// });
    /// ```
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// Returns a mutable reference to the associated extensions.
    #[inline]
    #[allow(unused)]
    pub(crate) fn headers_mut(&mut self) -> &mut HeaderMap {
        self.inner.headers_mut()
    }
    
    /// Returns a reference to the associated HTTP method.
    /// 
    /// # Example
    /// ```no_run
    /// use streamdisp::{App, HttpRequest, http::Method};
    ///
    /// let mut app = App::new();
    ///
    /// app.map_get("/", |req: HttpRequest| async move {
    ///     assert_eq!(*req.method(), Method::GET);
    /// });
    /// ```
    #[inline]
    pub fn method(&self) -> &Method {
        self.inner.method()
    }

    /// Represents a version of the HTTP spec.
    #[inline]
    pub fn version(&self) -> Version {
        self.inner.version()
    }
    
    /// Returns a reference to the associated extensions.
    #[inline]
    pub(crate) fn extensions(&self) -> &Extensions {
        self.inner.extensions()
    }

    /// Returns a mutable reference to the associated extensions.
    #[inline]
    #[cfg(feature = "tracing")]
    pub(crate) fn extensions_mut(&mut self) -> &mut Extensions {
        self.inner.extensions_mut()
    }

    /// Returns this [`HttpRequest`] body limit.
    pub fn body_limit(&self) -> Option<usize> {
        self.inner.extensions()
            .get::<RequestBodyLimit>()
            .and_then(|l| match l {
                RequestBodyLimit::Enabled(size) => Some(*size),
                RequestBodyLimit::Disabled => None,
            })
    }

    #[inline]
    pub(crate) fn into_limited(self, body_limit: RequestBodyLimit) -> Self {
        match body_limit {
            RequestBodyLimit::Disabled => self,
            RequestBodyLimit::Enabled(limit) => {
                let (parts, body) = self.into_parts();
                let body = HttpBody::limited(body, limit);
                Self::from_parts(parts, body)
            }
        }
    }

    /// Consumes the request and returns just the body
    #[inline]
    pub fn into_body(self) -> HttpBody {
        self.inner.into_body()
    }

    /// Consumes the request and returns the body as a boxed trait object
    #[inline]
    pub fn into_boxed_body(self) -> BoxBody {
        self.inner
            .into_body()
            .into_boxed()
    }

    /// Consumes the request body into [`BodyDataStream`]
    #[inline]
    pub fn into_body_stream(self) -> BodyDataStream<HttpBody> {
        self.inner
            .into_body()
            .into_data_stream()
    }

    /// Consumes the request and returns the body as a boxed trait object that is !Sync
    #[inline]
    pub fn into_boxed_unsync_body(self) -> UnsyncBoxBody {
        self.inner
            .into_body()
            .into_boxed_unsync()
    }
    
    /// Consumes the request and returns request head and body
    pub(crate) fn into_parts(self) -> (Parts, HttpBody) {
        self.inner.into_parts()
    }

    /// Creates a new `HttpRequest` with the given head and body
    pub(crate) fn from_parts(parts: Parts, body: HttpBody) -> Self {
        let request = Request::from_parts(parts, body);
        Self { inner: request }
    }

    /// Creates a new `HttpRequest` with the given head and empty body
    pub(crate) fn slim(parts: &Parts) -> Self {
        let request = Request::from_parts(parts.clone(), HttpBody::empty());
        Self { inner: request }
    }

    /// Clones the current request head into a standalone [`Parts`] value,
    /// without touching the body.
    pub(crate) fn parts_snapshot(&self) -> Parts {
        let mut builder = Request::builder()
            .method(self.inner.method().clone())
            .uri(self.inner.uri().clone())
            .version(self.inner.version());

        if let Some(headers) = builder.headers_mut() {
            *headers = self.inner.headers().clone();
        }
        if let Some(extensions) = builder.extensions_mut() {
            *extensions = self.inner.extensions().clone();
        }

        builder
            .body(())
            .expect("request head snapshot: builder state is always valid")
            .into_parts()
            .0
    }

    /// Extracts a payload from request parts
    ///
    /// # Example
    /// ```no_run
    /// use streamdisp::{HttpRequest, Query};
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Params {
    ///     key: u32,
    ///     value: String
    /// }
    ///
    /// # fn docs(req: HttpRequest) -> std::io::Result<()> {
    /// // https://www.example.com?key=1&value=test
    /// let params: Query<Params> = req.extract()?;
    /// 
    /// assert_eq!(params.key, 1u32);
    /// assert_eq!(params.value, "test");
    /// # Ok(())
    /// # }
    /// ```
    #[inline]
    pub fn extract<T: FromRequestRef>(&self) -> Result<T, Error> {
        T::from_request(self)
    }

    /// Returns iterator of URL path params
    ///
    /// # Example
    /// ```no_run
    /// use streamdisp::HttpRequest;
    ///
    /// # fn docs(req: HttpRequest) -> std::io::Result<()> {
    /// // https://www.example.com/{key}/{value}
    /// // https://www.example.com/1/test
    /// let mut args = req.path_args();
    /// 
    /// assert_eq!(args.next().unwrap(), ("key", "1"));
    /// assert_eq!(args.next().unwrap(), ("value", "test"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn path_args(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.extensions()
            .get::<PathArgs>()
            .map(|args| args
                .iter()
                .map(|arg| (arg.name.as_ref(), arg.value.as_ref())))
            .into_iter()
            .flatten()
    }

    /// Returns iterator of URL query params
    ///
    /// # Example
    /// ```no_run
    /// use streamdisp::HttpRequest;
    ///
    /// # fn docs(req: HttpRequest) -> std::io::Result<()> {
    /// // https://www.example.com?key=1&value=test
    /// let mut args = req.query_args();
    /// 
    /// assert_eq!(args.next().unwrap(), ("key", "1"));
    /// assert_eq!(args.next().unwrap(), ("value", "test"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn query_args(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.uri()
            .query()
            .map(|query| query.split('&')
                .map(|arg| {
                    let mut parts = arg.split('=');
                    let key = parts.next().unwrap();
                    let value = parts.next().unwrap();
                    (key, value)
                }))
            .into_iter()
            .flatten()
    }

    /// Returns a typed HTTP header value
    #[inline]
    pub fn get_header<T: FromHeaders>(&self) -> Option<Header<T>> {
        T::from_headers(self.headers()).map(Header::new)
    }

    /// Returns a view of all values associated with this HTTP header.
    #[inline]
    pub fn get_all_headers<T: FromHeaders>(&self) -> impl Iterator<Item = Header<T>> {
        self.headers()
            .get_all(T::NAME)
            .into_iter()
            .map(Header::new)
    }

    /// Attempts to insert the header into the request, replacing any existing
    /// values with the same header name.
    ///
    /// Returns an error if the header cannot be constructed.
    #[inline]
    pub fn try_insert_header<T>(
        &mut self, 
        header: impl TryInto<Header<T>, Error = Error>
    ) -> Result<Header<T>, Error>
    where
        T: FromHeaders,
    {
        let header = header.try_into()?;
        Ok(self.insert_header(header))
    }

    /// Inserts the header into the request, replacing any existing values
    /// with the same header name.
    ///
    /// This method always overwrites previous values.
    #[inline]
    pub fn insert_header<T>(&mut self, header: Header<T>) -> Header<T>
    where
        T: FromHeaders,
    {
        self.inner.headers_mut().insert(
            header.name(),
            header.value().clone()
        );
        header
    }

    /// Appends a new value for the given header name.
    ///
    /// Existing values with the same name are preserved.
    /// Multiple values for the same header may be present.
    #[inline]
    pub fn append_header<T>(&mut self, header: Header<T>) -> Result<Header<T>, Error>
    where
        T: FromHeaders,
    {
        self.inner.headers_mut().append(
            header.name(),
            header.value().clone()
        );
        Ok(header)
    }

    /// Attempts to append a new value for the given header name.
    ///
    /// Returns an error if the header cannot be constructed or appended.
    #[inline]
    pub fn try_append_header<T>(
        &mut self, 
        header: impl TryInto<Header<T>, Error = Error>
    ) -> Result<Header<T>, Error>
    where
        T: FromHeaders,
    {
        let header = header.try_into()?;
        self.append_header(header)
    }

    /// Removes all values for the given header name.
    ///
    /// Returns `true` if at least one header value was removed.
    #[inline]
    pub fn remove_header<T>(&mut self) -> bool
    where
        T: FromHeaders,
    {
        self.inner
            .headers_mut()
            .remove(&T::NAME)
            .is_some()
    }

    /// Attempts to remove all values for the given header name.
    ///
    /// Returns `true` if at least one value was removed.
    #[inline]
    pub fn try_remove_header(&mut self, name: &str) -> Result<bool, Error> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(Error::from)?;

        Ok(self.inner.headers_mut().remove(name).is_some())
    }
}
