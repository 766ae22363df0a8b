//! Base HTTP tools

// Re-exporting HTTP status codes, headers, method and etc. from hyper/http
pub use hyper::{
    http::{Method, Uri, Version},
    StatusCode,
};

pub(crate) use hyper::{
    http::{request::Parts, Extensions},
    Request, Response
};

pub use body::{BoxBody, HttpBody, UnsyncBoxBody};
pub use endpoints::{
    args::{FromRawRequest, FromRequest, FromRequestParts, FromRequestRef, sse},
    handlers::{GenericHandler, MapErrHandler}
};
pub use request::{HttpRequest, HttpRequestMut};

pub use response::{
    into_response::IntoResponse,
    HttpResponse,
    HttpResult,
};

pub use response::filter_result::FilterResult;

pub mod body;
pub mod request;
pub mod response;
pub mod endpoints;
