//! [`From ] trait implementations from various types into HTTP response

use super::{HttpResponse, HttpResult, HttpBody};
use crate::{Json, Form, ok, status, form, response};
use crate::error::Error;
use crate::http::StatusCode;
use crate::headers::{HeaderMap, CONTENT_TYPE};
use mime::TEXT_PLAIN_UTF_8;
use serde::Serialize;

use std::{
    io::Error as IoError,
    convert::Infallible,
    borrow::Cow
};

/// Trait for types that can be returned from request handlers
pub trait IntoResponse {
    /// Converts object into response
    fn into_response(self) -> HttpResult;
}

impl IntoResponse for HttpResponse {
    #[inline]
    fn into_response(self) -> HttpResult {
        Ok(self)
    }
}

impl IntoResponse for () {
    #[inline]
    fn into_response(self) -> HttpResult {
        ok!()
    }
}

impl IntoResponse for IoError {
    #[inline]
    fn into_response(self) -> HttpResult {
        Err(self.into())
    }
}

impl IntoResponse for Error {
    #[inline]
    fn into_response(self) -> HttpResult {
        Err(self)
    }
}

impl IntoResponse for Infallible {
    #[inline]
    fn into_response(self) -> HttpResult {
        match self {}
    }
}

impl<T, E> IntoResponse for Result<T, E>
where
    T: IntoResponse,
    E: IntoResponse
{
    #[inline]
    fn into_response(self) -> HttpResult {
        match self { 
            Ok(ok) => ok.into_response(),
            Err(err) => err.into_response(),
        }
    }
}

impl IntoResponse for &'static str {
    #[inline]
    fn into_response(self) -> HttpResult {
        Cow::Borrowed(self).into_response()
    }
}

impl IntoResponse for Cow<'static, str> {
    #[inline]
    fn into_response(self) -> HttpResult {
        response!(
            StatusCode::OK,
            HttpBody::from(self),
            [(CONTENT_TYPE, TEXT_PLAIN_UTF_8.as_ref())]
        )
    }
}

impl IntoResponse for String {
    #[inline]
    fn into_response(self) -> HttpResult {
        Cow::<'static, str>::Owned(self).into_response()
    }
}

impl IntoResponse for Box<str> {
    #[inline]
    fn into_response(self) -> HttpResult {
        String::from(self).into_response()
    }
}

impl<T: IntoResponse> IntoResponse for Option<T> {
    #[inline]
    fn into_response(self) -> HttpResult {
        match self { 
            Some(ok) => ok.into_response(),
            None => status!(404)
        }
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    #[inline]
    fn into_response(self) -> HttpResult {
        ok!(self.into_inner())
    }
}

impl<T: Serialize> IntoResponse for Form<T> {
    #[inline]
    fn into_response(self) -> HttpResult {
        form!(self.into_inner())
    }
}

impl IntoResponse for StatusCode {
    #[inline]
    fn into_response(self) -> HttpResult {
        response!(
            self,
            HttpBody::empty()
        )
    }
}

impl<R> IntoResponse for (R, HeaderMap)
where 
    R: IntoResponse
{
    #[inline]
    fn into_response(self) -> HttpResult {
        let (resp, headers) = self;
        match resp.into_response() {
            Err(err) => Err(err),
            Ok(mut resp) => { 
                resp.headers_mut().extend(headers);
                Ok(resp)
            },
        }
    }
}

macro_rules! impl_into_response {
    { $($type:ident),* $(,)? } => {
        $(impl IntoResponse for $type {
            #[inline]
            fn into_response(self) -> HttpResult {
                response!(
                    $crate::http::StatusCode::OK,
                    HttpBody::full(self.to_string()),
                    [($crate::headers::CONTENT_TYPE, "text/plain; charset=utf-8")]
                )
            }
        })*
    };
}

impl_into_response! {
    bool,
    i8, u8,
    i16, u16,
    i32, u32,
    f32,
    i64, u64,
    f64,
    i128, u128,
    isize, usize
}
