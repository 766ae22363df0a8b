//! Extractor for Option<T>

use pin_project_lite::pin_project;
use std::{
    task::{Context, Poll},
    future::Future,
    pin::Pin
};
use crate::{
    http::endpoints::args::{
        FromPayload,
        FromRequestRef,
        FromRequestParts,
        Payload,
        Source
    },
    http::Parts,
    error::Error, 
    HttpRequest
};

pin_project! {
    /// Future for `Option<T>` extractor.
    pub struct OptionFromPayloadFuture<F> {
        #[pin]
        inner: F,
    }
}

impl<F, T> Future for OptionFromPayloadFuture<F>
where
    F: Future<Output = Result<T, Error>>,
{
    type Output = Result<Option<T>, Error>;

    #[inline]
    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        match this.inner.poll(cx) {
            Poll::Ready(Ok(value)) => Poll::Ready(Ok(Some(value))),
            Poll::Ready(Err(_)) => Poll::Ready(Ok(None)),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<T: FromRequestRef> FromRequestRef for Option<T> {
    #[inline]
    fn from_request(req: &HttpRequest) -> Result<Self, Error> {
        match T::from_request(req) {
            Ok(value) => Ok(Some(value)),
            Err(_) => Ok(None)
        }
    }
}

impl<T: FromRequestParts> FromRequestParts for Option<T> {
    #[inline]
    fn from_parts(parts: &Parts) -> Result<Self, Error> {
        match T::from_parts(parts) {
            Ok(value) => Ok(Some(value)),
            Err(_) => Ok(None)
        }
    }
}

impl<T: FromPayload> FromPayload for Option<T> {
    type Future = OptionFromPayloadFuture<T::Future>;

    const SOURCE: Source = T::SOURCE;
    
    #[inline]
    fn from_payload(payload: Payload<'_>) -> Self::Future {
        OptionFromPayloadFuture {
            inner: T::from_payload(payload),
        }
    }
}
