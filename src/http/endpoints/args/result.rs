//! Extractor for Result<T, E>

use pin_project_lite::pin_project;
use std::{
    task::{Context, Poll},
    future::Future,
    pin::Pin
};
use crate::{
    http::endpoints::args::{FromPayload, Payload, Source},
    error::Error
};

pin_project! {
    /// Future for `Option<T>` extractor.
    pub struct ResultFromPayloadFuture<F> {
        #[pin]
        inner: F,
    }
}

impl<F, T> Future for ResultFromPayloadFuture<F>
where
    F: Future<Output = Result<T, Error>>,
{
    type Output = Result<Result<T, Error>, Error>;

    #[inline]
    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        match this.inner.poll(cx) {
            Poll::Ready(Ok(value)) => Poll::Ready(Ok(Ok(value))),
            Poll::Ready(Err(err)) => Poll::Ready(Ok(Err(err))),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<T: FromPayload> FromPayload for Result<T, Error> {
    type Future = ResultFromPayloadFuture<T::Future>;

    #[inline]
    fn from_payload(payload: Payload) -> Self::Future {
        ResultFromPayloadFuture {
            inner: T::from_payload(payload),
        }
    }

    #[inline]
    fn source() -> Source {
        T::source()
    }
}
