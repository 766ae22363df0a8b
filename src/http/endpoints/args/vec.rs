//! Extractor for [Vec<T>] that is basically [`Json<Vec<T>>`] and deserialized from JSON array

use serde::de::DeserializeOwned;
use pin_project_lite::pin_project;
use std::{
    task::{Context, Poll},
    marker::PhantomData,
    future::Future,
    pin::Pin
};

use crate::{
    http::endpoints::args::{FromPayload, Payload, Source},
    Json,
    error::Error
};

pin_project! {
    /// Future for `Vec<T>` extractor.
    pub struct ExtractVecFromPayloadFut<T, F> {
        #[pin]
        inner: F,
        _marker: PhantomData<T>
    }
}

impl<F, T> Future for ExtractVecFromPayloadFut<T, F>
where
    F: Future<Output = Result<Json<Vec<T>>, Error>>,
{
    type Output = Result<Vec<T>, Error>;

    #[inline]
    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        match this.inner.poll(cx) {
            Poll::Ready(Ok(json)) => Poll::Ready(Ok(json.into_inner())),
            Poll::Ready(Err(err)) => Poll::Ready(Err(err)),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<T> FromPayload for Vec<T>
where
    T: DeserializeOwned + Send
{
    type Future = ExtractVecFromPayloadFut<T, <Json<Vec<T>> as FromPayload>::Future>;

    #[inline]
    fn from_payload(payload: Payload<'_>) -> Self::Future {
        ExtractVecFromPayloadFut {
            inner: Json::<Vec<T>>::from_payload(payload),
            _marker: PhantomData
        }
    }

    #[inline]
    fn source() -> Source {
        Source::Body
    }
}
