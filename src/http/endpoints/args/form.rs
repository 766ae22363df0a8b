//! Extractors for Form Data

use crate::{error::Error, HttpBody};
use crate::http::endpoints::args::{FromPayload, Payload, Source};
use futures_util::ready;
use http_body_util::{combinators::Collect, BodyExt};
use pin_project_lite::pin_project;
use serde::de::DeserializeOwned;
use serde::Serialize;
use mime::APPLICATION_WWW_FORM_URLENCODED;
use std::{
    future::Future,
    fmt::{self, Display, Formatter},
    marker::PhantomData,
    ops::{Deref, DerefMut},
    pin::Pin,
    task::{Context, Poll}
};

/// Wraps typed data extracted from [`Uri`]
///
/// # Example
/// ```no_run
/// use streamdisp::{HttpResult, Form, ok};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Params {
///     name: String,
/// }
///
/// async fn handle(params: Form<Params>) -> HttpResult {
///     ok!("Hello {}", params.name)
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Form<T>(pub T);

impl<T> Form<T> {
    /// Unwraps the inner `T`
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: Serialize> From<T> for Form<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> Deref for Form<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Form<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T: Display> Display for Form<T> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

pin_project! {
    /// A future that collects an incoming body stream into bytes and deserializes it into a Form Data object.
    pub struct ExtractFormPayloadFut<T> {
        #[pin]
        fut: Collect<HttpBody>,
        _marker: PhantomData<T>
    }
}

impl<T: DeserializeOwned + Send> Future for ExtractFormPayloadFut<T> {
    type Output = Result<Form<T>, Error>;

    #[inline]
    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let result = ready!(this.fut.poll(cx))
            .map_err(FormError::collect_error)?;
        let body = result.to_bytes();
        let form = serde_urlencoded::from_bytes(&body)
            .map(Form::<T>)
            .map_err(FormError::from_serde_error);
        Poll::Ready(form)
    }
}

/// Extracts body into `Form<T>`
/// where T is deserializable `struct`
impl<T: DeserializeOwned + Send> FromPayload for Form<T> {
    type Future = ExtractFormPayloadFut<T>;

    const SOURCE: Source = Source::Body;
    
    #[inline]
    fn from_payload(payload: Payload<'_>) -> Self::Future {
        let Payload::Body(body) = payload else { unreachable!() };
        ExtractFormPayloadFut { fut: body.collect(), _marker: PhantomData }
    }
}

/// Describes errors of form data extractor
struct FormError;
impl FormError {
    #[inline]
    fn from_serde_error(err: serde::de::value::Error) -> Error {
        Error::client_error(format!("Form Data parsing error: {err}"))
    }

    #[inline]
    fn collect_error(err: Error) -> Error {
        Error::client_error(format!("Form Data parsing error: {err}"))
    }
}
