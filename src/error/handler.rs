//! Global error handler

use std::{
    borrow::Borrow,
    marker::PhantomData,
    sync::{Arc, Weak}
};
use futures_util::future::BoxFuture;

use crate::{
    http::{Parts, IntoResponse, MapErrHandler, FromRequestParts},
    HttpResult,
    status
};

use super::Error;

/// Describes a type that is able to handle an [`Error`] propagated out of
/// the request pipeline and turn it into an [`HttpResult`]
pub trait ErrorHandler {
    fn call(&self, parts: &Parts, err: Error) -> BoxFuture<HttpResult>;
}

/// Wraps a closure/function that implements [`MapErrHandler`], together with
/// the extra parameters it extracts from the request parts
pub struct ErrorFunc<F, Args = ()>(pub(crate) F, PhantomData<Args>);

impl<F, Args, R> ErrorFunc<F, Args>
where
    F: MapErrHandler<Args, Output = R>,
    Args: FromRequestParts + Send + Sync + 'static,
    R: IntoResponse,
{
    /// Creates a new [`ErrorFunc`]
    #[inline]
    pub(crate) fn new(func: F) -> Self {
        Self(func, PhantomData)
    }
}

impl<F, Args, R> ErrorHandler for ErrorFunc<F, Args>
where
    F: MapErrHandler<Args, Output = R>,
    Args: FromRequestParts + Send + Sync + 'static,
    R: IntoResponse,
{
    #[inline]
    fn call(&self, parts: &Parts, err: Error) -> BoxFuture<HttpResult> {
        let func = self.0.clone();
        let parts = parts.clone();
        Box::pin(async move {
            match Args::from_parts(&parts) {
                Ok(args) => match func.call(err, args).await.into_response() {
                    Ok(resp) => Ok(resp),
                    Err(err) => default_error_handler(err).await,
                },
                Err(err) => default_error_handler(err).await,
            }
        })
    }
}

impl<F, Args, R> From<ErrorFunc<F, Args>> for PipelineErrorHandler
where
    F: MapErrHandler<Args, Output = R>,
    Args: FromRequestParts + Send + Sync + 'static,
    R: IntoResponse,
{
    #[inline]
    fn from(func: ErrorFunc<F, Args>) -> Self {
        Arc::new(func)
    }
}

/// Holds a strong reference to the pipeline's global error handler
pub(crate) type PipelineErrorHandler = Arc<
    dyn ErrorHandler
    + Send
    + Sync
>;

/// A weak handle to a [`PipelineErrorHandler`], carried in request extensions
/// so middleware can reach it without extending its lifetime
pub(crate) type WeakErrorHandler = Weak<
    dyn ErrorHandler
    + Send
    + Sync
>;

/// Default global error handler, turns an [`Error`] into a response
/// carrying its status code and debug representation
#[inline]
pub(crate) async fn default_error_handler(err: Error) -> HttpResult {
    status!(err.status.as_u16(), "{:?}", err)
}

/// Calls the global error handler behind a [`WeakErrorHandler`].
///
/// Accepts either an owned [`Parts`] or a borrowed one, since call sites
/// differ in whether they still need the request head afterward.
#[inline]
pub(crate) async fn call_weak_err_handler<P: Borrow<Parts>>(
    error_handler: WeakErrorHandler,
    parts: P,
    mut err: Error
) -> HttpResult {
    let parts = parts.borrow();
    if err.instance.is_none() {
        err.instance = Some(parts.uri.to_string());
    }

    error_handler
        .upgrade()
        .ok_or_else(|| Error::server_error("Server Error: error handler could not be upgraded"))?
        .call(parts, err)
        .await
}

#[cfg(test)]
mod tests {
    use crate::status;
    use super::*;

    fn parts() -> Parts {
        hyper::Request::get("/")
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    #[tokio::test]
    async fn it_creates_new_error_func() {
        let func: ErrorFunc<_, ()> = ErrorFunc::new(|_err| async { status!(418) });
        let result = func.call(&parts(), Error::server_error("boom")).await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().status(), 418);
    }

    #[tokio::test]
    async fn default_error_handler_preserves_status() {
        let result = default_error_handler(Error::client_error("bad")).await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().status(), 400);
    }

    #[tokio::test]
    async fn it_calls_weak_err_handler_with_owned_and_borrowed_parts() {
        let handler: PipelineErrorHandler = ErrorFunc::new(|_err| async { status!(418) }).into();
        let weak = Arc::downgrade(&handler);

        let owned = parts();
        let result = call_weak_err_handler(weak.clone(), owned, Error::server_error("boom")).await;
        assert!(result.is_ok());

        let borrowed = parts();
        let result = call_weak_err_handler(weak, &borrowed, Error::server_error("boom")).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn it_fails_when_handler_dropped() {
        let weak = {
            let handler: PipelineErrorHandler = ErrorFunc::new(|_err| async { status!(418) }).into();
            Arc::downgrade(&handler)
        };

        let result = call_weak_err_handler(weak, parts(), Error::server_error("boom")).await;
        assert!(result.is_err());
    }
}
