//! Utilities for middleware functions

use std::{future::Future, sync::Arc};
use crate::{
    http::{
        request::IntoTapResult,
        endpoints::handlers::RouteHandler, 
        FromRequestRef,
        GenericHandler,
        MapErrHandler,
        IntoResponse,
        FilterResult
    },
    HttpResult,
};
use super::{
    handler::{
        MiddlewareHandler,
        MapOkHandler,
        TapReqHandler,
        Next
    },
    MiddlewareFn, 
    HttpContext,
    NextFn, 
};

/// Wraps a [`RouteHandler`] into [`MiddlewareFn`]
pub(crate) fn from_handler(handler: RouteHandler) -> MiddlewareFn {
    Arc::new(move |ctx: HttpContext, _| {
        let handler = handler.clone();
        let (req, _) = ctx.into_parts();
        Box::pin(async move { handler.call(req.freeze()).await })
    })
}

/// Wraps a closure into [`MiddlewareFn`]
#[inline]
pub(super) fn make_fn<F, Fut>(middleware: F) -> MiddlewareFn
where
    F: Fn(HttpContext, NextFn) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HttpResult> + Send + 'static,
{
    Arc::new(move |ctx: HttpContext, next: NextFn| {
        Box::pin(middleware(ctx, next))
    })
}

/// Wraps a closure for the route filter into [`MiddlewareFn`]
#[inline]
pub(super) fn make_filter_fn<F, R, Args>(filter: F) -> MiddlewareFn
where
    F: GenericHandler<Args, Output = R>,
    R: Into<FilterResult> + 'static,
    Args: FromRequestRef + Send + Sync + 'static
{
    let middleware_fn = move |ctx: HttpContext, next: NextFn| {
        let filter = filter.clone();
        async move {
            let args = Args::from_request(ctx.request())?;
            let result = filter
                .call(args)
                .await
                .into();

            match result.into_inner() {
                Ok(_) => next(ctx).await,
                Err(err) => err.into_response()
            }
        }
    };
    make_fn(middleware_fn)
}

/// Wraps a closure for the response mapping into [`MiddlewareFn`]
#[inline]
pub(super) fn make_map_ok_fn<F, R, Args>(map: F) -> MiddlewareFn
where
    F: MapOkHandler<Args, Output = R>,
    R: IntoResponse + 'static,
    Args: FromRequestRef + Send + Sync + 'static,
{
    let middleware_fn = move |ctx: HttpContext, next: NextFn| {
        let map = map.clone();
        async move {
            match Args::from_request(ctx.request()) {
                Err(err) => err.into_response(),
                Ok(args) => {
                    match next(ctx).await {
                        Ok(resp) => map.call(resp, args).await.into_response(),
                        Err(err) => err.into_response()
                    }       
                }
            }
        }
    };
    make_fn(middleware_fn)
}

/// Wraps a closure for the error mapping into [`MiddlewareFn`]
#[inline]
pub(super) fn make_map_err_fn<F, R, Args>(map: F) -> MiddlewareFn
where
    F: MapErrHandler<Args, Output = R>,
    R: IntoResponse + 'static,
    Args: FromRequestRef + Send + Sync + 'static,
{
    let middleware_fn = move |ctx: HttpContext, next: NextFn| {
        let map = map.clone();
        async move {
            match Args::from_request(ctx.request()) { 
                Err(err) => err.into_response(),
                Ok(args) => match next(ctx).await {
                    Err(err) => map.call(err, args).await.into_response(),
                    Ok(resp) => Ok(resp),
                }
            }
        }
    };
    make_fn(middleware_fn)
}

/// Wraps a closure for the request mapping into [`MiddlewareFn`]
#[inline]
pub(super) fn make_tap_req_fn<F, R>(map: F) -> MiddlewareFn
where
    F: TapReqHandler<Output = R>,
    R: IntoTapResult,
{
    let middleware_fn = move |ctx: HttpContext, next: NextFn| {
        let map = map.clone();
        async move {
            let (req, pipeline) = ctx.into_parts();
            let req = map.call(req, ()).await.into_result()?;
            let ctx = HttpContext::from_parts(req, pipeline);
            next(ctx).await
        }
    };
    make_fn(middleware_fn)
}

/// Wraps a closure for the `with()` middleware into [`MiddlewareFn`]
#[inline]
pub(super) fn make_with_fn<F, R, Args>(middleware: F) -> MiddlewareFn
where
    F: MiddlewareHandler<Args, Output = R>,
    R: IntoResponse + 'static,
    Args: FromRequestRef + Send + Sync + 'static,
{
    let middleware_fn = move |ctx: HttpContext, next: NextFn| {
        let middleware = middleware.clone();
        async move {
            match Args::from_request(ctx.request()) { 
                Err(err) => err.into_response(),
                Ok(args) => {
                    let next = Next::new(ctx, next);
                    middleware.call(args, next).await.into_response()
                }
            }
        }
    };
    make_fn(middleware_fn)
}
