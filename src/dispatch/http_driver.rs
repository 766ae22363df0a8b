//! Chunked HTTP stream driver.
//!
//! A single HTTP request has no peer-pushed inbound streams, so the
//! invocation runs with an empty [`InboundSlots`]. The response shape
//! depends on what the controller method's sequence does first: nothing
//! at all becomes `204 No Content`, an immediate error becomes a plain
//! error response, and anything else becomes a `200 OK` whose body
//! streams the wire-framed values as they are produced — newline
//! delimited, since chunked transfer encoding carries no message
//! boundaries of its own the way a WebSocket text frame does.

use std::sync::Arc;

use futures_util::stream::StreamExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::Error;
use crate::headers::CONTENT_TYPE;
use crate::http::HttpResult;
use crate::{no_content, response, HttpBody};

use super::param::ScalarMap;
use super::registry::Route;
use super::scheduler::WriteScheduler;
use super::slot::InboundSlots;
use super::wire;

const NDJSON: &str = "application/x-ndjson";

/// Runs one dispatch route over a single HTTP request and builds its
/// response.
pub(crate) async fn drive(route: Arc<Route>, scalars: ScalarMap, cancel: CancellationToken) -> HttpResult {
    let inbound = InboundSlots::new();
    let mut outbound = (route.invoke)(scalars, inbound);

    let first = tokio::select! {
        biased;
        () = cancel.cancelled() => return Err(Error::client_error("request cancelled")),
        item = outbound.next() => item,
    };

    let first = match first {
        None => return no_content!(),
        Some(Err(err)) => return Err(err),
        Some(Ok(payload)) => payload,
    };

    if route.plain_http {
        return response!(
            crate::http::StatusCode::OK,
            HttpBody::text(first),
            [(CONTENT_TYPE, "application/json")]
        );
    }

    let (body_tx, mut body_rx) = mpsc::unbounded_channel::<Result<String, Error>>();
    let (scheduler, runner) = WriteScheduler::new();
    tokio::spawn(runner.run(cancel.clone()));

    {
        let tx = body_tx.clone();
        scheduler.schedule(async move {
            let _ = tx.send(Ok(format!("{}\n", wire::value_frame(&first))));
        });
    }

    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    scheduler.complete();
                    break;
                }
                item = outbound.next() => match item {
                    None => {
                        let tx = body_tx.clone();
                        scheduler.schedule(async move {
                            let _ = tx.send(Ok(format!("{}\n", wire::COMPLETE_FRAME)));
                        });
                        scheduler.complete();
                        break;
                    }
                    Some(Ok(payload)) => {
                        let tx = body_tx.clone();
                        scheduler.schedule(async move {
                            let _ = tx.send(Ok(format!("{}\n", wire::value_frame(&payload))));
                        });
                    }
                    Some(Err(err)) => {
                        let tx = body_tx.clone();
                        scheduler.schedule(async move {
                            let _ = tx.send(Ok(format!("{}\n", wire::error_frame(&err.to_string()))));
                        });
                        scheduler.complete();
                        break;
                    }
                }
            }
        }
    });

    let body = futures_util::stream::poll_fn(move |cx| body_rx.poll_recv(cx));

    response!(
        crate::http::StatusCode::OK,
        HttpBody::stream(body),
        [(CONTENT_TYPE, NDJSON)]
    )
}
