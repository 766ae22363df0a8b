//! Macros for SSE (Server Sent Events) responses

/// Produces `OK 200` response with SSE (Server-Sent Events) stream body
#[macro_export]
#[cfg(feature = "http2")]
macro_rules! sse {
    ($body:expr) => {
        $crate::sse!(
            $body;
            []
        )
    };
    ($body:expr; [ $( ($key:expr, $value:expr) ),* $(,)? ]) => {
        $crate::response!(
            $crate::http::StatusCode::OK, 
            $crate::HttpBody::stream_bytes($body);
            [
                ($crate::headers::CONTENT_TYPE, "text/event-stream; charset=utf-8"),
                ($crate::headers::CACHE_CONTROL, "no-cache"),
                ($crate::headers::X_ACCEL_BUFFERING, "no"),
                $( ($key, $value) ),*
            ]
        )
    };
}

/// Produces `OK 200` response with SSE (Server-Sent Events) stream body
#[macro_export]
#[cfg(all(not(feature = "http2"), feature = "http1"))]
macro_rules! sse {
    ($body:expr) => {
        $crate::sse!(
            $body;
            []
        )
    };
    ($body:expr; [ $( ($key:expr, $value:expr) ),* $(,)? ]) => {
        $crate::response!(
            $crate::http::StatusCode::OK, 
            $crate::HttpBody::stream_bytes($body);
            [
                ($crate::headers::CONTENT_TYPE, "text/event-stream; charset=utf-8"),
                ($crate::headers::CACHE_CONTROL, "no-cache"),
                ($crate::headers::CONNECTION, "keep-alive"),
                ($crate::headers::X_ACCEL_BUFFERING, "no"),
                $( ($key, $value) ),*
            ]
        )
    };
}
