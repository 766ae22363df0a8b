//! Macros for `OK 200` HTTP responses.

/// Creates a `200 OK` response.
///
/// The macro provides three “modes”:
///
/// - **Empty response**: `ok!()`
/// - **Plain text (UTF-8)**:
///   - Sugar for string literals: `ok!("...")`, `ok!("...", args...)`
///   - Explicit: `ok!(text: ...)` (works for any value via `ToString`)
/// - **JSON**:
///   - Typed: `ok!(value)` (serializes `value` as JSON)
///   - Untyped object sugar: `ok!({ ... })`
///   - Explicit: `ok!(json: value)`
///
/// # Content-Type rules
///
/// - `ok!()` produces an empty body and does **not** set `Content-Type`.
/// - `ok!("...")` / `ok!("...", args...)` sets:
///   - `Content-Type: text/plain; charset=utf-8`
/// - `ok!(text: ...)` sets:
///   - `Content-Type: text/plain; charset=utf-8`
/// - JSON variants set:
///   - `Content-Type: application/json`
///
/// # Important notes
///
/// - The `ok!("...")` form is **intended for string literals**.
///   In Rust macros, numeric/bool literals can also match this pattern; in such cases
///   prefer the explicit forms:
///   - `ok!(text: true)` / `ok!(text: 150)`
///   - `ok!(json: true)` / `ok!(json: 150)`
///
/// # Examples
///
/// ## Plain text
/// ```no_run
/// use streamdisp::ok;
///
/// ok!("healthy");
/// ok!("Hello, {}!", "world");
/// ```
///
/// ## Plain text with custom headers
/// ```no_run
/// use streamdisp::ok;
///
/// ok!("ok"; [
///     ("x-api-key", "some api key"),
///     ("x-req-id", "some req id"),
/// ]);
///
/// ok!(text: true; [("x-flag", "1")]);
/// ok!(text: 150);
/// ```
///
/// ## Without body
/// ```no_run
/// use streamdisp::ok;
///
/// ok!();
/// ok!([("x-req-id", "some req id")]);
/// ```
///
/// ## JSON (typed)
/// ```no_run
/// use streamdisp::ok;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Health {
///     status: String,
/// }
///
/// let health = Health { status: "healthy".into() };
/// ok!(health);
/// ```
///
/// ## JSON (untyped object sugar)
/// ```no_run
/// use streamdisp::ok;
///
/// ok!({ "health": "healthy" });
/// ```
///
/// ## JSON with custom headers
/// ```no_run
/// use streamdisp::ok;
///
/// ok!({ "health": "healthy" }; [
///     ("x-api-key", "some api key"),
/// ]);
///
/// ok!(json: "ok"); // JSON string: "ok"
/// ok!(json: true);
/// ```
#[macro_export]
macro_rules! ok {
    // =========================
    // 1) Empty / headers-only
    // =========================

    // ok!()
    () => {
        $crate::response!(
            $crate::http::StatusCode::OK,
            $crate::HttpBody::empty()
        )
    };

    // ok!([("k","v"), ...])   -- headers on empty body
    ([ $( ($key:expr, $value:expr) ),* $(,)? ]) => {
        $crate::response!(
            $crate::http::StatusCode::OK,
            $crate::HttpBody::empty();
            [ $( ($key, $value) ),* ]
        )
    };

    // ok!([header, ...])   -- headers on empty body
    ([ $( $header:expr ),* $(,)? ]) => {
        $crate::response!(
            $crate::http::StatusCode::OK,
            $crate::HttpBody::empty();
            [ $( $header ),* ]
        )
    };

    // =========================
    // 2) Explicit TEXT (ToString)
    // =========================

    // ok!(text: expr)
    (text: $body:expr) => {
        $crate::response!(
            $crate::http::StatusCode::OK,
            $body.into();
            [ ($crate::headers::CONTENT_TYPE, "text/plain; charset=utf-8") ]
        )
    };

    // ok!(text: expr; [headers])
    (text: $body:expr ; [ $( ($key:expr, $value:expr) ),* $(,)? ]) => {
        $crate::response!(
            $crate::http::StatusCode::OK,
            $body.into();
            [
                ($crate::headers::CONTENT_TYPE, "text/plain; charset=utf-8"),
                $( ($key, $value) ),*
            ]
        )
    };

    // ok!(text: expr; [headers])
    (text: $body:expr ; [ $( $header:expr ),* $(,)? ]) => {
        $crate::response!(
            $crate::http::StatusCode::OK,
            $body.into();
            [
                $crate::headers::ContentType::from_static("text/plain; charset=utf-8"),
                $( $header ),*
            ]
        )
    };

    // =========================
    // 3) Explicit FMT (format!)
    //    Use expr args to avoid capturing headers.
    // =========================

    // ok!(fmt: "hello {name}")
    (fmt: $fmt:literal) => {
        $crate::response!(
            $crate::http::StatusCode::OK,
            $crate::HttpBody::full(format!($fmt));
            [ ($crate::headers::CONTENT_TYPE, "text/plain; charset=utf-8") ]
        )
    };

    // ok!(fmt: "hello {name}"; [headers])
    (fmt: $fmt:literal ; [ $( ($key:expr, $value:expr) ),* $(,)? ]) => {
        $crate::response!(
            $crate::http::StatusCode::OK,
            $crate::HttpBody::full(format!($fmt));
            [
                ($crate::headers::CONTENT_TYPE, "text/plain; charset=utf-8"),
                $( ($key, $value) ),*
            ]
        )
    };

    // ok!(fmt: "hello {} {}", name, 123)
    (fmt: $fmt:literal, $( $arg:expr ),+ $(,)? ) => {
        $crate::response!(
            $crate::http::StatusCode::OK,
            $crate::HttpBody::full(format!($fmt, $( $arg ),+));
            [ ($crate::headers::CONTENT_TYPE, "text/plain; charset=utf-8") ]
        )
    };

    // ok!(fmt: "hello {}", name; [headers])
    (fmt: $fmt:literal, $( $arg:expr ),+ $(,)? ; [ $( ($key:expr, $value:expr) ),* $(,)? ]) => {
        $crate::response!(
            $crate::http::StatusCode::OK,
            $crate::HttpBody::full(format!($fmt, $( $arg ),+));
            [
                ($crate::headers::CONTENT_TYPE, "text/plain; charset=utf-8"),
                $( ($key, $value) ),*
            ]
        )
    };

    // =========================
    // 4) Explicit JSON
    // =========================

    // ok!(json: expr)
    (json: $body:expr) => {{
        match $crate::HttpBody::json($body) {
            Ok(body) => $crate::response!(
                $crate::http::StatusCode::OK,
                body;
                [ ($crate::headers::CONTENT_TYPE, "application/json") ]
            ),
            Err(err) => Err(err),
        }
    }};

    // ok!(json: expr; [headers])
    (json: $body:expr ; [ $( ($key:expr, $value:expr) ),* $(,)? ]) => {{
        match $crate::HttpBody::json($body) {
            Ok(body) => $crate::response!(
                $crate::http::StatusCode::OK,
                body;
                [
                    ($crate::headers::CONTENT_TYPE, "application/json"),
                    $( ($key, $value) ),*
                ]
            ),
            Err(err) => Err(err),
        }
    }};

    // =========================
    // 5) JSON object sugar
    // =========================

    // ok!({ ... })
    ({ $($json:tt)* }) => {{
        match $crate::HttpBody::json($crate::json::json_internal!({ $($json)* })) {
            Ok(body) => $crate::response!(
                $crate::http::StatusCode::OK,
                body;
                [ ($crate::headers::CONTENT_TYPE, "application/json") ]
            ),
            Err(err) => Err(err),
        }
    }};

    // ok! { k: v, ... }
    { $($name:tt : $value:tt),* $(,)? } => {{
        match $crate::HttpBody::json($crate::json::json_internal!({ $($name: $value),* })) {
            Ok(body) => $crate::response!(
                $crate::http::StatusCode::OK,
                body;
                [ ($crate::headers::CONTENT_TYPE, "application/json") ]
            ),
            Err(err) => Err(err),
        }
    }};

    // ok!({ ... }; [headers])
    ({ $($json:tt)* } ; [ $( ($key:expr, $value:expr) ),* $(,)? ]) => {{
        match $crate::HttpBody::json($crate::json::json_internal!({ $($json)* })) {
            Ok(body) => $crate::response!(
                $crate::http::StatusCode::OK,
                body;
                [
                    ($crate::headers::CONTENT_TYPE, "application/json"),
                    $( ($key, $value) ),*
                ]
            ),
            Err(err) => Err(err),
        }
    }};

    // =========================
    // 6) Text sugar for string literals (no prefix)
    //    NOTE: this still matches non-string literals too (known limitation).
    // =========================

    // ok!("ok")
    ($fmt:literal) => {{
        const __S: &str = $fmt;

        if $crate::utils::str::memchr_contains(b'{', __S.as_bytes()) {
            $crate::response!(
                $crate::http::StatusCode::OK,
                $crate::HttpBody::full(format!($fmt));
                [ ($crate::headers::CONTENT_TYPE, "text/plain; charset=utf-8") ]
            )
        } else {
            $crate::response!(
                $crate::http::StatusCode::OK,
                $crate::HttpBody::text(__S);
                [ ($crate::headers::CONTENT_TYPE, "text/plain; charset=utf-8") ]
            )
        }
    }};

    // ok!("ok"; [headers])
    ($fmt:literal ; [ $( ($key:expr, $value:expr) ),* $(,)? ]) => {{
        const __S: &str = $fmt;

        if $crate::utils::str::memchr_contains(b'{', __S.as_bytes()) {
            $crate::response!(
                $crate::http::StatusCode::OK,
                $crate::HttpBody::full(format!($fmt));
                [
                    ($crate::headers::CONTENT_TYPE, "text/plain; charset=utf-8"),
                    $( ($key, $value) ),*
                ]
            )
        } else {
            $crate::response!(
                $crate::http::StatusCode::OK,
                $crate::HttpBody::text(__S);
                [
                    ($crate::headers::CONTENT_TYPE, "text/plain; charset=utf-8"),
                    $( ($key, $value) ),*
                ]
            )
        }
    }};

    // ok!("Hello {}", name)
    ($fmt:literal, $( $arg:expr ),+ $(,)? ) => {
        $crate::response!(
            $crate::http::StatusCode::OK,
            $crate::HttpBody::full(format!($fmt, $( $arg ),+));
            [ ($crate::headers::CONTENT_TYPE, "text/plain; charset=utf-8") ]
        )
    };

    // ok!("Hello {}", name; [headers])
    ($fmt:literal, $( $arg:expr ),+ $(,)? ; [ $( ($key:expr, $value:expr) ),* $(,)? ]) => {
        $crate::response!(
            $crate::http::StatusCode::OK,
            $crate::HttpBody::full(format!($fmt, $( $arg ),+));
            [
                ($crate::headers::CONTENT_TYPE, "text/plain; charset=utf-8"),
                $( ($key, $value) ),*
            ]
        )
    };

    // =========================
    // 7) Fallback: JSON for expr
    // =========================

    // ok!(expr)
    ($body:expr) => {{
        match $crate::HttpBody::json($body) {
            Ok(body) => $crate::response!(
                $crate::http::StatusCode::OK,
                body;
                [ ($crate::headers::CONTENT_TYPE, "application/json") ]
            ),
            Err(err) => Err(err),
        }
    }};

    // ok!(expr; [headers])
    ($body:expr ; [ $( ($key:expr, $value:expr) ),* $(,)? ]) => {{
        match $crate::HttpBody::json($body) {
            Ok(body) => $crate::response!(
                $crate::http::StatusCode::OK,
                body;
                [
                    ($crate::headers::CONTENT_TYPE, "application/json"),
                    $( ($key, $value) ),*
                ]
            ),
            Err(err) => Err(err),
        }
    }};
}
