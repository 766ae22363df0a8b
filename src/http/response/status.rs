//! Macros for responses with various HTTP statuses

/// Produces a response with specified `StatusCode` with plain text or JSON body
///
/// # Examples
/// ## Without body
/// ```no_run
/// use streamdisp::status;
///
/// status!(404);
/// ```
/// ## plain/text body
/// ```no_run
/// use streamdisp::status;
///
/// status!(401, "Unauthorized!");
/// ```
/// ## JSON body
/// ```no_run
/// use streamdisp::status;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct ErrorMessage {
///     error: String
/// }
///
/// let error = ErrorMessage { error: "some error message".into() };
/// status!(401, error);
/// ```
#[macro_export]
macro_rules! status {
    ($status:expr, { $($json:tt)* }) => {
        $crate::response!(
            $crate::http::StatusCode::from_u16($status).unwrap_or($crate::http::StatusCode::OK),
            $crate::HttpBody::json($crate::json::json_internal!({ $($json)* })),
            [
                ($crate::headers::CONTENT_TYPE, "application/json"),
            ]
        )
    };
    
    ($status:expr) => {
        $crate::response!(
            $crate::http::StatusCode::from_u16($status).unwrap_or($crate::http::StatusCode::OK), 
            $crate::HttpBody::empty()
        )
    };
    
    ($status:expr, [ $( ($key:expr, $value:expr) ),* $(,)? ]) => {
        $crate::response!(
            $crate::http::StatusCode::from_u16($status).unwrap_or($crate::http::StatusCode::OK), 
            $crate::HttpBody::empty(),
            [ $( ($key, $value) ),* ]
        )
    };
    
    ($status:expr, $var:ident) => {
        $crate::response!(
            $crate::http::StatusCode::from_u16($status).unwrap_or($crate::http::StatusCode::OK),
            $crate::HttpBody::json($var),
            [
                ($crate::headers::CONTENT_TYPE, "application/json"),
            ]
        )
    };
    
    ($status:expr, $body:expr, [ $( ($key:expr, $value:expr) ),* $(,)? ]) => {
        $crate::response!(
            $crate::http::StatusCode::from_u16($status).unwrap_or($crate::http::StatusCode::OK), 
            $crate::HttpBody::json($body),
            [ $( ($key, $value) ),* ]
        )
    };
    
    ($status:expr, $fmt:tt) => {
        $crate::response!(
            $crate::http::StatusCode::from_u16($status).unwrap_or($crate::http::StatusCode::OK),
            $crate::HttpBody::json(format!($fmt)),
            [
                ($crate::headers::CONTENT_TYPE, "application/json"),
            ]
        )
    };
    
    ($status:expr, $body:expr) => {
        $crate::response!(
            $crate::http::StatusCode::from_u16($status).unwrap_or($crate::http::StatusCode::OK),
            $crate::HttpBody::json($body),
            [
                ($crate::headers::CONTENT_TYPE, "application/json"),
            ]
        )
    };
    
    ($status:expr, $($fmt:tt)*) => {
        $crate::response!(
            $crate::http::StatusCode::from_u16($status).unwrap_or($crate::http::StatusCode::OK),
            $crate::HttpBody::json(format!($($fmt)*)),
            [
                ($crate::headers::CONTENT_TYPE, "application/json"),
            ]
        )
    };
}
