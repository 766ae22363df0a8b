//! Macros for stream responses

/// Produces `OK 200` response with stream body
/// 
/// # Examples
/// ## Default usage
///```no_run
/// use streamdisp::{HttpRequest, stream};
///
/// # async fn dox(request: HttpRequest) -> std::io::Result<()> {
/// let body_stream = request
///    .into_body()
///    .into_data_stream();
/// 
/// stream!(body_stream);
/// # Ok(())
/// # }
/// ```
/// ## Custom headers
///```no_run
/// use streamdisp::{HttpRequest, stream};
///
/// # async fn dox(request: HttpRequest) -> std::io::Result<()> {
/// let body_stream = request
///    .into_body()
///    .into_data_stream();
/// 
/// stream!(body_stream; [
///    ("Content-Type", "message/http")
/// ]);
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! stream {
    ($body:expr) => {
        $crate::stream!($body; [])
    };
    ($body:expr; [ $( $header:expr ),* $(,)? ]) => {
        $crate::response!(
            $crate::http::StatusCode::OK, 
            $crate::HttpBody::stream($body);
            [ $( $header ),* ]
        )
    };
}
