/// Produces `OK 200` response with HTML body
///
/// # Examples
/// ## Default usage
///```no_run
/// # use streamdisp::HttpRequest;
/// use streamdisp::html;
///
/// # async fn dox(request: HttpRequest) -> std::io::Result<()> {
/// html!(
///    r#"
///    <!doctype html>
///    <html>
///        <head>Hello!</head>
///        <body>
///            <p>Hello, World!</p>
///        </body>
///    </html>
///    "#);
/// # Ok(())
/// # }
#[macro_export]
macro_rules! html {
    ($body:expr) => {
        $crate::html!($body, [])
    };
    ($body:expr, [ $( ($key:expr, $value:expr) ),* $(,)? ]) => {
        $crate::response!(
            $crate::http::StatusCode::OK,
            $crate::HttpBody::full($body),
            [
                ($crate::headers::CONTENT_TYPE, "text/html; charset=utf-8"),
                $( ($key, $value) ),*
            ]
        )
    };
}

#[macro_export]
macro_rules! html_file {
    ($file_name:expr, $body:expr) => {
        $crate::html_file!($file_name, $body, [])
    };
    ($file_name:expr, $body:expr, [ $( ($key:expr, $value:expr) ),* $(,)? ]) => {{
        let mime = $crate::fs::get_mime_or_octet_stream($file_name);
        $crate::response!(
            $crate::http::StatusCode::OK,
            $crate::HttpBody::stream($body),
            [
                ($crate::headers::CONTENT_TYPE, mime.as_ref()),
                ($crate::headers::TRANSFER_ENCODING, "chunked"),
                $( ($key, $value) ),*
            ]
        )
    }};
}

/// Produces `NO CONTENT 204` response
///
/// # Examples
/// ## Default usage
///```no_run
/// # use streamdisp::HttpRequest;
/// use streamdisp::no_content;
///
/// # async fn dox(request: HttpRequest) -> std::io::Result<()> {
/// no_content!();
/// # Ok(())
/// # }
#[macro_export]
macro_rules! no_content {
    () => {
        $crate::response!(
            $crate::http::StatusCode::NO_CONTENT,
            $crate::HttpBody::empty()
        )
    };
}
