//! Macros for file responses

/// Produces `OK 200` response with file body
/// 
/// # Examples
/// ## Default usage
///```no_run
/// use streamdisp::file;
/// use tokio::fs::File;
///
/// # async fn dox() -> std::io::Result<()> {
/// let file_name = "example.txt";
/// let file_data = File::open(file_name).await?;
///
/// file!(file_name, file_data);
/// # Ok(())
/// # }
/// ```
/// ## Custom headers
///```no_run
/// use streamdisp::{file, App};
/// use tokio::fs::File;
///
/// # async fn dox() -> std::io::Result<()> {
/// let file_name = "example.txt";
/// let file_data = File::open(file_name).await?;
/// 
/// file!(file_name, file_data, [
///    ("x-api-key", "some api key")
/// ]);
/// # Ok(())   
/// # }
/// ```
#[macro_export]
macro_rules! file {
    ($file_name:expr, $body:expr) => {
        $crate::file!($file_name, $body, [])
    };
    
    ($file_name:expr, $body:expr, [ $( ($key:expr, $value:expr) ),* $(,)? ]) => {{
        let mime = $crate::fs::get_mime_or_octet_stream($file_name);
        $crate::response!(
            $crate::http::StatusCode::OK, 
            $crate::HttpBody::file($body),
            [
                ($crate::headers::CONTENT_TYPE, mime.as_ref()),
                ($crate::headers::TRANSFER_ENCODING, "chunked"),
                ($crate::headers::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", $file_name)),
                $( ($key, $value) ),*
            ]
        )
    }};
}
