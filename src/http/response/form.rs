/// Produces `OK 200` response with Form Data body
///
/// # Example
/// ```no_run
/// use std::collections::HashMap;
/// use streamdisp::form;
///
/// # async fn dox() -> std::io::Result<()> {
/// let data = HashMap::from([
///     ("key", "value")
/// ]);
///
/// form!(data);
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! form {
    // handles form!({ "key": "value" })
    ({ $($json:tt)* }) => {
        $crate::response!(
            $crate::http::StatusCode::OK,
            $crate::HttpBody::form($crate::json::json_internal!({ $($json)* })),
            [
                ($crate::headers::CONTENT_TYPE, "application/x-www-form-urlencoded"),
            ]
        )
    };
    
    // handles form!({ "key": "value" }, [("key", "val")])
    ({ $($json:tt)* }, [ $( ($key:expr, $value:expr) ),* $(,)? ]) => {
        $crate::response!(
            $crate::http::StatusCode::OK,
            $crate::HttpBody::form($crate::json::json_internal!({ $($json)* })),
            [
                ($crate::headers::CONTENT_TYPE, "application/x-www-form-urlencoded"),
                $( ($key, $value) ),*
            ]
        )
    };
    
    // handles form!(object, [("key", "val")])
    ($body:expr, [ $( ($key:expr, $value:expr) ),* $(,)? ]) => {
        $crate::response!(
            $crate::http::StatusCode::OK,
            $crate::HttpBody::form($body),
            [
                ($crate::headers::CONTENT_TYPE, "application/x-www-form-urlencoded"),
                $( ($key, $value) ),*
            ]
        )
    };
    
    // handles form!(object)
    ($body:expr) => {
        $crate::response!(
            $crate::http::StatusCode::OK,
            $crate::HttpBody::form($body),
            [
                ($crate::headers::CONTENT_TYPE, "application/x-www-form-urlencoded"),
            ]
        )
    };
}
