//! Macros for redirect responses

/// Produces HTTP 301 MOVED PERMANENTLY response
///
/// # Example
/// ```no_run
/// use streamdisp::redirect;
///
/// let url = "https://www.rust-lang.org/";
/// redirect!(url);
/// ```
#[macro_export]
macro_rules! redirect {
    ($url:expr) => {
        $crate::redirect!($url, [])
    };
    ($url:expr, [ $( ($key:expr, $value:expr) ),* $(,)? ]) => {
        $crate::status!(301, [
            ($crate::headers::LOCATION, $url),
            $( ($key, $value) ),*
        ])
    };
}

/// Produces HTTP 302 FOUND response
///
/// # Example
/// ```no_run
/// use streamdisp::found;
///
/// let url = "https://www.rust-lang.org/";
/// found!(url);
/// ```
#[macro_export]
macro_rules! found {
    ($url:expr) => {
        $crate::found!($url, [])
    };
    ($url:expr, [ $( ($key:expr, $value:expr) ),* $(,)? ]) => {
        $crate::status!(302, [
            ($crate::headers::LOCATION, $url),
            $( ($key, $value) ),*
        ])
    };
}

/// Produces HTTP 303 SEE OTHER response
///
/// # Example
/// ```no_run
/// use streamdisp::see_other;
///
/// let url = "https://www.rust-lang.org/";
/// see_other!(url);
/// ```
#[macro_export]
macro_rules! see_other {
    ($url:expr) => {
        $crate::see_other!($url, [])
    };
    ($url:expr, [ $( ($key:expr, $value:expr) ),* $(,)? ]) => {
        $crate::status!(303, [
            ($crate::headers::LOCATION, $url),
            $( ($key, $value) ),*
        ])
    };
}

/// Produces HTTP 307 TEMPORARY REDIRECT response
///
/// # Example
/// ```no_run
/// use streamdisp::temp_redirect;
///
/// let url = "https://www.rust-lang.org/";
/// temp_redirect!(url);
/// ```
#[macro_export]
macro_rules! temp_redirect {
    ($url:expr) => {
        $crate::temp_redirect!($url, [])
    };
    ($url:expr, [ $( ($key:expr, $value:expr) ),* $(,)? ]) => {
        $crate::status!(307, [
            ($crate::headers::LOCATION, $url),
            $( ($key, $value) ),*
        ])
    };
}

/// Produces HTTP 308 PERMANENT REDIRECT response
///
/// # Example
/// ```no_run
/// use streamdisp::permanent_redirect;
///
/// let url = "https://www.rust-lang.org/";
/// permanent_redirect!(url);
/// ```
#[macro_export]
macro_rules! permanent_redirect {
    ($url:expr) => {
        $crate::permanent_redirect!($url, [])
    };
    ($url:expr, [ $( ($key:expr, $value:expr) ),* $(,)? ]) => {
        $crate::status!(308, [
            ($crate::headers::LOCATION, $url),
            $( ($key, $value) ),*
        ])
    };
}
