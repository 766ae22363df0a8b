//! Macros for various HTTP responses

/// Produces HTTP 404 NOT FOUND response
///
/// # Examples
/// ## Without body
/// ```no_run
/// use streamdisp::not_found;
///
/// not_found!();
/// ```
/// ## plain/text body
/// ```no_run
/// use streamdisp::not_found;
///
/// not_found!("User not found!");
/// ```
#[macro_export]
macro_rules! not_found {
    () => {
        $crate::status!(404)
    };
    ([ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(404; [ $( $header ),* ])
    };

    (text: $body:expr) => {
        $crate::status!(404, text: $body)
    };
    (text: $body:expr; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(404, text: $body; [ $( $header ),* ])
    };

    (fmt: $body:literal) => {
        $crate::status!(404, fmt: $body)
    };
    (fmt: $body:literal; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(404, fmt: $body; [ $( $header ),* ])
    };
    (fmt: $body:literal, $( $arg:expr ),+ $(,)? ) => {
        $crate::status!(404, fmt: $body, $( $arg ),+)
    };
    (fmt: $body:literal, $( $arg:expr ),+ $(,)? ; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(404, fmt: $body, $( $arg ),+ ; [ $( $header ),* ])
    };

    (json: $text:expr) => {
        $crate::status!(404, json: $text)
    };
    (json: $text:expr; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(404, json: $text; [ $( $header ),* ])
    };

    ({ $($json:tt)* }) => {
        $crate::status!(404, { $($json)* })
    };
    ({ $($json:tt)* }; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(404, { $($json)* }; [ $( $header ),* ])
    };

    ($text:literal) => {
        $crate::status!(404, $text)
    };
    ($text:literal; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(404, $text; [ $( $header ),* ])
    };
    ($text:literal, $( $arg:expr ),+ $(,)?) => {
        $crate::status!(404, $text, $( $arg ),+)
    };
    ($text:literal, $( $arg:expr ),+ $(,)?; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(404, $text, $( $arg ),+; [ $( $header ),* ])
    };

    ($body:expr; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(404, $body; [ $( $header ),* ])
    };
    ($body:expr) => {
        $crate::status!(404, $body)
    };
}

/// Produces HTTP 400 BAD REQUEST response
///
/// # Examples
/// ## Without body
/// ```no_run
/// use streamdisp::bad_request;
///
/// bad_request!();
/// ```
/// ## plain/text body
/// ```no_run
/// use streamdisp::bad_request;
///
/// bad_request!("User not found!");
/// ```
#[macro_export]
macro_rules! bad_request {
    () => {
        $crate::status!(400)
    };
    ([ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(400; [ $( $header ),* ])
    };

    (text: $body:expr) => {
        $crate::status!(400, text: $body)
    };
    (text: $body:expr; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(400, text: $body; [ $( $header ),* ])
    };

    (fmt: $body:literal) => {
        $crate::status!(400, fmt: $body)
    };
    (fmt: $body:literal; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(400, fmt: $body; [ $( $header ),* ])
    };
    (fmt: $body:literal, $( $arg:expr ),+ $(,)? ) => {
        $crate::status!(400, fmt: $body, $( $arg ),+)
    };
    (fmt: $body:literal, $( $arg:expr ),+ $(,)? ; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(400, fmt: $body, $( $arg ),+ ; [ $( $header ),* ])
    };

    (json: $text:expr) => {
        $crate::status!(400, json: $text)
    };
    (json: $text:expr; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(400, json: $text; [ $( $header ),* ])
    };

    ({ $($json:tt)* }) => {
        $crate::status!(400, { $($json)* })
    };
    ({ $($json:tt)* }; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(400, { $($json)* }; [ $( $header ),* ])
    };

    ($text:literal) => {
        $crate::status!(400, $text)
    };
    ($text:literal; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(400, $text; [ $( $header ),* ])
    };
    ($text:literal, $( $arg:expr ),+ $(,)?) => {
        $crate::status!(400, $text, $( $arg ),+)
    };
    ($text:literal, $( $arg:expr ),+ $(,)?; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(400, $text, $( $arg ),+; [ $( $header ),* ])
    };

    ($body:expr; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(400, $body; [ $( $header ),* ])
    };
    ($body:expr) => {
        $crate::status!(400, $body)
    };
}

/// Produces HTTP 201 CREATED response
///
/// # Examples
/// ## Without body
/// ```no_run
/// use streamdisp::created;
///
/// created!();
/// ```
/// ## plain/text body
/// ```no_run
/// use streamdisp::created;
///
/// created!("User created!");
/// ```
#[macro_export]
macro_rules! created {
    () => {
        $crate::status!(201)
    };
    ([ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(201; [ $( $header ),* ])
    };

    (text: $body:expr) => {
        $crate::status!(201, text: $body)
    };
    (text: $body:expr; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(201, text: $body; [ $( $header ),* ])
    };

    (fmt: $body:literal) => {
        $crate::status!(201, fmt: $body)
    };
    (fmt: $body:literal; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(201, fmt: $body; [ $( $header ),* ])
    };
    (fmt: $body:literal, $( $arg:expr ),+ $(,)? ) => {
        $crate::status!(201, fmt: $body, $( $arg ),+)
    };
    (fmt: $body:literal, $( $arg:expr ),+ $(,)? ; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(201, fmt: $body, $( $arg ),+ ; [ $( $header ),* ])
    };

    (json: $text:expr) => {
        $crate::status!(201, json: $text)
    };
    (json: $text:expr; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(201, json: $text; [ $( $header ),* ])
    };

    ({ $($json:tt)* }) => {
        $crate::status!(201, { $($json)* })
    };
    ({ $($json:tt)* }; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(201, { $($json)* }; [ $( $header ),* ])
    };

    ($text:literal) => {
        $crate::status!(201, $text)
    };
    ($text:literal; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(201, $text; [ $( $header ),* ])
    };
    ($text:literal, $( $arg:expr ),+ $(,)?) => {
        $crate::status!(201, $text, $( $arg ),+)
    };
    ($text:literal, $( $arg:expr ),+ $(,)?; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(201, $text, $( $arg ),+; [ $( $header ),* ])
    };

    ($body:expr; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(201, $body; [ $( $header ),* ])
    };
    ($body:expr) => {
        $crate::status!(201, $body)
    };
}

/// Produces HTTP 202 ACCEPTED response
///
/// # Examples
/// ## Without body
/// ```no_run
/// use streamdisp::accepted;
///
/// accepted!();
/// ```
/// ## plain/text body
/// ```no_run
/// use streamdisp::accepted;
///
/// accepted!("Task accepted!");
/// ```
#[macro_export]
macro_rules! accepted {
    () => {
        $crate::status!(202)
    };
    ([ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(202; [ $( $header ),* ])
    };

    (text: $body:expr) => {
        $crate::status!(202, text: $body)
    };
    (text: $body:expr; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(202, text: $body; [ $( $header ),* ])
    };

    (fmt: $body:literal) => {
        $crate::status!(202, fmt: $body)
    };
    (fmt: $body:literal; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(202, fmt: $body; [ $( $header ),* ])
    };
    (fmt: $body:literal, $( $arg:expr ),+ $(,)? ) => {
        $crate::status!(202, fmt: $body, $( $arg ),+)
    };
    (fmt: $body:literal, $( $arg:expr ),+ $(,)? ; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(202, fmt: $body, $( $arg ),+ ; [ $( $header ),* ])
    };

    (json: $text:expr) => {
        $crate::status!(202, json: $text)
    };
    (json: $text:expr; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(202, json: $text; [ $( $header ),* ])
    };

    ({ $($json:tt)* }) => {
        $crate::status!(202, { $($json)* })
    };
    ({ $($json:tt)* }; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(202, { $($json)* }; [ $( $header ),* ])
    };

    ($text:literal) => {
        $crate::status!(202, $text)
    };
    ($text:literal; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(202, $text; [ $( $header ),* ])
    };
    ($text:literal, $( $arg:expr ),+ $(,)?) => {
        $crate::status!(202, $text, $( $arg ),+)
    };
    ($text:literal, $( $arg:expr ),+ $(,)?; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(202, $text, $( $arg ),+; [ $( $header ),* ])
    };

    ($body:expr; [ $( $header:expr ),* $(,)? ]) => {
        $crate::status!(202, $body; [ $( $header ),* ])
    };
    ($body:expr) => {
        $crate::status!(202, $body)
    };
}
