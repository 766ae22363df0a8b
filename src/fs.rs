//! Filesystem helpers

use mime::Mime;
use std::path::Path;

/// Guesses the MIME type of `path` from its extension, falling back to
/// `application/octet-stream` when it can't be determined
#[inline]
pub fn get_mime_or_octet_stream<P: AsRef<Path>>(path: P) -> Mime {
    mime_guess::from_path(&path)
        .first_or_octet_stream()
}
