//! Small helpers shared by the crate's own unit tests and by [`super::TestServer`] users.

use http_body_util::BodyExt;
use crate::HttpResponse;

/// Drains a response body into a `Vec<u8>`, stripping a leading UTF-8 BOM if present.
pub async fn read_file_bytes(response: &mut HttpResponse) -> Vec<u8> {
    let mut buffer = vec![];
    while let Some(next) = response.body_mut().frame().await {
        let frame = next.unwrap();
        if let Some(chunk) = frame.data_ref() {
            buffer.extend_from_slice(chunk);
        }
    }

    if buffer.starts_with(&[0xEF, 0xBB, 0xBF]) {
        buffer.drain(0..3);
    }

    buffer
}

/// Reads a file from disk into a `Vec<u8>`, for asserting on files a handler wrote.
pub async fn read_file(path: &std::path::Path) -> Vec<u8> {
    tokio::fs::read(path).await.unwrap()
}
