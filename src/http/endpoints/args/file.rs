//! Extractors for file stream

use bytes::Bytes;
use futures_util::future::{ok, Ready};
use http_body_util::BodyExt;
use hyper::body::Body;
use tokio::io::{AsyncWriteExt, BufWriter};
use std::path::Path;
use futures_util::TryFutureExt;
use crate::{error::Error, headers::CONTENT_DISPOSITION};

use crate::http::{
    HttpBody,
    endpoints::args::{
        FromPayload,
        Payload,
        Source
    }
};

/// See [`FileStream<B>`] for more details.
pub type File = FileStream<HttpBody>;

/// Describes a single file stream
/// 
/// # Example
/// ```no_run
/// use streamdisp::{HttpResult, File, ok};
///
/// async fn handle(file: File) -> HttpResult {
///     file.save_as("example.txt").await?;        
///     ok!("File saved!")
/// }
/// ```
pub struct FileStream<B: Body<Data = Bytes, Error = Error> + Unpin> {
    name: Option<String>,
    stream: B
}

impl<B: Body<Data = Bytes, Error = Error> + Unpin> std::fmt::Debug for FileStream<B> {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FileStream(..)")
    }
}

impl<B: Body<Data = Bytes, Error = Error> + Unpin> FileStream<B> {
    /// Create a new file stream
    fn new(name: Option<&str>, stream: B) -> Self {
        Self { 
            name: name.map(|s| s.to_string()),
            stream
        }
    }
    
    /// Returns a file name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Asynchronously writes a file stream to disk with a name taken from [`CONTENT_DISPOSITION`] header
    ///
    /// # Example
    /// ```no_run
    /// # use streamdisp::{HttpResult, ok};
    /// use streamdisp::File;
    ///
    /// # async fn handle(file: File) -> HttpResult {
    /// file.save("path/to/folder").await?;        
    /// # ok!("File saved!")
    /// # }
    /// ```
    #[inline]
    pub async fn save(self, path: impl AsRef<Path>) -> Result<(), Error> {
        let file_name = self.name().ok_or(FileStreamError::missing_name())?;
        let file_path = path.as_ref().join(file_name);
        
        self.save_as(file_path).await
    }
    
    /// Asynchronously writes a file stream to disk with a provided name in `file_path`
    /// 
    /// # Example
    /// ```no_run
    /// # use streamdisp::{HttpResult, ok};
    /// use streamdisp::File;
    ///
    /// # async fn handle(file: File) -> HttpResult {
    /// file.save_as("path/to/file.txt").await?;        
    /// # ok!("File saved!")
    /// # }
    /// ```
    #[inline]
    pub async fn save_as(self, file_path: impl AsRef<Path>) -> Result<(), Error> {
        let file = tokio::fs::File::create(file_path).await?;
        
        let mut writer = BufWriter::new(file);
        let mut stream = self.stream;
        
        while let Some(next) = stream.frame().await {
            match next {
                Ok(frame) => {
                    if let Some(chunk) = frame.data_ref() {
                        writer.write_all(chunk).await?
                    } else {
                        break
                    }
                },
                Err(err) => return Err(FileStreamError::read_error(err))
            };
        }
        writer.flush().map_err(FileStreamError::flush_error).await
    }

    #[inline]
    fn parse_file_name(content_disposition: &str) -> Option<&str> {
        let parts: Vec<&str> = content_disposition.split(';').collect();
        for part in parts {
            let part = part.trim();
            if part.starts_with("filename=") {
                let file_name = part
                    .trim_start_matches("filename=")
                    .trim_matches('"');
                return Some(file_name);
            }
        }
        None
    }
}

/// Extracts a file stream from request body
impl FromPayload for File {
    type Future = Ready<Result<Self, Error>>;

    #[inline]
    fn from_payload(payload: Payload<'_>) -> Self::Future {
        let Payload::Full(parts, body) = payload else { unreachable!() };
        let name = parts.headers
            .get(&CONTENT_DISPOSITION)
            .and_then(|header| header.to_str().ok())
            .and_then(Self::parse_file_name);
        ok(FileStream::new(name, body))
    }

    #[inline]
    fn source() -> Source {
        Source::Full
    }
}

struct FileStreamError;

impl FileStreamError {
    #[inline]
    fn read_error(error: Error) -> Error {
        Error::client_error(format!("File Stream error: {error}"))
    }

    #[inline]
    fn flush_error(error: std::io::Error) -> Error {
        Error::client_error(format!("File Stream error: {error}"))
    }

    #[inline]
    fn missing_name() -> Error {
        Error::client_error("File Stream error: file name is missing in the \"Content-Disposition\" header")
    }
}
