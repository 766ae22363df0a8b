use super::{
    Error,
    HeaderValue,
    quality::Ranked
};

use std::{
    str::FromStr,
    fmt
};

#[derive(Hash, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Encoding {
    Any,
    Identity,
    #[cfg(any(
        feature = "compression-brotli", 
        feature = "decompression-brotli"
    ))]
    Brotli,
    #[cfg(any(
        feature = "compression-gzip",
        feature = "decompression-gzip"
    ))]
    Gzip,
    #[cfg(any(
        feature = "compression-gzip",
        feature = "decompression-gzip"
    ))]
    Deflate,
    #[cfg(any(
        feature = "compression-zstd",
        feature = "decompression-zstd"
    ))]
    Zstd
}

impl Encoding {
    /// Returns `true` is encoding is `*` (star)
    #[inline]
    #[allow(dead_code)]
    pub(crate) fn is_any(&self) -> bool {
        self == &Encoding::Any
    }
    
    /// Creates a comma-separated string of encodings from given list
    #[inline]
    #[allow(dead_code)]
    pub(crate) fn stringify(encoding_list: &[Encoding]) -> String {
        encoding_list.iter()
            .map(|&encoding| encoding.to_string())
            .collect::<Vec<String>>()
            .join(",")
    }
}

impl Ranked for Encoding {
    #[inline]
    fn rank(&self) -> u8 {
        match self {
            #[cfg(any(
                feature = "compression-brotli",
                feature = "decompression-brotli"
            ))]
            Encoding::Brotli => 5,
            #[cfg(any(
                feature = "compression-zstd",
                feature = "decompression-zstd"
            ))]
            Encoding::Zstd => 4,
            #[cfg(any(
                feature = "compression-gzip",
                feature = "decompression-gzip"
            ))]
            Encoding::Gzip => 3,
            #[cfg(any(
                feature = "compression-gzip",
                feature = "decompression-gzip"
            ))]
            Encoding::Deflate => 2,
            Encoding::Any => 1,
            Encoding::Identity => 0,
        }
    }
}

impl FromStr for Encoding {
    type Err = Error;
    
    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "*" => Ok(Encoding::Any),
            "identity" => Ok(Encoding::Identity),
            #[cfg(any(
                feature = "compression-brotli",
                feature = "decompression-brotli"
            ))]
            "br" => Ok(Encoding::Brotli),
            #[cfg(any(
                feature = "compression-gzip",
                feature = "decompression-gzip"
            ))]
            "gzip" => Ok(Encoding::Gzip),
            #[cfg(any(
                feature = "compression-gzip",
                feature = "decompression-gzip"
            ))]
            "deflate" => Ok(Encoding::Deflate),
            #[cfg(any(
                feature = "compression-zstd",
                feature = "decompression-zstd"
            ))]
            "zstd" => Ok(Encoding::Zstd),
            _ => Err(EncodingError::unknown())
        }
    }
}

impl fmt::Display for Encoding {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self { 
            Encoding::Any => "*",
            Encoding::Identity => "identity",
            #[cfg(any(
                feature = "compression-brotli",
                feature = "decompression-brotli"
            ))]
            Encoding::Brotli => "br",
            #[cfg(any(
                feature = "compression-gzip",
                feature = "decompression-gzip"
            ))]
            Encoding::Gzip => "gzip",
            #[cfg(any(
                feature = "compression-gzip",
                feature = "decompression-gzip"
            ))]
            Encoding::Deflate => "deflate",
            #[cfg(any(
                feature = "compression-zstd",
                feature = "decompression-zstd"
            ))]
            Encoding::Zstd => "zstd"
        })
    }
}

impl From<Encoding> for HeaderValue {
    #[inline]
    fn from(encoding: Encoding) -> HeaderValue {
        HeaderValue::from_str(&encoding.to_string())
            .unwrap_or(HeaderValue::from_static("identity"))
    }
}

impl TryFrom<HeaderValue> for Encoding {
    type Error = Error;
    
    fn try_from(header_value: HeaderValue) -> Result<Encoding, Error> {
        if header_value.is_empty() { 
            return Err(EncodingError::empty());
        } 
        
        let val = header_value
            .to_str()
            .map_err(|_| EncodingError::unknown())?;
        Encoding::from_str(val)
    }
}

struct EncodingError;
impl EncodingError {
    fn unknown() -> Error { 
        Error::client_error("Encoding error: Unknown encoding")
    }

    fn empty() -> Error {
        Error::client_error("Encoding error: Empty encoding")
    }
}
