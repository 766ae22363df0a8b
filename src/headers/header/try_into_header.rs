//! A conversion tools for HTTP headers of different types

use super::{FromHeaders, Header, HeaderName, HeaderValue};
use crate::error::Error;

/// A trait that describes how to convert a type 
/// into a raw HTTP [`HeaderName`] and [`HeaderValue`] pair.
pub trait TryIntoHeaderPair {
    /// Converts into a raw HTTP [`HeaderName`] and [`HeaderValue`] pair.
    fn try_into_pair(self) -> Result<(HeaderName, HeaderValue), Error>;
}

impl<T: FromHeaders> TryIntoHeaderPair for Header<T> {
    #[inline]
    fn try_into_pair(self) -> Result<(HeaderName, HeaderValue), Error> {
        Ok((T::NAME, self.into_inner()))
    }
}

impl<K, V> TryIntoHeaderPair for (K, V)
where
    HeaderName: TryFrom<K>,
    HeaderValue: TryFrom<V>,
    Error: From<<HeaderName as TryFrom<K>>::Error>,
    Error: From<<HeaderValue as TryFrom<V>>::Error>,
{
    #[inline]
    fn try_into_pair(self) -> Result<(HeaderName, HeaderValue), Error> {
        let (k, v) = self;
        let name = HeaderName::try_from(k).map_err(Error::from)?;
        let value = HeaderValue::try_from(v).map_err(Error::from)?;
        Ok((name, value))
    }
}
