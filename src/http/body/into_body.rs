//! [`From ] trait implementations from various types into HTTP Body

use crate::{Json, Form, HttpBody};
use crate::error::Error;
use tokio::fs::File;
use std::convert::Infallible;
use std::{borrow::Cow, str::FromStr};
use bytes::Bytes;
use serde::Serialize;

impl FromStr for HttpBody {
    type Err = Infallible;

    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::text_ref(s))
    }
}

impl From<&'static str> for HttpBody {
    #[inline]
    fn from(s: &'static str) -> Self {
        Self::from_static_text(s)
    }
}

impl From<String> for HttpBody {
    #[inline]
    fn from(s: String) -> Self {
        Self::text(s)
    }
}

impl From<Cow<'static, str>> for HttpBody {
    #[inline]
    fn from(s: Cow<'static, str>) -> Self {
        Self::text(s)
    }
}

impl From<Box<str>> for HttpBody {
    #[inline]
    fn from(s: Box<str>) -> Self {
        Self::text(s.into_string())
    }
}

impl From<Bytes> for HttpBody {
    #[inline]
    fn from(b: Bytes) -> Self {
        Self::full(b)
    }
}

impl From<&'static [u8]> for HttpBody {
    #[inline]
    fn from(s: &'static [u8]) -> Self {
        Self::from_static(s)
    }
}

impl From<File> for HttpBody {
    #[inline]
    fn from(f: File) -> Self {
        Self::file(f)
    }
}

impl<T: Serialize> TryFrom<Json<T>> for HttpBody {
    type Error = Error;

    #[inline]
    fn try_from(value: Json<T>) -> Result<Self, Self::Error> {
        Self::json(value.into_inner())
    }
}

impl<T: Serialize> TryFrom<Form<T>> for HttpBody {
    type Error = Error;

    #[inline]
    fn try_from(value: Form<T>) -> Result<Self, Self::Error> {
        Self::form(value.into_inner())
    }
}

macro_rules! impl_into_body {
    { $($type:ident),* $(,)? } => {
        $(impl From<$type> for HttpBody {
            #[inline]
            fn from(s: $type) -> Self {
                Self::full(s.to_string())
            }
        })*
    };
}

impl_into_body! {
    bool, char,
    i8, u8,
    i16, u16,
    i32, u32,
    f32,
    i64, u64,
    f64,
    i128, u128,
    isize, usize
}
