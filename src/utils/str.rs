//! Utilities for `String`, `str`, `[u8]`

use memchr::memchr;

pub(crate) fn memchr_split(delimiter: u8, value: &[u8]) -> MemchrSplit<'_> {
    MemchrSplit {
        delimiter,
        value: Some(value),
    }
}

/// Same as [`memchr_split`] but skips empty segments produced by
/// leading/trailing/consecutive delimiters
pub(crate) fn memchr_split_nonempty(delimiter: u8, value: &[u8]) -> impl Iterator<Item = &[u8]> {
    memchr_split(delimiter, value).filter(|segment| !segment.is_empty())
}

/// Returns `true` if `needle` occurs anywhere in `value`
pub(crate) fn memchr_contains(needle: u8, value: &[u8]) -> bool {
    memchr(needle, value).is_some()
}

pub(crate) struct MemchrSplit<'a> {
    delimiter: u8,
    value: Option<&'a [u8]>,
}

impl<'a> Iterator for MemchrSplit<'a> {
    type Item = &'a [u8];
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.value?;
        if let Some(pos) = memchr(self.delimiter, value) {
            let (front, back) = value.split_at(pos);
            self.value = Some(&back[1..]);
            Some(front)
        } else {
            self.value.take()
        }
    }
}
