use crate::{
    kmp::prefix_function,
    Error,
    Reason,
    Sealed,
};
use chumsky::{
    primitive::end,
    Parser as _,
};
use std::ops::Range;

/// Represents a matching [`Needle`] found in the haystack.
#[derive(Clone, Copy, Debug)]
pub struct Match<'haystack> {
    range: (usize, usize),
    haystack: &'haystack [u8],
}

impl<'haystack> Match<'haystack> {
    /// The position of the first byte in the matching needle, relative to the haystack.
    ///
    /// ```
    /// # use kmpz_common::{DynamicNeedle, Needle as _};
    /// let needle = DynamicNeedle::from_hex("63 61 74").unwrap();
    /// let haystack = "a_cat_tries";
    /// let matched = needle.find(haystack.as_bytes()).unwrap();
    /// assert_eq!(matched.start(), 2);
    /// ```
    #[must_use]
    pub fn start(&self) -> usize {
        self.range.0
    }

    /// The position of the last byte past the end of the matching needle, relative to the haystack.
    ///
    /// ```
    /// # use kmpz_common::{DynamicNeedle, Needle as _};
    /// let needle = DynamicNeedle::from_hex("63 61 74").unwrap();
    /// let haystack = "a_cat_tries";
    /// let matched = needle.find(haystack.as_bytes()).unwrap();
    /// assert_eq!(matched.end(), 5);
    /// ```
    #[must_use]
    pub fn end(&self) -> usize {
        self.range.1
    }

    /// The range of the matching needle, relative to the haystack.
    ///
    /// ```
    /// # use kmpz_common::{DynamicNeedle, Needle as _};
    /// let needle = DynamicNeedle::from_hex("63 61 74").unwrap();
    /// let haystack = "a_cat_tries";
    /// let matched = needle.find(haystack.as_bytes()).unwrap();
    /// assert_eq!(matched.range(), 2..5);
    /// ```
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }

    /// The actual matched bytes, from the haystack.
    ///
    /// ```
    /// # use kmpz_common::{DynamicNeedle, Needle as _};
    /// let needle = DynamicNeedle::from_hex("63 61 74").unwrap();
    /// let haystack = "a_cat_tries";
    /// let matched = needle.find(haystack.as_bytes()).unwrap();
    /// assert_eq!(matched.as_bytes(), &b"cat"[..]);
    /// ```
    #[must_use]
    pub fn as_bytes(&self) -> &'haystack [u8] {
        &self.haystack[self.range()]
    }
}

/// The common interface for searching haystacks with needles.
///
/// A successful search will yield a [`Match`] in the haystack, whose length is
/// equal to the [length](Needle::len) of the needle. Matches may overlap.
///
/// ```
/// # use kmpz_common::{DynamicNeedle, Needle as _};
/// let needle = DynamicNeedle::from_hex("12 23 12").unwrap();
/// let haystack = [0x12, 0x23, 0x12, 0x23, 0x12, 0xCD];
/// let mut iter = needle.find_iter(&haystack);
/// assert_eq!(iter.next().unwrap().start(), 0);
/// assert_eq!(iter.next().unwrap().start(), 2);
/// assert!(iter.next().is_none());
/// ```
#[allow(clippy::len_without_is_empty)]
pub trait Needle: Sealed {
    /// A convenience method for getting only the first match.
    #[must_use]
    fn find<'haystack>(&self, haystack: &'haystack [u8]) -> Option<Match<'haystack>> {
        self.find_iter(haystack).next()
    }

    /// Finds all matching subsequences, iteratively.
    #[must_use]
    fn find_iter<'iter, 'needle: 'iter, 'haystack: 'iter>(
        &'needle self,
        haystack: &'haystack [u8],
    ) -> impl Iterator<Item = Match<'haystack>> + 'iter;

    /// The length of the needle itself.
    ///
    /// ```
    /// # use kmpz_common::{DynamicNeedle, Needle as _};
    /// let needle = DynamicNeedle::from_hex("12 34 56 78 9A BC").unwrap();
    /// assert_eq!(needle.len(), 6);
    /// ```
    #[must_use]
    fn len(&self) -> usize;
}

struct FindIter<'haystack, 'needle> {
    haystack: &'haystack [u8],
    pattern: &'needle [u8],
    table: &'needle [usize],
    pos: usize,
    state: usize,
}

impl<'haystack> Iterator for FindIter<'haystack, '_> {
    type Item = Match<'haystack>;

    fn next(&mut self) -> Option<Self::Item> {
        let m = self.pattern.len();
        if m == 0 {
            return None;
        }
        while self.pos < self.haystack.len() {
            if self.state == 0 {
                // no prefix in progress: skip straight to the next candidate byte
                match memchr::memchr(self.pattern[0], &self.haystack[self.pos..]) {
                    Some(offset) => self.pos += offset,
                    None => {
                        self.pos = self.haystack.len();
                        return None;
                    }
                }
            }
            if self.pattern[self.state] == self.haystack[self.pos] {
                self.state += 1;
                self.pos += 1;
                if self.state == m {
                    // fold back so the scan keeps yielding overlapping matches
                    self.state = self.table[m - 1];
                    return Some(Match {
                        range: (self.pos - m, self.pos),
                        haystack: self.haystack,
                    });
                }
            } else if self.state != 0 {
                self.state = self.table[self.state - 1];
            } else {
                self.pos += 1;
            }
        }
        None
    }
}

/// The compile-time variant of a [`Needle`].
///
/// [`StaticNeedle`] is intended for embedding into executables at compile-time,
/// such that no allocations or validation are needed to perform a match on a
/// haystack at runtime. The failure table is computed during macro expansion
/// and stored alongside the pattern bytes.
///
/// You should never need to name this type directly:
/// * If you need to instantiate one, please use the `needle!` macro instead.
/// * If you need to use one in an api, please use the [`Needle`] trait instead.
pub struct StaticNeedle<const N: usize> {
    pattern: [u8; N],
    table: [usize; N],
}

impl<const N: usize> StaticNeedle<N> {
    #[doc(hidden)]
    #[must_use]
    pub const fn new(pattern: [u8; N], table: [usize; N]) -> Self {
        Self { pattern, table }
    }
}

impl<const N: usize> Sealed for StaticNeedle<N> {}

impl<const N: usize> Needle for StaticNeedle<N> {
    fn find_iter<'iter, 'needle: 'iter, 'haystack: 'iter>(
        &'needle self,
        haystack: &'haystack [u8],
    ) -> impl Iterator<Item = Match<'haystack>> + 'iter {
        FindIter {
            haystack,
            pattern: &self.pattern,
            table: &self.table,
            pos: 0,
            state: 0,
        }
    }

    fn len(&self) -> usize {
        N
    }
}

/// The run-time variant of a [`Needle`].
#[derive(Debug)]
pub struct DynamicNeedle {
    pattern: Vec<u8>,
    table: Vec<usize>,
}

impl DynamicNeedle {
    /// Construct a [`DynamicNeedle`] from a hex pattern.
    ///
    /// # Syntax
    /// Expects a sequence of bytes separated by whitespace, where each byte is
    /// exactly 2 hexadecimals (uppercase or lowercase).
    ///
    /// # Example
    /// ```
    /// # use kmpz_common::{DynamicNeedle, Needle as _};
    /// let needle = DynamicNeedle::from_hex("78 9A BC").unwrap();
    /// let haystack = [0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE];
    /// let matched = needle.find(&haystack).unwrap();
    /// assert_eq!(&haystack[matched.start()..], [0x78, 0x9A, 0xBC, 0xDE]);
    /// ```
    pub fn from_hex(pattern: &str) -> Result<Self, Error<'_>> {
        let parser = crate::hex_pattern().then_ignore(end());
        match parser.parse(pattern) {
            Ok(bytes) => Ok(Self::from_bytes(&bytes)),
            Err(errors) => {
                let error = errors.first().unwrap();
                Err(Error {
                    source: pattern,
                    span: error.span(),
                    reason: Reason::new(error.reason()),
                })
            }
        }
    }

    /// Construct a [`DynamicNeedle`] from raw bytes.
    ///
    /// The failure table is computed once here; every search reuses it.
    ///
    /// # Example
    /// ```
    /// # use kmpz_common::{DynamicNeedle, Needle as _};
    /// let needle = DynamicNeedle::from_bytes(b"cat");
    /// let haystack = b"a_cat_tries";
    /// let matched = needle.find(haystack).unwrap();
    /// assert_eq!(matched.range(), 2..5);
    /// ```
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            pattern: bytes.to_vec(),
            table: prefix_function(bytes),
        }
    }
}

impl Sealed for DynamicNeedle {}

impl Needle for DynamicNeedle {
    fn find_iter<'iter, 'needle: 'iter, 'haystack: 'iter>(
        &'needle self,
        haystack: &'haystack [u8],
    ) -> impl Iterator<Item = Match<'haystack>> + 'iter {
        FindIter {
            haystack,
            pattern: &self.pattern,
            table: &self.table,
            pos: 0,
            state: 0,
        }
    }

    fn len(&self) -> usize {
        self.pattern.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        DynamicNeedle,
        Needle as _,
    };

    const HAYSTACK: &str = include_str!("../../../data/jabberwocky.txt");

    #[test]
    fn test_from_hex() {
        assert!(DynamicNeedle::from_hex("4_ 42 41").is_err());
        assert!(DynamicNeedle::from_hex("1 23").is_err());
        assert!(DynamicNeedle::from_hex("123").is_err());

        macro_rules! test_success {
            ($pattern:literal, $length:literal) => {
                let needle = DynamicNeedle::from_hex($pattern);
                assert!(needle.is_ok(), "\"{}\"", $pattern);
                let needle = needle.unwrap();
                assert_eq!(needle.len(), $length, "\"{}\"", $pattern);
            };
        }

        test_success!("41 42 41 43 41 42 41 42 43", 9);
        test_success!("74 68 65", 3);
        test_success!("aA Bb 1d", 3);
        test_success!("  61 62  63 ", 3);
    }

    #[test]
    fn test_matches() {
        macro_rules! do_test {
            ($pattern:literal, $count:literal) => {
                let needle = DynamicNeedle::from_bytes($pattern);
                let matches = needle.find_iter(HAYSTACK.as_bytes()).count();
                assert_eq!(matches, $count, "{:?}", $pattern);
            };
        }

        do_test!(b"the", 15);
        do_test!(b"Jabberwock", 3);
        do_test!(b"and", 9);
        do_test!(b"ough", 6);
        do_test!(b"wabe", 2);
        do_test!(b"snicker-snack", 1);
        do_test!(b"!", 11);
        do_test!(b"He ", 4);
    }

    #[test]
    fn test_overlapping_matches() {
        let needle = DynamicNeedle::from_bytes(b"aa");
        let starts: Vec<_> = needle.find_iter(b"aaaa").map(|m| m.start()).collect();
        assert_eq!(starts, [0, 1, 2]);

        let needle = DynamicNeedle::from_bytes(b"abab");
        let starts: Vec<_> = needle.find_iter(b"abababab").map(|m| m.start()).collect();
        assert_eq!(starts, [0, 2, 4]);
    }

    #[test]
    fn test_empty_needle_never_matches() {
        let needle = DynamicNeedle::from_bytes(b"");
        assert_eq!(needle.len(), 0);
        assert!(needle.find(b"abc").is_none());
    }

    #[test]
    fn test_needle_longer_than_haystack() {
        let needle = DynamicNeedle::from_bytes(b"abcde");
        assert!(needle.find(b"abc").is_none());
    }
}
