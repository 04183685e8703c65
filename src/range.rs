//! Compact byte ranges into the source text.
//!
//! The scanners work on byte offsets and only materialize owned strings
//! when a node is built. Every range boundary produced by this crate sits
//! on an ASCII delimiter or a line end, so slicing a `&str` with it is
//! always on a char boundary.

/// Half-open byte range `[start, end)` into an input buffer.
///
/// # Example
/// ```
/// use foldmark::Range;
///
/// let input = "Hello, World!";
/// let range = Range::new(7, 12);
/// assert_eq!(range.slice(input), "World");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Range {
    pub start: u32,
    pub end: u32,
}

const _: () = assert!(std::mem::size_of::<Range>() == 8);

impl Range {
    /// Create a new range.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Create a range from usize offsets.
    #[inline]
    pub fn from_usize(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        debug_assert!(end <= u32::MAX as usize);
        Self {
            start: start as u32,
            end: end as u32,
        }
    }

    /// Get the text this range refers to.
    #[inline]
    pub fn slice<'a>(&self, input: &'a str) -> &'a str {
        &input[self.start_usize()..self.end_usize()]
    }

    /// Length of the range in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub const fn start_usize(&self) -> usize {
        self.start as usize
    }

    #[inline]
    pub const fn end_usize(&self) -> usize {
        self.end as usize
    }

    /// Shrink the range so it excludes leading and trailing spaces, tabs
    /// and carriage returns.
    pub fn trim(&self, input: &str) -> Self {
        let bytes = input.as_bytes();
        let mut start = self.start_usize();
        let mut end = self.end_usize();
        while start < end && is_blank_byte(bytes[start]) {
            start += 1;
        }
        while end > start && is_blank_byte(bytes[end - 1]) {
            end -= 1;
        }
        Self::from_usize(start, end)
    }
}

#[inline]
fn is_blank_byte(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r')
}

impl From<std::ops::Range<usize>> for Range {
    #[inline]
    fn from(r: std::ops::Range<usize>) -> Self {
        Self::from_usize(r.start, r.end)
    }
}
