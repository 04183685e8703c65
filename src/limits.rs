//! Caps that keep every scan bounded.
//!
//! Inputs that exceed a cap are not rejected; the construct degrades to
//! plain text (or, for collapsibles, to a flatter tree).

/// Deepest heading level; more `#` markers clamp to this.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Maximum nesting depth for collapsible containers.
pub const MAX_COLLAPSIBLE_NESTING: usize = 32;

/// Maximum bracket depth inside link text / image alt text.
/// `[a [b] c](url)` is depth 2 and allowed; one more level is not.
pub const MAX_BRACKET_DEPTH: usize = 2;

/// Maximum parentheses nesting in link destinations.
pub const MAX_LINK_PAREN_DEPTH: usize = 32;

/// Longest input, in bytes, that `parse` reads.
///
/// Spans are stored as `u32` offsets. Longer input is truncated at the
/// last char boundary below the cap.
pub const MAX_INPUT_LEN: usize = u32::MAX as usize;

/// Maximum digits in an ordered list marker (prevents big-integer parsing).
pub const MAX_LIST_MARKER_DIGITS: usize = 9;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_are_reasonable() {
        const { assert!(MAX_HEADING_LEVEL == 6) };
        const { assert!(MAX_COLLAPSIBLE_NESTING >= 16) };
        const { assert!(MAX_BRACKET_DEPTH >= 2) };
        const { assert!(MAX_LIST_MARKER_DIGITS <= 9) };
        const { assert!(MAX_INPUT_LEN <= u32::MAX as usize) };
    }
}
