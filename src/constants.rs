//! Configurable limits for the scheduler.

/// Loop resolution limits
pub mod limits {
    /// Maximum depth of nested loop subdivision. Controller nesting is
    /// expected to be shallow; exceeding this limit is treated as an
    /// internal invariant violation rather than recursing further.
    pub const MAX_LOOP_NESTING_DEPTH: usize = 32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_constants() {
        assert_eq!(limits::MAX_LOOP_NESTING_DEPTH, 32);
    }
}
