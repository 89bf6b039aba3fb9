//! Expected call-count ranges for verification.

use std::fmt;

/// An inclusive range of acceptable invocation counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Times {
    min: usize,
    max: usize,
}

impl Times {
    pub fn never() -> Self {
        Times::exactly(0)
    }

    pub fn once() -> Self {
        Times::exactly(1)
    }

    pub fn exactly(n: usize) -> Self {
        Times { min: n, max: n }
    }

    pub fn at_least(n: usize) -> Self {
        Times {
            min: n,
            max: usize::MAX,
        }
    }

    pub fn at_least_once() -> Self {
        Times::at_least(1)
    }

    pub fn at_most(n: usize) -> Self {
        Times { min: 0, max: n }
    }

    pub fn at_most_once() -> Self {
        Times::at_most(1)
    }

    /// Between `from` and `to`, both inclusive. Bounds may be given in
    /// either order.
    pub fn between(from: usize, to: usize) -> Self {
        Times {
            min: from.min(to),
            max: from.max(to),
        }
    }

    pub fn contains(&self, count: usize) -> bool {
        self.min <= count && count <= self.max
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        "time"
    } else {
        "times"
    }
}

impl fmt::Display for Times {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (0, 0) => write!(f, "never"),
            (min, max) if min == max => write!(f, "exactly {} {}", min, plural(min)),
            (min, usize::MAX) => write!(f, "at least {} {}", min, plural(min)),
            (0, max) => write!(f, "at most {} {}", max, plural(max)),
            (min, max) => write!(f, "between {} and {} times", min, max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges() {
        assert!(Times::never().contains(0));
        assert!(!Times::never().contains(1));
        assert!(Times::once().contains(1));
        assert!(!Times::once().contains(2));
        assert!(Times::at_least_once().contains(100));
        assert!(!Times::at_least(2).contains(1));
        assert!(Times::at_most_once().contains(0));
        assert!(Times::between(4, 2).contains(3));
        assert!(!Times::between(2, 4).contains(5));
    }

    #[test]
    fn test_display() {
        assert_eq!(Times::never().to_string(), "never");
        assert_eq!(Times::once().to_string(), "exactly 1 time");
        assert_eq!(Times::at_least(2).to_string(), "at least 2 times");
        assert_eq!(Times::at_most(3).to_string(), "at most 3 times");
        assert_eq!(Times::between(1, 3).to_string(), "between 1 and 3 times");
    }
}
