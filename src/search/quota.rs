//! Time limits for search attempts.

use std::time::{Duration, Instant};

/// A computational quota the search polls between moves.
pub trait Quota {
    /// Returns `true` when the computation should stop.
    fn is_reached(&self) -> bool;
}

/// A wall-clock deadline.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use pickup_routing::search::{Deadline, Quota};
///
/// let deadline = Deadline::after(Duration::ZERO);
/// assert!(deadline.is_reached());
///
/// let deadline = Deadline::after(Duration::from_secs(60));
/// assert!(!deadline.is_reached());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    // `None` when the budget overflows the clock
    at: Option<Instant>,
}

impl Deadline {
    /// A deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now().checked_add(budget),
        }
    }

    /// The earlier of `self` and a deadline `budget` from now.
    pub fn within(self, budget: Duration) -> Self {
        self.min(Self::after(budget))
    }

    /// The earlier of two deadlines.
    pub fn min(self, other: Self) -> Self {
        match (self.at, other.at) {
            (Some(a), Some(b)) if b < a => other,
            (None, Some(_)) => other,
            _ => self,
        }
    }
}

impl Quota for Deadline {
    fn is_reached(&self) -> bool {
        self.at.is_some_and(|at| Instant::now() >= at)
    }
}

/// A quota that is never reached.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbounded;

impl Quota for Unbounded {
    fn is_reached(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_picks_earlier() {
        let short = Deadline::after(Duration::from_millis(10));
        let long = Deadline::after(Duration::from_secs(10));
        assert_eq!(long.min(short), short);
        assert_eq!(short.min(long), short);
        assert!(long.within(Duration::ZERO).is_reached());
    }

    #[test]
    fn test_unbounded() {
        assert!(!Unbounded.is_reached());
        assert!(!Deadline::after(Duration::MAX).is_reached());
    }
}
