/// Identifies one asynchronous load.
///
/// Only the most recently issued token is current; completions carrying an
/// older token must be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Raw generation number.
    #[must_use]
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing [`RequestToken`]s.
#[derive(Debug, Default)]
pub struct RequestTracker {
    generation: u64,
}

impl RequestTracker {
    /// Tracker with no request issued yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier one.
    pub fn begin(&mut self) -> RequestToken {
        self.generation += 1;
        RequestToken(self.generation)
    }

    /// Whether `token` belongs to the latest request.
    #[must_use]
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.generation
    }

    /// Most recently issued token, if any.
    #[must_use]
    pub fn current(&self) -> Option<RequestToken> {
        (self.generation > 0).then_some(RequestToken(self.generation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_token_is_current() {
        let mut tracker = RequestTracker::new();
        assert_eq!(tracker.current(), None);
        let first = tracker.begin();
        assert!(tracker.is_current(first));
        let second = tracker.begin();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
        assert!(first < second);
        assert_eq!(tracker.current(), Some(second));
        assert_eq!(second.generation(), 2);
    }
}
