use web_time::{Duration, Instant};

/// Holds the latest scheduled value until a quiet period has passed.
///
/// Scheduling a new value cancels the previous one and restarts the
/// period, so a burst of updates yields a single delivery of the last
/// value.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    /// Debouncer with the given quiet period.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Quiet period.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending value with `value`, due `delay` after `now`.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Drop the pending value, returning it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Whether a value is waiting.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Pending value, if any, without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.pending.as_ref().map(|(value, _)| value)
    }

    /// When the pending value becomes due.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|&(_, due)| due)
    }

    /// Take the pending value if its quiet period has elapsed by `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((_, due)) if now >= due => self.cancel(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivers_after_quiet_period() {
        let start = Instant::now();
        let mut d = Debouncer::new(Duration::from_millis(75));
        d.schedule(3.0_f32, start);
        assert!(d.is_pending());
        assert_eq!(d.poll(start + Duration::from_millis(74)), None);
        assert_eq!(d.poll(start + Duration::from_millis(75)), Some(3.0));
        assert!(!d.is_pending());
        assert_eq!(d.poll(start + Duration::from_millis(200)), None);
    }

    #[test]
    fn burst_yields_only_last_value() {
        let start = Instant::now();
        let mut d = Debouncer::new(Duration::from_millis(75));
        d.schedule(4.0_f32, start);
        d.schedule(3.0, start + Duration::from_millis(10));
        d.schedule(2.0, start + Duration::from_millis(20));
        // the first deadline has passed but was superseded
        assert_eq!(d.poll(start + Duration::from_millis(80)), None);
        assert_eq!(d.peek(), Some(&2.0));
        assert_eq!(
            d.deadline(),
            Some(start + Duration::from_millis(95))
        );
        assert_eq!(d.poll(start + Duration::from_millis(95)), Some(2.0));
    }

    #[test]
    fn cancel_discards_pending() {
        let start = Instant::now();
        let mut d = Debouncer::new(Duration::ZERO);
        d.schedule("x", start);
        assert_eq!(d.cancel(), Some("x"));
        assert_eq!(d.poll(start), None);
        assert_eq!(d.delay(), Duration::ZERO);
    }
}
