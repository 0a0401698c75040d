//! Throttle: decouples chunk arrival rate from render rate.
//!
//! Wake-ups come from whatever frame source the host has; the throttle only
//! lets one through per `min_interval`.

use std::time::{Duration, Instant};

/// Minimum-interval gate for render ticks.
#[derive(Debug, Clone)]
pub struct Throttle {
    /// Minimum time between processed ticks.
    min_interval: Duration,
    /// When the last tick was processed.
    last: Option<Instant>,
}

impl Throttle {
    /// Create a throttle; the first wake-up always passes.
    pub const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last: None,
        }
    }

    /// The configured interval.
    pub const fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Whether a tick may run at `now`. Records `now` when it may.
    pub fn ready(&mut self, now: Instant) -> bool {
        let due = self
            .last
            .map_or(true, |last| now.saturating_duration_since(last) >= self.min_interval);
        if due {
            self.last = Some(now);
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttle_gates_by_interval() {
        let start = Instant::now();
        let mut throttle = Throttle::new(Duration::from_millis(50));

        assert!(throttle.ready(start));
        assert!(!throttle.ready(start + Duration::from_millis(16)));
        assert!(!throttle.ready(start + Duration::from_millis(49)));
        assert!(throttle.ready(start + Duration::from_millis(50)));
        assert!(!throttle.ready(start + Duration::from_millis(90)));
        assert!(throttle.ready(start + Duration::from_millis(100)));
    }

    #[test]
    fn test_throttle_zero_interval() {
        let now = Instant::now();
        let mut throttle = Throttle::new(Duration::ZERO);
        assert!(throttle.ready(now));
        assert!(throttle.ready(now));
    }
}
