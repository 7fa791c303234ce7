use std::time::Duration;

use crate::config::BackoffPolicy;

/// Escalating reconnect delay. Each [`next_delay`](Self::next_delay) hands
/// out the current delay and grows it for the following failure;
/// [`reset`](Self::reset) drops back to the floor.
#[derive(Debug, Clone, PartialEq)]
pub struct Backoff {
    policy: BackoffPolicy,
    current: Duration,
}

impl Backoff {
    pub fn new(policy: BackoffPolicy) -> Self {
        let current = policy.floor.min(policy.ceiling);
        Self { policy, current }
    }

    pub fn current(&self) -> Duration {
        self.current
    }

    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        let grown = self.current.as_secs_f64() * self.policy.factor;
        self.current = if !grown.is_finite() || grown >= self.policy.ceiling.as_secs_f64() {
            self.policy.ceiling
        } else {
            Duration::from_secs_f64(grown)
        };
        delay
    }

    pub fn reset(&mut self) {
        self.current = self.policy.floor.min(self.policy.ceiling);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn escalates_by_half_and_caps() {
        let mut backoff = Backoff::new(BackoffPolicy::default());
        let delays: Vec<u128> = (0..9).map(|_| backoff.next_delay().as_micros()).collect();
        assert_eq!(
            delays,
            vec![
                2_000_000, 3_000_000, 4_500_000, 6_750_000, 10_125_000, 15_187_500, 22_781_250,
                30_000_000, 30_000_000,
            ]
        );
    }

    #[test]
    fn reset_returns_to_floor() {
        let mut backoff = Backoff::new(BackoffPolicy::default());
        backoff.next_delay();
        backoff.next_delay();
        backoff.reset();
        assert_eq!(backoff.next_delay(), Duration::from_millis(2000));
    }

    proptest! {
        #[test]
        fn nth_delay_matches_closed_form(n in 0u32..40) {
            let policy = BackoffPolicy::default();
            let mut backoff = Backoff::new(policy.clone());
            for _ in 0..n {
                backoff.next_delay();
            }
            let expected = (2000.0 * 1.5f64.powi(n as i32)).min(30000.0);
            let actual = backoff.next_delay().as_secs_f64() * 1000.0;
            prop_assert!((actual - expected).abs() < 1e-3, "n={} actual={} expected={}", n, actual, expected);
            prop_assert_eq!(policy.delay_for_attempt(n).as_micros(), (expected * 1000.0).round() as u128);
        }
    }
}
