use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

static LAST_NONCE: AtomicU64 = AtomicU64::new(0);

/// Handle on the process-wide nonce sequence.
///
/// Values are wall-clock milliseconds, bumped by one whenever the clock has
/// not advanced past the last value handed out. Every handle shares one
/// counter, so each call returns a value strictly greater than any earlier
/// call in the process, whichever handle or thread made it. A clock that
/// jumps backwards is absorbed by the bump rather than detected.
#[derive(Debug, Clone, Copy)]
pub struct NonceGenerator {
    last: &'static AtomicU64,
}

impl Default for NonceGenerator {
    fn default() -> Self {
        Self { last: &LAST_NONCE }
    }
}

impl NonceGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next nonce as a number
    pub fn next_value(&self) -> u64 {
        let now = Self::now_millis();
        let previous = self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        now.max(previous + 1)
    }

    /// Next nonce in wire form
    pub fn next_nonce(&self) -> String {
        self.next_value().to_string()
    }

    fn now_millis() -> u64 {
        Utc::now().timestamp_millis().max(0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_sequential_nonces_increase() {
        let generator = NonceGenerator::new();
        let values: Vec<u64> = (0..1000).map(|_| generator.next_value()).collect();
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_nonce_tracks_wall_clock() {
        let before = Utc::now().timestamp_millis() as u64;
        let nonce: u64 = NonceGenerator::new().next_nonce().parse().unwrap();
        assert!(nonce >= before);
    }

    #[test]
    fn test_concurrent_nonces_never_collide() {
        let generator = Arc::new(NonceGenerator::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let generator = Arc::clone(&generator);
                thread::spawn(move || (0..500).map(|_| generator.next_value()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for value in handle.join().unwrap() {
                assert!(seen.insert(value), "duplicate nonce {}", value);
            }
        }
        assert_eq!(seen.len(), 8 * 500);
    }

    #[test]
    fn test_separate_generators_share_one_sequence() {
        let first = NonceGenerator::new();
        let second = NonceGenerator::new();

        // Run the first well ahead of the wall clock
        let last_of_first = (0..5000).map(|_| first.next_value()).last().unwrap();
        let next_of_second = second.next_value();

        assert!(next_of_second > last_of_first);
        assert!(first.next_value() > next_of_second);
    }
}
