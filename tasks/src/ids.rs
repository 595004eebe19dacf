//! Identifier generation.

use rand::Rng;
use std::sync::Arc;
use tasklist_core::environment::{Clock, IdGenerator, SystemClock};

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Random characters appended after the time prefix
pub const RANDOM_SUFFIX_LEN: usize = 4;

/// Base-36 epoch milliseconds followed by random base-36 characters
///
/// The time prefix keeps ids from different milliseconds apart; the suffix
/// separates ids minted within the same millisecond (36^4 combinations).
#[derive(Clone)]
pub struct TimeRandomIds {
    clock: Arc<dyn Clock>,
}

impl TimeRandomIds {
    /// Generator reading time from `clock`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl Default for TimeRandomIds {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl IdGenerator for TimeRandomIds {
    fn next_id(&self) -> String {
        let millis = u64::try_from(self.clock.now().timestamp_millis()).unwrap_or_default();
        let mut id = to_base36(millis);
        let mut rng = rand::thread_rng();
        id.extend(
            (0..RANDOM_SUFFIX_LEN).map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())])),
        );
        id
    }
}

/// Lowercase base-36 rendering of `n`
#[must_use]
pub fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        // n % 36 < 36, the cast cannot truncate
        #[allow(clippy::cast_possible_truncation)]
        digits.push(ALPHABET[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}
