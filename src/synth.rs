//! Synthetic keystroke streams
//!
//! Generates timed key sequences that look like a badge scanner (tight,
//! jittery bursts) or a person typing, and replays them through a
//! [`ScanListener`] on a virtual clock.

use crate::scanner::{ScanKey, ScanListener};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

/// Inter-key delay of a typical USB badge scanner (milliseconds)
pub const SCANNER_DELAY_MS: RangeInclusive<u64> = 5..=25;

/// Inter-key delay of someone typing at a desk (milliseconds)
pub const HUMAN_DELAY_MS: RangeInclusive<u64> = 80..=250;

/// A key and its arrival offset from the start of the stream
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimedKey {
    pub offset: Duration,
    pub key: ScanKey,
}

/// Random alphanumeric code of `len` characters
pub fn random_code<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len).map(|_| rng.sample(Alphanumeric) as char).collect()
}

/// Keys of `code` with inter-key delays drawn from `delay_ms`,
/// optionally terminated by Enter
pub fn scanner_burst<R: Rng>(
    code: &str,
    rng: &mut R,
    delay_ms: RangeInclusive<u64>,
    with_enter: bool,
) -> Vec<TimedKey> {
    let keys = code
        .chars()
        .map(ScanKey::from_char)
        .chain(with_enter.then_some(ScanKey::Enter));
    timed(keys, rng, delay_ms)
}

/// Keys of `text` typed by hand, delays drawn from `delay_ms`
pub fn human_typing<R: Rng>(
    text: &str,
    rng: &mut R,
    delay_ms: RangeInclusive<u64>,
) -> Vec<TimedKey> {
    timed(text.chars().map(ScanKey::from_char), rng, delay_ms)
}

fn timed<R, I>(keys: I, rng: &mut R, delay_ms: RangeInclusive<u64>) -> Vec<TimedKey>
where
    R: Rng,
    I: Iterator<Item = ScanKey>,
{
    let mut offset = Duration::ZERO;
    let mut stream = Vec::new();
    for (i, key) in keys.enumerate() {
        if i > 0 {
            offset += Duration::from_millis(rng.gen_range(delay_ms.clone()));
        }
        stream.push(TimedKey { offset, key });
    }
    stream
}

/// Feed `stream` into `listener` as if it started at `start`.
///
/// Pending finalize timers fire at their exact deadline when that falls
/// before the next key, and once more after the last key. Returns the
/// virtual instant at which the replay ended.
pub fn replay(listener: &mut ScanListener, start: Instant, stream: &[TimedKey]) -> Instant {
    let mut now = start;
    for timed_key in stream {
        now = start + timed_key.offset;
        fire_due(listener, now);
        listener.handle_key(timed_key.key, now);
    }
    if let Some(deadline) = listener.next_deadline() {
        now = now.max(deadline);
        listener.poll(deadline);
    }
    now
}

fn fire_due(listener: &mut ScanListener, now: Instant) {
    while let Some(deadline) = listener.next_deadline() {
        if deadline > now {
            break;
        }
        listener.poll(deadline);
    }
}
