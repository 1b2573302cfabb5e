// SPDX-License-Identifier: MIT OR Apache-2.0
//! Typewriter text reveal.
//!
//! Reveals a fixed string one character at a time with a randomized delay
//! between characters, holds the full text for a dwell period, then clears and
//! types it again.

use crate::lifecycle::{Lifecycle, Motion};
use crate::timer::Timer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const MIN_DELAY: Duration = Duration::from_millis(1);

/// Typewriter phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TypewriterPhase {
    /// Revealing characters
    #[default]
    Typing,
    /// Full text shown, waiting for the dwell to elapse
    Paused,
}

/// Bounds of the randomized per-character delay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingCadence {
    /// Shortest delay between characters
    pub min: Duration,
    /// Longest delay between characters
    pub max: Duration,
}

impl TypingCadence {
    /// Cadence with delays drawn from `[min, max]`
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Cadence with a constant delay
    pub fn fixed(delay: Duration) -> Self {
        Self {
            min: delay,
            max: delay,
        }
    }

    fn sample(&self, rng: &mut StdRng) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }
}

impl Default for TypingCadence {
    fn default() -> Self {
        Self::new(Duration::from_millis(20), Duration::from_millis(70))
    }
}

/// Looping typewriter over a fixed source text
#[derive(Debug, Clone)]
pub struct Typewriter {
    source: String,
    /// Number of characters revealed
    cursor: usize,
    /// Byte offset in `source` matching `cursor`
    byte_end: usize,
    char_count: usize,
    phase: TypewriterPhase,
    cadence: TypingCadence,
    dwell: Duration,
    timer: Timer,
    rng: StdRng,
    lifecycle: Lifecycle,
}

impl Typewriter {
    /// Create a typewriter with an entropy-seeded cadence
    pub fn new(source: impl Into<String>, cadence: TypingCadence, dwell: Duration) -> Self {
        Self::with_rng(source, cadence, dwell, StdRng::from_entropy())
    }

    /// Create a typewriter whose cadence is reproducible from `seed`
    pub fn seeded(source: impl Into<String>, cadence: TypingCadence, dwell: Duration, seed: u64) -> Self {
        Self::with_rng(source, cadence, dwell, StdRng::seed_from_u64(seed))
    }

    fn with_rng(source: impl Into<String>, cadence: TypingCadence, dwell: Duration, rng: StdRng) -> Self {
        let source = source.into();
        let char_count = source.chars().count();
        let mut typewriter = Self {
            source,
            cursor: 0,
            byte_end: 0,
            char_count,
            phase: TypewriterPhase::Typing,
            cadence,
            dwell,
            timer: Timer::new(),
            rng,
            lifecycle: Lifecycle::Idle,
        };
        typewriter.pause_if_complete();
        typewriter
    }

    /// Reveal the next character.
    ///
    /// Does nothing while paused. Returns true if a character was revealed.
    pub fn tick(&mut self) -> bool {
        if self.phase != TypewriterPhase::Typing {
            return false;
        }
        let Some(ch) = self.source[self.byte_end..].chars().next() else {
            self.pause_if_complete();
            return false;
        };
        self.byte_end += ch.len_utf8();
        self.cursor += 1;
        self.pause_if_complete();
        true
    }

    /// Clear the buffer and return to typing
    pub fn restart(&mut self) {
        self.cursor = 0;
        self.byte_end = 0;
        self.phase = TypewriterPhase::Typing;
        self.pause_if_complete();
    }

    fn pause_if_complete(&mut self) {
        if self.cursor == self.char_count {
            self.phase = TypewriterPhase::Paused;
        }
    }

    /// Arm the single timer for whatever the current phase waits on
    fn schedule_next(&mut self) {
        let delay = match self.phase {
            TypewriterPhase::Typing => self.cadence.sample(&mut self.rng),
            TypewriterPhase::Paused => self.dwell,
        };
        // A zero delay would let one update spin forever
        self.timer.schedule(delay.max(MIN_DELAY));
    }

    /// Revealed text, always the first `cursor` characters of the source
    pub fn visible(&self) -> &str {
        &self.source[..self.byte_end]
    }

    /// Full source text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of characters revealed
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current phase
    pub fn phase(&self) -> TypewriterPhase {
        self.phase
    }

    /// Whether a timer is pending
    pub fn has_pending_timer(&self) -> bool {
        self.timer.is_pending()
    }
}

impl Motion for Typewriter {
    fn start(&mut self) {
        if !self.lifecycle.start() {
            return;
        }
        self.restart();
        self.schedule_next();
        tracing::debug!(chars = self.char_count, "typewriter started");
    }

    fn stop(&mut self) {
        if self.lifecycle.stop() {
            self.timer.cancel();
            tracing::debug!(cursor = self.cursor, "typewriter stopped");
        }
    }

    fn update(&mut self, dt: Duration) -> bool {
        if !self.lifecycle.is_running() {
            return false;
        }
        let mut changed = false;
        let mut left = dt;
        while let Some(overshoot) = self.timer.advance(left) {
            match self.phase {
                TypewriterPhase::Typing => {
                    changed |= self.tick();
                }
                TypewriterPhase::Paused => {
                    self.restart();
                    changed = true;
                }
            }
            self.schedule_next();
            left = overshoot;
        }
        changed
    }

    fn is_running(&self) -> bool {
        self.lifecycle.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DWELL: Duration = Duration::from_millis(5000);

    fn fixed(source: &str) -> Typewriter {
        Typewriter::seeded(source, TypingCadence::fixed(Duration::from_millis(50)), DWELL, 7)
    }

    #[test]
    fn test_ok_scenario() {
        let mut typewriter = fixed("OK");
        assert!(typewriter.tick());
        assert_eq!(typewriter.visible(), "O");
        assert_eq!(typewriter.phase(), TypewriterPhase::Typing);
        assert!(typewriter.tick());
        assert_eq!(typewriter.visible(), "OK");
        assert_eq!(typewriter.phase(), TypewriterPhase::Paused);

        // Further ticks while paused do nothing
        assert!(!typewriter.tick());
        assert_eq!(typewriter.cursor(), 2);
    }

    #[test]
    fn test_ok_scenario_with_dwell() {
        let mut typewriter = fixed("OK");
        typewriter.start();
        typewriter.update(Duration::from_millis(100));
        assert_eq!(typewriter.visible(), "OK");
        assert_eq!(typewriter.phase(), TypewriterPhase::Paused);

        assert!(!typewriter.update(DWELL - Duration::from_millis(1)));
        assert_eq!(typewriter.visible(), "OK");

        assert!(typewriter.update(Duration::from_millis(1)));
        assert_eq!(typewriter.visible(), "");
        assert_eq!(typewriter.cursor(), 0);
        assert_eq!(typewriter.phase(), TypewriterPhase::Typing);
    }

    #[test]
    fn test_buffer_tracks_cursor_and_cursor_is_monotonic() {
        let text = "Health status: 100% \u{2713}";
        let mut typewriter = Typewriter::seeded(text, TypingCadence::default(), DWELL, 42);
        typewriter.start();

        let mut last = 0;
        for _ in 0..400 {
            typewriter.update(Duration::from_millis(16));
            let prefix: String = text.chars().take(typewriter.cursor()).collect();
            assert_eq!(typewriter.visible(), prefix);
            if typewriter.phase() == TypewriterPhase::Typing && typewriter.cursor() != 0 {
                assert!(typewriter.cursor() >= last);
            }
            last = typewriter.cursor();
            assert!(typewriter.has_pending_timer());
        }
    }

    #[test]
    fn test_cadence_bounds() {
        let cadence = TypingCadence::new(Duration::from_millis(70), Duration::from_millis(20));
        assert_eq!(cadence.min, Duration::from_millis(20));
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let delay = cadence.sample(&mut rng);
            assert!(delay >= cadence.min && delay <= cadence.max);
        }
    }

    #[test]
    fn test_cadence_bounds_beyond_u64_micros() {
        // More microseconds than a u64 holds
        let min = Duration::from_secs(20_000_000_000_000);
        let cadence = TypingCadence::new(min, min + Duration::from_secs(5));
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let delay = cadence.sample(&mut rng);
            assert!(delay >= cadence.min && delay <= cadence.max);
        }
    }

    #[test]
    fn test_full_loop_resets_to_zero() {
        let mut typewriter = fixed("abc");
        typewriter.start();
        // 3 characters at 50ms, then the dwell, then the restart
        typewriter.update(Duration::from_millis(150));
        assert_eq!(typewriter.phase(), TypewriterPhase::Paused);
        typewriter.update(DWELL);
        assert_eq!(typewriter.cursor(), 0);
        assert_eq!(typewriter.phase(), TypewriterPhase::Typing);
        typewriter.update(Duration::from_millis(50));
        assert_eq!(typewriter.visible(), "a");
    }

    #[test]
    fn test_empty_source_pauses_immediately() {
        let mut typewriter = fixed("");
        assert_eq!(typewriter.phase(), TypewriterPhase::Paused);
        typewriter.start();
        assert!(typewriter.update(DWELL));
        assert_eq!(typewriter.phase(), TypewriterPhase::Paused);
        assert_eq!(typewriter.visible(), "");
    }

    #[test]
    fn test_stop_cancels_timer() {
        let mut typewriter = fixed("OK");
        typewriter.start();
        typewriter.update(Duration::from_millis(50));
        typewriter.stop();
        assert!(!typewriter.has_pending_timer());
        assert!(!typewriter.update(Duration::from_secs(10)));
        assert_eq!(typewriter.visible(), "O");

        typewriter.start();
        assert_eq!(typewriter.visible(), "");
        assert!(typewriter.has_pending_timer());
    }
}
