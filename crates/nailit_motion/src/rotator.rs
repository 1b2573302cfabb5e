// SPDX-License-Identifier: MIT OR Apache-2.0
//! Cyclic rotation of a fixed list on an interval.
//!
//! Drives the hold-setting card shuffler, the design showcase and the adhesion
//! tabs. Each interval the head item moves to the tail; renderers derive
//! per-slot styling purely from position via [`StackDepth`].

use crate::lifecycle::{Lifecycle, Motion};
use crate::timer::Timer;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Shortest interval a rotator accepts
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Visual depth of a slot in a stacked card pile.
///
/// Depends only on the slot position, never on which item occupies it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackDepth {
    /// Vertical offset from the top of the pile, in pixels
    pub offset_px: f32,
    /// Uniform scale
    pub scale: f32,
    /// Opacity (0.0 - 1.0)
    pub opacity: f32,
    /// Paint order, higher is on top
    pub z_index: i32,
}

impl StackDepth {
    /// Depth for the slot at `position` (0 is the top card)
    pub fn at(position: usize) -> Self {
        let i = position as f32;
        Self {
            offset_px: 15.0 * i,
            scale: 1.0 - 0.05 * i,
            opacity: (1.0 - 0.2 * i).max(0.0),
            z_index: 10 - position as i32,
        }
    }
}

/// A list that rotates its head to the tail every `interval`
#[derive(Debug, Clone)]
pub struct Rotator<T> {
    label: String,
    initial: Vec<T>,
    items: VecDeque<T>,
    /// Index (in the initial order) of the current head
    head_index: usize,
    interval: Duration,
    timer: Timer,
    lifecycle: Lifecycle,
    revision: u64,
}

impl<T: Clone> Rotator<T> {
    /// Create a rotator over `items`, advancing every `interval` once started
    pub fn new(label: impl Into<String>, items: Vec<T>, interval: Duration) -> Self {
        Self {
            label: label.into(),
            items: items.iter().cloned().collect(),
            initial: items,
            head_index: 0,
            interval: interval.max(MIN_INTERVAL),
            timer: Timer::new(),
            lifecycle: Lifecycle::Idle,
            revision: 0,
        }
    }

    /// Move the head item to the tail.
    ///
    /// Returns false (and changes nothing) for lists of length 0 or 1.
    pub fn advance(&mut self) -> bool {
        if self.items.len() <= 1 {
            return false;
        }
        self.items.rotate_left(1);
        self.head_index = (self.head_index + 1) % self.items.len();
        self.revision += 1;
        tracing::debug!(rotator = %self.label, head = self.head_index, "rotated");
        true
    }

    /// Restore the initial order
    pub fn reset(&mut self) {
        self.items = self.initial.iter().cloned().collect();
        self.head_index = 0;
        self.revision += 1;
    }

    /// Rotate so the item at `index` of the initial order becomes the head.
    ///
    /// The running interval is left untouched. Returns false for an
    /// out-of-range index.
    pub fn select(&mut self, index: usize) -> bool {
        let len = self.items.len();
        if index >= len {
            tracing::warn!(rotator = %self.label, index, len, "ignoring out-of-range selection");
            return false;
        }
        let steps = (index + len - self.head_index) % len;
        if steps == 0 {
            return false;
        }
        self.items.rotate_left(steps);
        self.head_index = index;
        self.revision += 1;
        true
    }
}

impl<T> Rotator<T> {
    /// Items in current order
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Item count
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The head item
    pub fn current(&self) -> Option<&T> {
        self.items.front()
    }

    /// Index of the head item in the initial order
    pub fn current_index(&self) -> usize {
        self.head_index
    }

    /// Rotation interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Fraction of the current interval that has elapsed (0.0 - 1.0)
    pub fn progress(&self) -> f32 {
        match self.timer.remaining() {
            Some(remaining) => {
                let left = remaining.as_secs_f64() / self.interval.as_secs_f64();
                (1.0 - left).clamp(0.0, 1.0) as f32
            }
            None => 0.0,
        }
    }

    /// Counter bumped on every change of order
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Label used in logs
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<T: Clone> Motion for Rotator<T> {
    fn start(&mut self) {
        if !self.lifecycle.start() {
            return;
        }
        self.reset();
        self.timer.schedule(self.interval);
        tracing::debug!(rotator = %self.label, interval_ms = self.interval.as_millis() as u64, "started");
    }

    fn stop(&mut self) {
        if self.lifecycle.stop() {
            self.timer.cancel();
            tracing::debug!(rotator = %self.label, "stopped");
        }
    }

    fn update(&mut self, dt: Duration) -> bool {
        if !self.lifecycle.is_running() {
            return false;
        }
        let mut changed = false;
        let mut left = dt;
        while let Some(overshoot) = self.timer.advance(left) {
            changed |= self.advance();
            self.timer.schedule(self.interval);
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

    fn abc() -> Rotator<char> {
        Rotator::new("test", vec!['A', 'B', 'C'], Duration::from_millis(2000))
    }

    fn order(rotator: &Rotator<char>) -> Vec<char> {
        rotator.items().copied().collect()
    }

    #[test]
    fn test_single_advance() {
        let mut rotator = abc();
        assert!(rotator.advance());
        assert_eq!(order(&rotator), vec!['B', 'C', 'A']);
        assert_eq!(rotator.current(), Some(&'B'));
        assert_eq!(rotator.current_index(), 1);
    }

    #[test]
    fn test_full_cycle_restores_order() {
        for len in 1..=6 {
            let items: Vec<usize> = (0..len).collect();
            let mut rotator = Rotator::new("cycle", items.clone(), Duration::from_secs(1));
            for _ in 0..len {
                rotator.advance();
            }
            assert_eq!(rotator.items().copied().collect::<Vec<_>>(), items);
            assert_eq!(rotator.current_index(), 0);
        }
    }

    #[test]
    fn test_short_lists_are_noops() {
        let mut empty: Rotator<u8> = Rotator::new("empty", Vec::new(), Duration::from_secs(1));
        assert!(!empty.advance());
        assert!(empty.is_empty());

        let mut single = Rotator::new("single", vec![7], Duration::from_secs(1));
        assert!(!single.advance());
        assert_eq!(single.items().copied().collect::<Vec<_>>(), vec![7]);
        assert_eq!(single.revision(), 0);
    }

    #[test]
    fn test_reset() {
        let mut rotator = abc();
        rotator.advance();
        rotator.advance();
        rotator.reset();
        assert_eq!(order(&rotator), vec!['A', 'B', 'C']);
        assert_eq!(rotator.current_index(), 0);
    }

    #[test]
    fn test_interval_driven() {
        let mut rotator = abc();
        // Not started: time passes without effect
        assert!(!rotator.update(Duration::from_secs(10)));
        assert_eq!(order(&rotator), vec!['A', 'B', 'C']);

        rotator.start();
        assert!(!rotator.update(Duration::from_millis(1999)));
        assert!(rotator.update(Duration::from_millis(1)));
        assert_eq!(order(&rotator), vec!['B', 'C', 'A']);

        // A long frame catches up on every missed interval
        assert!(rotator.update(Duration::from_millis(4000)));
        assert_eq!(order(&rotator), vec!['A', 'B', 'C']);
    }

    #[test]
    fn test_stop_prevents_updates() {
        let mut rotator = abc();
        rotator.start();
        rotator.stop();
        rotator.stop();
        assert!(!rotator.update(Duration::from_secs(60)));
        assert_eq!(order(&rotator), vec!['A', 'B', 'C']);
        assert!(!rotator.is_running());
    }

    #[test]
    fn test_restart_begins_from_initial_order() {
        let mut rotator = abc();
        rotator.start();
        rotator.update(Duration::from_millis(2000));
        rotator.stop();
        rotator.start();
        assert_eq!(order(&rotator), vec!['A', 'B', 'C']);
        assert_eq!(rotator.progress(), 0.0);
    }

    #[test]
    fn test_select() {
        let mut rotator = abc();
        assert!(rotator.select(2));
        assert_eq!(order(&rotator), vec!['C', 'A', 'B']);
        assert_eq!(rotator.current_index(), 2);
        assert!(!rotator.select(2));
        assert!(!rotator.select(5));
        assert!(rotator.select(0));
        assert_eq!(order(&rotator), vec!['A', 'B', 'C']);
    }

    #[test]
    fn test_progress() {
        let mut rotator = abc();
        assert_eq!(rotator.progress(), 0.0);
        rotator.start();
        rotator.update(Duration::from_millis(500));
        assert!((rotator.progress() - 0.25).abs() < 1e-4);
    }

    #[test]
    fn test_stack_depth_is_positional() {
        let top = StackDepth::at(0);
        assert_eq!(top.offset_px, 0.0);
        assert_eq!(top.scale, 1.0);
        assert_eq!(top.opacity, 1.0);
        assert_eq!(top.z_index, 10);

        let third = StackDepth::at(2);
        assert_eq!(third.offset_px, 30.0);
        assert!((third.scale - 0.9).abs() < 1e-6);
        assert!((third.opacity - 0.6).abs() < 1e-6);
        assert_eq!(third.z_index, 8);
    }
}
