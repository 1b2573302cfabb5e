// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scroll-position driven state.
//!
//! The viewport is an injected [`ViewportSource`] so the tracker can run
//! against a real page or a scripted fake. Scroll notifications only mark the
//! tracker dirty; the position is sampled at most once per animation frame in
//! [`ScrollPhaseTracker::on_frame`].

use crate::lifecycle::{Lifecycle, Motion};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Read access to the host viewport
pub trait ViewportSource {
    /// Document scroll offset of the viewport top, in pixels
    fn scroll_offset(&self) -> f32;

    /// Viewport height in pixels
    fn viewport_height(&self) -> f32;
}

/// Plain viewport geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    /// Document scroll offset of the viewport top
    pub scroll_offset: f32,
    /// Viewport height
    pub viewport_height: f32,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            scroll_offset: 0.0,
            viewport_height: 900.0,
        }
    }
}

/// Cloneable viewport handle shared between a scroll producer and readers
#[derive(Debug, Clone, Default)]
pub struct SharedViewport {
    inner: Arc<RwLock<ViewportState>>,
}

impl SharedViewport {
    /// Create a viewport of the given height scrolled to the top
    pub fn new(viewport_height: f32) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ViewportState {
                scroll_offset: 0.0,
                viewport_height,
            })),
        }
    }

    /// Jump to an absolute offset (clamped at 0)
    pub fn scroll_to(&self, offset: f32) {
        self.inner.write().scroll_offset = offset.max(0.0);
    }

    /// Scroll by a relative amount
    pub fn scroll_by(&self, delta: f32) {
        let mut state = self.inner.write();
        state.scroll_offset = (state.scroll_offset + delta).max(0.0);
    }

    /// Change the viewport height
    pub fn resize(&self, viewport_height: f32) {
        self.inner.write().viewport_height = viewport_height;
    }

    /// Copy of the current geometry
    pub fn state(&self) -> ViewportState {
        *self.inner.read()
    }
}

impl ViewportSource for SharedViewport {
    fn scroll_offset(&self) -> f32 {
        self.inner.read().scroll_offset
    }

    fn viewport_height(&self) -> f32 {
        self.inner.read().viewport_height
    }
}

impl ViewportSource for ViewportState {
    fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    fn viewport_height(&self) -> f32 {
        self.viewport_height
    }
}

/// "Element edge meets a line in the viewport" condition.
///
/// `Anchor::new(top, 0.4)` is satisfied once the document position `top` has
/// scrolled up to 40% of the viewport height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    /// Document position of the element edge
    pub element_offset: f32,
    /// Line in the viewport as a fraction of its height (0 = top, 1 = bottom)
    pub viewport_fraction: f32,
}

impl Anchor {
    /// Create an anchor
    pub fn new(element_offset: f32, viewport_fraction: f32) -> Self {
        Self {
            element_offset,
            viewport_fraction,
        }
    }

    /// Scroll offset at which the anchor is reached
    pub fn threshold(&self, viewport_height: f32) -> f32 {
        self.element_offset - self.viewport_fraction * viewport_height
    }
}

/// Entry/exit band of one card
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    /// Crossing this downward activates the card
    pub entry: Anchor,
    /// End of the card's settling band
    pub exit: Anchor,
}

impl Trigger {
    /// Trigger for an element whose top is at `element_top`
    pub fn new(element_top: f32, entry_fraction: f32, exit_fraction: f32) -> Self {
        Self {
            entry: Anchor::new(element_top, entry_fraction),
            exit: Anchor::new(element_top, exit_fraction),
        }
    }
}

/// Position of a card relative to the active phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardPhase {
    /// Already scrolled past, visually receded
    Past,
    /// The active card
    Current,
    /// Not reached yet
    Future,
}

/// Visual state of a stacking card
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardStyle {
    /// Uniform scale
    pub scale: f32,
    /// Opacity (0.0 - 1.0)
    pub opacity: f32,
    /// Blur radius in pixels
    pub blur_px: f32,
    /// Paint order
    pub z_index: i32,
}

impl CardStyle {
    fn for_phase(phase: CardPhase, index: usize) -> Self {
        let z_index = index as i32 + 1;
        match phase {
            CardPhase::Past => Self {
                scale: 0.95,
                opacity: 0.5,
                blur_px: 4.0,
                z_index,
            },
            CardPhase::Current | CardPhase::Future => Self {
                scale: 1.0,
                opacity: 1.0,
                blur_px: 0.0,
                z_index,
            },
        }
    }
}

/// Maps scroll position to the active card among ordered triggers
#[derive(Debug)]
pub struct ScrollPhaseTracker<V> {
    source: V,
    triggers: Vec<Trigger>,
    active: usize,
    /// Offset sampled on the previous frame
    last_offset: Option<f32>,
    last_height: f32,
    dirty: bool,
    lifecycle: Lifecycle,
}

impl<V: ViewportSource> ScrollPhaseTracker<V> {
    /// Create a tracker reading from `source`
    pub fn new(source: V) -> Self {
        Self {
            source,
            triggers: Vec::new(),
            active: 0,
            last_offset: None,
            last_height: 0.0,
            dirty: false,
            lifecycle: Lifecycle::Idle,
        }
    }

    /// Register the next card's trigger; returns its index
    pub fn register(&mut self, trigger: Trigger) -> usize {
        self.triggers.push(trigger);
        self.dirty = true;
        self.triggers.len() - 1
    }

    /// Builder form of [`Self::register`]
    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.register(trigger);
        self
    }

    /// Note that the viewport scrolled. Cheap; resolved on the next frame.
    pub fn notify_scroll(&mut self) {
        if self.lifecycle.is_running() {
            self.dirty = true;
        }
    }

    /// Note that the viewport was resized
    pub fn notify_resize(&mut self) {
        self.notify_scroll();
    }

    /// Sample the viewport and resolve trigger crossings.
    ///
    /// Returns true if the active index changed.
    pub fn on_frame(&mut self) -> bool {
        if !self.lifecycle.is_running() || !self.dirty {
            return false;
        }
        self.dirty = false;

        let offset = self.source.scroll_offset();
        let height = self.source.viewport_height();
        // Before the first sample everything at or above the current offset
        // counts as crossed on the way down.
        let previous = self.last_offset.unwrap_or(f32::NEG_INFINITY);
        let resized =
            self.last_offset.is_some() && (height - self.last_height).abs() > f32::EPSILON;
        self.last_offset = Some(offset);
        self.last_height = height;

        let before = self.active;
        if resized {
            // Thresholds moved under the viewport; resync from scratch
            self.active = self.satisfied_index(offset, height);
        } else if offset > previous {
            let mut crossed: Vec<(f32, usize)> = self
                .triggers
                .iter()
                .enumerate()
                .map(|(i, t)| (t.entry.threshold(height), i))
                .filter(|(threshold, _)| previous < *threshold && *threshold <= offset)
                .collect();
            crossed.sort_by(|a, b| a.0.total_cmp(&b.0));
            if let Some(&(_, index)) = crossed.last() {
                self.active = index;
            }
        } else if offset < previous {
            let mut crossed: Vec<(f32, usize)> = self
                .triggers
                .iter()
                .enumerate()
                .map(|(i, t)| (t.entry.threshold(height), i))
                .filter(|(threshold, _)| offset < *threshold && *threshold <= previous)
                .collect();
            crossed.sort_by(|a, b| b.0.total_cmp(&a.0));
            if let Some(&(_, index)) = crossed.last() {
                self.active = index.saturating_sub(1);
            }
        }

        if self.active != before {
            tracing::debug!(from = before, to = self.active, offset, "scroll phase changed");
            true
        } else {
            false
        }
    }

    /// Highest trigger whose entry line is at or above `offset`, else 0
    fn satisfied_index(&self, offset: f32, height: f32) -> usize {
        self.triggers
            .iter()
            .rposition(|t| t.entry.threshold(height) <= offset)
            .unwrap_or(0)
    }

    /// Index of the active card (0 when nothing has been crossed)
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Number of registered triggers
    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    /// Phase of card `index` relative to the active card
    pub fn card_phase(&self, index: usize) -> CardPhase {
        match index.cmp(&self.active) {
            std::cmp::Ordering::Less => CardPhase::Past,
            std::cmp::Ordering::Equal => CardPhase::Current,
            std::cmp::Ordering::Greater => CardPhase::Future,
        }
    }

    /// Visual state of card `index`
    pub fn card_style(&self, index: usize) -> CardStyle {
        CardStyle::for_phase(self.card_phase(index), index)
    }

    /// Progress through card `index`'s band between its entry and exit
    /// thresholds, as of the last frame (0.0 - 1.0).
    pub fn band_progress(&self, index: usize) -> f32 {
        let (Some(trigger), Some(offset)) = (self.triggers.get(index), self.last_offset) else {
            return 0.0;
        };
        let entry = trigger.entry.threshold(self.last_height);
        let exit = trigger.exit.threshold(self.last_height);
        if (exit - entry).abs() < f32::EPSILON {
            return if offset >= entry { 1.0 } else { 0.0 };
        }
        ((offset - entry) / (exit - entry)).clamp(0.0, 1.0)
    }

    /// The viewport source
    pub fn source(&self) -> &V {
        &self.source
    }
}

impl<V: ViewportSource> Motion for ScrollPhaseTracker<V> {
    fn start(&mut self) {
        if self.lifecycle.start() {
            self.active = 0;
            self.last_offset = None;
            self.dirty = true;
        }
    }

    fn stop(&mut self) {
        if self.lifecycle.stop() {
            self.dirty = false;
        }
    }

    /// Frame callback; the elapsed time is irrelevant to scroll state.
    fn update(&mut self, _dt: Duration) -> bool {
        self.on_frame()
    }

    fn is_running(&self) -> bool {
        self.lifecycle.is_running()
    }
}

/// Linear scroll-linked progress between two anchors (parallax "scrub")
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrubRange {
    /// Progress is 0 at and before this anchor
    pub start: Anchor,
    /// Progress is 1 at and after this anchor
    pub end: Anchor,
}

impl ScrubRange {
    /// Create a scrub range
    pub fn new(start: Anchor, end: Anchor) -> Self {
        Self { start, end }
    }

    /// Current progress (0.0 - 1.0)
    pub fn progress(&self, source: &impl ViewportSource) -> f32 {
        let height = source.viewport_height();
        let start = self.start.threshold(height);
        let end = self.end.threshold(height);
        let span = end - start;
        if span <= 0.0 {
            return if source.scroll_offset() >= start { 1.0 } else { 0.0 };
        }
        ((source.scroll_offset() - start) / span).clamp(0.0, 1.0)
    }
}

/// One-shot trigger that fires the first time its anchor is reached
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevealTrigger {
    anchor: Anchor,
    fired: bool,
}

impl RevealTrigger {
    /// Create an unfired trigger
    pub fn new(anchor: Anchor) -> Self {
        Self {
            anchor,
            fired: false,
        }
    }

    /// Returns true exactly once, on the first check at or past the anchor
    pub fn check(&mut self, source: &impl ViewportSource) -> bool {
        if self.fired {
            return false;
        }
        if source.scroll_offset() >= self.anchor.threshold(source.viewport_height()) {
            self.fired = true;
            return true;
        }
        false
    }

    /// Whether the trigger has fired
    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Re-arm the trigger
    pub fn rearm(&mut self) {
        self.fired = false;
    }
}

/// Boolean that is set while the scroll offset is past a threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollFlag {
    /// Offset that must be exceeded
    pub threshold: f32,
}

impl ScrollFlag {
    /// Create a flag
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Whether the flag is set for the current offset
    pub fn is_set(&self, source: &impl ViewportSource) -> bool {
        source.scroll_offset() > self.threshold
    }
}
