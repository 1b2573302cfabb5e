// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline step definitions.

use crate::ease::Ease;
use crate::target::{Property, TargetId};
use crate::value::PropertyValue;
use serde::{Deserialize, Serialize};

/// Where a step starts on the timeline clock, relative to what came before
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Position {
    /// At the current end of the timeline
    #[default]
    End,
    /// Together with the previous step
    WithPrevious,
    /// When the previous step ends
    AfterPrevious,
    /// Offset in seconds from the current end of the timeline (negative overlaps)
    EndOffset(f32),
}

/// What a step does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepKind {
    /// Animate properties to their end values over the duration
    Tween,
    /// Jump properties to their end values instantly
    Set,
    /// Restore the target's declared initial values
    Clear,
}

/// One scheduled property mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Animated target
    pub target: TargetId,
    /// Step kind
    pub kind: StepKind,
    /// End values
    pub changes: Vec<(Property, PropertyValue)>,
    /// Duration in seconds of one play of the step
    pub duration: f32,
    /// Position on the timeline
    pub position: Position,
    /// Extra delay in seconds after the position
    pub delay: f32,
    /// Easing curve
    pub ease: Ease,
    /// Delay in seconds between consecutive group members
    pub stagger: f32,
    /// Extra plays after the first
    pub repeat: u32,
    /// Alternate direction on every repeat
    pub yoyo: bool,
}

impl Step {
    fn new(target: impl Into<TargetId>, kind: StepKind, duration: f32) -> Self {
        Self {
            target: target.into(),
            kind,
            changes: Vec::new(),
            duration: duration.max(0.0),
            position: Position::End,
            delay: 0.0,
            ease: Ease::default(),
            stagger: 0.0,
            repeat: 0,
            yoyo: false,
        }
    }

    /// Tween `target` over `duration` seconds
    pub fn to(target: impl Into<TargetId>, duration: f32) -> Self {
        Self::new(target, StepKind::Tween, duration)
    }

    /// Set properties on `target` instantly
    pub fn set(target: impl Into<TargetId>) -> Self {
        Self::new(target, StepKind::Set, 0.0)
    }

    /// Restore `target` to its initial values instantly
    pub fn clear(target: impl Into<TargetId>) -> Self {
        Self::new(target, StepKind::Clear, 0.0)
    }

    /// Add an end value
    pub fn prop(mut self, property: Property, value: impl Into<PropertyValue>) -> Self {
        let value = value.into();
        if let Some(slot) = self.changes.iter_mut().find(|(p, _)| *p == property) {
            slot.1 = value;
        } else {
            self.changes.push((property, value));
        }
        self
    }

    /// Set the position
    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Set the delay
    pub fn delay(mut self, seconds: f32) -> Self {
        self.delay = seconds.max(0.0);
        self
    }

    /// Set the easing curve
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Set the per-member stagger
    pub fn stagger(mut self, seconds: f32) -> Self {
        self.stagger = seconds.max(0.0);
        self
    }

    /// Play back and forth, `repeat` extra times
    pub fn yoyo(mut self, repeat: u32) -> Self {
        self.yoyo = true;
        self.repeat = repeat;
        self
    }

    /// Replay `repeat` extra times in the same direction
    pub fn repeat(mut self, repeat: u32) -> Self {
        self.repeat = repeat;
        self
    }

    /// Time one member spends animating, including repeats
    pub fn member_span(&self) -> f32 {
        self.duration * (self.repeat as f32 + 1.0)
    }

    /// Time from the step start until the last member finishes
    pub fn span(&self, members: usize) -> f32 {
        self.stagger * members.saturating_sub(1) as f32 + self.member_span()
    }

    /// End value for `property`, if this step changes it
    pub fn change(&self, property: Property) -> Option<PropertyValue> {
        self.changes.iter().find(|(p, _)| *p == property).map(|(_, v)| *v)
    }

    /// Linear progress (before easing) of one member `local` seconds after
    /// that member started. Accounts for repeats and yoyo.
    pub fn progress(&self, local: f32) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        if local <= 0.0 {
            return 0.0;
        }
        if local >= self.member_span() {
            return if self.yoyo && self.repeat % 2 == 1 { 0.0 } else { 1.0 };
        }
        let iteration = (local / self.duration).floor();
        let frac = (local - iteration * self.duration) / self.duration;
        if self.yoyo && (iteration as u32) % 2 == 1 {
            1.0 - frac
        } else {
            frac
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let step = Step::to(".cursor", 1.2)
            .prop(Property::X, 150.0)
            .prop(Property::Y, 85.0)
            .prop(Property::X, 160.0)
            .ease(Ease::InOut(3))
            .at(Position::WithPrevious);
        assert_eq!(step.changes.len(), 2);
        assert_eq!(step.change(Property::X), Some(PropertyValue::Float(160.0)));
        assert_eq!(step.change(Property::Opacity), None);
        assert_eq!(step.position, Position::WithPrevious);
    }

    #[test]
    fn test_span_with_stagger_and_repeat() {
        let step = Step::to(".sparkle", 0.5).stagger(0.1);
        assert!((step.span(3) - 0.7).abs() < 1e-6);

        let press = Step::to(".press-on", 0.1).yoyo(1);
        assert!((press.member_span() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_yoyo_progress() {
        let press = Step::to(".press-on", 0.1).yoyo(1);
        assert!((press.progress(0.05) - 0.5).abs() < 1e-4);
        assert!((press.progress(0.15) - 0.5).abs() < 1e-4);
        // Ends back where it started
        assert_eq!(press.progress(0.3), 0.0);
        assert_eq!(press.progress(-1.0), 0.0);
    }

    #[test]
    fn test_instant_steps_complete_immediately() {
        assert_eq!(Step::set(".cursor").progress(0.0), 1.0);
        assert_eq!(Step::clear(".bg-flare").kind, StepKind::Clear);
    }
}
