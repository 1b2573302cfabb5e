// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timelines of property mutations and their playback.
//!
//! A [`TimelineDef`] is the declarative form: a stage of targets plus an
//! ordered list of steps. Building it resolves every step's start time and
//! from-values into a [`Timeline`], which can be sampled at any time. The
//! [`Choreographer`] plays a timeline on a clock, looping with a rest between
//! cycles.

use crate::lifecycle::{Lifecycle, Motion};
use crate::step::{Position, Step, StepKind};
use crate::target::{Frame, Property, Stage, TargetId};
use crate::timer::Timer;
use crate::value::{PropertyValue, ValueKind};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Timeline build errors
#[derive(Debug, Error, PartialEq)]
pub enum TimelineError {
    /// A step animates a target the stage does not declare
    #[error("Step {step} targets undeclared element '{target}'")]
    UnknownTarget {
        /// Index of the offending step
        step: usize,
        /// The missing target
        target: TargetId,
    },

    /// A step assigns a value of the wrong kind
    #[error("Step {step} assigns a {found:?} to {property:?}, which holds a {expected:?}")]
    ValueMismatch {
        /// Index of the offending step
        step: usize,
        /// Property being assigned
        property: Property,
        /// Kind the property holds
        expected: ValueKind,
        /// Kind supplied
        found: ValueKind,
    },

    /// A clear step also lists end values
    #[error("Step {step} clears '{target}' but also lists end values")]
    ClearWithChanges {
        /// Index of the offending step
        step: usize,
        /// The cleared target
        target: TargetId,
    },
}

/// Result type for timeline operations
pub type Result<T> = std::result::Result<T, TimelineError>;

/// How often a timeline plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Repeat {
    /// Play once
    #[default]
    Never,
    /// Play once and then repeat this many more times
    Times(u32),
    /// Loop until stopped
    Forever,
}

impl Repeat {
    /// Whether another cycle follows after `completed` cycles
    pub fn allows_another(&self, completed: u32) -> bool {
        match self {
            Repeat::Never => false,
            Repeat::Times(n) => completed <= *n,
            Repeat::Forever => true,
        }
    }
}

/// Declarative timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineDef {
    /// Timeline name, used in logs
    pub name: String,
    /// Targets and their initial values
    pub stage: Stage,
    /// Steps in declared order
    pub steps: Vec<Step>,
    /// Repeat policy
    pub repeat: Repeat,
    /// Rest in seconds between cycles
    pub repeat_delay: f32,
}

impl TimelineDef {
    /// Create an empty timeline over `stage`
    pub fn new(name: impl Into<String>, stage: Stage) -> Self {
        Self {
            name: name.into(),
            stage,
            steps: Vec::new(),
            repeat: Repeat::Never,
            repeat_delay: 0.0,
        }
    }

    /// Append a step
    pub fn then(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Set the repeat policy and the rest between cycles
    pub fn repeat(mut self, repeat: Repeat, delay_seconds: f32) -> Self {
        self.repeat = repeat;
        self.repeat_delay = delay_seconds.max(0.0);
        self
    }

    /// Validate and resolve into a playable timeline
    pub fn build(self) -> Result<Timeline> {
        Timeline::compile(self)
    }
}

/// A step with its resolved start time and from-values
#[derive(Debug, Clone)]
struct ResolvedStep {
    step: Step,
    start: f32,
    members: usize,
    /// Per member, the value of each changed property when the member starts
    from: Vec<Vec<PropertyValue>>,
}

impl ResolvedStep {
    fn member_start(&self, member: usize) -> f32 {
        self.start + self.step.stagger * member as f32
    }

    fn end(&self) -> f32 {
        self.start + self.step.span(self.members)
    }
}

/// A resolved timeline that can be sampled at any time
#[derive(Debug, Clone)]
pub struct Timeline {
    name: String,
    stage: Stage,
    steps: Vec<ResolvedStep>,
    duration: f32,
    repeat: Repeat,
    repeat_delay: f32,
}

impl Timeline {
    fn compile(def: TimelineDef) -> Result<Self> {
        let TimelineDef {
            name,
            mut stage,
            steps,
            repeat,
            repeat_delay,
        } = def;

        // Validate, and give every animated property a resting value
        for (index, step) in steps.iter().enumerate() {
            let Some(spec) = stage.get_mut(&step.target) else {
                return Err(TimelineError::UnknownTarget {
                    step: index,
                    target: step.target.clone(),
                });
            };
            if step.kind == StepKind::Clear && !step.changes.is_empty() {
                return Err(TimelineError::ClearWithChanges {
                    step: index,
                    target: step.target.clone(),
                });
            }
            for (property, value) in &step.changes {
                if value.kind() != property.kind() {
                    return Err(TimelineError::ValueMismatch {
                        step: index,
                        property: *property,
                        expected: property.kind(),
                        found: value.kind(),
                    });
                }
                if !spec.initial.contains_key(property) {
                    spec.initial.insert(*property, property.default_value());
                }
            }
        }

        let mut timeline = Self {
            name,
            stage,
            steps: Vec::with_capacity(steps.len()),
            duration: 0.0,
            repeat,
            repeat_delay: if repeat_delay.is_finite() { repeat_delay.max(0.0) } else { 0.0 },
        };

        let mut end = 0.0_f32;
        let mut previous: Option<(f32, f32)> = None;
        for step in steps {
            let anchor = match step.position {
                Position::End => end,
                Position::WithPrevious => previous.map_or(end, |(start, _)| start),
                Position::AfterPrevious => previous.map_or(end, |(_, prev_end)| prev_end),
                Position::EndOffset(offset) => end + offset,
            };
            let start = anchor.max(0.0) + step.delay;
            let members = timeline
                .stage
                .get(&step.target)
                .map_or(1, |spec| spec.members);

            let from = (0..members)
                .map(|member| {
                    let at = start + step.stagger * member as f32;
                    step.changes
                        .iter()
                        .map(|(property, _)| timeline.sample(&step.target, member, *property, at))
                        .collect()
                })
                .collect();

            let resolved = ResolvedStep {
                step,
                start,
                members,
                from,
            };
            let step_end = resolved.end();
            end = end.max(step_end);
            previous = Some((start, step_end));
            timeline.steps.push(resolved);
        }
        timeline.duration = end;

        Ok(timeline)
    }

    /// Value of one property at `time`, considering the steps resolved so far
    fn sample(&self, target: &TargetId, member: usize, property: Property, time: f32) -> PropertyValue {
        let initial = self
            .stage
            .get(target)
            .map_or_else(|| property.default_value(), |spec| spec.initial_value(property));

        let mut value = initial;
        for (resolved, index) in self
            .steps
            .iter()
            .filter(|r| &r.step.target == target && member < r.members)
            .filter_map(|r| match r.step.kind {
                StepKind::Clear => Some((r, None)),
                StepKind::Tween | StepKind::Set => r
                    .step
                    .changes
                    .iter()
                    .position(|(p, _)| *p == property)
                    .map(|i| (r, Some(i))),
            })
        {
            let local = time - resolved.member_start(member);
            if local < 0.0 {
                continue;
            }
            let Some(index) = index else {
                value = initial;
                continue;
            };
            let to = resolved.step.changes[index].1;
            value = match resolved.step.kind {
                StepKind::Set => to,
                _ => {
                    let from = resolved.from[member][index];
                    let t = resolved.step.ease.apply(resolved.step.progress(local));
                    from.interpolate(&to, t).unwrap_or(to)
                }
            };
        }
        value
    }

    /// Evaluate every target member at `time` (seconds into a cycle)
    pub fn evaluate(&self, time: f32) -> Frame {
        let mut frame = self.stage.initial_frame();
        for (id, spec) in self.stage.targets() {
            for member in 0..spec.members {
                for property in spec.initial.keys() {
                    frame.set(id, member, *property, self.sample(id, member, *property, time));
                }
            }
        }
        frame
    }

    /// Frame with every target at its declared initial values
    pub fn initial_frame(&self) -> Frame {
        self.stage.initial_frame()
    }

    /// Length of one cycle in seconds
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Rest between cycles in seconds
    pub fn repeat_delay(&self) -> f32 {
        self.repeat_delay
    }

    /// Repeat policy
    pub fn repeat_policy(&self) -> Repeat {
        self.repeat
    }

    /// Timeline name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of steps
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Resolved start time of step `index`
    pub fn step_start(&self, index: usize) -> Option<f32> {
        self.steps.get(index).map(|r| r.start)
    }
}

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Never started
    #[default]
    Idle,
    /// Running a cycle
    Playing,
    /// Waiting out the delay between cycles
    Resting,
    /// Torn down
    Stopped,
}

/// Plays a timeline in a loop
#[derive(Debug, Clone)]
pub struct Choreographer {
    timeline: Timeline,
    state: PlaybackState,
    /// Time into the current cycle, in seconds
    time: f32,
    rest: Timer,
    stop_requested: bool,
    cycles_completed: u32,
    frame: Frame,
    lifecycle: Lifecycle,
}

impl Choreographer {
    /// Create a choreographer at rest with the timeline's initial values
    pub fn new(timeline: Timeline) -> Self {
        let frame = timeline.initial_frame();
        Self {
            timeline,
            state: PlaybackState::Idle,
            time: 0.0,
            rest: Timer::new(),
            stop_requested: false,
            cycles_completed: 0,
            frame,
            lifecycle: Lifecycle::Idle,
        }
    }

    /// Stop once the in-flight cycle reaches its terminal step.
    ///
    /// Between cycles this stops immediately, leaving the terminal values in
    /// place.
    pub fn request_stop(&mut self) {
        match self.state {
            PlaybackState::Playing => {
                self.stop_requested = true;
                tracing::debug!(timeline = %self.timeline.name, "stop requested, finishing cycle");
            }
            PlaybackState::Resting => self.finish(),
            PlaybackState::Idle | PlaybackState::Stopped => {}
        }
    }

    fn finish(&mut self) {
        self.rest.cancel();
        self.stop_requested = false;
        self.state = PlaybackState::Stopped;
        self.lifecycle.stop();
        tracing::info!(
            timeline = %self.timeline.name,
            cycles = self.cycles_completed,
            "timeline finished"
        );
    }

    /// Whether a graceful stop is pending
    pub fn is_stopping(&self) -> bool {
        self.stop_requested && self.state == PlaybackState::Playing
    }

    /// Current playback state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Time into the current cycle, in seconds
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Number of cycles played to the end
    pub fn cycles_completed(&self) -> u32 {
        self.cycles_completed
    }

    /// Current property values
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// The timeline being played
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }
}

impl Motion for Choreographer {
    fn start(&mut self) {
        if !self.lifecycle.start() {
            return;
        }
        self.state = PlaybackState::Playing;
        self.time = 0.0;
        self.cycles_completed = 0;
        self.stop_requested = false;
        self.rest.cancel();
        self.frame = self.timeline.evaluate(0.0);
        tracing::debug!(
            timeline = %self.timeline.name,
            duration = self.timeline.duration,
            "timeline started"
        );
    }

    /// Tear down immediately, reverting every target to its initial values.
    fn stop(&mut self) {
        if !self.lifecycle.is_running() {
            return;
        }
        self.rest.cancel();
        self.stop_requested = false;
        self.state = PlaybackState::Stopped;
        self.time = 0.0;
        self.frame = self.timeline.initial_frame();
        self.lifecycle.stop();
        tracing::debug!(timeline = %self.timeline.name, "timeline reverted");
    }

    fn update(&mut self, dt: Duration) -> bool {
        if !self.lifecycle.is_running() {
            return false;
        }
        let duration = self.timeline.duration;
        let idle_cycle = duration <= 0.0 && self.timeline.repeat_delay <= 0.0;
        let mut left = dt.as_secs_f32();
        let mut changed = false;

        loop {
            match self.state {
                PlaybackState::Playing => {
                    let to_end = duration - self.time;
                    if left < to_end {
                        self.time += left;
                        changed |= left > 0.0;
                        break;
                    }
                    left -= to_end.max(0.0);
                    self.time = duration;
                    self.cycles_completed += 1;
                    changed = true;
                    tracing::debug!(
                        timeline = %self.timeline.name,
                        cycle = self.cycles_completed,
                        "cycle complete"
                    );
                    if self.stop_requested || !self.timeline.repeat.allows_another(self.cycles_completed) {
                        self.frame = self.timeline.evaluate(duration);
                        self.finish();
                        return true;
                    }
                    self.state = PlaybackState::Resting;
                    self.rest.schedule(seconds(self.timeline.repeat_delay));
                    if idle_cycle {
                        break;
                    }
                }
                PlaybackState::Resting => {
                    match self.rest.advance(seconds(left)) {
                        Some(overshoot) => {
                            self.state = PlaybackState::Playing;
                            self.time = 0.0;
                            left = overshoot.as_secs_f32();
                            changed = true;
                            if idle_cycle {
                                break;
                            }
                        }
                        None => break,
                    }
                }
                PlaybackState::Idle | PlaybackState::Stopped => break,
            }
        }

        if changed {
            self.frame = self.timeline.evaluate(self.time);
        }
        changed
    }

    fn is_running(&self) -> bool {
        self.lifecycle.is_running()
    }
}

/// Non-negative seconds as a `Duration`, saturating when out of range
fn seconds(secs: f32) -> Duration {
    Duration::try_from_secs_f32(secs.max(0.0)).unwrap_or(Duration::MAX)
}
