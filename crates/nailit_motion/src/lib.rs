// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timed and scroll-driven UI state machines for the Nail It! site.
//!
//! This crate provides the motion behind the landing page:
//! - Rotators (card shuffler, design showcase, adhesion tabs)
//! - Typewriter text reveal
//! - Scroll-phase tracking for the stacking protocol cards
//! - Timeline choreography for the looping demos
//!
//! ## Architecture
//!
//! Every machine is a plain value with an explicit `start()`/`stop()`
//! lifecycle and is advanced by the host with elapsed time, so it can be
//! tested without a real clock, viewport or rendering framework:
//! - Single-slot cancellable timers
//! - Injected viewport source
//! - Declarative timelines resolved up front
//! - Serializable state for the renderer

pub mod ease;
pub mod lifecycle;
pub mod rotator;
pub mod scroll;
pub mod step;
pub mod target;
pub mod timeline;
pub mod timer;
pub mod typewriter;
pub mod value;

pub use ease::Ease;
pub use lifecycle::{Lifecycle, Motion, MountId};
pub use rotator::{Rotator, StackDepth};
pub use scroll::{
    Anchor, CardPhase, CardStyle, RevealTrigger, ScrollFlag, ScrollPhaseTracker, ScrubRange,
    SharedViewport, Trigger, ViewportSource, ViewportState,
};
pub use step::{Position, Step, StepKind};
pub use target::{Frame, Property, Stage, TargetId, TargetSpec};
pub use timeline::{Choreographer, PlaybackState, Repeat, Timeline, TimelineDef, TimelineError};
pub use timer::{Timer, TimerId};
pub use typewriter::{Typewriter, TypewriterPhase, TypingCadence};
pub use value::{Interpolation, PropertyValue, Rgba, ValueKind};
