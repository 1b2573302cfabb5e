// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline definitions for the page's demos and entrances.

use nailit_motion::{Ease, Position, Property, Repeat, Rgba, Stage, Step, TimelineDef};

/// Accent pink
const ACCENT: Rgba = Rgba([224.0 / 255.0, 33.0 / 255.0, 138.0 / 255.0, 1.0]);
/// Off-white page background
const BACKGROUND: Rgba = Rgba([242.0 / 255.0, 240.0 / 255.0, 233.0 / 255.0, 1.0]);
/// Near-black text
const DARK: Rgba = Rgba([26.0 / 255.0, 26.0 / 255.0, 26.0 / 255.0, 1.0]);

/// Cursor demo on the warranty card: the cursor glides to Wednesday, clicks
/// it, then presses "Secure Week" and fades out.
pub fn scheduler_demo(repeat_delay: f32) -> TimelineDef {
    let stage = Stage::new()
        .target(".cursor")
        .initial(".cursor", Property::X, 200.0)
        .initial(".cursor", Property::Y, 150.0)
        .initial(".cursor", Property::Opacity, 0.0)
        .initial(".cursor", Property::Scale, 1.0)
        .target(".day-box-3")
        .initial(".day-box-3", Property::Background, Rgba::TRANSPARENT)
        .initial(".day-box-3", Property::Color, DARK)
        .target(".bg-flare")
        .initial(".bg-flare", Property::Scale, 1.0)
        .initial(".bg-flare", Property::Opacity, 0.0)
        .target(".save-btn")
        .initial(".save-btn", Property::Scale, 1.0);

    TimelineDef::new("scheduler-demo", stage)
        .then(
            Step::set(".cursor")
                .prop(Property::X, 200.0)
                .prop(Property::Y, 150.0)
                .prop(Property::Opacity, 0.0)
                .prop(Property::Scale, 1.0),
        )
        .then(Step::to(".cursor", 0.3).prop(Property::Opacity, 1.0))
        .then(
            Step::to(".cursor", 1.2)
                .prop(Property::X, 150.0)
                .prop(Property::Y, 85.0)
                .ease(Ease::InOut(3)),
        )
        // Click down on the day
        .then(Step::to(".cursor", 0.1).prop(Property::Scale, 0.8))
        .then(
            Step::to(".day-box-3", 0.1)
                .prop(Property::Background, ACCENT)
                .prop(Property::Color, BACKGROUND)
                .at(Position::WithPrevious),
        )
        .then(
            Step::to(".bg-flare", 0.4)
                .prop(Property::Scale, 1.5)
                .prop(Property::Opacity, 0.0)
                .at(Position::WithPrevious),
        )
        .then(Step::to(".cursor", 0.1).prop(Property::Scale, 1.0))
        // Down to the save button
        .then(
            Step::to(".cursor", 1.0)
                .prop(Property::X, 150.0)
                .prop(Property::Y, 125.0)
                .ease(Ease::InOut(2))
                .delay(0.2),
        )
        .then(Step::to(".cursor", 0.1).prop(Property::Scale, 0.8))
        .then(
            Step::to(".save-btn", 0.1)
                .prop(Property::Scale, 0.95)
                .at(Position::WithPrevious),
        )
        .then(Step::to(".cursor", 0.1).prop(Property::Scale, 1.0))
        .then(
            Step::to(".save-btn", 0.1)
                .prop(Property::Scale, 1.0)
                .at(Position::WithPrevious),
        )
        .then(Step::to(".cursor", 0.3).prop(Property::Opacity, 0.0).delay(0.5))
        .then(
            Step::to(".day-box-3", 0.3)
                .prop(Property::Background, Rgba::TRANSPARENT)
                .prop(Property::Color, DARK)
                .at(Position::WithPrevious),
        )
        .then(Step::clear(".bg-flare"))
        .repeat(Repeat::Forever, repeat_delay)
}

/// Press-on demo: the nail floats down, snaps on with a ring flash and
/// sparkles, holds, then fades.
pub fn integration_demo(repeat_delay: f32) -> TimelineDef {
    let stage = Stage::new()
        .target(".press-on")
        .initial(".press-on", Property::Y, -80.0)
        .initial(".press-on", Property::Opacity, 0.0)
        .initial(".press-on", Property::Rotation, -10.0)
        .initial(".press-on", Property::Scale, 1.0)
        .target(".snap-ring")
        .initial(".snap-ring", Property::Scale, 0.0)
        .initial(".snap-ring", Property::Opacity, 0.0)
        .group(".sparkle", 3)
        .initial(".sparkle", Property::Opacity, 0.0)
        .initial(".sparkle", Property::Scale, 0.0)
        .initial(".sparkle", Property::Rotation, 0.0);

    TimelineDef::new("integration-demo", stage)
        .then(
            Step::set(".press-on")
                .prop(Property::Y, -80.0)
                .prop(Property::Opacity, 0.0)
                .prop(Property::Rotation, -10.0),
        )
        .then(Step::set(".snap-ring").prop(Property::Scale, 0.0).prop(Property::Opacity, 0.0))
        .then(
            Step::set(".sparkle")
                .prop(Property::Opacity, 0.0)
                .prop(Property::Scale, 0.0)
                .prop(Property::Rotation, 0.0),
        )
        // Floating down into frame
        .then(
            Step::to(".press-on", 1.0)
                .prop(Property::Y, -20.0)
                .prop(Property::Opacity, 1.0)
                .prop(Property::Rotation, 0.0)
                .ease(Ease::Out(2)),
        )
        // The press connection
        .then(Step::to(".press-on", 0.3).prop(Property::Y, 0.0).ease(Ease::In(4)))
        // Snap flash
        .then(
            Step::to(".snap-ring", 0.1)
                .prop(Property::Scale, 2.5)
                .prop(Property::Opacity, 0.6)
                .at(Position::EndOffset(-0.1)),
        )
        .then(
            Step::to(".snap-ring", 0.5)
                .prop(Property::Scale, 4.0)
                .prop(Property::Opacity, 0.0)
                .at(Position::AfterPrevious),
        )
        // Sparkles and lock
        .then(
            Step::to(".sparkle", 0.5)
                .prop(Property::Opacity, 1.0)
                .prop(Property::Scale, 1.0)
                .prop(Property::Rotation, 180.0)
                .stagger(0.1)
                .at(Position::EndOffset(-0.4)),
        )
        .then(
            Step::to(".press-on", 0.1)
                .prop(Property::Scale, 0.96)
                .yoyo(1)
                .at(Position::EndOffset(-0.6)),
        )
        // Hold, then fade
        .then(Step::to(".press-on", 0.5).prop(Property::Opacity, 0.0).delay(1.5))
        .then(
            Step::to(".sparkle", 0.3)
                .prop(Property::Opacity, 0.0)
                .prop(Property::Scale, 0.0)
                .at(Position::EndOffset(-0.5)),
        )
        .repeat(Repeat::Forever, repeat_delay)
}

/// Staggered rise-in of `members` elements: each starts `rise` pixels low
/// and transparent and settles into place.
fn rise_in(
    name: &str,
    target: &str,
    members: usize,
    rise: f32,
    duration: f32,
    stagger: f32,
    delay: f32,
) -> TimelineDef {
    let stage = Stage::new()
        .group(target, members)
        .initial(target, Property::Y, 0.0)
        .initial(target, Property::Opacity, 1.0);
    TimelineDef::new(name, stage)
        .then(Step::set(target).prop(Property::Y, rise).prop(Property::Opacity, 0.0))
        .then(
            Step::to(target, duration)
                .prop(Property::Y, 0.0)
                .prop(Property::Opacity, 1.0)
                .ease(Ease::Out(3))
                .stagger(stagger)
                .delay(delay),
        )
}

/// Hero headline, subtitle, copy and call-to-action rising in
pub fn hero_entrance() -> TimelineDef {
    rise_in("hero-entrance", ".hero-elem", 4, 60.0, 1.2, 0.15, 0.2)
}

/// The three feature cards rising in once the section is revealed
pub fn features_reveal() -> TimelineDef {
    rise_in("features-reveal", ".feature-card", 3, 80.0, 1.0, 0.15, 0.0)
}

/// One philosophy statement rising in once revealed
pub fn philosophy_line_reveal() -> TimelineDef {
    rise_in("philosophy-line", ".reveal-text", 1, 40.0, 1.2, 0.0, 0.0)
}

/// Signup heading, fields, button and footnote rising in
pub fn signup_entrance() -> TimelineDef {
    rise_in("signup-entrance", ".form-elem", 5, 40.0, 1.2, 0.1, 0.1)
}

/// Slow breathing zoom of the signup background
pub fn signup_backdrop() -> TimelineDef {
    let stage = Stage::new()
        .target(".auth-bg")
        .initial(".auth-bg", Property::Scale, 1.0);
    TimelineDef::new("signup-backdrop", stage)
        .then(
            Step::to(".auth-bg", 10.0)
                .prop(Property::Scale, 1.05)
                .ease(Ease::Linear)
                .yoyo(1),
        )
        .repeat(Repeat::Forever, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_definitions_build() {
        for def in [
            scheduler_demo(1.0),
            integration_demo(1.0),
            hero_entrance(),
            features_reveal(),
            philosophy_line_reveal(),
            signup_entrance(),
            signup_backdrop(),
        ] {
            let name = def.name.clone();
            assert!(def.build().is_ok(), "{name} failed to build");
        }
    }

    #[test]
    fn test_scheduler_terminal_state() {
        let timeline = scheduler_demo(1.0).build().unwrap();
        let end = timeline.evaluate(timeline.duration());
        assert_eq!(end.float(".cursor", 0, Property::Opacity), Some(0.0));
        assert_eq!(end.float(".cursor", 0, Property::Scale), Some(1.0));
        assert_eq!(end.color(".day-box-3", 0, Property::Background), Some(Rgba::TRANSPARENT));
        assert_eq!(end.float(".bg-flare", 0, Property::Scale), Some(1.0));
        assert_eq!(end.float(".save-btn", 0, Property::Scale), Some(1.0));
    }

    #[test]
    fn test_scheduler_highlights_day_on_click() {
        let timeline = scheduler_demo(1.0).build().unwrap();
        // Fade and glide end at 1.5, where the click lands
        let clicked = timeline.evaluate(1.65);
        assert_eq!(clicked.color(".day-box-3", 0, Property::Background), Some(ACCENT));
        assert_eq!(clicked.float(".cursor", 0, Property::X), Some(150.0));
        assert_eq!(clicked.float(".cursor", 0, Property::Y), Some(85.0));
    }

    #[test]
    fn test_integration_timing() {
        let timeline = integration_demo(1.0).build().unwrap();
        assert!((timeline.duration() - 4.1).abs() < 1e-4);

        let snapped = timeline.evaluate(1.35);
        assert_eq!(snapped.float(".press-on", 0, Property::Y), Some(0.0));

        let end = timeline.evaluate(timeline.duration());
        assert_eq!(end.float(".press-on", 0, Property::Opacity), Some(0.0));
        for member in 0..3 {
            assert_eq!(end.float(".sparkle", member, Property::Opacity), Some(0.0));
        }
    }

    #[test]
    fn test_entrances_settle_in_place() {
        let timeline = hero_entrance().build().unwrap();
        let start = timeline.evaluate(0.0);
        assert_eq!(start.float(".hero-elem", 3, Property::Y), Some(60.0));
        let end = timeline.evaluate(timeline.duration());
        for member in 0..4 {
            assert_eq!(end.float(".hero-elem", member, Property::Y), Some(0.0));
            assert_eq!(end.float(".hero-elem", member, Property::Opacity), Some(1.0));
        }
    }

    #[test]
    fn test_backdrop_breathes() {
        let timeline = signup_backdrop().build().unwrap();
        assert!((timeline.duration() - 20.0).abs() < 1e-4);
        let peak = timeline.evaluate(10.0);
        assert!((peak.float(".auth-bg", 0, Property::Scale).unwrap() - 1.05).abs() < 1e-4);
        let end = timeline.evaluate(20.0);
        assert_eq!(end.float(".auth-bg", 0, Property::Scale), Some(1.0));
    }
}
