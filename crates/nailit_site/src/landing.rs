// SPDX-License-Identifier: MIT OR Apache-2.0
//! The landing page: every machine on `/` and the state a renderer needs.
//!
//! All machines start on [`LandingPage::mount`] and stop on
//! [`LandingPage::unmount`]. The host calls [`LandingPage::frame`] once per
//! animation frame and [`LandingPage::on_scroll`] from its scroll listener.

use crate::choreography;
use crate::config::SiteConfig;
use crate::content::{self, AdhesionOption, HoldSetting, ProtocolPhase, ShowcaseDesign};
use crate::forms::{self, FormSubmitter, WaitlistForm};
use crate::navigation::{Link, NavigationRequest};
use nailit_motion::{
    Anchor, CardPhase, CardStyle, Choreographer, Frame, Motion, MountId, RevealTrigger, Rotator,
    ScrollFlag, ScrollPhaseTracker, ScrubRange, SharedViewport, StackDepth, TimelineError, Trigger,
    Typewriter, TypewriterPhase, TypingCadence, ViewportSource,
};
use serde::Serialize;
use std::time::Duration;

/// Hero background drift at the bottom of the hero, in percent of its height
const HERO_PARALLAX: f32 = 30.0;
/// Philosophy background drift across the section, in percent
const PHILOSOPHY_PARALLAX: f32 = 20.0;

/// A one-shot entrance that plays when its anchor scrolls into view
#[derive(Debug, Clone)]
struct Reveal {
    trigger: RevealTrigger,
    timeline: Choreographer,
    /// What the targets look like before the trigger fires
    hidden: Frame,
}

impl Reveal {
    fn new(anchor: Anchor, timeline: Choreographer) -> Self {
        let hidden = timeline.timeline().evaluate(0.0);
        Self {
            trigger: RevealTrigger::new(anchor),
            timeline,
            hidden,
        }
    }

    fn update(&mut self, viewport: &SharedViewport, dt: Duration) -> bool {
        if self.trigger.check(viewport) {
            self.timeline.start();
            return true;
        }
        self.timeline.update(dt)
    }

    fn reset(&mut self) {
        self.timeline.stop();
        self.trigger.rearm();
    }

    fn frame(&self) -> &Frame {
        if self.trigger.has_fired() {
            self.timeline.frame()
        } else {
            &self.hidden
        }
    }
}

/// Shuffler card with its slot in the pile
#[derive(Debug, Clone, Serialize)]
pub struct ShufflerCard {
    /// The hold setting shown
    pub setting: HoldSetting,
    /// Slot depth
    pub depth: StackDepth,
}

/// Telemetry text as currently typed
#[derive(Debug, Clone, Serialize)]
pub struct TelemetryView {
    /// Visible prefix
    pub text: String,
    /// Typing or dwelling on the full text
    pub phase: TypewriterPhase,
}

/// Protocol card with its scroll state
#[derive(Debug, Clone, Serialize)]
pub struct ProtocolCard {
    /// Card copy
    pub phase: ProtocolPhase,
    /// Relative to the active card
    pub state: CardPhase,
    /// Visual treatment
    pub style: CardStyle,
    /// Progress through the card's scroll band (0.0 - 1.0)
    pub band: f32,
}

/// Stacking protocol section
#[derive(Debug, Clone, Serialize)]
pub struct ProtocolView {
    /// Index of the current card
    pub active: usize,
    /// Cards in scroll order
    pub cards: Vec<ProtocolCard>,
}

/// Showcase progress dot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Indicator {
    /// Slide already shown this round
    Done,
    /// Slide on screen
    Current,
    /// Slide still to come
    Upcoming,
}

/// Design showcase
#[derive(Debug, Clone, Serialize)]
pub struct ShowcaseView {
    /// Slide on screen
    pub current: Option<ShowcaseDesign>,
    /// Index of the slide on screen
    pub index: usize,
    /// Fill of the current slide's progress bar (0.0 - 1.0)
    pub progress: f32,
    /// One dot per slide
    pub indicators: Vec<Indicator>,
}

/// Adhesion tab with its active styling
#[derive(Debug, Clone, Serialize)]
pub struct AdhesionTab {
    /// The formulation
    pub option: AdhesionOption,
    /// Whether this tab is selected
    pub active: bool,
    /// Strength meter fill (0.0 - 1.0)
    pub meter: f32,
    /// Tab scale
    pub scale: f32,
    /// Tab opacity
    pub opacity: f32,
}

/// Everything a renderer needs to draw one frame of the landing page
#[derive(Debug, Clone, Serialize)]
pub struct LandingSnapshot {
    /// Current mount, if mounted
    pub mount: Option<MountId>,
    /// Document scroll offset
    pub scroll_offset: f32,
    /// Navbar turned solid
    pub navbar_solid: bool,
    /// Hero background drift in percent
    pub hero_parallax: f32,
    /// Hero entrance values
    pub hero: Frame,
    /// Hold-setting pile, top first
    pub shuffler: Vec<ShufflerCard>,
    /// Live telemetry
    pub telemetry: TelemetryView,
    /// Scheduler demo values
    pub scheduler: Frame,
    /// Feature card entrance values
    pub features: Frame,
    /// Philosophy background drift in percent
    pub philosophy_parallax: f32,
    /// Philosophy statement entrance values
    pub philosophy_lines: Vec<Frame>,
    /// Stacking protocol cards
    pub protocol: ProtocolView,
    /// Design showcase
    pub showcase: ShowcaseView,
    /// Adhesion tabs
    pub adhesion: Vec<AdhesionTab>,
    /// Press-on demo values
    pub integration: Frame,
}

/// State behind `/`
#[derive(Debug)]
pub struct LandingPage {
    viewport: SharedViewport,
    mount: Option<MountId>,
    last_offset: Option<f32>,
    navbar: ScrollFlag,
    hero_parallax: ScrubRange,
    hero_entrance: Choreographer,
    shuffler: Rotator<HoldSetting>,
    telemetry: Typewriter,
    scheduler: Choreographer,
    features: Reveal,
    philosophy_parallax: ScrubRange,
    philosophy_lines: Vec<Reveal>,
    protocol: ScrollPhaseTracker<SharedViewport>,
    phases: Vec<ProtocolPhase>,
    showcase: Rotator<ShowcaseDesign>,
    adhesion: Rotator<AdhesionOption>,
    integration: Choreographer,
    waitlist: WaitlistForm,
}

impl LandingPage {
    /// Build the page against `viewport`. Nothing runs until [`mount`](Self::mount).
    pub fn new(config: &SiteConfig, viewport: SharedViewport) -> Result<Self, TimelineError> {
        let timing = &config.timing;
        let layout = &config.layout;
        let repeat_delay = timing.demo_repeat_delay;

        let (min, max) = timing.typing_range();
        let cadence = TypingCadence::new(min, max);
        let telemetry = match config.preview.seed {
            Some(seed) => {
                Typewriter::seeded(content::TELEMETRY_TEXT, cadence, timing.typing_dwell(), seed)
            }
            None => Typewriter::new(content::TELEMETRY_TEXT, cadence, timing.typing_dwell()),
        };

        let phases = content::protocol_phases();
        let mut protocol = ScrollPhaseTracker::new(viewport.clone());
        for index in 0..phases.len() {
            protocol.register(Trigger::new(
                layout.card_top(index),
                config.protocol.entry_fraction,
                config.protocol.exit_fraction,
            ));
        }

        let philosophy_lines = layout
            .philosophy_lines
            .iter()
            .map(|top| {
                Ok(Reveal::new(
                    Anchor::new(*top, 0.85),
                    Choreographer::new(choreography::philosophy_line_reveal().build()?),
                ))
            })
            .collect::<Result<Vec<_>, TimelineError>>()?;

        Ok(Self {
            mount: None,
            last_offset: None,
            navbar: ScrollFlag::new(layout.navbar_threshold),
            hero_parallax: ScrubRange::new(Anchor::new(0.0, 0.0), Anchor::new(layout.hero_height, 0.0)),
            hero_entrance: Choreographer::new(choreography::hero_entrance().build()?),
            shuffler: Rotator::new("shuffler", content::hold_settings(), timing.shuffle_interval()),
            telemetry,
            scheduler: Choreographer::new(choreography::scheduler_demo(repeat_delay).build()?),
            features: Reveal::new(
                Anchor::new(layout.features_top, 0.8),
                Choreographer::new(choreography::features_reveal().build()?),
            ),
            philosophy_parallax: ScrubRange::new(
                Anchor::new(layout.philosophy_top, 1.0),
                Anchor::new(layout.philosophy_top + layout.philosophy_height, 0.0),
            ),
            philosophy_lines,
            protocol,
            phases,
            showcase: Rotator::new("showcase", content::showcase_designs(), timing.showcase_interval()),
            adhesion: Rotator::new("adhesion", content::adhesion_options(), timing.adhesion_interval()),
            integration: Choreographer::new(choreography::integration_demo(repeat_delay).build()?),
            waitlist: WaitlistForm::new(),
            viewport,
        })
    }

    /// Start every machine. Mounting twice keeps the current mount.
    pub fn mount(&mut self) -> MountId {
        if let Some(id) = self.mount {
            tracing::debug!(mount = %id, "Landing page already mounted");
            return id;
        }
        let id = MountId::new();
        self.mount = Some(id);
        self.last_offset = None;

        self.hero_entrance.start();
        self.shuffler.start();
        self.telemetry.start();
        self.scheduler.start();
        self.protocol.start();
        self.showcase.start();
        self.adhesion.start();
        self.integration.start();

        tracing::info!(mount = %id, "Landing page mounted");
        id
    }

    /// Stop every machine and drop pending timers
    pub fn unmount(&mut self) {
        let Some(id) = self.mount.take() else {
            return;
        };
        self.hero_entrance.stop();
        self.shuffler.stop();
        self.telemetry.stop();
        self.scheduler.stop();
        self.features.reset();
        for line in &mut self.philosophy_lines {
            line.reset();
        }
        self.protocol.stop();
        self.showcase.stop();
        self.adhesion.stop();
        self.integration.stop();
        self.waitlist.clear();

        tracing::info!(mount = %id, "Landing page unmounted");
    }

    /// Current mount
    pub fn mount_id(&self) -> Option<MountId> {
        self.mount
    }

    /// Scroll listener
    pub fn on_scroll(&mut self) {
        self.protocol.notify_scroll();
    }

    /// Resize listener
    pub fn on_resize(&mut self) {
        self.protocol.notify_resize();
    }

    /// Advance every machine by `dt`. Returns whether anything visible changed.
    pub fn frame(&mut self, dt: Duration) -> bool {
        if self.mount.is_none() {
            return false;
        }
        let mut changed = false;

        let offset = self.viewport.scroll_offset();
        if self.last_offset != Some(offset) {
            self.last_offset = Some(offset);
            changed = true;
        }

        changed |= self.hero_entrance.update(dt);
        changed |= self.shuffler.update(dt);
        changed |= self.telemetry.update(dt);
        changed |= self.scheduler.update(dt);
        changed |= self.features.update(&self.viewport, dt);
        for line in &mut self.philosophy_lines {
            changed |= line.update(&self.viewport, dt);
        }
        if self.protocol.update(dt) {
            tracing::info!(active = self.protocol.active_index(), "Protocol phase changed");
            changed = true;
        }
        changed |= self.showcase.update(dt);
        changed |= self.adhesion.update(dt);
        changed |= self.integration.update(dt);
        changed
    }

    /// Click on an adhesion tab. The rotation timer keeps its schedule.
    pub fn select_adhesion(&mut self, index: usize) -> bool {
        self.adhesion.select(index)
    }

    /// Index of the current protocol card
    pub fn protocol_phase(&self) -> usize {
        self.protocol.active_index()
    }

    /// Follow a navbar or hero link
    pub fn follow(&self, link: Link) -> NavigationRequest {
        link.target()
    }

    /// The waitlist form
    pub fn waitlist_mut(&mut self) -> &mut WaitlistForm {
        &mut self.waitlist
    }

    /// Submit the waitlist form, clearing it once accepted
    pub fn submit_waitlist(
        &mut self,
        submitter: &mut impl FormSubmitter,
    ) -> forms::Result<NavigationRequest> {
        let next = forms::submit(self.waitlist.validate(), submitter)?;
        self.waitlist.clear();
        Ok(next)
    }

    /// Render state for the current frame
    pub fn snapshot(&self) -> LandingSnapshot {
        let shuffler = self
            .shuffler
            .items()
            .enumerate()
            .map(|(position, setting)| ShufflerCard {
                setting: setting.clone(),
                depth: StackDepth::at(position),
            })
            .collect();

        let cards = self
            .phases
            .iter()
            .enumerate()
            .map(|(index, phase)| ProtocolCard {
                phase: phase.clone(),
                state: self.protocol.card_phase(index),
                style: self.protocol.card_style(index),
                band: self.protocol.band_progress(index),
            })
            .collect();

        let index = self.showcase.current_index();
        let indicators = (0..self.showcase.len())
            .map(|i| match i.cmp(&index) {
                std::cmp::Ordering::Less => Indicator::Done,
                std::cmp::Ordering::Equal => Indicator::Current,
                std::cmp::Ordering::Greater => Indicator::Upcoming,
            })
            .collect();

        let active_tab = self.adhesion.current_index();
        let adhesion = content::adhesion_options()
            .into_iter()
            .enumerate()
            .map(|(i, option)| {
                let active = i == active_tab;
                AdhesionTab {
                    meter: if active { option.level } else { 0.0 },
                    scale: if active { 1.0 } else { 0.98 },
                    opacity: if active { 1.0 } else { 0.6 },
                    active,
                    option,
                }
            })
            .collect();

        LandingSnapshot {
            mount: self.mount,
            scroll_offset: self.viewport.scroll_offset(),
            navbar_solid: self.navbar.is_set(&self.viewport),
            hero_parallax: HERO_PARALLAX * self.hero_parallax.progress(&self.viewport),
            hero: self.hero_entrance.frame().clone(),
            shuffler,
            telemetry: TelemetryView {
                text: self.telemetry.visible().to_string(),
                phase: self.telemetry.phase(),
            },
            scheduler: self.scheduler.frame().clone(),
            features: self.features.frame().clone(),
            philosophy_parallax: PHILOSOPHY_PARALLAX * self.philosophy_parallax.progress(&self.viewport),
            philosophy_lines: self.philosophy_lines.iter().map(|l| l.frame().clone()).collect(),
            protocol: ProtocolView {
                active: self.protocol.active_index(),
                cards,
            },
            showcase: ShowcaseView {
                current: self.showcase.current().cloned(),
                index,
                progress: self.showcase.progress(),
                indicators,
            },
            adhesion,
            integration: self.integration.frame().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::LoggingSubmitter;
    use crate::navigation::{Route, Section};
    use nailit_motion::Property;

    fn page() -> (LandingPage, SharedViewport) {
        let mut config = SiteConfig::default();
        config.preview.seed = Some(42);
        let viewport = SharedViewport::new(config.layout.viewport_height);
        let page = LandingPage::new(&config, viewport.clone()).unwrap();
        (page, viewport)
    }

    fn scroll(page: &mut LandingPage, viewport: &SharedViewport, offset: f32) {
        viewport.scroll_to(offset);
        page.on_scroll();
        page.frame(Duration::from_millis(16));
    }

    #[test]
    fn test_nothing_runs_before_mount() {
        let (mut page, _) = page();
        assert!(!page.frame(Duration::from_secs(5)));
        assert_eq!(page.snapshot().shuffler[0].setting.label, "Standard Hold");
        assert!(page.snapshot().mount.is_none());
    }

    #[test]
    fn test_huge_demo_rest_does_not_panic() {
        let mut config = SiteConfig::default();
        config.timing.demo_repeat_delay = 1e30;
        let viewport = SharedViewport::new(config.layout.viewport_height);
        let mut page = LandingPage::new(&config, viewport).unwrap();
        page.mount();
        assert!(page.frame(Duration::from_secs(5)));
        assert!(page.frame(Duration::from_secs(5)));
    }

    #[test]
    fn test_shuffler_rotates_after_mount() {
        let (mut page, _) = page();
        page.mount();
        page.frame(Duration::from_millis(1999));
        assert_eq!(page.snapshot().shuffler[0].setting.label, "Standard Hold");
        page.frame(Duration::from_millis(1));
        let snapshot = page.snapshot();
        let labels: Vec<_> = snapshot.shuffler.iter().map(|c| c.setting.label).collect();
        assert_eq!(labels, ["Light Hold", "Max Hold", "Standard Hold"]);
        // Depth belongs to the slot, not the card
        assert_eq!(snapshot.shuffler[0].depth, StackDepth::at(0));
    }

    #[test]
    fn test_remount_starts_fresh() {
        let (mut page, _) = page();
        let first = page.mount();
        assert_eq!(page.mount(), first);
        page.frame(Duration::from_millis(4500));
        assert_eq!(page.snapshot().showcase.index, 1);

        page.unmount();
        page.unmount();
        assert!(!page.frame(Duration::from_secs(10)));

        let second = page.mount();
        assert_ne!(first, second);
        let snapshot = page.snapshot();
        assert_eq!(snapshot.showcase.index, 0);
        assert_eq!(snapshot.shuffler[0].setting.label, "Standard Hold");
        assert_eq!(snapshot.telemetry.text, "");
    }

    #[test]
    fn test_protocol_follows_scroll() {
        let (mut page, viewport) = page();
        page.mount();
        page.frame(Duration::from_millis(16));
        assert_eq!(page.protocol_phase(), 0);

        // Card entry lines sit at 2940, 3940 and 4940
        scroll(&mut page, &viewport, 4000.0);
        assert_eq!(page.protocol_phase(), 1);
        scroll(&mut page, &viewport, 5000.0);
        assert_eq!(page.protocol_phase(), 2);
        scroll(&mut page, &viewport, 3500.0);
        assert_eq!(page.protocol_phase(), 0);

        let snapshot = page.snapshot();
        assert_eq!(snapshot.protocol.cards[0].state, CardPhase::Current);
        assert_eq!(snapshot.protocol.cards[2].state, CardPhase::Future);
    }

    #[test]
    fn test_mount_mid_page_syncs_protocol() {
        let (mut page, viewport) = page();
        viewport.scroll_to(4200.0);
        page.mount();
        page.frame(Duration::from_millis(16));
        assert_eq!(page.protocol_phase(), 1);
        let snapshot = page.snapshot();
        assert_eq!(snapshot.protocol.cards[0].style.opacity, 0.5);
        assert!(snapshot.navbar_solid);
    }

    #[test]
    fn test_features_reveal_on_scroll() {
        let (mut page, viewport) = page();
        page.mount();
        page.frame(Duration::from_millis(16));
        let hidden = page.snapshot().features;
        assert_eq!(hidden.float(".feature-card", 0, Property::Opacity), Some(0.0));

        // Features top is 900, it reveals once it reaches 80% of the viewport
        scroll(&mut page, &viewport, 200.0);
        page.frame(Duration::from_secs(2));
        let shown = page.snapshot().features;
        for member in 0..3 {
            assert_eq!(shown.float(".feature-card", member, Property::Opacity), Some(1.0));
            assert_eq!(shown.float(".feature-card", member, Property::Y), Some(0.0));
        }
    }

    #[test]
    fn test_parallax_and_navbar() {
        let (mut page, viewport) = page();
        page.mount();
        assert!(!page.snapshot().navbar_solid);
        scroll(&mut page, &viewport, 450.0);
        let snapshot = page.snapshot();
        assert!(snapshot.navbar_solid);
        assert!((snapshot.hero_parallax - 15.0).abs() < 1e-3);
        assert_eq!(snapshot.philosophy_parallax, 0.0);
    }

    #[test]
    fn test_adhesion_click_keeps_timer() {
        let (mut page, _) = page();
        page.mount();
        page.frame(Duration::from_millis(1000));
        assert!(page.select_adhesion(2));
        let snapshot = page.snapshot();
        let active: Vec<_> = snapshot.adhesion.iter().filter(|t| t.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].option.name, "Max Hold");
        assert_eq!(active[0].meter, 1.0);

        // The pending rotation still fires on its original schedule
        page.frame(Duration::from_millis(500));
        assert!(page.snapshot().adhesion[0].active);
        assert!(!page.select_adhesion(7));
    }

    #[test]
    fn test_waitlist_and_links() {
        let (mut page, _) = page();
        page.mount();
        assert_eq!(
            page.follow(Link::ClaimAccess),
            NavigationRequest::ScrollTo(Section::Waitlist)
        );

        let mut submitter = LoggingSubmitter::new();
        assert!(page.submit_waitlist(&mut submitter).is_err());

        page.waitlist_mut().set_field("name", "Ana").unwrap();
        page.waitlist_mut().set_field("email", "ana@nailit.com").unwrap();
        let next = page.submit_waitlist(&mut submitter).unwrap();
        assert_eq!(next, NavigationRequest::Route(Route::Landing));
        assert_eq!(submitter.accepted(), 1);
        assert_eq!(*page.waitlist_mut(), WaitlistForm::default());
    }

    #[test]
    fn test_snapshot_serializes() {
        let (mut page, _) = page();
        page.mount();
        page.frame(Duration::from_millis(700));
        let json = serde_json::to_value(page.snapshot()).unwrap();
        assert_eq!(json["shuffler"].as_array().map(Vec::len), Some(3));
        assert_eq!(json["protocol"]["cards"].as_array().map(Vec::len), Some(3));
        assert!(json["telemetry"]["text"].as_str().is_some_and(|t| !t.is_empty()));
        assert!(json["mount"].is_string());
    }
}
