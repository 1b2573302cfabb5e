// SPDX-License-Identifier: MIT OR Apache-2.0
//! Headless preview: plays a scripted visit through both pages.
//!
//! The frame loop and the scrolling visitor run as separate tasks sharing one
//! [`Site`], the way a browser's animation frames and scroll events
//! interleave. The run ends after the configured time or on Ctrl-C, and both
//! pages are unmounted on the way out.

use crate::config::{PreviewConfig, SiteConfig};
use crate::error::Result;
use crate::forms::LoggingSubmitter;
use crate::landing::LandingPage;
use crate::navigation::{Link, NavigationRequest, Navigator, RecordingNavigator, Route};
use crate::signup::SignupPage;
use nailit_motion::{SharedViewport, ViewportSource};
use parking_lot::Mutex;
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};

/// Something the scripted visitor does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Click a link
    Follow(Link),
    /// Click an adhesion tab
    SelectAdhesion(usize),
    /// Fill in and submit the waitlist form
    JoinWaitlist {
        /// Name typed
        name: &'static str,
        /// Email typed
        email: &'static str,
    },
    /// Fill in and submit the signup form
    CreateAccount {
        /// Email typed
        email: &'static str,
        /// Password typed
        password: &'static str,
    },
}

/// Scripted visit, as (fraction of the run, action)
pub const VISIT: [(f32, Cue); 6] = [
    (0.30, Cue::SelectAdhesion(2)),
    (0.40, Cue::Follow(Link::ClaimAccess)),
    (
        0.45,
        Cue::JoinWaitlist {
            name: "Preview Visitor",
            email: "visitor@nailit.example",
        },
    ),
    (0.55, Cue::Follow(Link::SignUp)),
    (
        0.75,
        Cue::CreateAccount {
            email: "visitor@nailit.example",
            password: "preview-only",
        },
    ),
    (0.85, Cue::Follow(Link::Protocol)),
];

/// Counters from a preview run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PreviewReport {
    /// Frames played
    pub frames: u64,
    /// Frames with a visible change
    pub changed_frames: u64,
    /// Times the landing page was mounted
    pub landing_mounts: u32,
    /// Protocol card changes observed
    pub phase_changes: u32,
    /// Forms accepted
    pub submissions: usize,
    /// Stopped by Ctrl-C
    pub interrupted: bool,
}

/// Both pages behind one viewport
#[derive(Debug)]
pub struct Site {
    config: SiteConfig,
    viewport: SharedViewport,
    landing: LandingPage,
    signup: SignupPage,
    navigator: RecordingNavigator,
    submitter: LoggingSubmitter,
    last_phase: usize,
    report: PreviewReport,
}

impl Site {
    /// Build both pages. Nothing is mounted yet.
    pub fn new(config: SiteConfig) -> Result<Self> {
        let viewport = SharedViewport::new(config.layout.viewport_height);
        Ok(Self {
            landing: LandingPage::new(&config, viewport.clone())?,
            signup: SignupPage::new()?,
            navigator: RecordingNavigator::new(),
            submitter: LoggingSubmitter::new(),
            last_phase: 0,
            report: PreviewReport::default(),
            viewport,
            config,
        })
    }

    /// Mount the page for the current route
    pub fn open(&mut self) {
        match self.navigator.current_route() {
            Route::Landing => {
                self.landing.mount();
                self.report.landing_mounts += 1;
                self.last_phase = self.landing.protocol_phase();
            }
            Route::Signup => {
                self.signup.mount();
            }
        }
    }

    /// Unmount everything
    pub fn close(&mut self) {
        self.landing.unmount();
        self.signup.unmount();
    }

    /// Route on screen
    pub fn route(&self) -> Route {
        self.navigator.current_route()
    }

    /// The shared viewport
    pub fn viewport(&self) -> &SharedViewport {
        &self.viewport
    }

    /// The landing page
    pub fn landing(&self) -> &LandingPage {
        &self.landing
    }

    /// Counters so far
    pub fn report(&self) -> PreviewReport {
        PreviewReport {
            submissions: self.submitter.accepted(),
            ..self.report.clone()
        }
    }

    /// Carry out a navigation request
    pub fn navigate(&mut self, request: NavigationRequest) {
        let from = self.navigator.current_route();
        self.navigator.navigate(request);
        match request {
            NavigationRequest::Route(route) if route != from => {
                match from {
                    Route::Landing => self.landing.unmount(),
                    Route::Signup => self.signup.unmount(),
                }
                self.viewport.scroll_to(0.0);
                self.open();
            }
            NavigationRequest::Route(_) => {}
            NavigationRequest::ScrollTo(section) => {
                if from == Route::Landing {
                    let layout = &self.config.layout;
                    self.viewport
                        .scroll_to(layout.section_offset(section).min(layout.max_scroll()));
                    self.landing.on_scroll();
                }
            }
        }
    }

    /// Scroll the landing page, stopping at the bottom
    pub fn scroll_by(&mut self, delta: f32) {
        if self.route() != Route::Landing {
            return;
        }
        let current = self.viewport.scroll_offset();
        let target = (current + delta).clamp(0.0, self.config.layout.max_scroll());
        if target != current {
            self.viewport.scroll_to(target);
            self.landing.on_scroll();
        }
    }

    /// Play one scripted action
    pub fn perform(&mut self, cue: Cue) -> Result<()> {
        tracing::info!(?cue, route = %self.route(), "Visitor action");
        match (cue, self.route()) {
            (Cue::Follow(link), Route::Landing) => {
                let request = self.landing.follow(link);
                self.navigate(request);
            }
            (Cue::Follow(link), Route::Signup) => {
                // The signup page only links home; anything else goes there first
                let home = self.signup.return_home();
                self.navigate(home);
                if link != Link::ReturnHome {
                    let request = self.landing.follow(link);
                    self.navigate(request);
                }
            }
            (Cue::SelectAdhesion(index), Route::Landing) => {
                self.landing.select_adhesion(index);
            }
            (Cue::JoinWaitlist { name, email }, Route::Landing) => {
                let form = self.landing.waitlist_mut();
                form.set_field("name", name)?;
                form.set_field("email", email)?;
                let next = self.landing.submit_waitlist(&mut self.submitter)?;
                self.navigate(next);
            }
            (Cue::CreateAccount { email, password }, Route::Signup) => {
                self.signup.input("email", email)?;
                self.signup.input("password", password)?;
                let next = self.signup.submit(&mut self.submitter)?;
                self.navigate(next);
            }
            (cue, route) => {
                tracing::warn!(?cue, %route, "Action not available on this page, skipping");
            }
        }
        Ok(())
    }

    /// Advance the page on screen by `dt`
    pub fn frame(&mut self, dt: Duration) -> bool {
        self.report.frames += 1;
        let changed = match self.route() {
            Route::Landing => self.landing.frame(dt),
            Route::Signup => self.signup.frame(dt),
        };
        if changed {
            self.report.changed_frames += 1;
        }
        if self.route() == Route::Landing {
            let phase = self.landing.protocol_phase();
            if phase != self.last_phase {
                self.last_phase = phase;
                self.report.phase_changes += 1;
            }
        }
        changed
    }

    /// JSON snapshot of the page on screen
    pub fn snapshot_json(&self) -> Result<String> {
        let json = match self.route() {
            Route::Landing => serde_json::to_string(&self.landing.snapshot())?,
            Route::Signup => serde_json::to_string(&self.signup.snapshot())?,
        };
        Ok(json)
    }
}

/// Scroll down at a steady speed, as a visitor reading the page would
async fn scroll_visitor(site: Arc<Mutex<Site>>, period: Duration, speed: f32) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let step = speed * period.as_secs_f32();
    loop {
        ticker.tick().await;
        site.lock().scroll_by(step);
    }
}

/// Frame loop plus the scripted visit
async fn play(site: Arc<Mutex<Site>>, preview: &PreviewConfig) -> Result<()> {
    let mut ticker = tokio::time::interval(preview.frame_period());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let run_time = preview.run_time();
    let start = Instant::now();
    let mut last = start;
    let mut cues = VISIT.iter().peekable();

    loop {
        ticker.tick().await;
        let now = Instant::now();
        let elapsed = now.duration_since(start);
        if elapsed >= run_time {
            return Ok(());
        }
        let dt = now.duration_since(last);
        last = now;

        let mut site = site.lock();
        while let Some((_, cue)) =
            cues.next_if(|(at, _)| elapsed.as_secs_f32() >= at * run_time.as_secs_f32())
        {
            site.perform(*cue)?;
        }
        if site.frame(dt) && preview.emit_snapshots {
            let json = site.snapshot_json()?;
            writeln!(std::io::stdout().lock(), "{json}")?;
        }
    }
}

/// Run a preview visit until it ends or Ctrl-C
pub async fn run(config: SiteConfig) -> Result<PreviewReport> {
    let preview = config.preview.clone();
    let site = Arc::new(Mutex::new(Site::new(config)?));
    site.lock().open();
    tracing::info!(
        seconds = preview.run_seconds,
        fps = preview.frame_rate,
        "Preview started"
    );

    let scroller = tokio::spawn(scroll_visitor(
        Arc::clone(&site),
        preview.frame_period(),
        preview.scroll_speed,
    ));

    let outcome = tokio::select! {
        result = play(Arc::clone(&site), &preview) => result.map(|()| false),
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                tracing::warn!("Failed to listen for Ctrl-C: {e}");
            }
            Ok(true)
        }
    };
    scroller.abort();

    let mut report = {
        let mut site = site.lock();
        site.close();
        site.report()
    };
    report.interrupted = outcome?;
    tracing::info!(
        frames = report.frames,
        changed = report.changed_frames,
        mounts = report.landing_mounts,
        phases = report.phase_changes,
        submissions = report.submissions,
        interrupted = report.interrupted,
        "Preview finished"
    );
    Ok(report)
}
