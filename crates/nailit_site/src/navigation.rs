// SPDX-License-Identifier: MIT OR Apache-2.0
//! Routes, in-page sections and the links between them.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Top-level view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Route {
    /// The landing page at `/`
    #[default]
    Landing,
    /// The signup form at `/signup`
    Signup,
}

impl Route {
    /// URL path
    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Signup => "/signup",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Scroll target on the landing page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    /// Top of the page
    Top,
    /// `#features`
    Features,
    /// `#philosophy`
    Philosophy,
    /// `#protocol`
    Protocol,
    /// `#waitlist`
    Waitlist,
}

impl Section {
    /// Fragment identifier
    pub fn fragment(&self) -> &'static str {
        match self {
            Section::Top => "",
            Section::Features => "features",
            Section::Philosophy => "philosophy",
            Section::Protocol => "protocol",
            Section::Waitlist => "waitlist",
        }
    }
}

/// Something a visitor can click that moves them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Link {
    /// Navbar "System"
    System,
    /// Navbar "Philosophy"
    Philosophy,
    /// Navbar "Protocol"
    Protocol,
    /// Navbar "Sign Up"
    SignUp,
    /// Hero "Claim Early Access"
    ClaimAccess,
    /// Signup page "Return Home"
    ReturnHome,
}

impl Link {
    /// Where the link goes
    pub fn target(&self) -> NavigationRequest {
        match self {
            Link::System => NavigationRequest::ScrollTo(Section::Features),
            Link::Philosophy => NavigationRequest::ScrollTo(Section::Philosophy),
            Link::Protocol => NavigationRequest::ScrollTo(Section::Protocol),
            Link::ClaimAccess => NavigationRequest::ScrollTo(Section::Waitlist),
            Link::SignUp => NavigationRequest::Route(Route::Signup),
            Link::ReturnHome => NavigationRequest::Route(Route::Landing),
        }
    }
}

/// A request to move the visitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationRequest {
    /// Switch to another view
    Route(Route),
    /// Scroll to a section of the landing page
    ScrollTo(Section),
}

/// Host side of navigation
pub trait Navigator {
    /// Carry out a navigation request
    fn navigate(&mut self, request: NavigationRequest);

    /// The view currently shown
    fn current_route(&self) -> Route;
}

/// Requests kept by [`RecordingNavigator`]
pub const HISTORY_LIMIT: usize = 32;

/// Navigator that only records what it was asked to do
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    route: Route,
    history: VecDeque<NavigationRequest>,
}

impl RecordingNavigator {
    /// Create a navigator showing the landing page
    pub fn new() -> Self {
        Self::default()
    }

    /// The last [`HISTORY_LIMIT`] requests, oldest first
    pub fn history(&self) -> impl Iterator<Item = &NavigationRequest> {
        self.history.iter()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, request: NavigationRequest) {
        if let NavigationRequest::Route(route) = request {
            if route != self.route {
                tracing::info!("Navigating {} -> {}", self.route, route);
            }
            self.route = route;
        }
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(request);
    }

    fn current_route(&self) -> Route {
        self.route
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_targets() {
        assert_eq!(Link::SignUp.target(), NavigationRequest::Route(Route::Signup));
        assert_eq!(
            Link::ClaimAccess.target(),
            NavigationRequest::ScrollTo(Section::Waitlist)
        );
        assert_eq!(Link::System.target(), NavigationRequest::ScrollTo(Section::Features));
    }

    #[test]
    fn test_recording_navigator() {
        let mut nav = RecordingNavigator::new();
        assert_eq!(nav.current_route(), Route::Landing);

        nav.navigate(Link::Protocol.target());
        assert_eq!(nav.current_route(), Route::Landing);

        nav.navigate(Link::SignUp.target());
        assert_eq!(nav.current_route(), Route::Signup);
        assert_eq!(nav.history().count(), 2);
        assert_eq!(Route::Signup.to_string(), "/signup");
    }

    #[test]
    fn test_history_is_bounded() {
        let mut nav = RecordingNavigator::new();
        nav.navigate(Link::SignUp.target());
        for _ in 0..HISTORY_LIMIT {
            nav.navigate(Link::Protocol.target());
        }
        assert_eq!(nav.history().count(), HISTORY_LIMIT);
        // The oldest request was dropped
        assert!(nav
            .history()
            .all(|r| *r == NavigationRequest::ScrollTo(Section::Protocol)));
        assert_eq!(nav.current_route(), Route::Signup);
    }
}
