// SPDX-License-Identifier: MIT OR Apache-2.0
//! The `/signup` page.

use crate::choreography;
use crate::forms::{self, FormSubmitter, SignupForm};
use crate::navigation::{Link, NavigationRequest};
use nailit_motion::{Choreographer, Frame, Motion, MountId, TimelineError};
use serde::Serialize;
use std::time::Duration;

/// Render state of the signup page
#[derive(Debug, Clone, Serialize)]
pub struct SignupSnapshot {
    /// Current mount, if mounted
    pub mount: Option<MountId>,
    /// Form element entrance values
    pub form: Frame,
    /// Background zoom values
    pub backdrop: Frame,
    /// Email as typed
    pub email: String,
    /// Whether the password field has content
    pub has_password: bool,
}

/// State behind `/signup`
#[derive(Debug)]
pub struct SignupPage {
    mount: Option<MountId>,
    entrance: Choreographer,
    backdrop: Choreographer,
    form: SignupForm,
}

impl SignupPage {
    /// Build the page
    pub fn new() -> Result<Self, TimelineError> {
        Ok(Self {
            mount: None,
            entrance: Choreographer::new(choreography::signup_entrance().build()?),
            backdrop: Choreographer::new(choreography::signup_backdrop().build()?),
            form: SignupForm::new(),
        })
    }

    /// Start the entrance and the background loop
    pub fn mount(&mut self) -> MountId {
        if let Some(id) = self.mount {
            return id;
        }
        let id = MountId::new();
        self.mount = Some(id);
        self.entrance.start();
        self.backdrop.start();
        tracing::info!(mount = %id, "Signup page mounted");
        id
    }

    /// Stop both timelines and forget the typed values
    pub fn unmount(&mut self) {
        let Some(id) = self.mount.take() else {
            return;
        };
        self.entrance.stop();
        self.backdrop.stop();
        self.form.clear();
        tracing::info!(mount = %id, "Signup page unmounted");
    }

    /// Advance both timelines
    pub fn frame(&mut self, dt: Duration) -> bool {
        if self.mount.is_none() {
            return false;
        }
        let entrance = self.entrance.update(dt);
        let backdrop = self.backdrop.update(dt);
        entrance || backdrop
    }

    /// Input change on a form field
    pub fn input(&mut self, field: &str, value: impl Into<String>) -> forms::Result<()> {
        self.form.set_field(field, value)
    }

    /// Submit the form. On success the form is cleared and the visitor goes home.
    pub fn submit(&mut self, submitter: &mut impl FormSubmitter) -> forms::Result<NavigationRequest> {
        let next = forms::submit(self.form.validate(), submitter)?;
        self.form.clear();
        Ok(next)
    }

    /// "Return Home"
    pub fn return_home(&self) -> NavigationRequest {
        Link::ReturnHome.target()
    }

    /// Render state for the current frame
    pub fn snapshot(&self) -> SignupSnapshot {
        SignupSnapshot {
            mount: self.mount,
            form: self.entrance.frame().clone(),
            backdrop: self.backdrop.frame().clone(),
            email: self.form.email().to_string(),
            has_password: self.form.has_password(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{FormError, LoggingSubmitter};
    use crate::navigation::Route;
    use nailit_motion::Property;

    #[test]
    fn test_entrance_and_backdrop() {
        let mut page = SignupPage::new().unwrap();
        page.mount();
        let start = page.snapshot();
        assert_eq!(start.form.float(".form-elem", 0, Property::Opacity), Some(0.0));

        // Five staggered elements: 0.1 delay + 0.4 stagger + 1.2 play
        page.frame(Duration::from_secs(2));
        let settled = page.snapshot();
        for member in 0..5 {
            assert_eq!(settled.form.float(".form-elem", member, Property::Opacity), Some(1.0));
        }
        let scale = settled.backdrop.float(".auth-bg", 0, Property::Scale).unwrap();
        assert!(scale > 1.0 && scale < 1.05);
    }

    #[test]
    fn test_unmount_reverts_and_clears() {
        let mut page = SignupPage::new().unwrap();
        page.mount();
        page.input("email", "ana@nailit.com").unwrap();
        page.frame(Duration::from_secs(5));

        page.unmount();
        assert!(!page.frame(Duration::from_secs(1)));
        let snapshot = page.snapshot();
        assert!(snapshot.mount.is_none());
        assert_eq!(snapshot.backdrop.float(".auth-bg", 0, Property::Scale), Some(1.0));
        assert_eq!(snapshot.email, "");
    }

    #[test]
    fn test_submit() {
        let mut page = SignupPage::new().unwrap();
        page.mount();
        let mut submitter = LoggingSubmitter::new();

        page.input("email", "ana@nailit.com").unwrap();
        assert_eq!(page.submit(&mut submitter), Err(FormError::Missing("Password")));

        page.input("password", "hunter22").unwrap();
        assert!(page.snapshot().has_password);
        assert_eq!(
            page.submit(&mut submitter),
            Ok(NavigationRequest::Route(Route::Landing))
        );
        assert_eq!(page.snapshot().email, "");
        assert_eq!(page.return_home(), NavigationRequest::Route(Route::Landing));
    }
}
