// SPDX-License-Identifier: MIT OR Apache-2.0
//! Signup and waitlist forms.
//!
//! Forms hold whatever the visitor typed; validation happens on submit and
//! produces a [`Submission`] for a [`FormSubmitter`]. There is no backend,
//! the bundled [`LoggingSubmitter`] only records that a submission arrived.

use crate::navigation::{NavigationRequest, Route};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Form errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    /// A required field is empty
    #[error("{0} is required")]
    Missing(&'static str),

    /// The email address is malformed
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    /// No field with this name
    #[error("Unknown field '{0}'")]
    UnknownField(String),

    /// The submitter refused the submission
    #[error("Submission rejected: {0}")]
    Rejected(String),
}

/// Result type for form operations
pub type Result<T> = std::result::Result<T, FormError>;

/// Loose shape check: one `@`, something before it, a dotted domain after
/// it, and no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

fn required(name: &'static str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError::Missing(name));
    }
    Ok(value.to_string())
}

fn email(value: &str) -> Result<String> {
    let value = required("Email", value)?;
    if !is_valid_email(&value) {
        return Err(FormError::InvalidEmail(value));
    }
    Ok(value)
}

/// A validated form
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "form")]
pub enum Submission {
    /// Account creation
    Signup {
        /// Account email
        email: String,
        /// Account password
        #[serde(skip)]
        password: String,
    },
    /// Early access waitlist
    Waitlist {
        /// Visitor name
        name: String,
        /// Visitor email
        email: String,
    },
}

impl Submission {
    /// Form name, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Submission::Signup { .. } => "signup",
            Submission::Waitlist { .. } => "waitlist",
        }
    }

    /// Email on the submission
    pub fn email(&self) -> &str {
        match self {
            Submission::Signup { email, .. } | Submission::Waitlist { email, .. } => email,
        }
    }
}

impl fmt::Debug for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Submission::Signup { email, .. } => f
                .debug_struct("Signup")
                .field("email", email)
                .field("password", &"<redacted>")
                .finish(),
            Submission::Waitlist { name, email } => f
                .debug_struct("Waitlist")
                .field("name", name)
                .field("email", email)
                .finish(),
        }
    }
}

/// The `/signup` form
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    email: String,
    password: String,
}

impl SignupForm {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field by its input name
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        match name {
            "email" => self.email = value.into(),
            "password" => self.password = value.into(),
            other => return Err(FormError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    /// Email as typed
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Whether a password has been typed
    pub fn has_password(&self) -> bool {
        !self.password.is_empty()
    }

    /// Validate into a submission
    pub fn validate(&self) -> Result<Submission> {
        let email = email(&self.email)?;
        if self.password.is_empty() {
            return Err(FormError::Missing("Password"));
        }
        Ok(Submission::Signup {
            email,
            password: self.password.clone(),
        })
    }

    /// Empty every field
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The landing page waitlist form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaitlistForm {
    name: String,
    email: String,
}

impl WaitlistForm {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field by its input name
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        match name {
            "name" => self.name = value.into(),
            "email" => self.email = value.into(),
            other => return Err(FormError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    /// Validate into a submission
    pub fn validate(&self) -> Result<Submission> {
        Ok(Submission::Waitlist {
            name: required("Name", &self.name)?,
            email: email(&self.email)?,
        })
    }

    /// Empty every field
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Receives validated forms
pub trait FormSubmitter {
    /// Accept a submission
    fn submit(&mut self, submission: &Submission) -> Result<()>;
}

/// Submitter that logs each submission and keeps a count
#[derive(Debug, Clone, Default)]
pub struct LoggingSubmitter {
    accepted: usize,
}

impl LoggingSubmitter {
    /// Create a submitter
    pub fn new() -> Self {
        Self::default()
    }

    /// Submissions accepted so far
    pub fn accepted(&self) -> usize {
        self.accepted
    }
}

impl FormSubmitter for LoggingSubmitter {
    fn submit(&mut self, submission: &Submission) -> Result<()> {
        self.accepted += 1;
        tracing::info!(form = submission.kind(), email = submission.email(), "Form submitted");
        Ok(())
    }
}

/// Hand a validated form to `submitter` and return where to go next.
///
/// Both forms return the visitor to the landing page.
pub fn submit(
    submission: Result<Submission>,
    submitter: &mut impl FormSubmitter,
) -> Result<NavigationRequest> {
    let submission = submission.inspect_err(|e| tracing::warn!("Form rejected: {e}"))?;
    submitter.submit(&submission)?;
    Ok(NavigationRequest::Route(Route::Landing))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("ana@nailit.com"));
        assert!(is_valid_email("a.b+c@mail.co.uk"));
        assert!(!is_valid_email("ana"));
        assert!(!is_valid_email("@nailit.com"));
        assert!(!is_valid_email("ana@nailit"));
        assert!(!is_valid_email("ana@.com"));
        assert!(!is_valid_email("ana@nailit."));
        assert!(!is_valid_email("an a@nailit.com"));
        assert!(!is_valid_email("a@b@c.com"));
    }

    #[test]
    fn test_signup_validation() {
        let mut form = SignupForm::new();
        assert_eq!(form.validate(), Err(FormError::Missing("Email")));

        form.set_field("email", "ana@nailit.com").unwrap();
        assert_eq!(form.validate(), Err(FormError::Missing("Password")));

        form.set_field("password", "hunter22").unwrap();
        let submission = form.validate().unwrap();
        assert_eq!(submission.kind(), "signup");
        assert_eq!(submission.email(), "ana@nailit.com");

        assert_eq!(
            form.set_field("phone", "123"),
            Err(FormError::UnknownField("phone".into()))
        );
    }

    #[test]
    fn test_password_never_printed() {
        let mut form = SignupForm::new();
        form.set_field("email", "ana@nailit.com").unwrap();
        form.set_field("password", "hunter22").unwrap();
        assert!(!format!("{form:?}").contains("hunter22"));

        let submission = form.validate().unwrap();
        assert!(!format!("{submission:?}").contains("hunter22"));
        let json = serde_json::to_string(&submission).unwrap();
        assert!(!json.contains("hunter22"));
        assert!(json.contains("\"form\":\"Signup\""));
    }

    #[test]
    fn test_waitlist_validation() {
        let mut form = WaitlistForm::new();
        form.set_field("email", "ana@nailit.com").unwrap();
        assert_eq!(form.validate(), Err(FormError::Missing("Name")));

        form.set_field("name", "  Ana  ").unwrap();
        form.set_field("email", "not-an-email").unwrap();
        assert!(matches!(form.validate(), Err(FormError::InvalidEmail(_))));

        form.set_field("email", "ana@nailit.com").unwrap();
        assert_eq!(
            form.validate(),
            Ok(Submission::Waitlist {
                name: "Ana".into(),
                email: "ana@nailit.com".into()
            })
        );

        form.clear();
        assert_eq!(form, WaitlistForm::default());
    }

    #[test]
    fn test_submit_navigates_home() {
        let mut submitter = LoggingSubmitter::new();
        let mut form = SignupForm::new();
        form.set_field("email", "ana@nailit.com").unwrap();
        form.set_field("password", "hunter22").unwrap();

        let next = submit(form.validate(), &mut submitter).unwrap();
        assert_eq!(next, NavigationRequest::Route(Route::Landing));
        assert_eq!(submitter.accepted(), 1);

        let rejected = submit(SignupForm::new().validate(), &mut submitter);
        assert!(rejected.is_err());
        assert_eq!(submitter.accepted(), 1);
    }

    struct ClosedWaitlist;

    impl FormSubmitter for ClosedWaitlist {
        fn submit(&mut self, _submission: &Submission) -> Result<()> {
            Err(FormError::Rejected("waitlist closed".into()))
        }
    }

    #[test]
    fn test_rejected_submission_propagates() {
        let mut form = WaitlistForm::new();
        form.set_field("name", "Ana").unwrap();
        form.set_field("email", "ana@nailit.com").unwrap();
        let err = submit(form.validate(), &mut ClosedWaitlist).unwrap_err();
        assert_eq!(err, FormError::Rejected("waitlist closed".into()));
        assert_eq!(err.to_string(), "Submission rejected: waitlist closed");
    }
}
