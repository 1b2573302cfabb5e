// SPDX-License-Identifier: MIT OR Apache-2.0
//! Nail It! site state
//!
//! The landing and signup pages built on `nailit_motion`:
//! - Page content and timeline definitions
//! - Mount/unmount of every machine on a page
//! - Serializable per-frame snapshots for a renderer
//! - Forms, navigation and RON configuration
//! - A headless preview driver

pub mod choreography;
pub mod config;
pub mod content;
pub mod driver;
pub mod error;
pub mod forms;
pub mod landing;
pub mod navigation;
pub mod signup;

pub use config::{ConfigError, SiteConfig};
pub use driver::{PreviewReport, Site};
pub use error::{Result, SiteError};
pub use landing::{LandingPage, LandingSnapshot};
pub use navigation::{Link, NavigationRequest, Navigator, Route, Section};
pub use signup::{SignupPage, SignupSnapshot};
