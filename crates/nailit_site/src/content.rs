// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fixed page copy and carousel data.

use serde::Serialize;

/// Brand name shown in the navbar, hero and footer
pub const BRAND: &str = "Nail It!";

/// Text revealed by the live telemetry typewriter
pub const TELEMETRY_TEXT: &str = "Analyzing nail bed... Biocompatibility confirmed. Cellular respiration optimal. Zero trapped moisture detected. Health status: 100%.";

/// Day labels of the scheduler demo
pub const SCHEDULE_DAYS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

/// Day the scheduler demo cursor clicks
pub const HIGHLIGHT_DAY: usize = 3;

/// A hold setting card in the adhesion shuffler
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldSetting {
    /// Setting number
    pub id: u8,
    /// Card title
    pub label: &'static str,
    /// Card subtitle
    pub desc: &'static str,
}

/// Cards of the customizable-adhesion shuffler, top first
pub fn hold_settings() -> Vec<HoldSetting> {
    vec![
        HoldSetting {
            id: 1,
            label: "Standard Hold",
            desc: "(Daily Wear)",
        },
        HoldSetting {
            id: 2,
            label: "Light Hold",
            desc: "(Wudhu-Friendly)",
        },
        HoldSetting {
            id: 3,
            label: "Max Hold",
            desc: "(Event/Weekend)",
        },
    ]
}

/// A slide of the design showcase
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowcaseDesign {
    /// Image path
    pub image: &'static str,
}

/// Design showcase slides in display order
pub fn showcase_designs() -> Vec<ShowcaseDesign> {
    ["/design-1.jpg", "/design-2.jpg", "/design-3.jpg", "/design-4.jpg", "/design-5.jpg"]
        .into_iter()
        .map(|image| ShowcaseDesign { image })
        .collect()
}

/// A selectable adhesion formulation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdhesionOption {
    /// Setting number
    pub id: u8,
    /// Formulation name
    pub name: &'static str,
    /// Expected wear time
    pub duration: &'static str,
    /// Strength meter fill when active (0.0 - 1.0)
    pub level: f32,
}

/// Adhesion tabs in display order
pub fn adhesion_options() -> Vec<AdhesionOption> {
    vec![
        AdhesionOption {
            id: 1,
            name: "Light Hold",
            duration: "1-3 Days",
            level: 0.30,
        },
        AdhesionOption {
            id: 2,
            name: "Standard Hold",
            duration: "7-14 Days",
            level: 0.65,
        },
        AdhesionOption {
            id: 3,
            name: "Max Hold",
            duration: "2-4 Weeks",
            level: 1.0,
        },
    ]
}

/// One card of the stacking protocol section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtocolPhase {
    /// Two-digit step label
    pub step: &'static str,
    /// Card title
    pub title: &'static str,
    /// Card body
    pub desc: &'static str,
}

/// Protocol cards in scroll order
pub fn protocol_phases() -> Vec<ProtocolPhase> {
    vec![
        ProtocolPhase {
            step: "01",
            title: "Choose Your Style",
            desc: "Explore varying lengths, silhouettes, and premium biological finishes. Our sizing intelligence ensures a tailored match for your natural nail curvature.",
        },
        ProtocolPhase {
            step: "02",
            title: "Adhesion Formulation",
            desc: "Select from our biocompatible adhesive range based on your intended wear-time, from light wudhu-ready hold to weekend security.",
        },
        ProtocolPhase {
            step: "03",
            title: "Active Integration",
            desc: "Apply with precision. Our memory-polymer architecture bounds to the natural curve of your nail bed, ensuring zero-gap adherence.",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_shapes() {
        assert_eq!(hold_settings().len(), 3);
        assert_eq!(showcase_designs().len(), 5);
        assert_eq!(protocol_phases().len(), 3);
        assert_eq!(SCHEDULE_DAYS[HIGHLIGHT_DAY], "W");
    }

    #[test]
    fn test_adhesion_levels_increase() {
        let options = adhesion_options();
        assert!(options.windows(2).all(|w| w[0].level < w[1].level));
        assert_eq!(options.last().map(|o| o.level), Some(1.0));
    }
}
