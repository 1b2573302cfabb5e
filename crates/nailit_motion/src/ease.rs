// SPDX-License-Identifier: MIT OR Apache-2.0
//! Easing curves.
//!
//! Power curves follow the common tweening convention: `Power(1)` is
//! quadratic, `Power(2)` cubic, `Power(3)` quartic and `Power(4)` quintic.

use serde::{Deserialize, Serialize};

/// Easing curve mapping linear progress in [0, 1] to eased progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ease {
    /// Constant velocity
    Linear,
    /// Slow start
    In(u8),
    /// Slow end
    Out(u8),
    /// Slow start and end
    InOut(u8),
}

impl Default for Ease {
    fn default() -> Self {
        Ease::Out(1)
    }
}

impl Ease {
    /// Apply the curve to `t` (clamped to [0, 1])
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Ease::Linear => t,
            Ease::In(power) => t.powi(exponent(power)),
            Ease::Out(power) => 1.0 - (1.0 - t).powi(exponent(power)),
            Ease::InOut(power) => {
                let e = exponent(power);
                if t < 0.5 {
                    (2.0 * t).powi(e) / 2.0
                } else {
                    1.0 - (2.0 * (1.0 - t)).powi(e) / 2.0
                }
            }
        }
    }
}

fn exponent(power: u8) -> i32 {
    i32::from(power.clamp(1, 4)) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 7] = [
        Ease::Linear,
        Ease::In(1),
        Ease::Out(2),
        Ease::InOut(3),
        Ease::In(4),
        Ease::Out(4),
        Ease::InOut(1),
    ];

    #[test]
    fn test_endpoints() {
        for ease in ALL {
            assert!(ease.apply(0.0).abs() < 1e-6, "{ease:?}");
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-6, "{ease:?}");
            assert!(ease.apply(-1.0).abs() < 1e-6);
            assert!((ease.apply(2.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_shapes() {
        assert!((Ease::In(1).apply(0.5) - 0.25).abs() < 1e-6);
        assert!((Ease::Out(1).apply(0.5) - 0.75).abs() < 1e-6);
        assert!((Ease::InOut(2).apply(0.5) - 0.5).abs() < 1e-6);
        assert!(Ease::Out(3).apply(0.2) > Ease::Linear.apply(0.2));
    }
}
