//! Easing curves applied to animation progress

use serde::{Deserialize, Serialize};

/// Easing functions for camera animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ease {
    Linear,
    QuadIn,
    QuadOut,
    /// Quadratic ease-in/ease-out, the camera flight default
    #[default]
    QuadInOut,
    CubicOut,
    CubicInOut,
}

impl Ease {
    /// Map linear progress in [0, 1] to eased progress in [0, 1]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::QuadIn => t * t,
            Ease::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Ease::CubicOut => 1.0 - (1.0 - t).powi(3),
            Ease::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ALL: [Ease; 6] = [
        Ease::Linear,
        Ease::QuadIn,
        Ease::QuadOut,
        Ease::QuadInOut,
        Ease::CubicOut,
        Ease::CubicInOut,
    ];

    #[test]
    fn test_endpoints_fixed() {
        for ease in ALL {
            assert_relative_eq!(ease.apply(0.0), 0.0);
            assert_relative_eq!(ease.apply(1.0), 1.0);
        }
    }

    #[test]
    fn test_monotonic() {
        for ease in ALL {
            let mut previous = 0.0;
            for i in 1..=100 {
                let v = ease.apply(i as f32 / 100.0);
                assert!(v >= previous, "{ease:?} decreased at step {i}");
                previous = v;
            }
        }
    }

    #[test]
    fn test_quad_in_out_shape() {
        assert_relative_eq!(Ease::QuadInOut.apply(0.5), 0.5);
        assert_relative_eq!(Ease::QuadInOut.apply(0.25), 0.125);
        assert_relative_eq!(Ease::QuadInOut.apply(0.75), 0.875);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(Ease::QuadInOut.apply(-1.0), 0.0);
        assert_eq!(Ease::QuadInOut.apply(2.0), 1.0);
    }
}
