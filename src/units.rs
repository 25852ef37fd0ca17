//! Length scale shared by every formula and sampler.
//!
//! All coordinates in this crate are expressed in picometers. Constants are
//! taken from NIST.

use std::f64::consts::PI;

/// One picometer (m)
pub const PICOMETER: f64 = 1e-12;

/// Bohr radius (m)
pub const BOHR_RADIUS_M: f64 = 5.29177210903e-11;
//                         +/- 0.00000000080e-11

/// Bohr radius (pm)
pub const BOHR_RADIUS: f64 = 52.9177210903;

/// Convert degrees to radians.
pub fn deg(x: f64) -> f64 {
    x * PI / 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bohr_radius_scale() {
        assert!((BOHR_RADIUS_M / PICOMETER - BOHR_RADIUS).abs() < 1e-9);
    }

    #[test]
    fn test_deg() {
        assert!((deg(180.0) - PI).abs() < 1e-15);
        assert!((deg(4.0) * 45.0 - PI).abs() < 1e-12);
    }
}
