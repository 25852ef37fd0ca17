//! Conversion between spherical (ρ, θ, φ) and Cartesian (x, y, z)
//! coordinates, physics convention: θ is the inclination from the +z axis and
//! φ the azimuth in the xy plane measured from +x.

use serde::{ Deserialize, Serialize };

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spherical {
    /// Radial distance
    pub rho: f64,
    /// Inclination
    pub theta: f64,
    /// Azimuth
    pub phi: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cartesian {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Integer lattice point, either in picometers or in grid steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl Spherical {
    pub fn new(rho: f64, theta: f64, phi: f64) -> Self {
        Self { rho, theta, phi }
    }

    pub fn to_cartesian(&self) -> Cartesian {
        let (x, y, z) = to_cartesian(self.rho, self.theta, self.phi);
        Cartesian { x, y, z }
    }
}

impl Cartesian {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_spherical(&self) -> Spherical {
        let (rho, theta, phi) = to_spherical(self.x, self.y, self.z);
        Spherical { rho, theta, phi }
    }

    /// Round each component to the nearest multiple of `unit`, expressed in
    /// units of `unit`.
    pub fn round(&self, unit: f64) -> GridPoint {
        GridPoint {
            x: (self.x / unit).round() as i64,
            y: (self.y / unit).round() as i64,
            z: (self.z / unit).round() as i64,
        }
    }
}

impl GridPoint {
    /// Position of this lattice point for lattice spacing `step`.
    pub fn scaled(&self, step: f64) -> Cartesian {
        Cartesian {
            x: self.x as f64 * step,
            y: self.y as f64 * step,
            z: self.z as f64 * step,
        }
    }
}

/// x = ρ sinθ cosφ, y = ρ sinθ sinφ, z = ρ cosθ
pub fn to_cartesian(rho: f64, theta: f64, phi: f64) -> (f64, f64, f64) {
    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    (rho * sin_theta * cos_phi, rho * sin_theta * sin_phi, rho * cos_theta)
}

/// Inverse of [`to_cartesian`] with θ in [0, π] and φ in (-π, π].
///
/// Both angles come from `atan2`, so points on the coordinate planes resolve to
/// the correct branch; the origin maps to (0, 0, 0).
pub fn to_spherical(x: f64, y: f64, z: f64) -> (f64, f64, f64) {
    let rho = (x * x + y * y + z * z).sqrt();
    let theta = x.hypot(y).atan2(z);
    let phi = y.atan2(x);
    (rho, theta, phi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{ FRAC_PI_2, PI };

    fn close(a: (f64, f64, f64), b: (f64, f64, f64)) -> bool {
        let tol = 1e-9 * (1.0 + b.0.abs() + b.1.abs() + b.2.abs());
        (a.0 - b.0).abs() < tol && (a.1 - b.1).abs() < tol && (a.2 - b.2).abs() < tol
    }

    #[test]
    fn test_axes() {
        assert!(close(to_cartesian(2.0, 0.0, 0.0), (0.0, 0.0, 2.0)));
        assert!(close(to_cartesian(2.0, FRAC_PI_2, 0.0), (2.0, 0.0, 0.0)));
        assert!(close(to_cartesian(2.0, FRAC_PI_2, FRAC_PI_2), (0.0, 2.0, 0.0)));
        assert!(close(to_cartesian(2.0, PI, 1.0), (0.0, 0.0, -2.0)));
    }

    #[test]
    fn test_quadrant_safe_inverse() {
        // x = 0
        assert!(close(to_spherical(0.0, 3.0, 0.0), (3.0, FRAC_PI_2, FRAC_PI_2)));
        assert!(close(to_spherical(0.0, -3.0, 0.0), (3.0, FRAC_PI_2, -FRAC_PI_2)));
        // z = 0
        assert!(close(to_spherical(1.0, 0.0, 0.0), (1.0, FRAC_PI_2, 0.0)));
        // negative x lands in the second/third quadrant, not the first/fourth
        assert!(close(to_spherical(-1.0, 0.0, 0.0), (1.0, FRAC_PI_2, PI)));
        let (_, _, phi) = to_spherical(-1.0, -1.0, 0.0);
        assert!((phi + 3.0 * PI / 4.0).abs() < 1e-12);
        // negative z gives an obtuse inclination
        let (_, theta, _) = to_spherical(0.0, 0.0, -5.0);
        assert!((theta - PI).abs() < 1e-12);
    }

    #[test]
    fn test_origin() {
        assert_eq!(to_spherical(0.0, 0.0, 0.0), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_round() {
        let p = Cartesian::new(12.4, -7.6, 0.49).round(1.0);
        assert_eq!(p, GridPoint { x: 12, y: -8, z: 0 });
        let p = Cartesian::new(40.0, -20.0, 9.0).round(20.0);
        assert_eq!(p, GridPoint { x: 2, y: -1, z: 0 });
        assert_eq!(p.scaled(20.0), Cartesian::new(40.0, -20.0, 0.0));
    }
}
