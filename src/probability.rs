//! Radial probability, normalization and pruning; the pipeline entry points.

use std::f64::consts::PI;
use serde::{ Deserialize, Serialize };
use tracing::debug;
use crate::{
    config::{ PipelineConfig, ProfileConfig },
    error::{ OrbitalError, OrbitalResult },
    physics::{ Orbital, QuantumNumbers, WaveFunction },
    sampling::{ self, Coordinate, Sample },
};

/// Probability of finding the electron in a thin spherical shell of radius
/// `rho`, 4πρ²ψ².
///
/// NOTE: the returned probability is not normalized.
pub fn radial_probability(rho: f64, psi: f64) -> f64 {
    // ρψ is squared as one factor so ρ = 0 stays 0 for any finite ψ
    4.0 * PI * (rho * psi).powi(2)
}

/// Divide every probability by the sum of all probabilities. A set summing to
/// exactly zero is left untouched.
pub fn normalize(samples: &mut [Sample]) {
    let total: f64 = samples.iter().map(|s| s.probability).sum();
    if total != 0.0 {
        samples.iter_mut().for_each(|s| { s.probability /= total; });
    }
}

/// A surviving sample on the integer lattice: picometers for spherical
/// sampling, grid steps for cube sampling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
    pub z: i64,
    pub probability: f64,
}

/// Keep samples with probability ≥ `threshold`, in input order, converting
/// spherical coordinates to rounded Cartesian ones.
pub fn prune(samples: &[Sample], threshold: f64) -> OrbitalResult<Vec<Point>> {
    OrbitalError::check_threshold(threshold)?;
    let points: Vec<Point> = samples.iter()
        .filter(|s| s.probability >= threshold)
        .map(|s| {
            let p = match s.coord {
                Coordinate::Spherical(c) => c.to_cartesian().round(1.0),
                Coordinate::Grid(p) => p,
            };
            Point { x: p.x, y: p.y, z: p.z, probability: s.probability }
        })
        .collect();
    debug!(
        kept = points.len(),
        dropped = samples.len() - points.len(),
        threshold,
        "pruned sample set"
    );
    Ok(points)
}

/// Sample, normalize and prune `psi` under `config`.
pub fn generate<W>(psi: &W, config: &PipelineConfig) -> OrbitalResult<Vec<Point>>
where W: WaveFunction + ?Sized
{
    config.validate()?;
    let mut set = sampling::sample(psi, &config.strategy)?;
    set.normalize();
    set.prune(config.threshold)
}

/// [`generate`] for the closed-form orbital of `qn`.
pub fn generate_orbital(qn: QuantumNumbers, config: &PipelineConfig)
    -> OrbitalResult<Vec<Point>>
{
    let orbital = Orbital::resolve(qn)?;
    generate(&orbital, config)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    /// Radius (pm)
    pub radius: f64,
    pub probability: f64,
}

/// Normalized radial probability along the fixed direction of `config`.
pub fn radial_profile<W>(psi: &W, config: &ProfileConfig)
    -> OrbitalResult<Vec<ProfilePoint>>
where W: WaveFunction + ?Sized
{
    config.validate()?;
    let mut profile: Vec<ProfilePoint> = (0..config.point_count())
        .map(|i| {
            let radius = i as f64 * config.step;
            let amplitude = psi.psi(radius, config.theta, config.phi);
            ProfilePoint { radius, probability: radial_probability(radius, amplitude) }
        })
        .collect();
    let total: f64 = profile.iter().map(|p| p.probability).sum();
    if total != 0.0 {
        profile.iter_mut().for_each(|p| { p.probability /= total; });
    }
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        coords::{ GridPoint, Spherical },
        physics::resolve,
        units::BOHR_RADIUS as A0,
    };

    fn spherical(rho: f64, theta: f64, phi: f64, probability: f64) -> Sample {
        Sample { coord: Coordinate::Spherical(Spherical::new(rho, theta, phi)), probability }
    }

    fn grid(x: i64, y: i64, z: i64, probability: f64) -> Sample {
        Sample { coord: Coordinate::Grid(GridPoint { x, y, z }), probability }
    }

    #[test]
    fn test_radial_probability() {
        assert_eq!(radial_probability(0.0, 123.0), 0.0);
        assert_eq!(radial_probability(0.0, -1e300), 0.0);
        assert_eq!(radial_probability(0.0, 1e200), 0.0);
        assert_eq!(radial_probability(0.0, f64::MAX), 0.0);
        assert!((radial_probability(1.0, 1.0) - 4.0 * PI).abs() < 1e-15);
        assert!((radial_probability(2.0, 0.5) - 4.0 * PI).abs() < 1e-15);
        assert!(radial_probability(1.0, f64::NAN).is_nan());
        assert!(radial_probability(0.0, f64::INFINITY).is_nan());
        assert_eq!(radial_probability(1.0, f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn test_normalize() {
        let mut samples = vec![grid(0, 0, 0, 1.0), grid(1, 0, 0, 3.0), grid(2, 0, 0, 4.0)];
        normalize(&mut samples);
        let probs: Vec<f64> = samples.iter().map(|s| s.probability).collect();
        assert_eq!(probs, vec![0.125, 0.375, 0.5]);
    }

    #[test]
    fn test_normalize_zero_sum() {
        let mut samples = vec![grid(0, 0, 0, 0.0), grid(1, 0, 0, 0.0)];
        let before = samples.clone();
        normalize(&mut samples);
        assert_eq!(samples, before);

        let mut empty: Vec<Sample> = Vec::new();
        normalize(&mut empty);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_prune_keeps_order_and_threshold() {
        let samples = vec![
            grid(3, 0, 0, 0.2),
            grid(1, 0, 0, 1e-12),
            grid(2, 0, 0, 0.5),
            grid(0, 0, 0, 0.3),
        ];
        let points = prune(&samples, 0.25).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!((points[0].x, points[0].probability), (2, 0.5));
        assert_eq!((points[1].x, points[1].probability), (0, 0.3));
        // threshold is inclusive
        assert_eq!(prune(&samples, 0.5).unwrap().len(), 1);
        assert_eq!(prune(&samples, 0.0).unwrap().len(), 4);
        assert!(matches!(prune(&samples, -1.0), Err(OrbitalError::BadThreshold(_))));
    }

    #[test]
    fn test_prune_converts_spherical() {
        let samples = vec![
            spherical(10.0, PI / 2.0, 0.0, 0.5),
            spherical(10.0, PI, 0.0, 0.5),
            spherical(10.4, PI / 2.0, PI / 2.0, 0.5),
        ];
        let points = prune(&samples, 0.1).unwrap();
        assert_eq!((points[0].x, points[0].y, points[0].z), (10, 0, 0));
        assert_eq!((points[1].x, points[1].y, points[1].z), (0, 0, -10));
        assert_eq!((points[2].x, points[2].y, points[2].z), (0, 10, 0));
    }

    #[test]
    fn test_radial_profile_peaks_at_bohr_radius() {
        let psi = resolve(1, 0, 0).unwrap();
        let profile = radial_profile(&psi, &ProfileConfig::default()).unwrap();
        assert_eq!(profile.len(), 1300);
        let total: f64 = profile.iter().map(|p| p.probability).sum();
        assert!((total - 1.0).abs() < 1e-12);
        let peak = profile.iter()
            .max_by(|a, b| a.probability.total_cmp(&b.probability))
            .unwrap();
        assert_eq!(peak.radius, A0.round());
    }

    #[test]
    fn test_radial_profile_2s_node() {
        let psi = resolve(2, 0, 0).unwrap();
        let profile = radial_profile(&psi, &ProfileConfig::default()).unwrap();
        let node = &profile[(2.0 * A0).round() as usize];
        let before = &profile[50];
        assert!(node.probability < before.probability);
        assert!(node.probability < 1e-5);
    }
}
