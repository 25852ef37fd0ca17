//! Grid sampling of a wave function over a spherical-shell or Cartesian-cube
//! domain.
//!
//! Each sample holds the radial probability 4πρ²ψ² at its coordinate, so both
//! strategies feed the same normalization and pruning code.

use std::f64::consts::{ PI, TAU };
use rayon::prelude::*;
use serde::{ Deserialize, Serialize };
use tracing::debug;
use crate::{
    coords::{ GridPoint, Spherical },
    error::{ OrbitalError, OrbitalResult },
    physics::WaveFunction,
    probability::{ normalize, prune, radial_probability, Point },
    units::deg,
};

// slack for step counts computed from floating-point ratios
const EPS: f64 = 1e-9;

/// Largest number of samples a single pass may produce.
///
/// The default spherical grid with full inclination holds about 10.5 million.
pub const MAX_SAMPLES: usize = 16_000_000;

/// Range of the inclination angle θ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Inclination {
    /// θ ∊ [0, π], both poles included.
    #[default]
    Half,
    /// θ ∊ [0, 2π).
    Full,
}

/// Spherical-shell grid: ρ ∊ [0, max_radius), φ ∊ [0, 2π), θ per
/// [`Inclination`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphericalGrid {
    /// Angular step for θ and φ (radians).
    pub angular_step: f64,
    /// Radial step (pm).
    pub radial_step: f64,
    /// Exclusive upper bound on ρ (pm).
    pub max_radius: f64,
    pub inclination: Inclination,
}

impl Default for SphericalGrid {
    fn default() -> Self {
        Self {
            angular_step: deg(4.0),
            radial_step: 1.0,
            max_radius: 1300.0,
            inclination: Inclination::Half,
        }
    }
}

/// Cartesian cube grid: x, y, z ∊ [-max, max] in steps of `step` (pm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeGrid {
    pub step: f64,
    pub max: f64,
}

impl Default for CubeGrid {
    fn default() -> Self {
        Self { step: 20.0, max: 1300.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Strategy {
    Spherical(SphericalGrid),
    Cartesian(CubeGrid),
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Spherical(SphericalGrid::default())
    }
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Spherical(_) => "spherical",
            Strategy::Cartesian(_) => "cartesian",
        }
    }

    /// Default grid of the named strategy; anything but `cartesian` selects
    /// spherical sampling.
    pub fn from_query(value: Option<&str>) -> Self {
        match value.unwrap_or("spherical").to_lowercase().as_str() {
            "cartesian" | "cube" => Strategy::Cartesian(CubeGrid::default()),
            _ => Strategy::Spherical(SphericalGrid::default()),
        }
    }

    /// Override the linear step (radial step for spherical grids) and the
    /// domain bound.
    pub fn with_bounds(mut self, step: Option<f64>, max: Option<f64>) -> Self {
        match &mut self {
            Strategy::Spherical(grid) => {
                if let Some(step) = step { grid.radial_step = step; }
                if let Some(max) = max { grid.max_radius = max; }
            }
            Strategy::Cartesian(grid) => {
                if let Some(step) = step { grid.step = step; }
                if let Some(max) = max { grid.max = max; }
            }
        }
        self
    }

    pub fn validate(&self) -> OrbitalResult<()> {
        match self {
            Strategy::Spherical(grid) => {
                OrbitalError::check_step(grid.angular_step)?;
                OrbitalError::check_step(grid.radial_step)?;
                OrbitalError::check_bound(grid.max_radius)?;
            }
            Strategy::Cartesian(grid) => {
                OrbitalError::check_step(grid.step)?;
                OrbitalError::check_bound(grid.max)?;
            }
        }
        OrbitalError::check_sample_count(self.sample_count(), MAX_SAMPLES)
    }

    /// Number of samples a pass with this strategy produces, or `None` if it
    /// does not fit in a `usize`.
    pub fn sample_count(&self) -> Option<usize> {
        match self {
            Strategy::Spherical(grid) => {
                let (n_rho, n_theta, n_phi) = spherical_counts(grid);
                n_rho.checked_mul(n_theta)?.checked_mul(n_phi)
            }
            Strategy::Cartesian(grid) => {
                let side = usize::try_from(cube_half_width(grid)).ok()?
                    .checked_mul(2)?
                    .checked_add(1)?;
                side.checked_pow(3)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Coordinate {
    Spherical(Spherical),
    /// Lattice index, i.e. the position divided by the grid step.
    Grid(GridPoint),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub coord: Coordinate,
    /// Radial probability; unnormalized until [`SampleSet::normalize`].
    pub probability: f64,
}

/// Samples of one pass, in sampling order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    samples: Vec<Sample>,
}

impl SampleSet {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize { self.samples.len() }

    pub fn is_empty(&self) -> bool { self.samples.is_empty() }

    pub fn samples(&self) -> &[Sample] { &self.samples }

    pub fn into_samples(self) -> Vec<Sample> { self.samples }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> { self.samples.iter() }

    /// Sum of all probabilities.
    pub fn total(&self) -> f64 {
        self.samples.iter().map(|s| s.probability).sum()
    }

    /// Rescale in place so probabilities sum to 1. See [`normalize`].
    pub fn normalize(&mut self) {
        normalize(&mut self.samples);
    }

    /// See [`prune`].
    pub fn prune(&self, threshold: f64) -> OrbitalResult<Vec<Point>> {
        prune(&self.samples, threshold)
    }
}

/// Evaluate `psi` over the domain of `strategy`.
///
/// The loop runs in parallel over the outermost axis; the returned order is
/// the sequential order (ρ, then θ, then φ for spherical grids; x, then y,
/// then z for cube grids).
pub fn sample<W>(psi: &W, strategy: &Strategy) -> OrbitalResult<SampleSet>
where W: WaveFunction + ?Sized
{
    strategy.validate()?;
    let samples = match strategy {
        Strategy::Spherical(grid) => sample_spherical(psi, grid),
        Strategy::Cartesian(grid) => sample_cube(psi, grid),
    };
    debug!(strategy = strategy.name(), samples = samples.len(), "sampling pass complete");
    Ok(SampleSet { samples })
}

// number of points in the half-open range [0, end)
fn half_open(end: f64, step: f64) -> usize {
    (end / step - EPS).ceil().max(0.0) as usize
}

// number of points in the closed range [0, end]
fn closed(end: f64, step: f64) -> usize {
    (end / step + EPS).floor() as usize + 1
}

fn spherical_counts(grid: &SphericalGrid) -> (usize, usize, usize) {
    let n_rho = half_open(grid.max_radius, grid.radial_step);
    let n_theta = match grid.inclination {
        Inclination::Half => closed(PI, grid.angular_step),
        Inclination::Full => half_open(TAU, grid.angular_step),
    };
    let n_phi = half_open(TAU, grid.angular_step);
    (n_rho, n_theta, n_phi)
}

fn cube_half_width(grid: &CubeGrid) -> i64 {
    (grid.max / grid.step + EPS).floor() as i64
}

fn sample_spherical<W>(psi: &W, grid: &SphericalGrid) -> Vec<Sample>
where W: WaveFunction + ?Sized
{
    let (n_rho, n_theta, n_phi) = spherical_counts(grid);
    let SphericalGrid { angular_step, radial_step, .. } = *grid;
    (0..n_rho).into_par_iter()
        .flat_map_iter(move |i| {
            let rho = i as f64 * radial_step;
            (0..n_theta).flat_map(move |j| {
                let theta = j as f64 * angular_step;
                (0..n_phi).map(move |k| {
                    let phi = k as f64 * angular_step;
                    let probability = radial_probability(rho, psi.psi(rho, theta, phi));
                    Sample {
                        coord: Coordinate::Spherical(Spherical::new(rho, theta, phi)),
                        probability,
                    }
                })
            })
        })
        .collect()
}

fn sample_cube<W>(psi: &W, grid: &CubeGrid) -> Vec<Sample>
where W: WaveFunction + ?Sized
{
    let k = cube_half_width(grid);
    let step = grid.step;
    (-k..=k).into_par_iter()
        .flat_map_iter(move |x| {
            (-k..=k).flat_map(move |y| {
                (-k..=k).map(move |z| {
                    let index = GridPoint { x, y, z };
                    let s = index.scaled(step).to_spherical();
                    let probability = radial_probability(s.rho, psi.psi(s.rho, s.theta, s.phi));
                    Sample { coord: Coordinate::Grid(index), probability }
                })
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::resolve;
    use crate::units::BOHR_RADIUS as A0;

    fn coarse_spherical(inclination: Inclination) -> Strategy {
        Strategy::Spherical(SphericalGrid {
            angular_step: deg(30.0),
            radial_step: 10.0,
            max_radius: 100.0,
            inclination,
        })
    }

    #[test]
    fn test_step_counts() {
        assert_eq!(half_open(TAU, deg(4.0)), 90);
        assert_eq!(closed(PI, deg(4.0)), 46);
        assert_eq!(half_open(TAU, deg(30.0)), 12);
        assert_eq!(half_open(0.0, 1.0), 0);
        assert_eq!(half_open(1300.0, 1.0), 1300);
        assert_eq!(closed(PI, deg(7.0)), 26);
    }

    #[test]
    fn test_spherical_order_and_count() {
        let psi = resolve(1, 0, 0).unwrap();
        let strategy = coarse_spherical(Inclination::Half);
        let set = sample(&psi, &strategy).unwrap();
        assert_eq!(set.len(), 10 * 7 * 12);
        assert_eq!(Some(set.len()), strategy.sample_count());
        let coords: Vec<Spherical> = set.iter()
            .map(|s| match s.coord {
                Coordinate::Spherical(c) => c,
                Coordinate::Grid(_) => panic!("unexpected grid sample"),
            })
            .collect();
        assert_eq!(coords[0], Spherical::new(0.0, 0.0, 0.0));
        assert_eq!(coords[1].phi, deg(30.0));
        assert_eq!(coords[12].theta, deg(30.0));
        assert_eq!(coords[7 * 12].rho, 10.0);
        // θ reaches the south pole in the half range
        assert!((coords[6 * 12].theta - PI).abs() < 1e-12);
    }

    #[test]
    fn test_full_inclination() {
        let psi = resolve(2, 1, 1).unwrap();
        let set = sample(&psi, &coarse_spherical(Inclination::Full)).unwrap();
        assert_eq!(set.len(), 10 * 12 * 12);
    }

    #[test]
    fn test_origin_has_zero_probability() {
        let psi = resolve(1, 0, 0).unwrap();
        let set = sample(&psi, &coarse_spherical(Inclination::Half)).unwrap();
        assert!(set.iter().take(7 * 12).all(|s| s.probability == 0.0));
        assert!(set.iter().skip(7 * 12).all(|s| s.probability > 0.0));
    }

    #[test]
    fn test_cube_grid_indices() {
        let psi = resolve(2, 0, 0).unwrap();
        let strategy = Strategy::Cartesian(CubeGrid { step: 25.0, max: 100.0 });
        let set = sample(&psi, &strategy).unwrap();
        assert_eq!(set.len(), 9 * 9 * 9);
        assert_eq!(set.samples()[0].coord, Coordinate::Grid(GridPoint { x: -4, y: -4, z: -4 }));
        assert_eq!(set.samples()[1].coord, Coordinate::Grid(GridPoint { x: -4, y: -4, z: -3 }));
        let center = set.samples()[set.len() / 2];
        assert_eq!(center.coord, Coordinate::Grid(GridPoint { x: 0, y: 0, z: 0 }));
        assert_eq!(center.probability, 0.0);
    }

    #[test]
    fn test_strategies_agree_on_probability() {
        // a cube point lying on a spherical grid point gets the same value
        let psi = resolve(3, 2, 1).unwrap();
        let cube = sample(&psi, &Strategy::Cartesian(CubeGrid { step: 50.0, max: 100.0 })).unwrap();
        let on_x_axis = cube.iter()
            .find(|s| s.coord == Coordinate::Grid(GridPoint { x: 2, y: 0, z: 1 }))
            .unwrap();
        let (rho, theta, phi) = crate::coords::to_spherical(100.0, 0.0, 50.0);
        let expected = radial_probability(rho, psi.psi(rho, theta, phi));
        assert_eq!(on_x_axis.probability, expected);
        assert!(expected > 0.0);
        assert!(rho > A0);
    }

    #[test]
    fn test_validation() {
        let psi = resolve(1, 0, 0).unwrap();
        let bad = Strategy::Cartesian(CubeGrid { step: 0.0, max: 10.0 });
        assert!(matches!(sample(&psi, &bad), Err(OrbitalError::BadStep(_))));
        let bad = Strategy::default().with_bounds(None, Some(-1.0));
        assert!(matches!(sample(&psi, &bad), Err(OrbitalError::BadBound(_))));
    }

    #[test]
    fn test_grid_size_limit() {
        let huge = Strategy::Cartesian(CubeGrid { step: 1.0, max: 1e7 });
        assert_eq!(huge.sample_count(), None);
        assert!(matches!(huge.validate(), Err(OrbitalError::TooManySamples { .. })));

        // fits in a usize but not under the limit
        let big = Strategy::Cartesian(CubeGrid { step: 1.0, max: 1300.0 });
        assert_eq!(big.sample_count(), Some(2601_usize.pow(3)));
        let psi = resolve(1, 0, 0).unwrap();
        let err = sample(&psi, &big).unwrap_err();
        assert!(matches!(err, OrbitalError::TooManySamples { limit: MAX_SAMPLES }));
        assert!(err.is_request_error());

        let fine = Strategy::Spherical(SphericalGrid { radial_step: 1e-9, ..SphericalGrid::default() });
        assert!(fine.validate().is_err());

        let full = Strategy::Spherical(SphericalGrid {
            inclination: Inclination::Full,
            ..SphericalGrid::default()
        });
        assert!(full.validate().is_ok());
        assert!(Strategy::Cartesian(CubeGrid::default()).validate().is_ok());
    }

    #[test]
    fn test_from_query() {
        assert_eq!(Strategy::from_query(Some("Cartesian")).name(), "cartesian");
        assert_eq!(Strategy::from_query(None).name(), "spherical");
        let s = Strategy::from_query(Some("cube")).with_bounds(Some(5.0), Some(50.0));
        assert_eq!(s, Strategy::Cartesian(CubeGrid { step: 5.0, max: 50.0 }));
    }

    #[test]
    fn test_strategy_serde() {
        let s: Strategy = serde_json::from_str(r#"{"kind":"cartesian","step":10.0}"#).unwrap();
        assert_eq!(s, Strategy::Cartesian(CubeGrid { step: 10.0, max: 1300.0 }));
        let s: Strategy = serde_json::from_str(r#"{"kind":"spherical","inclination":"full"}"#).unwrap();
        match s {
            Strategy::Spherical(grid) => {
                assert_eq!(grid.inclination, Inclination::Full);
                assert_eq!(grid.radial_step, 1.0);
            }
            Strategy::Cartesian(_) => panic!("expected spherical"),
        }
    }
}
