//! Point clouds of hydrogen atomic orbitals.
//!
//! A [`QuantumNumbers`] triple is resolved to a closed-form [`Orbital`]
//! (or an sp/sp²/sp³ [`Hybrid`] is built from the n = 2 orbitals), the
//! radial probability 4πρ²ψ² is sampled over a spherical-shell or Cartesian
//! cube grid, normalized to sum 1, and samples below a threshold are dropped.
//! The surviving integer (x, y, z) points go to a [`writer`].
//!
//! ```
//! use orbitals::{ PipelineConfig, QuantumNumbers, generate_orbital };
//! use orbitals::sampling::{ Strategy, CubeGrid };
//!
//! let qn = QuantumNumbers::new(2, 1, 0).unwrap();
//! let config = PipelineConfig {
//!     strategy: Strategy::Cartesian(CubeGrid { step: 50.0, max: 500.0 }),
//!     ..PipelineConfig::default()
//! };
//! let points = generate_orbital(qn, &config).unwrap();
//! assert!(!points.is_empty());
//! assert!(points.iter().all(|p| p.probability >= config.threshold));
//! ```

pub mod config;
pub mod coords;
pub mod error;
pub mod hybrid;
pub mod physics;
pub mod probability;
pub mod sampling;
pub mod units;
pub mod writer;

pub use config::{ PipelineConfig, ProfileConfig, DEFAULT_THRESHOLD };
pub use error::{ OrbitalError, OrbitalResult };
pub use hybrid::{ Hybrid, HybridKind };
pub use physics::{ resolve, Orbital, QuantumNumbers, WaveFunction };
pub use probability::{
    generate, generate_orbital, normalize, prune, radial_probability, radial_profile, Point,
    ProfilePoint,
};
pub use sampling::{ sample, Sample, SampleSet, Strategy, MAX_SAMPLES };
