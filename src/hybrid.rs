//! sp, sp² and sp³ hybrid orbitals as fixed linear combinations of the n = 2
//! orbitals.
//!
//! References:
//! - <https://winter.group.shef.ac.uk/orbitron/AO-hybrids/sp/equations.html>
//! - <https://winter.group.shef.ac.uk/orbitron/AO-hybrids/sp2/equations.html>
//! - <https://winter.group.shef.ac.uk/orbitron/AO-hybrids/sp3/equations.html>

use std::f64::consts::{ FRAC_1_SQRT_2, SQRT_2 };
use serde::{ Deserialize, Serialize };
use crate::{
    error::{ OrbitalError, OrbitalResult },
    physics::{ psi_2s, Orbital, WaveFunction },
};

/// n = 2 basis functions a hybrid is built from.
///
/// p_x and p_y are the real and imaginary parts of the m = +1 amplitude; p_z
/// is the m = 0 orbital.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Basis {
    S,
    Px,
    Py,
    Pz,
}

impl Basis {
    pub fn eval(&self, rho: f64, theta: f64, phi: f64) -> f64 {
        match self {
            Basis::S => psi_2s(rho),
            Basis::Px => Orbital::P2 { m: 1 }.amplitude(rho, theta, phi).re,
            Basis::Py => Orbital::P2 { m: 1 }.amplitude(rho, theta, phi).im,
            Basis::Pz => Orbital::P2 { m: 0 }.psi(rho, theta, phi),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HybridKind {
    Sp,
    Sp2,
    Sp3,
}

impl HybridKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HybridKind::Sp => "sp",
            HybridKind::Sp2 => "sp^2",
            HybridKind::Sp3 => "sp^3",
        }
    }

    /// Parse an optional query value; absent means sp.
    pub fn from_query(value: Option<&str>) -> OrbitalResult<Self> {
        value.map_or(Ok(HybridKind::Sp), str::parse)
    }

    /// Number of hybrids in the family.
    pub fn member_count(&self) -> usize {
        match self {
            HybridKind::Sp => 2,
            HybridKind::Sp2 => 3,
            HybridKind::Sp3 => 4,
        }
    }

    pub fn orbital(&self, index: usize) -> OrbitalResult<Hybrid> {
        use Basis::*;
        let third = 1.0 / 3.0_f64.sqrt();
        let terms: Vec<(f64, Basis)> = match (self, index) {
            // sp_1, sp_2
            (HybridKind::Sp, 0) => vec![(FRAC_1_SQRT_2, S), (FRAC_1_SQRT_2, Pz)],
            (HybridKind::Sp, 1) => vec![(FRAC_1_SQRT_2, S), (-FRAC_1_SQRT_2, Pz)],
            // (1/√3) (s + √2 p_x); earlier revisions used p_z here
            (HybridKind::Sp2, 0) => vec![(third, S), (third * SQRT_2, Px)],
            // (1/√3) (s - (1/√2) p_x ± √(3/2) p_y)
            (HybridKind::Sp2, 1) => vec![
                (third, S),
                (-third * FRAC_1_SQRT_2, Px),
                (third * 1.5_f64.sqrt(), Py),
            ],
            (HybridKind::Sp2, 2) => vec![
                (third, S),
                (-third * FRAC_1_SQRT_2, Px),
                (-third * 1.5_f64.sqrt(), Py),
            ],
            // (1/2) (s ± p_x ± p_y ± p_z), even number of minus signs
            (HybridKind::Sp3, 0) => vec![(0.5, S), (0.5, Px), (0.5, Py), (0.5, Pz)],
            (HybridKind::Sp3, 1) => vec![(0.5, S), (0.5, Px), (-0.5, Py), (-0.5, Pz)],
            (HybridKind::Sp3, 2) => vec![(0.5, S), (-0.5, Px), (0.5, Py), (-0.5, Pz)],
            (HybridKind::Sp3, 3) => vec![(0.5, S), (-0.5, Px), (-0.5, Py), (0.5, Pz)],
            _ => {
                return Err(OrbitalError::UnknownHybrid { kind: self.as_str(), index });
            }
        };
        Ok(Hybrid { kind: *self, index, terms })
    }

    /// All members of the family, in index order.
    pub fn orbitals(&self) -> Vec<Hybrid> {
        (0..self.member_count())
            .filter_map(|index| self.orbital(index).ok())
            .collect()
    }
}

impl std::str::FromStr for HybridKind {
    type Err = OrbitalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sp" => Ok(HybridKind::Sp),
            "sp2" | "sp^2" => Ok(HybridKind::Sp2),
            "sp3" | "sp^3" => Ok(HybridKind::Sp3),
            _ => Err(OrbitalError::UnknownHybridKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for HybridKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A weighted sum of [`Basis`] functions evaluated at the same point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hybrid {
    pub kind: HybridKind,
    pub index: usize,
    pub terms: Vec<(f64, Basis)>,
}

impl WaveFunction for Hybrid {
    fn psi(&self, rho: f64, theta: f64, phi: f64) -> f64 {
        self.terms.iter()
            .map(|(c, basis)| c * basis.eval(rho, theta, phi))
            .sum()
    }
}
