/// Hydrogen atom wave functions
/// Closed-form solutions of the Schrödinger equation for every orbital with
/// n <= 3, in picometers.

use std::f64::consts::PI;
use num_complex::Complex64 as C64;
use serde::Serialize;
use crate::{
    error::{ OrbitalError, OrbitalResult },
    units::BOHR_RADIUS as A0,
};

/// Represents quantum numbers (n, l, m_l)
/// n: Principal quantum number (1, 2, 3, ...)
/// l: Azimuthal quantum number (0 to n-1)
/// m_l: Magnetic quantum number (-l to l)
///
/// Fields are private so a value always satisfies these bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct QuantumNumbers {
    n: u32,
    l: u32,
    m_l: i32,
}

/// (n, l) pairs with a closed form, in generation order.
const SUPPORTED_SHELLS: [(u32, u32); 6] = [(1, 0), (2, 0), (3, 0), (2, 1), (3, 1), (3, 2)];

impl QuantumNumbers {
    pub fn new(n: u32, l: u32, m_l: i32) -> OrbitalResult<Self> {
        let invalid = |reason| OrbitalError::InvalidQuantumNumbers { n, l, m: m_l, reason };
        if n < 1 {
            return Err(invalid("expected n >= 1"));
        }
        if l >= n {
            return Err(invalid("expected 0 <= l < n"));
        }
        if m_l.unsigned_abs() > l {
            return Err(invalid("expected -l <= m <= +l"));
        }
        Ok(QuantumNumbers { n, l, m_l })
    }

    pub fn n(&self) -> u32 { self.n }

    pub fn l(&self) -> u32 { self.l }

    pub fn m_l(&self) -> i32 { self.m_l }

    /// Shell label, e.g. `2p`.
    pub fn label(&self) -> String {
        let shape = match self.l {
            0 => 's',
            1 => 'p',
            2 => 'd',
            3 => 'f',
            4 => 'g',
            _ => 'h',
        };
        format!("{}{}", self.n, shape)
    }

    /// Every state the registry has a formula for: 1s, 2s, 3s, 2p, 3p, 3d,
    /// with m ascending within each shell.
    pub fn supported() -> Vec<Self> {
        SUPPORTED_SHELLS
            .iter()
            .flat_map(|&(n, l)| {
                let l_i = l as i32;
                (-l_i..=l_i).map(move |m_l| QuantumNumbers { n, l, m_l })
            })
            .collect()
    }
}

impl std::fmt::Display for QuantumNumbers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(n={}, l={}, m={})", self.n, self.l, self.m_l)
    }
}

/// A real amplitude ψ(ρ, θ, φ): radial distance in picometers, inclination
/// from the z axis, azimuth in the xy plane.
pub trait WaveFunction: Sync {
    fn psi(&self, rho: f64, theta: f64, phi: f64) -> f64;
}

impl<F> WaveFunction for F
where F: Fn(f64, f64, f64) -> f64 + Sync
{
    fn psi(&self, rho: f64, theta: f64, phi: f64) -> f64 {
        self(rho, theta, phi)
    }
}

/// Closed-form hydrogen orbitals.
///
/// p and d variants carry their magnetic quantum number; the azimuthal part
/// for m != 0 is the complex exponential e^{imφ}, so `m` and `-m` give complex
/// conjugate amplitudes. The physical amplitude is the real part.
///
/// Reference: <https://chemistrygod.com/atomic-orbital>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orbital {
    S1,
    S2,
    S3,
    P2 { m: i32 },
    P3 { m: i32 },
    D3 { m: i32 },
}

/// Validate (n, l, m) and look up the matching closed form.
pub fn resolve(n: u32, l: u32, m: i32) -> OrbitalResult<Orbital> {
    let qn = QuantumNumbers::new(n, l, m)?;
    Orbital::resolve(qn)
}

impl Orbital {
    pub fn resolve(qn: QuantumNumbers) -> OrbitalResult<Self> {
        let QuantumNumbers { n, l, m_l: m } = qn;
        match (n, l) {
            (1, 0) => Ok(Orbital::S1),
            (2, 0) => Ok(Orbital::S2),
            (3, 0) => Ok(Orbital::S3),
            (2, 1) => Ok(Orbital::P2 { m }),
            (3, 1) => Ok(Orbital::P3 { m }),
            (3, 2) => Ok(Orbital::D3 { m }),
            _ => Err(OrbitalError::UnsupportedOrbital { n, l, m }),
        }
    }

    pub fn quantum_numbers(&self) -> QuantumNumbers {
        let (n, l, m_l) = match *self {
            Orbital::S1 => (1, 0, 0),
            Orbital::S2 => (2, 0, 0),
            Orbital::S3 => (3, 0, 0),
            Orbital::P2 { m } => (2, 1, m),
            Orbital::P3 { m } => (3, 1, m),
            Orbital::D3 { m } => (3, 2, m),
        };
        QuantumNumbers { n, l, m_l }
    }

    /// Complex amplitude at (ρ, θ, φ); purely real when m = 0.
    pub fn amplitude(&self, rho: f64, theta: f64, phi: f64) -> C64 {
        match *self {
            Orbital::S1 => psi_1s(rho).into(),
            Orbital::S2 => psi_2s(rho).into(),
            Orbital::S3 => psi_3s(rho).into(),
            Orbital::P2 { m: 0 } => {
                ((1.0 / (32.0_f64.sqrt() * PI.sqrt())) * (1.0 / A0).powf(1.5)
                    * (rho / A0) * (-rho / (2.0 * A0)).exp() * theta.cos())
                .into()
            }
            Orbital::P2 { m } => {
                (1.0 / (64.0_f64.sqrt() * PI.sqrt())) * (1.0 / A0).powf(1.5)
                    * (rho / A0) * (-rho / (2.0 * A0)).exp() * theta.sin()
                    * azimuthal(m, phi)
            }
            Orbital::P3 { m: 0 } => {
                ((1.0 / 81.0) * (2.0_f64.sqrt() / PI.sqrt()) * (1.0 / A0).powf(1.5)
                    * (6.0 * rho / A0 - rho.powi(2) / A0.powi(2))
                    * (-rho / (3.0 * A0)).exp() * theta.cos())
                .into()
            }
            Orbital::P3 { m } => {
                (1.0 / (81.0 * PI.sqrt())) * (1.0 / A0).powf(1.5)
                    * (6.0 * rho / A0 - rho.powi(2) / A0.powi(2))
                    * (-rho / (3.0 * A0)).exp() * theta.sin()
                    * azimuthal(m, phi)
            }
            Orbital::D3 { m: 0 } => {
                ((1.0 / (81.0 * 6.0_f64.sqrt() * PI.sqrt())) * (1.0 / A0).powf(1.5)
                    * (rho / A0).powi(2) * (-rho / (3.0 * A0)).exp()
                    * (3.0 * theta.cos().powi(2) - 1.0))
                .into()
            }
            Orbital::D3 { m } if m.abs() == 1 => {
                (1.0 / (81.0 * PI.sqrt())) * (1.0 / A0).powf(1.5)
                    * (rho / A0).powi(2) * (-rho / (3.0 * A0)).exp()
                    * theta.sin() * theta.cos()
                    * azimuthal(m, phi)
            }
            Orbital::D3 { m } => {
                (1.0 / (162.0 * PI.sqrt())) * (1.0 / A0).powf(1.5)
                    * (rho / A0).powi(2) * (-rho / (3.0 * A0)).exp()
                    * theta.sin().powi(2)
                    * azimuthal(m, phi)
            }
        }
    }
}

impl WaveFunction for Orbital {
    fn psi(&self, rho: f64, theta: f64, phi: f64) -> f64 {
        self.amplitude(rho, theta, phi).re
    }
}

// e^{imφ}
fn azimuthal(m: i32, phi: f64) -> C64 {
    C64::new(0.0, m as f64 * phi).exp()
}

/// 1s (n=1, l=0, m=0)
pub fn psi_1s(rho: f64) -> f64 {
    (1.0 / PI.sqrt()) * (1.0 / A0).powf(1.5) * (-rho / A0).exp()
}

/// 2s (n=2, l=0, m=0)
pub fn psi_2s(rho: f64) -> f64 {
    (1.0 / (32.0_f64.sqrt() * PI.sqrt())) * (1.0 / A0).powf(1.5)
        * (2.0 - rho / A0) * (-rho / (2.0 * A0)).exp()
}

/// 3s (n=3, l=0, m=0)
pub fn psi_3s(rho: f64) -> f64 {
    (1.0 / (81.0 * 3.0_f64.sqrt() * PI.sqrt())) * (1.0 / A0).powf(1.5)
        * (27.0 - (18.0 * rho) / A0 + (2.0 * rho.powi(2)) / A0.powi(2))
        * (-rho / (3.0 * A0)).exp()
}
