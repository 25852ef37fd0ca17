//! Collection of all error types.
//!
//! Everything fallible in the crate returns [`OrbitalError`], which derives
//! [`thiserror::Error`] so the binaries can wrap it in [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use thiserror::Error;

pub type OrbitalResult<T> = Result<T, OrbitalError>;

#[derive(Debug, Error)]
pub enum OrbitalError {
    /// Returned when (n, l, m) violate `n >= 1`, `0 <= l < n` or
    /// `-l <= m <= +l`.
    #[error("invalid quantum numbers (n={n}, l={l}, m={m}): {reason}")]
    InvalidQuantumNumbers {
        n: u32,
        l: u32,
        m: i32,
        reason: &'static str,
    },

    /// Returned when (n, l, m) are valid but no closed form is implemented.
    #[error("support for (n={n}, l={l}, m={m})-orbital not yet implemented")]
    UnsupportedOrbital { n: u32, l: u32, m: i32 },

    /// Returned when a sampling step is not strictly positive and finite.
    #[error("step sizes must be positive and finite; got {0}")]
    BadStep(f64),

    /// Returned when a domain bound is negative or not finite.
    #[error("domain bounds must be non-negative and finite; got {0}")]
    BadBound(f64),

    /// Returned when a probability threshold is negative or NaN.
    #[error("probability threshold must be non-negative; got {0}")]
    BadThreshold(f64),

    /// Returned when a grid would hold more than `limit` samples.
    #[error("grid exceeds the limit of {limit} samples")]
    TooManySamples { limit: usize },

    /// Returned when a hybrid family name is not sp, sp2 or sp3.
    #[error("unknown hybrid kind {0:?}; expected sp, sp2 or sp3")]
    UnknownHybridKind(String),

    /// Returned when a hybrid orbital index is outside its family.
    #[error("no {kind} hybrid orbital with index {index}")]
    UnknownHybrid { kind: &'static str, index: usize },

    /// [`std::io::Error`].
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// [`serde_json::Error`].
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl OrbitalError {
    pub(crate) fn check_step(step: f64) -> OrbitalResult<()> {
        (step.is_finite() && step > 0.0)
            .then_some(())
            .ok_or(Self::BadStep(step))
    }

    pub(crate) fn check_bound(bound: f64) -> OrbitalResult<()> {
        (bound.is_finite() && bound >= 0.0)
            .then_some(())
            .ok_or(Self::BadBound(bound))
    }

    pub(crate) fn check_threshold(threshold: f64) -> OrbitalResult<()> {
        (threshold >= 0.0)
            .then_some(())
            .ok_or(Self::BadThreshold(threshold))
    }

    pub(crate) fn check_sample_count(count: Option<usize>, limit: usize)
        -> OrbitalResult<()>
    {
        count.is_some_and(|n| n <= limit)
            .then_some(())
            .ok_or(Self::TooManySamples { limit })
    }

    /// `true` for errors caused by the caller's request rather than by I/O.
    pub fn is_request_error(&self) -> bool {
        !matches!(self, Self::Io(_) | Self::Json(_))
    }
}
