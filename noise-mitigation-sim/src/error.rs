//! Error types for circuit construction, noise registration and sampling.
//!
//! Every variant is a precondition violation on a public operation. None of
//! them are transient, so callers should surface them rather than retry.

use thiserror::Error;

use crate::circuit::Arity;

/// Errors raised by the noisy execution pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// A gate referenced a qubit outside the register.
    #[error("invalid qubit index {index}: circuit has only {num_qubits} qubits")]
    InvalidQubitIndex { index: usize, num_qubits: usize },

    /// A two-qubit gate used the same qubit as control and target.
    #[error("gate '{gate}' uses qubit {qubit} as both control and target")]
    DuplicateQubit { gate: &'static str, qubit: usize },

    /// Error probability outside [0, 1] (or NaN).
    #[error("error probability must lie in [0, 1], got {0}")]
    InvalidProbability(f64),

    /// A gate name was used with a different arity than its registered channel.
    #[error("gate '{gate}' has a {registered} error channel but was used as {requested}")]
    ArityMismatch {
        gate: String,
        registered: Arity,
        requested: Arity,
    },

    /// Shot count was zero or negative.
    #[error("shot count must be positive, got {0}")]
    InvalidShotCount(i64),

    /// The circuit never declared a measurement, so shots produce no outcome.
    #[error("circuit declares no measurement")]
    MissingMeasurement,

    /// Mitigation was asked to normalize a table with no counts.
    #[error("cannot normalize an empty count table")]
    EmptyDistribution,

    /// A gate would need interference between linked qubits, which the
    /// per-shot register does not track.
    #[error("gate '{gate}' at position {position} acts on qubit {qubit} while it may be entangled with another qubit; this circuit shape is not supported")]
    UnsupportedCircuit {
        gate: &'static str,
        position: usize,
        qubit: usize,
    },

    /// Text that is not a string of '0' and '1' characters.
    #[error("invalid bitstring '{0}'")]
    InvalidBitstring(String),
}

impl SimError {
    /// Create an invalid qubit error.
    pub fn invalid_qubit(index: usize, num_qubits: usize) -> Self {
        Self::InvalidQubitIndex { index, num_qubits }
    }

    /// Create an unsupported circuit error.
    pub fn unsupported(gate: &'static str, position: usize, qubit: usize) -> Self {
        Self::UnsupportedCircuit {
            gate,
            position,
            qubit,
        }
    }

    /// Create an arity mismatch error.
    pub fn arity_mismatch(gate: impl Into<String>, registered: Arity, requested: Arity) -> Self {
        Self::ArityMismatch {
            gate: gate.into(),
            registered,
            requested,
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, SimError>;
