//! Crate-wide error type for the routing core.
//!
//! `NotFound` is deliberately absent here: per the external-interface
//! contract, lookups that miss return `Ok(None)`, never an error.

use std::fmt;

/// The pipeline stage a `StageError` originated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Distill,
    Embed,
    Route,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Distill => "distill",
            Stage::Embed => "embed",
            Stage::Route => "route",
        };
        write!(f, "{s}")
    }
}

/// Classification of a failure raised by an external capability
/// (distillation, embedding, or vector index provider).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorKind {
    RateLimit,
    Auth,
    Timeout,
    Server,
    Malformed,
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProviderErrorKind::RateLimit => "rate_limit",
            ProviderErrorKind::Auth => "auth",
            ProviderErrorKind::Timeout => "timeout",
            ProviderErrorKind::Server => "server",
            ProviderErrorKind::Malformed => "malformed",
        };
        write!(f, "{s}")
    }
}

/// An error surfaced by an external capability (§6 of the spec).
///
/// Capability traits (`DistillationProvider`, `EmbeddingProvider`,
/// `VectorIndex`) return `Result<T, ProviderError>` directly; the
/// pipeline wraps these into `RouterError::Stage` at the point where the
/// stage is known.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: String,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Timeout, message)
    }

    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::RateLimit, message)
    }
}

/// Crate-wide error type.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// Invalid thresholds, dimensions, or other construction-time
    /// misconfiguration. Fatal — raised from constructors, never from
    /// `route`.
    #[error("configuration error: {0}")]
    Config(String),

    /// One of the three fallible pipeline stages failed.
    #[error("stage {stage} failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: ProviderError,
    },

    /// A vector was presented with a dimensionality that does not match
    /// the index's configured dimensions. Always a programming error.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The policy LLM add-on exceeded its token budget. Non-fatal:
    /// callers fall back to the deterministic `DecisionMaker` result.
    #[error("policy budget exceeded: {0}")]
    BudgetExceeded(String),
}

impl RouterError {
    pub fn stage(stage: Stage, source: ProviderError) -> Self {
        RouterError::Stage { stage, source }
    }
}

/// Convenience alias used throughout the workspace.
pub type RouterResult<T> = Result<T, RouterError>;
