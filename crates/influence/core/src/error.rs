//! Common error infrastructure for influence-core.
//!
//! Domain-specific errors ([`crate::QueueError`], [`crate::FieldError`]) live
//! next to the code that raises them. This module only holds the shared
//! classification used by callers to decide how loudly to report a failure.
//!
//! Every error raised by the core is a call-order invariant violation rather
//! than a runtime condition to retry: the next tick rebuilds from current world
//! state regardless of what went wrong in the previous one.

/// Severity level of an error, used for categorization and logging priority.
///
/// - **Recoverable**: the tick can be skipped; the next one starts fresh
/// - **Validation**: the caller supplied unusable input (e.g. a zero-sized grid)
/// - **Internal**: a call-order invariant was violated
/// - **Fatal**: state is inconsistent and the session should stop
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The current tick is lost but the next one will recompute from scratch.
    ///
    /// Examples: degenerate normalization under the rejecting policy
    Recoverable,

    /// Invalid input, should not retry without changes.
    ///
    /// Examples: zero-sized grid bounds
    Validation,

    /// Unexpected call order or state.
    ///
    /// Examples: dequeue on an empty queue, recompute before allocation
    Internal,

    /// State cannot be trusted any more.
    ///
    /// Examples: oracle bounds changed underneath allocated grids
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if skipping the tick is an acceptable response.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug in the caller.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all influence-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Keep `error_code` stable; it is used in logs and tests
pub trait CoreError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
