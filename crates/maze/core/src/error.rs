//! Common error infrastructure for maze-core.
//!
//! Nothing in this crate propagates an error to the training driver as a
//! failure of the step protocol: configuration problems are clamped, prop
//! anomalies become no-ops, and unknown actions are treated as idle. The
//! error types still exist so each of those recoveries can be classified and
//! logged with a stable code.
//!
//! - **Validation**: rejected or clamped input (configuration, raw actions)
//! - **Recoverable**: anomalies the environment absorbs (destroying a missing key)
//! - **Internal**: states the algorithms rule out (too few open tiles)

/// Severity level of an error, used for categorization and logging priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Anomaly absorbed by turning the operation into a no-op.
    Recoverable,

    /// Invalid input that was rejected or clamped to a valid value.
    Validation,

    /// Unexpected state inconsistency. Indicates a bug.
    Internal,

    /// Environment cannot continue.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable | Self::Validation)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all maze-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait EnvError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for this error variant, used in log fields and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Invalid configuration values.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("map size {width}x{height} is outside [{min}, {max}]")]
    MapSizeOutOfRange {
        width: i64,
        height: i64,
        min: u32,
        max: u32,
    },

    #[error("map size {width}x{height} must be even on both axes")]
    MapSizeOdd { width: u32, height: u32 },

    #[error("cell size {0} must be at least 1")]
    CellSizeTooSmall(i64),

    #[error("{field} must be finite and non-negative, got {value}")]
    InvalidSpeed { field: &'static str, value: f32 },

    #[error("max steps must be at least 1")]
    MaxStepsZero,

    #[error("tick duration must be finite and positive, got {0}")]
    InvalidTick(f32),
}

impl EnvError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use ConfigError::*;
        match self {
            MapSizeOutOfRange { .. } => "CONFIG_MAP_SIZE_OUT_OF_RANGE",
            MapSizeOdd { .. } => "CONFIG_MAP_SIZE_ODD",
            CellSizeTooSmall(_) => "CONFIG_CELL_SIZE_TOO_SMALL",
            InvalidSpeed { .. } => "CONFIG_INVALID_SPEED",
            MaxStepsZero => "CONFIG_MAX_STEPS_ZERO",
            InvalidTick(_) => "CONFIG_INVALID_TICK",
        }
    }
}

/// Key/door placement failures.
///
/// Ruled out by the minimum map size; surfaced only if that invariant breaks.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("need at least 3 open tiles to place spawn, key and door, found {0}")]
    TooFewOpenTiles(usize),
}

impl EnvError for PlacementError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        "PLACEMENT_TOO_FEW_OPEN_TILES"
    }
}

/// Anomalies in prop bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PropError {
    #[error("key already removed from the current layout")]
    KeyAlreadyRemoved,

    #[error("no layout has been generated yet")]
    NoLayout,
}

impl EnvError for PropError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        use PropError::*;
        match self {
            KeyAlreadyRemoved => "PROP_KEY_ALREADY_REMOVED",
            NoLayout => "PROP_NO_LAYOUT",
        }
    }
}

/// Raw discrete actions outside `{0, 1, 2, 3}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("unknown discrete action {0}")]
    Unknown(i64),
}

impl EnvError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "ACTION_UNKNOWN"
    }
}
