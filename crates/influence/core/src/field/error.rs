use crate::error::{CoreError, ErrorSeverity};
use crate::grid::GridDimensions;
use crate::queue::QueueError;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("influence field recomputed before grid bounds were established")]
    Unallocated,

    #[error("grid bounds {}x{} contain no cells", .0.width, .0.height)]
    EmptyBounds(GridDimensions),

    #[error(
        "oracle reports {}x{} but the field was allocated for {}x{}",
        .reported.width, .reported.height, .allocated.width, .allocated.height
    )]
    BoundsMismatch {
        allocated: GridDimensions,
        reported: GridDimensions,
    },

    #[error("combined scores are all {value}; min-max normalization is undefined")]
    DegenerateNormalization { value: f32 },

    #[error(transparent)]
    Queue(#[from] QueueError),
}

impl CoreError for FieldError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            FieldError::Unallocated => ErrorSeverity::Internal,
            FieldError::EmptyBounds(_) => ErrorSeverity::Validation,
            FieldError::BoundsMismatch { .. } => ErrorSeverity::Fatal,
            FieldError::DegenerateNormalization { .. } => ErrorSeverity::Recoverable,
            FieldError::Queue(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            FieldError::Unallocated => "FIELD_UNALLOCATED",
            FieldError::EmptyBounds(_) => "FIELD_EMPTY_BOUNDS",
            FieldError::BoundsMismatch { .. } => "FIELD_BOUNDS_MISMATCH",
            FieldError::DegenerateNormalization { .. } => "FIELD_DEGENERATE",
            FieldError::Queue(err) => err.error_code(),
        }
    }
}
