use crate::decor::DecorLayer;
use crate::layout::ParticleClass;
use thiserror::Error;

/// Construction-time invariant violations.
///
/// These indicate a build misconfiguration rather than a transient condition,
/// so callers are expected to treat them as fatal during start-up. The
/// per-frame path never produces them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("{class:?} generated {actual} particles, expected {expected}")]
    ClassSizeMismatch {
        class: ParticleClass,
        expected: usize,
        actual: usize,
    },
    #[error("expected {expected} instance buffers (one per class), got {actual}")]
    SinkCountMismatch { expected: usize, actual: usize },
    #[error("{class:?} buffer holds {capacity} instances but the class has {required}")]
    SinkCapacityMismatch {
        class: ParticleClass,
        capacity: usize,
        required: usize,
    },
    #[error("{layer:?} buffer holds {capacity} instances but the layer has {required}")]
    LayerCapacityMismatch {
        layer: DecorLayer,
        capacity: usize,
        required: usize,
    },
}

pub type Result<T> = std::result::Result<T, CoreError>;
