use thiserror::Error;

/// Everything that can go wrong while packing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    /// The arguments were malformed. Detected before any packing work is done.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// The rectangles could not all be placed into a container of `size`.
    ///
    /// A larger container may succeed.
    #[error("not enough space to pack the given sizes within {size:?}: {cause}")]
    ImpossibleFit { size: (u32, u32), cause: FitFailure },
}

impl PackError {
    pub(crate) fn invalid_argument<S: Into<String>>(reason: S) -> Self {
        PackError::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub(crate) fn impossible_fit(size: (u32, u32), cause: FitFailure) -> Self {
        PackError::ImpossibleFit { size, cause }
    }

    pub fn is_impossible_fit(&self) -> bool {
        matches!(self, PackError::ImpossibleFit { .. })
    }
}

/// Why a container was too small.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FitFailure {
    /// The padded rectangles need more area than the container has.
    #[error("padded rectangles need an area of {required}, but only {available} is available")]
    AreaExceeded { required: u64, available: u64 },

    /// A single padded rectangle is wider or taller than the container.
    #[error("rectangle {index} is {size:?} with padding, which is larger than the container")]
    TooLarge { index: usize, size: (u32, u32) },

    /// The free-space tree ran out of regions large enough for a rectangle.
    #[error("no free region was left for rectangle {index}")]
    NoFreeRegion { index: usize },
}
