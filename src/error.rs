//! Crate-wide error type with the invalid-argument / logic-error split.

/// Coarse classification of a [`GridError`].
///
/// `InvalidArgument` means the caller's input was wrong (malformed or
/// size-mismatched data, out-of-range lookups, unreadable files) and
/// `Logic` means the queried object structurally lacks the feature
/// (geometry on a dimensions-only grid, pinch threshold with pinch off).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input data or out-of-range lookup; fatal, never corrected.
    InvalidArgument,
    /// The operation is unsupported by this object's structure.
    Logic,
}

/// Errors raised while building or querying the grid/property model.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Wrapper for standard I/O errors (unreadable or unwritable files).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// A data keyword carried the wrong number of values.
    #[error("keyword {keyword}: expected {expected} values, got {got}")]
    SizeMismatch {
        /// Offending keyword name.
        keyword: String,
        /// Number of values the target region requires.
        expected: usize,
        /// Number of values actually supplied.
        got: usize,
    },
    /// An index or (i,j,k) triple outside the grid extents.
    #[error("index out of range: {0}")]
    IndexOutOfRange(String),
    /// A keyword required for the chosen construction mode is absent.
    #[error("missing required keyword {0}")]
    MissingKeyword(String),
    /// A keyword demanded a numeric operand and none was given.
    #[error("keyword {0}: missing required value")]
    MissingValue(String),
    /// Two keywords that exclude each other were both specified.
    #[error("conflicting keywords {0} and {1}")]
    ConflictingKeywords(String, String),
    /// A record item had the wrong type or an unrecognized value.
    #[error("keyword {keyword}: {message}")]
    BadItem {
        /// Keyword whose record was malformed.
        keyword: String,
        /// What was wrong with the item.
        message: String,
    },
    /// A grid property name unsupported for this deck.
    #[error("unsupported grid property {0}")]
    UnknownProperty(String),
    /// A MULTFLT record referenced a fault never defined by FAULTS.
    #[error("unknown fault {0}")]
    UnknownFault(String),
    /// A box range was inverted or outside the grid extents.
    #[error("invalid box range: {0}")]
    InvalidBox(String),
    /// Grid file has the wrong magic or version.
    #[error("bad magic or version")]
    BadHeader,
    /// Grid file payload had an unexpected length.
    #[error("unexpected data length")]
    BadLength,
    /// Geometry query on a grid constructed without cell geometry.
    #[error("grid has no cell geometry")]
    NoCellInfo,
    /// Pinch threshold query while PINCH is inactive.
    #[error("pinch is not active")]
    PinchInactive,
}

impl GridError {
    /// Classify the error so callers can tell bad input from an
    /// unsupported operation.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GridError::NoCellInfo | GridError::PinchInactive => ErrorKind::Logic,
            _ => ErrorKind::InvalidArgument,
        }
    }
}
