use super::Error;

/// Error when a query shape is internally inconsistent.
///
/// This occurs when:
/// - A field, join operand or ordering clause references a table id that is
///   not in the shape's table list
/// - The join nest lists the same table occurrence twice
#[derive(Debug)]
pub(super) struct InvalidShapeError {
    message: Box<str>,
}

impl std::error::Error for InvalidShapeError {}

impl core::fmt::Display for InvalidShapeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid query shape: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid query shape error.
    pub fn invalid_shape(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidShape(InvalidShapeError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid query shape error.
    pub fn is_invalid_shape(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidShape(_))
    }
}
