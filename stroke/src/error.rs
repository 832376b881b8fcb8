/// The stroker's result type.
pub type StrokeResult = Result<(), StrokeError>;

/// A stroke parameter rejected at the configuration boundary.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InvalidParameter {
    /// Miter limits must be finite and greater than 1.0.
    MiterLimit,
    /// Inner miter limits must be finite and greater than 1.0.
    InnerMiterLimit,
    /// The miter limit half-angle must be in the open interval (0, pi).
    MiterLimitTheta,
    /// The approximation scale must be finite and greater than zero.
    ApproximationScale,
    /// The shorten length must be finite and non-negative.
    Shorten,
    /// The stroke width must be finite. Any sign is accepted.
    Width,
}

impl core::fmt::Display for InvalidParameter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InvalidParameter::MiterLimit => {
                write!(f, "Miter limit must be finite and greater than 1.0")
            }
            InvalidParameter::InnerMiterLimit => {
                write!(f, "Inner miter limit must be finite and greater than 1.0")
            }
            InvalidParameter::MiterLimitTheta => {
                write!(f, "Miter limit angle must be between 0 and pi")
            }
            InvalidParameter::ApproximationScale => {
                write!(f, "Approximation scale must be finite and positive")
            }
            InvalidParameter::Shorten => {
                write!(f, "Shorten length must be finite and non-negative")
            }
            InvalidParameter::Width => {
                write!(f, "Stroke width must be finite")
            }
        }
    }
}

impl std::error::Error for InvalidParameter {}

/// The stroker's error enumeration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StrokeError {
    /// A configuration value was rejected by a setter.
    InvalidParameter(InvalidParameter),
    /// The input command stream was malformed, for example a `LineTo`
    /// arriving before any `MoveTo`. The offending span is skipped.
    InvalidPathState,
}

impl core::fmt::Display for StrokeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StrokeError::InvalidParameter(e) => {
                write!(f, "Invalid parameter: {}", e)
            }
            StrokeError::InvalidPathState => {
                write!(f, "Malformed path command stream")
            }
        }
    }
}

impl std::error::Error for StrokeError {}

impl core::convert::From<InvalidParameter> for StrokeError {
    fn from(value: InvalidParameter) -> Self {
        Self::InvalidParameter(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let err: StrokeError = InvalidParameter::MiterLimit.into();
        assert_eq!(
            err.to_string(),
            "Invalid parameter: Miter limit must be finite and greater than 1.0"
        );
        assert_eq!(
            StrokeError::InvalidPathState.to_string(),
            "Malformed path command stream"
        );
    }
}
