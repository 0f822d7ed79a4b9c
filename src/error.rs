use core::fmt;

/// Errors surfaced by [`Printer`](crate::Printer) operations.
///
/// Rendering itself cannot fail on any value: every value has a Scalar
/// fallback form. What can fail is the configuration (rejected before any
/// traversal starts), the depth ceiling on pathologically deep acyclic
/// values, and the sink's write.
#[derive(Debug)]
pub enum RenderError {
    /// A configuration option was set to a value the renderer cannot work
    /// with. Reported at call entry, before any traversal.
    InvalidOption {
        /// Name of the offending builder option.
        option: &'static str,
        /// The rejected value.
        value: usize,
    },

    /// Traversal depth went past the configured ceiling on an acyclic
    /// structure. Cyclic structures never produce this: the cycle guard
    /// resolves them before the depth check runs.
    DepthExceeded {
        /// The ceiling that was exceeded.
        max_depth: usize,
    },

    /// The output sink refused the finished text.
    Io(std::io::Error),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::InvalidOption { option, value } => {
                write!(f, "invalid value {value} for option `{option}`")
            }
            RenderError::DepthExceeded { max_depth } => {
                write!(f, "render depth exceeded the configured maximum of {max_depth}")
            }
            RenderError::Io(e) => write!(f, "failed to write to output sink: {e}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Io(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_option() {
        let err = RenderError::InvalidOption {
            option: "max_line_width",
            value: 0,
        };
        assert_eq!(err.to_string(), "invalid value 0 for option `max_line_width`");
    }

    #[test]
    fn display_names_the_depth_limit() {
        let err = RenderError::DepthExceeded { max_depth: 16 };
        assert_eq!(
            err.to_string(),
            "render depth exceeded the configured maximum of 16"
        );
    }
}
