use thiserror::Error;

/// Core error type for frame/Parquet operations
#[derive(Error, Debug)]
pub enum FrameError {
    /// IO errors from file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Arrow errors from array construction or batch assembly
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow_schema::ArrowError),

    /// Parquet format errors
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Invalid caller configuration (group sizes, selections, arity)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A row filter that keeps no rows
    #[error("Empty selection: {0}")]
    EmptySelection(String),

    /// A physical or logical type outside the registry
    #[error("Unsupported type for column '{column}': {type_name}")]
    UnsupportedType { column: String, type_name: String },

    /// Value-level decode or encode failures
    #[error("Conversion error: {0}")]
    Conversion(String),
}

/// Result type alias for frame/Parquet operations
pub type Result<T> = std::result::Result<T, FrameError>;

impl FrameError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        FrameError::Config(msg.into())
    }

    /// Create a new empty-selection error
    pub fn empty_selection<S: Into<String>>(msg: S) -> Self {
        FrameError::EmptySelection(msg.into())
    }

    /// Create a new unsupported-type error for a named column
    pub fn unsupported_type<C: Into<String>, T: Into<String>>(column: C, type_name: T) -> Self {
        FrameError::UnsupportedType {
            column: column.into(),
            type_name: type_name.into(),
        }
    }

    /// Create a new conversion error
    pub fn conversion<S: Into<String>>(msg: S) -> Self {
        FrameError::Conversion(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = FrameError::config("rows per group must be greater than 0");
        assert_eq!(
            err.to_string(),
            "Configuration error: rows per group must be greater than 0"
        );

        let err = FrameError::unsupported_type("price", "complex");
        assert_eq!(
            err.to_string(),
            "Unsupported type for column 'price': complex"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: FrameError = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }
}
