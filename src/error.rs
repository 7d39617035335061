use crate::value::Value;

/// Boxed error type for failures originating in the underlying driver.
pub type BoxDynError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error types for simple-sql
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error while scanning the query text for placeholders
    #[error("Failed to scan query text: {0}")]
    Parse(#[from] regex::Error),

    /// A placeholder in the query text has no matching property on the bind type
    #[error("Type [{entity}] has no property matching placeholder [@{placeholder}]")]
    MissingProperty {
        entity: &'static str,
        placeholder: String,
    },

    /// A column value could not be converted to the declared property type
    #[error("Column [{column}] holds {value:?}, which cannot be assigned to property [{property}]")]
    Conversion {
        column: String,
        property: String,
        value: Value,
    },

    /// Error from the underlying database driver, passed through untranslated
    #[error("Database error: {0}")]
    Database(#[source] BoxDynError),
}

impl Error {
    /// Wraps a driver-side error. Used by [`Connection`](crate::Connection)
    /// implementations; the core never translates these further.
    pub fn database(source: impl Into<BoxDynError>) -> Self {
        Self::Database(source.into())
    }
}

/// Result type alias for simple-sql operations
pub type Result<T> = std::result::Result<T, Error>;
