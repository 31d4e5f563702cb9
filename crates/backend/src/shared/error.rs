use thiserror::Error;

/// Failures surfaced by the aggregation layer
///
/// Empty input is not an error: every aggregation has a defined zero/empty
/// result for it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticsError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Data integrity violation in {collection} record #{index}: {reason}")]
    DataIntegrityViolation {
        collection: &'static str,
        index: usize,
        reason: String,
    },
}

impl AnalyticsError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        AnalyticsError::InvalidArgument(message.into())
    }

    /// Short machine-readable kind for API error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            AnalyticsError::InvalidArgument(_) => "invalid_argument",
            AnalyticsError::DataIntegrityViolation { .. } => "data_integrity_violation",
        }
    }
}

/// Run `validate` over every record, reporting the first failure with its
/// position in the collection.
pub fn validate_all<T>(
    collection: &'static str,
    records: &[T],
    validate: impl Fn(&T) -> Result<(), String>,
) -> Result<(), AnalyticsError> {
    for (index, record) in records.iter().enumerate() {
        validate(record).map_err(|reason| AnalyticsError::DataIntegrityViolation {
            collection,
            index,
            reason,
        })?;
    }
    Ok(())
}
