use thiserror::Error;

/// failures of the quote store, its view, and the storage behind them.
///
/// `MissingFields`, `InvalidFormat` and `Io` are user-facing: their display
/// text is shown to the user as-is. The rest are plumbing failures.
#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Please fill in both the quote and category fields.")]
    MissingFields,

    #[error("Invalid file format.")]
    InvalidFormat,

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("session storage lock poisoned")]
    Lock,
}

impl<T> From<std::sync::PoisonError<T>> for QuoteError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        QuoteError::Lock
    }
}

impl QuoteError {
    /// whether this error is something the user caused and can fix.
    ///
    /// io errors only come from reading or writing files the user named.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            QuoteError::MissingFields | QuoteError::InvalidFormat | QuoteError::Io(_)
        )
    }
}

pub type QuoteResult<T> = Result<T, QuoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_messages() {
        assert_eq!(
            QuoteError::MissingFields.to_string(),
            "Please fill in both the quote and category fields."
        );
        assert_eq!(QuoteError::InvalidFormat.to_string(), "Invalid file format.");
    }

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: QuoteError = io_err.into();
        assert!(matches!(err, QuoteError::Io(_)));
        assert!(err.is_user_facing());
    }

    #[test]
    fn plumbing_errors_are_not_user_facing() {
        assert!(!QuoteError::Lock.is_user_facing());
        assert!(!QuoteError::Storage(sqlx::Error::PoolClosed).is_user_facing());
    }
}
