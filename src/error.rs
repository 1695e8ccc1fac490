use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not Found")]
    NotFound,

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Forbidden")]
    Forbidden,

    #[error("Transport error")]
    Transport(#[from] reqwest::Error),

    #[error("Decode error")]
    Decode(#[from] serde_json::Error),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Human-readable text suitable for showing to the user verbatim.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::NotFound => "Not found".into(),
            ApiError::Forbidden => "You are not allowed to do that".into(),
            ApiError::Transport(_) => "Network error, please try again".into(),
            ApiError::Decode(_) | ApiError::Internal(_) => {
                "Something went wrong, please try again".into()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Outcome of a mutating view-model operation. Every mutation resolves to
/// one of these two arms; callers never see a raw `ApiError` and never need
/// call-site-specific unwinding.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationResult<T> {
    Success { data: T, message: String },
    Failure { message: String },
}

impl<T> MutationResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, MutationResult::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            MutationResult::Success { message, .. } => message,
            MutationResult::Failure { message } => message,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            MutationResult::Success { data, .. } => Some(data),
            MutationResult::Failure { .. } => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            MutationResult::Success { data, .. } => Some(data),
            MutationResult::Failure { .. } => None,
        }
    }
}
