use thiserror::Error;

#[derive(Debug, Error)]
pub enum JoinPlanError {
    /// A reference the join cannot be executed without was not supplied.
    #[error("invalid join plan descriptor: `{field}` is required")]
    InvalidDescriptor { field: &'static str },

    /// The payload is not a well-formed descriptor: a field is missing, has the wrong type, or
    /// names an enum variant this build does not know.
    #[error("malformed join plan payload: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = JoinPlanError> = std::result::Result<T, E>;
