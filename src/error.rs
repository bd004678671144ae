use thiserror::Error;

#[derive(Error, Debug)]
pub enum TodoError {
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("No such resource: {0}")]
    ResourceNotFound(String),

    #[error("Unable to write {name}: {source}")]
    ResourceUnwritable {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Todo not found: {0}")]
    EntityNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl TodoError {
    pub(crate) fn decode(reason: impl Into<String>) -> Self {
        TodoError::Decode(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, TodoError>;
