use thiserror::Error;

use crate::world::ValidationError;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("scenario parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid scenario: {0}")]
    Invalid(String),

    #[error("scenario failed validation: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("no npc registered at index {0}")]
    UnknownNpc(usize),

    #[error("no dialogue authored for {context}")]
    MissingDialogue { context: String },

    #[error("no dialogue table loaded")]
    NoDialogueTable,
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<&str>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, GameError>;
