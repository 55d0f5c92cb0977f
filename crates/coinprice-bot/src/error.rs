use coinprice_core::{CoreError, HttpError, ValidationError};
use thiserror::Error;

/// Failures while handling chat traffic.
#[derive(Debug, Error)]
pub enum BotError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("telegram transport error: {0}")]
    Transport(String),

    #[error("telegram api error: {description}")]
    Api { description: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<ValidationError> for BotError {
    fn from(value: ValidationError) -> Self {
        Self::Core(CoreError::Validation(value))
    }
}

impl From<serde_json::Error> for BotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Core(CoreError::Serialization(value))
    }
}

impl From<HttpError> for BotError {
    fn from(value: HttpError) -> Self {
        Self::Transport(value.message().to_owned())
    }
}

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("missing telegram bot token: pass --token or set TELEGRAM_BOT_TOKEN")]
    MissingToken,

    #[error(transparent)]
    Bot(#[from] BotError),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::MissingToken => 2,
            Self::Bot(BotError::Core(CoreError::Validation(_))) => 2,
            Self::Bot(BotError::Core(CoreError::Serialization(_))) => 4,
            Self::Bot(BotError::Transport(_)) | Self::Bot(BotError::Api { .. }) => 3,
            Self::Bot(BotError::Io(_)) => 10,
        }
    }
}
