use memorizer_core::GameError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("No tokio runtime to schedule turn delays on")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
    #[error("Malformed session config: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SessionError>;
