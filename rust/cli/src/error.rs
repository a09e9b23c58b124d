use ma_engine::errors::GameError;
use ma_engine::resolver::RejectReason;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("scripted action was rejected: {0}")]
    Scripted(RejectReason),
    #[error("engine fault: {0}")]
    Engine(#[from] GameError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
