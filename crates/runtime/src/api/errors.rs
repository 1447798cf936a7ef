//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, the wire codec and the transport
//! so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use game_core::{ErrorSeverity, GameError, PickError};

use crate::net::{CodecError, TransportError};
use crate::net::sync::SyncError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("match worker command channel closed")]
    CommandChannelClosed,

    #[error("match worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("match worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a spell catalog before building")]
    MissingCatalog,

    #[error("local match requires an opponent pick provider")]
    MissingOpponent,

    #[error("restart is only available in local matches")]
    RestartUnavailable,

    #[error("pick provider failed: {0}")]
    Provider(String),

    #[error(transparent)]
    Pick(#[from] PickError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Pick(err) => err.severity(),
            RuntimeError::Sync(_) | RuntimeError::RestartUnavailable => {
                ErrorSeverity::Recoverable
            }
            RuntimeError::MissingCatalog | RuntimeError::MissingOpponent => {
                ErrorSeverity::Validation
            }
            _ => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            RuntimeError::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            RuntimeError::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
            RuntimeError::MissingCatalog => "RUNTIME_MISSING_CATALOG",
            RuntimeError::MissingOpponent => "RUNTIME_MISSING_OPPONENT",
            RuntimeError::RestartUnavailable => "RUNTIME_RESTART_UNAVAILABLE",
            RuntimeError::Provider(_) => "RUNTIME_PROVIDER",
            RuntimeError::Pick(err) => err.error_code(),
            RuntimeError::Sync(_) => "RUNTIME_SYNC",
            RuntimeError::Codec(_) => "RUNTIME_CODEC",
            RuntimeError::Transport(_) => "RUNTIME_TRANSPORT",
        }
    }
}
