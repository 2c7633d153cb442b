use crate::state::GameStatus;

/// Recoverable failures surfaced by the engine and its drivers.
///
/// Contract violations (bad square index, corrupt piece code) panic instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Target board is not reachable from the source board in one ply
    #[error("move not found")]
    MoveNotFound,

    /// No legal move carries this name
    #[error("unknown move '{0}'")]
    UnknownMove(String),

    /// Position code could not be parsed
    #[error("invalid position: {0}")]
    InvalidPosition(String),

    /// Configuration file could not be read or failed validation
    #[error("config error: {0}")]
    Config(String),

    /// A move was requested after the game ended
    #[error("game is over: {0}")]
    GameOver(GameStatus),

    /// The side to move is not the one the caller tried to move for
    #[error("not this player's turn")]
    NotYourTurn,
}

pub type EngineResult<T> = Result<T, EngineError>;
