use salles_core::error::CoreError;

/// Error type for reservation lifecycle operations.
///
/// Repository methods that only read return plain `sqlx::Error`; the
/// lifecycle operations (create, decide, update, delete) also surface
/// domain outcomes such as conflicts and invalid transitions, so they
/// return this combined type.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
