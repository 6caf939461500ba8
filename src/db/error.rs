#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Constraint violation for sheet row {row}: {msg}")]
    ConstraintViolation { row: u32, msg: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
