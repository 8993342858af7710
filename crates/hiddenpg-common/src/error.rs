/// Error types shared across the Hidden PG service crates.
///
/// These cover infrastructure concerns (environment configuration) that every
/// service touches. Service-specific errors are defined in each binary crate
/// and wrap `CommonError` via `#[from]`.

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("invalid value for {name}: {value:?}")]
    InvalidEnv { name: String, value: String },
}
