use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Error opening file: {}", .0.display())]
    OpenFile(PathBuf),

    #[error("Error parsing configuration: {0}")]
    ParseConfig(String),

    #[error("No JWT secret configured, set `execution.jwt_secret_path` or BLUEWATER_JWT_SECRET")]
    MissingJwtSecret,

    #[error("Invalid JWT secret in {}: {}", .0.display(), .1)]
    JwtSecret(PathBuf, String),

    #[error("Error creating parent directory: {}", .0.display())]
    ParentDir(PathBuf),

    #[error("Error writing file: {}", .0.display())]
    WriteFile(PathBuf),

    #[error("File already exists: {}", .0.display())]
    FileExists(PathBuf),
}
