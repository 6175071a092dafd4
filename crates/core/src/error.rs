use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid severity: {0}")]
    InvalidSeverity(#[from] journal_types::SeverityError),

    #[error("malformed journal ({path}): {reason}", path = path.display())]
    MalformedJournal { path: PathBuf, reason: String },
    #[error("no journal found at {}", .0.display())]
    JournalNotFound(PathBuf),

    #[error("failed to read journal file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write journal file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to create archive directory: {0}")]
    ArchiveDirCreation(std::io::Error),
    #[error("failed to copy journal into archive: {0}")]
    ArchiveCopy(std::io::Error),
    #[error("failed to create reports directory: {0}")]
    ReportDirCreation(std::io::Error),
    #[error("failed to write report file: {0}")]
    ReportWrite(std::io::Error),
    #[error("failed to serialise journal: {0}")]
    Serialisation(serde_json::Error),
}

pub type JournalResult<T> = std::result::Result<T, JournalError>;
