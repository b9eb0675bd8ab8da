use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("A merge needs at least two documents, got {0}")]
    NotEnoughInputs(usize),
    #[error("Document has no page tree: {0}")]
    MalformedDocument(String),
}

pub type Result<T> = std::result::Result<T, MergeError>;
