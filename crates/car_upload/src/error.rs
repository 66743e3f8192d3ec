use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),

    #[error("storage rejected upload ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("malformed storage response: {0}")]
    MalformedResponse(String),
}

pub type Result<T> = std::result::Result<T, UploadError>;
