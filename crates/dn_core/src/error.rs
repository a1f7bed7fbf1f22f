use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Feed parse error: {0}")]
    Feed(#[from] quick_xml::DeError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("State error: {0}")]
    State(String),

    #[error("Notification error: {0}")]
    Notify(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Maps a non-2xx response into [`Error::Status`], passing successful ones through.
    ///
    /// Only the origin is kept: webhook URLs carry their token in the path.
    pub fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(Error::Status {
                url: response.url().origin().ascii_serialization(),
                status: status.as_u16(),
            })
        }
    }
}
