use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("Container has no sections: {0}")]
    NoSections(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Deck parsing error: {0}")]
    DeckParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
