use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Empty line")]
    Empty,

    #[error("Unknown command: `{0}`")]
    UnknownCommand(String),

    #[error("More argument required for `{0}`")]
    MissingArgument(String),

    #[error("Cannot parse `{0}` as {1}")]
    ParseArgument(String, String),
}
