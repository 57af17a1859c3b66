use thiserror::Error;

/// The command registration API did not accept a batch.
#[derive(Error, Debug)]
pub enum PublishError {
    /// Stored guild ID is not a Discord snowflake.
    #[error("Guild ID '{0}' is not a valid snowflake")]
    InvalidGuildId(String),

    /// The API rejected the request or could not be reached.
    ///
    /// Boxed due to the size of serenity::Error.
    #[error(transparent)]
    Rejected(#[from] Box<serenity::Error>),
}

impl From<serenity::Error> for PublishError {
    fn from(err: serenity::Error) -> Self {
        PublishError::Rejected(Box::new(err))
    }
}
