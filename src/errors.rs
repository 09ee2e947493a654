#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("chat API key is not configured")]
    MissingCredentials,

    #[error("chat API rejected the configured credentials")]
    Unauthorized,

    #[error("chat API error: {0}")]
    Api(#[from] anyhow::Error),
}
