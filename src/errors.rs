use thiserror::Error;

pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("'from' should be not greater than 'to'")]
    InvalidTimeRange,

    #[error("failed to get new users")]
    UserFetch(#[source] SourceError),

    #[error("failed to get new cards")]
    CardFetch(#[source] SourceError),
}
