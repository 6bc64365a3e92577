use crate::errors::SourceError;
use crate::models::{CardRecord, UserRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Upstream supplying users registered within `[from, to]` inclusive.
///
/// Implementations return an empty vec (not an error) when nothing was
/// registered in the window; record order is not guaranteed.
#[async_trait]
pub trait UserSource: Send + Sync {
    async fn fetch_new_users(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<UserRecord>, SourceError>;
}

/// Upstream supplying cards created within `[from, to]` inclusive.
///
/// Same contract as [`UserSource`]: empty vec when none, no ordering
/// guarantee.
#[async_trait]
pub trait CardSource: Send + Sync {
    async fn fetch_new_cards(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<CardRecord>, SourceError>;
}
