use crate::errors::StatsError;
use crate::models::{CardRecord, DailyStats, TimeWindow, UserRecord};
use crate::sources::{CardSource, UserSource};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, info};
use uuid::Uuid;

pub struct ActivityAggregator<U, C> {
    users: U,
    cards: C,
}

impl<U: UserSource, C: CardSource> ActivityAggregator<U, C> {
    pub fn new(users: U, cards: C) -> Self {
        Self { users, cards }
    }

    /// Computes one [`DailyStats`] entry per calendar day with activity in
    /// the window. The user fetch runs first; if it fails the card fetch is
    /// never attempted.
    pub async fn compute_stats(&self, window: TimeWindow) -> Result<Vec<DailyStats>, StatsError> {
        if window.from > window.to {
            return Err(StatsError::InvalidTimeRange);
        }

        info!(from = %window.from, to = %window.to, "computing daily activity stats");

        let users = self
            .users
            .fetch_new_users(window.from, window.to)
            .await
            .map_err(StatsError::UserFetch)?;
        debug!(count = users.len(), "fetched new users");

        let (user_buckets, registered_at) = bucket_users(users);

        let cards = self
            .cards
            .fetch_new_cards(window.from, window.to)
            .await
            .map_err(StatsError::CardFetch)?;
        debug!(count = cards.len(), "fetched new cards");

        let (card_buckets, new_user_cards) = bucket_cards(cards, &registered_at);

        Ok(assemble(user_buckets, card_buckets, new_user_cards))
    }
}

/// Truncates a timestamp to its calendar day. Both the user and card paths
/// go through this one function so the two bucketings cannot drift.
pub fn day_key(timestamp: DateTime<Utc>) -> NaiveDate {
    timestamp.date_naive()
}

fn bucket_users(
    users: Vec<UserRecord>,
) -> (
    BTreeMap<NaiveDate, Vec<UserRecord>>,
    HashMap<Uuid, DateTime<Utc>>,
) {
    let mut buckets: BTreeMap<NaiveDate, Vec<UserRecord>> = BTreeMap::new();
    let mut registered_at = HashMap::new();

    for user in users {
        registered_at.insert(user.id, user.created_at);
        buckets.entry(day_key(user.created_at)).or_default().push(user);
    }

    (buckets, registered_at)
}

fn bucket_cards(
    cards: Vec<CardRecord>,
    registered_at: &HashMap<Uuid, DateTime<Utc>>,
) -> (BTreeMap<NaiveDate, Vec<CardRecord>>, BTreeMap<NaiveDate, usize>) {
    let mut buckets: BTreeMap<NaiveDate, Vec<CardRecord>> = BTreeMap::new();
    let mut new_user_cards: BTreeMap<NaiveDate, usize> = BTreeMap::new();

    for card in cards {
        let day = day_key(card.created_at);

        // A card counts when its author registered on the card's own day.
        if let Some(&registered) = registered_at.get(&card.user_id) {
            if day_key(registered) == day {
                *new_user_cards.entry(day).or_insert(0) += 1;
            }
        }

        buckets.entry(day).or_default().push(card);
    }

    (buckets, new_user_cards)
}

fn assemble(
    mut user_buckets: BTreeMap<NaiveDate, Vec<UserRecord>>,
    mut card_buckets: BTreeMap<NaiveDate, Vec<CardRecord>>,
    mut new_user_cards: BTreeMap<NaiveDate, usize>,
) -> Vec<DailyStats> {
    let days: BTreeSet<NaiveDate> = user_buckets
        .keys()
        .chain(card_buckets.keys())
        .copied()
        .collect();

    days.into_iter()
        .map(|date| DailyStats {
            date,
            users: user_buckets.remove(&date).unwrap_or_default(),
            cards: card_buckets.remove(&date).unwrap_or_default(),
            num_cards_by_new_users: new_user_cards.remove(&date).unwrap_or_default(),
        })
        .collect()
}
