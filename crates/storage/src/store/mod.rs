//! Unit-of-work seam between the race services and persistence.
//!
//! A service opens one [`RaceTx`] per operation, performs every read and
//! write of that operation through it and finishes with [`RaceTx::commit`].
//! Dropping a unit of work without committing discards all of its writes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{BankDetails, Camel, Owner, RaceLoop, RaceResult, Registration, ResultScope};

#[cfg(test)]
mod memory;
mod postgres;

#[cfg(test)]
pub use memory::MemoryRaceStore;
pub use postgres::{PgRaceStore, PgRaceTx};

#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub camel_id: i64,
    pub loop_id: Uuid,
    pub event_id: Uuid,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewRaceResult {
    pub camel_id: i64,
    pub owner_id: i64,
    pub rank: i32,
    pub prize_amount: Option<Decimal>,
    pub bank: BankDetails,
    pub published_at: DateTime<Utc>,
}

/// Inclusive rank range; `last: None` runs to the end of the scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankRange {
    pub first: i32,
    pub last: Option<i32>,
}

impl RankRange {
    pub fn between(first: i32, last: i32) -> Self {
        Self {
            first,
            last: Some(last),
        }
    }

    pub fn starting_at(first: i32) -> Self {
        Self { first, last: None }
    }

    pub fn contains(&self, rank: i32) -> bool {
        rank >= self.first && self.last.is_none_or(|last| rank <= last)
    }
}

#[async_trait]
pub trait RaceStore: Send + Sync {
    type Tx: RaceTx;

    async fn begin(&self) -> Result<Self::Tx>;
}

#[async_trait]
pub trait RaceTx: Send {
    async fn find_camel(&mut self, camel_id: i64) -> Result<Option<Camel>>;

    async fn find_owner(&mut self, owner_id: i64) -> Result<Option<Owner>>;

    /// Loads a loop and holds it against concurrent registrations until the
    /// unit of work ends.
    async fn lock_loop(&mut self, loop_id: Uuid) -> Result<Option<RaceLoop>>;

    /// Ids of every loop of the event, including the one being registered into.
    async fn event_loop_ids(&mut self, event_id: Uuid) -> Result<Vec<Uuid>>;

    async fn count_registrations(&mut self, loop_id: Uuid) -> Result<i64>;

    async fn camel_registrations(
        &mut self,
        camel_id: i64,
        loop_ids: &[Uuid],
    ) -> Result<Vec<Registration>>;

    async fn delete_registrations(&mut self, camel_id: i64, loop_ids: &[Uuid]) -> Result<u64>;

    async fn insert_registration(&mut self, registration: &NewRegistration)
    -> Result<Registration>;

    /// Results of the scope ordered by rank.
    async fn list_results(&mut self, scope: ResultScope) -> Result<Vec<RaceResult>>;

    async fn find_result(&mut self, scope: ResultScope, camel_id: i64)
    -> Result<Option<RaceResult>>;

    async fn clear_results(&mut self, scope: ResultScope) -> Result<u64>;

    async fn insert_result(&mut self, scope: ResultScope, result: &NewRaceResult)
    -> Result<RaceResult>;

    async fn delete_result(&mut self, result_id: Uuid) -> Result<()>;

    /// Adds `delta` to the rank of every result of the scope within `range`.
    async fn shift_ranks(&mut self, scope: ResultScope, range: RankRange, delta: i32)
    -> Result<u64>;

    async fn set_rank(&mut self, result_id: Uuid, rank: i32) -> Result<RaceResult>;

    async fn commit(self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_range_is_inclusive() {
        let range = RankRange::between(2, 4);
        assert!(!range.contains(1));
        assert!(range.contains(2));
        assert!(range.contains(4));
        assert!(!range.contains(5));
    }

    #[test]
    fn test_open_range_runs_to_end() {
        let range = RankRange::starting_at(3);
        assert!(!range.contains(2));
        assert!(range.contains(i32::MAX));
    }
}
