use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use super::{NewRaceResult, NewRegistration, RaceStore, RaceTx, RankRange};
use crate::error::{Result, StorageError};
use crate::models::{Camel, Owner, RaceLoop, RaceResult, Registration, ResultScope};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    owners: BTreeMap<i64, Owner>,
    camels: BTreeMap<i64, Camel>,
    loops: BTreeMap<Uuid, RaceLoop>,
    registrations: Vec<Registration>,
    results: Vec<RaceResult>,
}

impl MemoryState {
    /// Checks the constraints the database defers to commit time.
    fn check_deferred_constraints(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for result in &self.results {
            if !seen.insert((result.event_id, result.loop_id, result.rank)) {
                return Err(StorageError::ConstraintViolation(format!(
                    "duplicate rank {} in loop {}",
                    result.rank, result.loop_id
                )));
            }
        }
        Ok(())
    }
}

/// In-process [`RaceStore`] with serialisable units of work: a unit holds the
/// store lock for its whole lifetime and works on a private copy that only
/// replaces the shared state on commit.
#[derive(Debug, Clone, Default)]
pub struct MemoryRaceStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryRaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_owner(&self, owner: Owner) {
        self.state.lock().await.owners.insert(owner.owner_id, owner);
    }

    pub async fn insert_camel(&self, camel: Camel) {
        self.state.lock().await.camels.insert(camel.camel_id, camel);
    }

    pub async fn insert_loop(&self, race_loop: RaceLoop) {
        self.state
            .lock()
            .await
            .loops
            .insert(race_loop.loop_id, race_loop);
    }

    pub async fn registrations(&self) -> Vec<Registration> {
        self.state.lock().await.registrations.clone()
    }

    /// Results of the scope ordered by rank.
    pub async fn results(&self, scope: ResultScope) -> Vec<RaceResult> {
        let state = self.state.lock().await;
        let mut results: Vec<RaceResult> = state
            .results
            .iter()
            .filter(|r| r.event_id == scope.event_id && r.loop_id == scope.loop_id)
            .cloned()
            .collect();
        results.sort_by_key(|r| r.rank);
        results
    }
}

#[async_trait]
impl RaceStore for MemoryRaceStore {
    type Tx = MemoryRaceTx;

    async fn begin(&self) -> Result<MemoryRaceTx> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let working = guard.clone();
        Ok(MemoryRaceTx { guard, working })
    }
}

pub struct MemoryRaceTx {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

fn in_scope(result: &RaceResult, scope: ResultScope) -> bool {
    result.event_id == scope.event_id && result.loop_id == scope.loop_id
}

#[async_trait]
impl RaceTx for MemoryRaceTx {
    async fn find_camel(&mut self, camel_id: i64) -> Result<Option<Camel>> {
        Ok(self.working.camels.get(&camel_id).cloned())
    }

    async fn find_owner(&mut self, owner_id: i64) -> Result<Option<Owner>> {
        Ok(self.working.owners.get(&owner_id).cloned())
    }

    async fn lock_loop(&mut self, loop_id: Uuid) -> Result<Option<RaceLoop>> {
        Ok(self.working.loops.get(&loop_id).cloned())
    }

    async fn event_loop_ids(&mut self, event_id: Uuid) -> Result<Vec<Uuid>> {
        let mut loops: Vec<&RaceLoop> = self
            .working
            .loops
            .values()
            .filter(|l| l.event_id == event_id)
            .collect();
        loops.sort_by_key(|l| l.sequence_number);
        Ok(loops.into_iter().map(|l| l.loop_id).collect())
    }

    async fn count_registrations(&mut self, loop_id: Uuid) -> Result<i64> {
        let count = self
            .working
            .registrations
            .iter()
            .filter(|r| r.loop_id == loop_id)
            .count();
        Ok(count as i64)
    }

    async fn camel_registrations(
        &mut self,
        camel_id: i64,
        loop_ids: &[Uuid],
    ) -> Result<Vec<Registration>> {
        Ok(self
            .working
            .registrations
            .iter()
            .filter(|r| r.camel_id == camel_id && loop_ids.contains(&r.loop_id))
            .cloned()
            .collect())
    }

    async fn delete_registrations(&mut self, camel_id: i64, loop_ids: &[Uuid]) -> Result<u64> {
        let before = self.working.registrations.len();
        self.working
            .registrations
            .retain(|r| !(r.camel_id == camel_id && loop_ids.contains(&r.loop_id)));
        Ok((before - self.working.registrations.len()) as u64)
    }

    async fn insert_registration(
        &mut self,
        registration: &NewRegistration,
    ) -> Result<Registration> {
        if !self.working.camels.contains_key(&registration.camel_id)
            || !self.working.loops.contains_key(&registration.loop_id)
        {
            return Err(StorageError::ConstraintViolation(
                "Camel or loop no longer exists".to_string(),
            ));
        }

        let clash = self.working.registrations.iter().any(|r| {
            r.camel_id == registration.camel_id
                && (r.loop_id == registration.loop_id || r.event_id == registration.event_id)
        });
        if clash {
            return Err(StorageError::ConstraintViolation(
                "Camel already holds a registration in this event".to_string(),
            ));
        }

        let created = Registration {
            registration_id: Uuid::new_v4(),
            camel_id: registration.camel_id,
            loop_id: registration.loop_id,
            event_id: registration.event_id,
            registered_at: registration.registered_at,
        };
        self.working.registrations.push(created.clone());
        Ok(created)
    }

    async fn list_results(&mut self, scope: ResultScope) -> Result<Vec<RaceResult>> {
        let mut results: Vec<RaceResult> = self
            .working
            .results
            .iter()
            .filter(|r| in_scope(r, scope))
            .cloned()
            .collect();
        results.sort_by_key(|r| r.rank);
        Ok(results)
    }

    async fn find_result(
        &mut self,
        scope: ResultScope,
        camel_id: i64,
    ) -> Result<Option<RaceResult>> {
        Ok(self
            .working
            .results
            .iter()
            .find(|r| in_scope(r, scope) && r.camel_id == camel_id)
            .cloned())
    }

    async fn clear_results(&mut self, scope: ResultScope) -> Result<u64> {
        let before = self.working.results.len();
        self.working.results.retain(|r| !in_scope(r, scope));
        Ok((before - self.working.results.len()) as u64)
    }

    async fn insert_result(
        &mut self,
        scope: ResultScope,
        result: &NewRaceResult,
    ) -> Result<RaceResult> {
        if result.rank < 1 {
            return Err(StorageError::ConstraintViolation(
                "rank must be positive".to_string(),
            ));
        }
        if self
            .working
            .results
            .iter()
            .any(|r| in_scope(r, scope) && r.camel_id == result.camel_id)
        {
            return Err(StorageError::ConstraintViolation(format!(
                "camel {} already has a result in this loop",
                result.camel_id
            )));
        }

        let created = RaceResult {
            result_id: Uuid::new_v4(),
            event_id: scope.event_id,
            loop_id: scope.loop_id,
            camel_id: result.camel_id,
            owner_id: result.owner_id,
            rank: result.rank,
            prize_amount: result.prize_amount,
            bank_name: result.bank.bank_name.clone(),
            iban: result.bank.iban.clone(),
            account_holder: result.bank.account_holder.clone(),
            published_at: result.published_at,
        };
        self.working.results.push(created.clone());
        Ok(created)
    }

    async fn delete_result(&mut self, result_id: Uuid) -> Result<()> {
        let before = self.working.results.len();
        self.working.results.retain(|r| r.result_id != result_id);
        if before == self.working.results.len() {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn shift_ranks(
        &mut self,
        scope: ResultScope,
        range: RankRange,
        delta: i32,
    ) -> Result<u64> {
        let mut shifted = 0;
        for result in self
            .working
            .results
            .iter_mut()
            .filter(|r| in_scope(r, scope) && range.contains(r.rank))
        {
            result.rank += delta;
            shifted += 1;
        }
        Ok(shifted)
    }

    async fn set_rank(&mut self, result_id: Uuid, rank: i32) -> Result<RaceResult> {
        let result = self
            .working
            .results
            .iter_mut()
            .find(|r| r.result_id == result_id)
            .ok_or(StorageError::NotFound)?;
        result.rank = rank;
        Ok(result.clone())
    }

    async fn commit(self) -> Result<()> {
        self.working.check_deferred_constraints()?;
        let MemoryRaceTx { mut guard, working } = self;
        *guard = working;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures::{self, add_loop, store_with_camels};

    fn entry(camel_id: i64, rank: i32) -> NewRaceResult {
        NewRaceResult {
            camel_id,
            owner_id: fixtures::OWNER_ID,
            rank,
            prize_amount: None,
            bank: fixtures::owner().bank_details(),
            published_at: fixtures::now(),
        }
    }

    #[tokio::test]
    async fn test_dropped_unit_leaves_no_writes() {
        let store = store_with_camels(1).await;
        let race_loop = add_loop(&store, fixtures::event_id(), 1, 5).await;

        let mut tx = store.begin().await.unwrap();
        tx.insert_registration(&NewRegistration {
            camel_id: 1,
            loop_id: race_loop.loop_id,
            event_id: race_loop.event_id,
            registered_at: fixtures::now(),
        })
        .await
        .unwrap();
        tx.commit().await.unwrap();

        let mut tx = store.begin().await.unwrap();
        let removed = tx
            .delete_registrations(1, &[race_loop.loop_id])
            .await
            .unwrap();
        assert_eq!(removed, 1);
        drop(tx);

        assert_eq!(store.registrations().await.len(), 1);
    }

    #[tokio::test]
    async fn test_commit_rejects_duplicate_rank() {
        let store = store_with_camels(2).await;
        let race_loop = add_loop(&store, fixtures::event_id(), 1, 5).await;
        let scope = ResultScope::new(race_loop.event_id, race_loop.loop_id);

        let mut tx = store.begin().await.unwrap();
        tx.insert_result(scope, &entry(1, 1)).await.unwrap();
        tx.insert_result(scope, &entry(2, 2)).await.unwrap();
        tx.commit().await.unwrap();

        let mut tx = store.begin().await.unwrap();
        let shifted = tx
            .shift_ranks(scope, RankRange::starting_at(2), -1)
            .await
            .unwrap();
        assert_eq!(shifted, 1);
        let err = tx.commit().await.unwrap_err();
        assert!(matches!(err, StorageError::ConstraintViolation(_)));

        let ranks: Vec<i32> = store.results(scope).await.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2]);
    }
}
