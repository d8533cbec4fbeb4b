//! Race result ranking.
//!
//! Within one (event, loop) scope the published ranks are always exactly
//! `1..=N`. Publishing replaces the scope wholesale; moving or deleting a
//! single result shifts the ranks between the old and new position so no gap
//! or duplicate survives the transaction.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::dto::race_result::PublishedResult;
use crate::error::{Entity, RaceError, ServiceResult};
use crate::models::{Principal, RaceLoop, RaceResult, ResultScope};
use crate::store::{NewRaceResult, RaceStore, RaceTx, RankRange};

/// Rank adjustment applied to every other result of the scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankShift {
    pub range: RankRange,
    pub delta: i32,
}

/// Shift that makes room for a result moving from `old_rank` to `new_rank`.
///
/// The moved result itself is never inside the returned range.
pub fn plan_move(old_rank: i32, new_rank: i32) -> Option<RankShift> {
    if new_rank < old_rank {
        Some(RankShift {
            range: RankRange::between(new_rank, old_rank - 1),
            delta: 1,
        })
    } else if new_rank > old_rank {
        Some(RankShift {
            range: RankRange::between(old_rank + 1, new_rank),
            delta: -1,
        })
    } else {
        None
    }
}

/// Shift that closes the gap left by removing the result at `removed_rank`.
pub fn plan_removal(removed_rank: i32) -> RankShift {
    RankShift {
        range: RankRange::starting_at(removed_rank + 1),
        delta: -1,
    }
}

/// True when `ranks` is a permutation of `1..=len`.
pub fn is_dense(ranks: impl IntoIterator<Item = i32>) -> bool {
    let mut ranks: Vec<i32> = ranks.into_iter().collect();
    ranks.sort_unstable();
    ranks.iter().zip(1..).all(|(rank, expected)| *rank == expected)
}

fn check_published(results: &[PublishedResult]) -> ServiceResult<()> {
    let mut problems = Vec::new();

    let mut camels = HashSet::new();
    for result in results {
        if !camels.insert(result.camel_id) {
            problems.push(format!("camel {} appears more than once", result.camel_id));
        }
    }

    if !is_dense(results.iter().map(|r| r.rank)) {
        problems.push(format!(
            "ranks must be exactly 1 to {} without gaps or repeats",
            results.len()
        ));
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(RaceError::Validation(problems))
    }
}

/// Locks the scope's loop, which must belong to the scope's event. Every
/// ranking write takes this lock first so writers of one loop queue up.
async fn lock_scope<T: RaceTx>(tx: &mut T, scope: ResultScope) -> ServiceResult<RaceLoop> {
    tx.lock_loop(scope.loop_id)
        .await?
        .filter(|l| l.event_id == scope.event_id)
        .ok_or(RaceError::NotFound(Entity::Loop))
}

/// Replaces every result of the scope with `results`, keeping the submitted
/// ranks and snapshotting each owner's bank details.
pub async fn publish<S: RaceStore>(
    store: &S,
    actor: &Principal,
    scope: ResultScope,
    results: &[PublishedResult],
    now: DateTime<Utc>,
) -> ServiceResult<Vec<RaceResult>> {
    check_published(results)?;

    let mut tx = store.begin().await?;

    let race_loop = lock_scope(&mut tx, scope).await?;

    let mut rows = Vec::with_capacity(results.len());
    for result in results {
        let camel = tx
            .find_camel(result.camel_id)
            .await?
            .ok_or(RaceError::NotFound(Entity::Camel))?;
        let owner = tx
            .find_owner(camel.owner_id)
            .await?
            .ok_or(RaceError::NotFound(Entity::Owner))?;

        rows.push(NewRaceResult {
            camel_id: camel.camel_id,
            owner_id: owner.owner_id,
            rank: result.rank,
            prize_amount: result.prize_amount,
            bank: owner.bank_details(),
            published_at: now,
        });
    }

    let replaced = tx.clear_results(scope).await?;

    let mut published = Vec::with_capacity(rows.len());
    for row in &rows {
        published.push(tx.insert_result(scope, row).await?);
    }

    tx.commit().await?;

    published.sort_by_key(|r| r.rank);

    info!(
        actor = %actor,
        event_id = %scope.event_id,
        loop_id = %race_loop.loop_id,
        replaced,
        published = published.len(),
        "race results published"
    );

    Ok(published)
}

/// Moves one camel's result to `new_rank`, shifting the results in between.
pub async fn update_rank<S: RaceStore>(
    store: &S,
    actor: &Principal,
    scope: ResultScope,
    camel_id: i64,
    new_rank: i32,
) -> ServiceResult<RaceResult> {
    if new_rank < 1 {
        return Err(RaceError::InvalidRank);
    }

    let mut tx = store.begin().await?;
    lock_scope(&mut tx, scope).await?;

    let current = tx
        .find_result(scope, camel_id)
        .await?
        .ok_or(RaceError::NotFound(Entity::Result))?;

    let total = tx.list_results(scope).await?.len();
    if new_rank as usize > total {
        return Err(RaceError::InvalidRank);
    }

    let Some(shift) = plan_move(current.rank, new_rank) else {
        return Ok(current);
    };

    let shifted = tx.shift_ranks(scope, shift.range, shift.delta).await?;
    let updated = tx.set_rank(current.result_id, new_rank).await?;

    tx.commit().await?;

    info!(
        actor = %actor,
        event_id = %scope.event_id,
        loop_id = %scope.loop_id,
        camel_id,
        old_rank = current.rank,
        new_rank,
        shifted,
        "result rank updated"
    );

    Ok(updated)
}

/// Removes one camel's result and closes the gap it leaves.
pub async fn delete_result<S: RaceStore>(
    store: &S,
    actor: &Principal,
    scope: ResultScope,
    camel_id: i64,
) -> ServiceResult<()> {
    let mut tx = store.begin().await?;
    lock_scope(&mut tx, scope).await?;

    let result = tx
        .find_result(scope, camel_id)
        .await?
        .ok_or(RaceError::NotFound(Entity::Result))?;

    tx.delete_result(result.result_id).await?;

    let shift = plan_removal(result.rank);
    let shifted = tx.shift_ranks(scope, shift.range, shift.delta).await?;

    tx.commit().await?;

    info!(
        actor = %actor,
        event_id = %scope.event_id,
        loop_id = %scope.loop_id,
        camel_id,
        rank = result.rank,
        shifted,
        "result deleted"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use super::*;
    use crate::models::Role;
    use crate::services::fixtures::{self, add_loop, store_with_camels};
    use crate::store::MemoryRaceStore;

    fn admin() -> Principal {
        Principal::new("results-office", Role::Admin)
    }

    fn entry(camel_id: i64, rank: i32) -> PublishedResult {
        PublishedResult {
            camel_id,
            rank,
            prize_amount: None,
        }
    }

    fn scope_of(race_loop: &RaceLoop) -> ResultScope {
        ResultScope::new(race_loop.event_id, race_loop.loop_id)
    }

    /// Camel ids of the scope in rank order.
    async fn standings(store: &MemoryRaceStore, scope: ResultScope) -> Vec<(i64, i32)> {
        store
            .results(scope)
            .await
            .into_iter()
            .map(|r| (r.camel_id, r.rank))
            .collect()
    }

    async fn published_loop(camels: i64) -> (MemoryRaceStore, ResultScope) {
        let store = store_with_camels(camels).await;
        let race_loop = add_loop(&store, fixtures::event_id(), 1, 20).await;
        let scope = scope_of(&race_loop);
        let results: Vec<_> = (1..=camels).map(|id| entry(id, id as i32)).collect();
        publish(&store, &admin(), scope, &results, fixtures::now())
            .await
            .unwrap();
        (store, scope)
    }

    #[test]
    fn test_plan_move_up_shifts_range_down() {
        let shift = plan_move(3, 1).unwrap();
        assert_eq!(shift.range, RankRange::between(1, 2));
        assert_eq!(shift.delta, 1);
    }

    #[test]
    fn test_plan_move_down_shifts_range_up() {
        let shift = plan_move(2, 5).unwrap();
        assert_eq!(shift.range, RankRange::between(3, 5));
        assert_eq!(shift.delta, -1);
    }

    #[test]
    fn test_plan_move_same_rank_is_noop() {
        assert_eq!(plan_move(4, 4), None);
    }

    #[test]
    fn test_plan_removal_closes_gap() {
        let shift = plan_removal(2);
        assert_eq!(shift.range, RankRange::starting_at(3));
        assert_eq!(shift.delta, -1);
    }

    #[test]
    fn test_is_dense() {
        assert!(is_dense([3, 1, 2]));
        assert!(is_dense(Vec::new()));
        assert!(!is_dense([1, 3]));
        assert!(!is_dense([1, 1, 2]));
        assert!(!is_dense([0, 1]));
    }

    #[tokio::test]
    async fn test_move_to_first_place() {
        let (store, scope) = published_loop(3).await;

        let updated = update_rank(&store, &admin(), scope, 3, 1).await.unwrap();

        assert_eq!(updated.rank, 1);
        assert_eq!(standings(&store, scope).await, vec![(3, 1), (1, 2), (2, 3)]);
    }

    #[tokio::test]
    async fn test_move_down_the_table() {
        let (store, scope) = published_loop(4).await;

        update_rank(&store, &admin(), scope, 1, 3).await.unwrap();

        assert_eq!(
            standings(&store, scope).await,
            vec![(2, 1), (3, 2), (1, 3), (4, 4)]
        );
    }

    #[tokio::test]
    async fn test_same_rank_changes_nothing() {
        let (store, scope) = published_loop(3).await;

        let unchanged = update_rank(&store, &admin(), scope, 2, 2).await.unwrap();

        assert_eq!(unchanged.rank, 2);
        assert_eq!(standings(&store, scope).await, vec![(1, 1), (2, 2), (3, 3)]);
    }

    #[tokio::test]
    async fn test_rank_out_of_range() {
        let (store, scope) = published_loop(3).await;

        let err = update_rank(&store, &admin(), scope, 2, 0).await.unwrap_err();
        assert!(matches!(err, RaceError::InvalidRank));

        let err = update_rank(&store, &admin(), scope, 2, 4).await.unwrap_err();
        assert!(matches!(err, RaceError::InvalidRank));

        assert_eq!(standings(&store, scope).await, vec![(1, 1), (2, 2), (3, 3)]);
    }

    #[tokio::test]
    async fn test_update_unknown_result() {
        let (store, scope) = published_loop(2).await;
        let err = update_rank(&store, &admin(), scope, 9, 1).await.unwrap_err();
        assert!(matches!(err, RaceError::NotFound(Entity::Result)));
    }

    #[tokio::test]
    async fn test_rank_edits_require_loop_of_event() {
        let (store, scope) = published_loop(2).await;
        let foreign = ResultScope::new(Uuid::new_v4(), scope.loop_id);

        let err = update_rank(&store, &admin(), foreign, 2, 1).await.unwrap_err();
        assert!(matches!(err, RaceError::NotFound(Entity::Loop)));

        let err = delete_result(&store, &admin(), foreign, 1).await.unwrap_err();
        assert!(matches!(err, RaceError::NotFound(Entity::Loop)));

        assert_eq!(standings(&store, scope).await, vec![(1, 1), (2, 2)]);
    }

    #[tokio::test]
    async fn test_delete_first_place() {
        let (store, scope) = published_loop(3).await;

        delete_result(&store, &admin(), scope, 1).await.unwrap();

        assert_eq!(standings(&store, scope).await, vec![(2, 1), (3, 2)]);
    }

    #[tokio::test]
    async fn test_delete_unknown_result() {
        let (store, scope) = published_loop(1).await;
        let err = delete_result(&store, &admin(), scope, 5).await.unwrap_err();
        assert!(matches!(err, RaceError::NotFound(Entity::Result)));
    }

    #[tokio::test]
    async fn test_publish_replaces_previous_results() {
        let (store, scope) = published_loop(3).await;

        let results = vec![entry(2, 2), entry(3, 1)];
        publish(&store, &admin(), scope, &results, fixtures::now())
            .await
            .unwrap();

        assert_eq!(standings(&store, scope).await, vec![(3, 1), (2, 2)]);
    }

    #[tokio::test]
    async fn test_publish_snapshots_owner_bank_details() {
        let store = store_with_camels(1).await;
        let race_loop = add_loop(&store, fixtures::event_id(), 1, 5).await;
        let scope = scope_of(&race_loop);

        let results = vec![PublishedResult {
            camel_id: 1,
            rank: 1,
            prize_amount: Some(Decimal::new(250_000, 2)),
        }];
        let published = publish(&store, &admin(), scope, &results, fixtures::now())
            .await
            .unwrap();

        let owner = fixtures::owner();
        assert_eq!(published[0].owner_id, owner.owner_id);
        assert_eq!(published[0].iban, owner.iban);
        assert_eq!(published[0].prize_amount, Some(Decimal::new(2500, 0)));
    }

    #[tokio::test]
    async fn test_publish_rejects_gapped_ranks() {
        let (store, scope) = published_loop(3).await;

        let results = vec![entry(1, 1), entry(2, 3)];
        let err = publish(&store, &admin(), scope, &results, fixtures::now())
            .await
            .unwrap_err();

        assert!(matches!(err, RaceError::Validation(_)));
        assert_eq!(standings(&store, scope).await.len(), 3);
    }

    #[tokio::test]
    async fn test_publish_rejects_loop_of_other_event() {
        let store = store_with_camels(1).await;
        let race_loop = add_loop(&store, fixtures::event_id(), 1, 5).await;
        let scope = ResultScope::new(Uuid::new_v4(), race_loop.loop_id);

        let err = publish(&store, &admin(), scope, &[entry(1, 1)], fixtures::now())
            .await
            .unwrap_err();

        assert!(matches!(err, RaceError::NotFound(Entity::Loop)));
    }

    #[tokio::test]
    async fn test_publish_unknown_camel_writes_nothing() {
        let (store, scope) = published_loop(2).await;

        let results = vec![entry(1, 1), entry(42, 2)];
        let err = publish(&store, &admin(), scope, &results, fixtures::now())
            .await
            .unwrap_err();

        assert!(matches!(err, RaceError::NotFound(Entity::Camel)));
        assert_eq!(standings(&store, scope).await, vec![(1, 1), (2, 2)]);
    }

    #[tokio::test]
    async fn test_ranks_stay_dense_under_mixed_operations() {
        let (store, scope) = published_loop(6).await;

        let moves = [(6, 1), (2, 5), (4, 4), (1, 6), (3, 2)];
        for (camel_id, new_rank) in moves {
            update_rank(&store, &admin(), scope, camel_id, new_rank)
                .await
                .unwrap();
            let ranks = store.results(scope).await.into_iter().map(|r| r.rank);
            assert!(is_dense(ranks));
        }

        for camel_id in [4, 6, 1] {
            delete_result(&store, &admin(), scope, camel_id)
                .await
                .unwrap();
            let ranks = store.results(scope).await.into_iter().map(|r| r.rank);
            assert!(is_dense(ranks));
        }

        assert_eq!(store.results(scope).await.len(), 3);
    }
}
