//! Camel entry into race loops.
//!
//! A camel holds at most one registration per event. Registering into a loop
//! replaces the camel's registration in any sibling loop of the same event;
//! loops of other events are never touched.

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use super::eligibility::is_eligible;
use crate::error::{Entity, RaceError, ServiceResult};
use crate::models::{Camel, Principal, RaceLoop, Registration};
use crate::store::{NewRegistration, RaceStore, RaceTx};

/// Checks shared by register and transfer, in order: camel exists, loop
/// exists, eligibility, free capacity.
async fn admit<T: RaceTx>(
    tx: &mut T,
    camel_id: i64,
    loop_id: Uuid,
) -> ServiceResult<(Camel, RaceLoop)> {
    let camel = tx
        .find_camel(camel_id)
        .await?
        .ok_or(RaceError::NotFound(Entity::Camel))?;

    let race_loop = tx
        .lock_loop(loop_id)
        .await?
        .ok_or(RaceError::NotFound(Entity::Loop))?;

    if !is_eligible(&camel, &race_loop) {
        debug!(camel_id, %loop_id, "camel not eligible for loop");
        return Err(RaceError::EligibilityMismatch);
    }

    let registered = tx.count_registrations(loop_id).await?;
    if registered >= i64::from(race_loop.capacity) {
        debug!(%loop_id, registered, capacity = race_loop.capacity, "loop is full");
        return Err(RaceError::CapacityExceeded);
    }

    Ok((camel, race_loop))
}

/// Registers a camel into a loop, moving it out of any other loop of the
/// same event.
pub async fn register<S: RaceStore>(
    store: &S,
    actor: &Principal,
    camel_id: i64,
    loop_id: Uuid,
    now: DateTime<Utc>,
) -> ServiceResult<Registration> {
    let mut tx = store.begin().await?;

    let (_, race_loop) = admit(&mut tx, camel_id, loop_id).await?;

    if !tx.camel_registrations(camel_id, &[loop_id]).await?.is_empty() {
        return Err(RaceError::DuplicateRegistration);
    }

    let siblings: Vec<Uuid> = tx
        .event_loop_ids(race_loop.event_id)
        .await?
        .into_iter()
        .filter(|id| *id != loop_id)
        .collect();
    let moved_from = tx.delete_registrations(camel_id, &siblings).await?;

    let registration = tx
        .insert_registration(&NewRegistration {
            camel_id,
            loop_id,
            event_id: race_loop.event_id,
            registered_at: now,
        })
        .await?;

    tx.commit().await?;

    info!(
        actor = %actor,
        camel_id,
        %loop_id,
        event_id = %race_loop.event_id,
        moved_from,
        "camel registered"
    );

    Ok(registration)
}

/// Removes a camel from a loop while its registration window is open.
///
/// Returns the number of registrations removed; zero is still a success.
pub async fn deregister<S: RaceStore>(
    store: &S,
    actor: &Principal,
    camel_id: i64,
    loop_id: Uuid,
    now: DateTime<Utc>,
) -> ServiceResult<u64> {
    let mut tx = store.begin().await?;

    let race_loop = tx
        .lock_loop(loop_id)
        .await?
        .ok_or(RaceError::NotFound(Entity::Loop))?;

    if race_loop.is_registration_closed(now) {
        return Err(RaceError::RegistrationClosed);
    }

    let removed = tx.delete_registrations(camel_id, &[loop_id]).await?;
    tx.commit().await?;

    info!(actor = %actor, camel_id, %loop_id, removed, "camel deregistered");

    Ok(removed)
}

/// Moves a camel into `new_loop_id`, replacing whatever registration it held
/// in that loop's event.
pub async fn transfer<S: RaceStore>(
    store: &S,
    actor: &Principal,
    camel_id: i64,
    new_loop_id: Uuid,
    now: DateTime<Utc>,
) -> ServiceResult<Registration> {
    let mut tx = store.begin().await?;

    let (_, race_loop) = admit(&mut tx, camel_id, new_loop_id).await?;

    let event_loops = tx.event_loop_ids(race_loop.event_id).await?;
    let removed = tx.delete_registrations(camel_id, &event_loops).await?;

    let registration = tx
        .insert_registration(&NewRegistration {
            camel_id,
            loop_id: new_loop_id,
            event_id: race_loop.event_id,
            registered_at: now,
        })
        .await?;

    tx.commit().await?;

    info!(
        actor = %actor,
        camel_id,
        loop_id = %new_loop_id,
        event_id = %race_loop.event_id,
        removed,
        "camel transferred"
    );

    Ok(registration)
}
