use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::models::{AgeClass, Camel, Owner, RaceLoop, Sex};
use crate::store::MemoryRaceStore;

pub const OWNER_ID: i64 = 7;

pub fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap()
}

pub fn event_id() -> Uuid {
    Uuid::new_v4()
}

pub fn owner() -> Owner {
    Owner {
        owner_id: OWNER_ID,
        name: "Hamdan".to_string(),
        phone: None,
        bank_name: Some("Gulf Bank".to_string()),
        iban: Some("AE070331234567890123456".to_string()),
        account_holder: Some("Hamdan".to_string()),
        created_at: now(),
    }
}

pub fn camel(camel_id: i64, age_class: AgeClass, sex: Sex) -> Camel {
    Camel {
        camel_id,
        chip_id: format!("CHIP-{camel_id:04}"),
        name: format!("Camel {camel_id}"),
        age_class,
        sex,
        owner_id: OWNER_ID,
        is_disabled: false,
        created_at: now(),
    }
}

pub fn race_loop(
    event_id: Uuid,
    age_class: AgeClass,
    sex: Sex,
    sequence_number: i32,
    capacity: i32,
) -> RaceLoop {
    RaceLoop {
        loop_id: Uuid::new_v4(),
        event_id,
        age_class,
        sex,
        sequence_number,
        capacity,
        registration_closes_at: now() + Duration::days(2),
        rank: sequence_number,
        created_at: now(),
    }
}

/// Store seeded with one owner and `camels` male grade-one camels (ids 1..=n).
pub async fn store_with_camels(camels: i64) -> MemoryRaceStore {
    let store = MemoryRaceStore::new();
    store.insert_owner(owner()).await;
    for camel_id in 1..=camels {
        store
            .insert_camel(camel(camel_id, AgeClass::GradeOne, Sex::Male))
            .await;
    }
    store
}

/// Adds a male grade-one loop to the store and returns it.
pub async fn add_loop(
    store: &MemoryRaceStore,
    event_id: Uuid,
    sequence_number: i32,
    capacity: i32,
) -> RaceLoop {
    let race_loop = race_loop(
        event_id,
        AgeClass::GradeOne,
        Sex::Male,
        sequence_number,
        capacity,
    );
    store.insert_loop(race_loop.clone()).await;
    race_loop
}
