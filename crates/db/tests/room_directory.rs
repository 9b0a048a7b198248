//! Integration tests for the room directory.

use assert_matches::assert_matches;
use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;

use salles_core::error::CoreError;
use salles_core::roles::RequesterRole;
use salles_db::error::EngineError;
use salles_db::models::reservation::CreateReservation;
use salles_db::models::room::CreateRoom;
use salles_db::repositories::{ReservationRepo, RoomRepo};

fn room_input(name: &str) -> CreateRoom {
    CreateRoom {
        name: name.to_string(),
        capacity: 24,
        kind: "lab".to_string(),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn create_and_list_rooms_ordered_by_name(pool: PgPool) {
    RoomRepo::create(&pool, &room_input("B-201")).await.unwrap();
    RoomRepo::create(&pool, &room_input("A-101")).await.unwrap();

    let rooms = RoomRepo::list(&pool).await.unwrap();
    assert_eq!(rooms.len(), 2);
    assert_eq!(rooms[0].name, "A-101");
    assert_eq!(rooms[1].name, "B-201");
}

#[sqlx::test(migrations = "./migrations")]
async fn find_by_id_and_exists(pool: PgPool) {
    let room = RoomRepo::create(&pool, &room_input("A-101")).await.unwrap();

    let found = RoomRepo::find_by_id(&pool, room.id).await.unwrap().unwrap();
    assert_eq!(found.name, "A-101");
    assert_eq!(found.capacity, 24);

    assert!(RoomRepo::exists(&pool, room.id).await.unwrap());
    assert!(!RoomRepo::exists(&pool, room.id + 1).await.unwrap());
    assert!(RoomRepo::find_by_id(&pool, room.id + 1).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_refuses_while_reservations_exist(pool: PgPool) {
    let room = RoomRepo::create(&pool, &room_input("A-101")).await.unwrap();
    let reservation = ReservationRepo::create(
        &pool,
        &CreateReservation {
            room_id: room.id,
            date: NaiveDate::from_ymd_opt(2030, 3, 10).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            activity_type: "Lab session".to_string(),
        },
        "alice",
        RequesterRole::Ordinary,
    )
    .await
    .unwrap();

    // Even a pending reservation blocks deletion.
    let err = RoomRepo::delete(&pool, room.id).await.unwrap_err();
    assert_matches!(err, EngineError::Core(CoreError::Integrity(_)));
    assert!(RoomRepo::exists(&pool, room.id).await.unwrap());

    ReservationRepo::delete(&pool, reservation.id).await.unwrap();
    RoomRepo::delete(&pool, room.id).await.unwrap();
    assert!(!RoomRepo::exists(&pool, room.id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_missing_room_is_not_found(pool: PgPool) {
    let err = RoomRepo::delete(&pool, 424_242).await.unwrap_err();
    assert_matches!(err, EngineError::Core(CoreError::NotFound { entity: "Room", .. }));
}
