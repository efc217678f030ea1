use std::sync::Arc;

use roomflow_engine::{BookingDraft, RoomSelection};
use roomflow_runtime::{Config, Error, FileStore, KeyValueStore, Roomflow};
use roomflow_testing::{StubBackend, fixtures};
use roomflow_types::{BookingStatus, CalendarDate, DateRange, Decimal, GuestCount};
use tempfile::TempDir;

fn open(backend: &StubBackend, dir: &TempDir) -> Roomflow {
    let mut config = Config::default();
    config.api.base_url = backend.base_url().to_string();
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::in_dir(dir.path()));
    Roomflow::with_store(dir.path(), config, store).unwrap()
}

fn signed_in(backend: &StubBackend, dir: &TempDir) -> Roomflow {
    let content = serde_json::to_string(&fixtures::stored_session()).unwrap();
    std::fs::write(dir.path().join("session.json"), content).unwrap();
    open(backend, dir)
}

fn date(y: i32, m: u32, d: u32) -> CalendarDate {
    CalendarDate::from_ymd(y, m, d).unwrap()
}

#[tokio::test]
async fn test_login_persists_session_across_reopen() {
    let backend = StubBackend::start();
    backend.respond("POST", "auth/login", 200, fixtures::login_response());
    let dir = TempDir::new().unwrap();

    let client = open(&backend, &dir);
    let session = client
        .auth()
        .login("ana@example.com", "secret123")
        .await
        .unwrap();
    assert_eq!(session.access_token, fixtures::ACCESS_TOKEN);
    assert_eq!(
        session.user_profile.full_name.as_deref(),
        Some("Ana Nguyen")
    );

    let sent = backend.requests_to("POST", "auth/login");
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].body,
        Some(serde_json::json!({"email": "ana@example.com", "password": "secret123"}))
    );
    assert!(sent[0].authorization.is_none());

    let reopened = open(&backend, &dir);
    assert!(reopened.session().is_authenticated());
    assert_eq!(
        reopened.session().access_token().as_deref(),
        Some(fixtures::ACCESS_TOKEN)
    );
}

#[tokio::test]
async fn test_login_forbidden_means_not_activated() {
    let backend = StubBackend::start();
    backend.respond(
        "POST",
        "auth/login",
        403,
        serde_json::json!({"success": false, "message": ""}),
    );
    let dir = TempDir::new().unwrap();
    let client = open(&backend, &dir);

    let err = client
        .auth()
        .login("ana@example.com", "secret123")
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Account is not activated. Please verify your phone number first."
    );
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn test_login_forbidden_keeps_backend_message() {
    let backend = StubBackend::start();
    backend.respond(
        "POST",
        "auth/login",
        403,
        serde_json::json!({"success": false, "message": "Phone number not verified"}),
    );
    let dir = TempDir::new().unwrap();
    let client = open(&backend, &dir);

    let err = client
        .auth()
        .login("ana@example.com", "secret123")
        .await
        .unwrap_err();
    assert!(err.is_expected());
    assert_eq!(err.to_string(), "Phone number not verified");
}

#[tokio::test]
async fn test_wrong_password_keeps_existing_session() {
    let backend = StubBackend::start();
    backend.respond(
        "POST",
        "auth/login",
        401,
        serde_json::json!({"message": "Invalid email or password"}),
    );
    let dir = TempDir::new().unwrap();
    let client = signed_in(&backend, &dir);
    assert!(client.session().is_authenticated());

    let err = client
        .auth()
        .login("ana@example.com", "wrong-password")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Api { status: 401, .. }));
    assert_eq!(err.to_string(), "Invalid email or password");
    assert!(client.session().is_authenticated());

    let reopened = open(&backend, &dir);
    assert!(reopened.session().is_authenticated());

    let sent = backend.requests_to("POST", "auth/login");
    assert_eq!(sent.len(), 1);
    assert!(sent[0].authorization.is_none());
}

#[tokio::test]
async fn test_invalid_login_form_never_reaches_backend() {
    let backend = StubBackend::start();
    let dir = TempDir::new().unwrap();
    let client = open(&backend, &dir);

    let err = client.auth().login("not-an-email", "").await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_unauthorized_response_clears_stored_session() {
    let backend = StubBackend::start();
    backend.respond(
        "GET",
        "bookings/upcoming",
        401,
        serde_json::json!({"message": "Token expired"}),
    );
    let dir = TempDir::new().unwrap();
    let client = signed_in(&backend, &dir);
    assert!(client.session().is_authenticated());

    let err = client.bookings().upcoming().await.unwrap_err();
    assert!(matches!(err, Error::Unauthorized));
    assert!(!client.session().is_authenticated());

    let sent = backend.requests_to("GET", "bookings/upcoming");
    assert_eq!(
        sent[0].authorization.as_deref(),
        Some("Bearer access-token-123")
    );

    let reopened = open(&backend, &dir);
    assert!(!reopened.session().is_authenticated());
}

#[tokio::test]
async fn test_bookings_decode_mixed_date_shapes() {
    let backend = StubBackend::start();
    backend.respond_data(
        "GET",
        "bookings/upcoming",
        serde_json::json!([fixtures::booking(11, "CONFIRMED"), fixtures::booking(12, "PENDING")]),
    );
    let dir = TempDir::new().unwrap();
    let client = signed_in(&backend, &dir);

    let bookings = client.bookings().upcoming().await.unwrap();
    assert_eq!(bookings.len(), 2);
    assert_eq!(bookings[0].booking_id, 11);
    assert_eq!(bookings[0].status, BookingStatus::Confirmed);
    assert_eq!(bookings[0].check_in, Some(date(2024, 1, 4)));
    assert_eq!(bookings[0].check_out, Some(date(2024, 1, 7)));
    assert_eq!(bookings[0].guests().occupants(), 3);
}

#[tokio::test]
async fn test_cancel_reports_backend_message() {
    let backend = StubBackend::start();
    backend.respond(
        "PUT",
        "bookings/11/cancel",
        200,
        serde_json::json!({"success": true, "message": "Booking cancelled"}),
    );
    backend.respond(
        "PUT",
        "bookings/12/cancel",
        409,
        serde_json::json!({"success": false, "message": "Booking already completed"}),
    );
    let dir = TempDir::new().unwrap();
    let client = signed_in(&backend, &dir);

    let message = client.bookings().cancel(11).await.unwrap();
    assert_eq!(message.as_deref(), Some("Booking cancelled"));

    let err = client.bookings().cancel(12).await.unwrap_err();
    assert!(err.is_expected());
    assert_eq!(err.to_string(), "Booking already completed");
}

#[tokio::test]
async fn test_unread_count_accepts_both_shapes() {
    let backend = StubBackend::start();
    backend.respond_once(
        "GET",
        "notifications/unread/count",
        200,
        serde_json::json!({"success": true, "data": 4}),
    );
    backend.respond_once(
        "GET",
        "notifications/unread/count",
        200,
        serde_json::json!({"success": true, "data": {"count": 9}}),
    );
    let dir = TempDir::new().unwrap();
    let client = signed_in(&backend, &dir);

    assert_eq!(client.notifications().unread_count().await.unwrap(), 4);
    assert_eq!(client.notifications().unread_count().await.unwrap(), 9);
}

#[tokio::test]
async fn test_submit_draft_posts_booking_request() {
    let backend = StubBackend::start();
    backend.respond_data("POST", "bookings", fixtures::booking(21, "PENDING"));
    let dir = TempDir::new().unwrap();
    let client = signed_in(&backend, &dir);

    let draft = roomflow_engine::start_booking(
        &BookingDraft::new(),
        &RoomSelection::new(3, Decimal::from(100)),
    )
    .unwrap();
    let range = DateRange::new(date(2024, 1, 4), date(2024, 1, 7)).unwrap();
    let draft = roomflow_engine::choose_dates(&draft, &range).unwrap();
    let draft =
        roomflow_engine::choose_guests(&draft, GuestCount::new(2, 1, 0).unwrap()).unwrap();
    let (draft, _) = roomflow_engine::confirm_and_price(&draft, None, Decimal::ZERO).unwrap();

    let booking = client.bookings().submit_draft(&draft).await.unwrap();
    assert_eq!(booking.booking_id, 21);
    assert_eq!(booking.status, BookingStatus::Pending);

    let sent = backend.requests_to("POST", "bookings");
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].authorization.as_deref(),
        Some("Bearer access-token-123")
    );
    assert_eq!(
        sent[0].body,
        Some(serde_json::json!({
            "roomId": 3,
            "checkIn": "2024-01-04",
            "checkOut": "2024-01-07",
            "adultsCount": 2,
            "childrenCount": 1,
            "infantsCount": 0,
            "totalPrice": 330.0
        }))
    );
}

#[tokio::test]
async fn test_submit_draft_requires_session() {
    let backend = StubBackend::start();
    let dir = TempDir::new().unwrap();
    let client = open(&backend, &dir);

    let draft = BookingDraft::from_params([
        ("roomId", "3"),
        ("checkIn", "2024-01-04"),
        ("checkOut", "2024-01-07"),
        ("totalPrice", "330"),
    ]);
    let err = client.bookings().submit_draft(&draft).await.unwrap_err();
    assert!(matches!(err, Error::Unauthorized));
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.api.base_url = "http://127.0.0.1:9/api/v1/".to_string();
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::in_dir(dir.path()));
    let client = Roomflow::with_store(dir.path(), config, store).unwrap();

    let err = client.rooms().get(1).await.unwrap_err();
    assert!(err.is_network_unavailable());
}
