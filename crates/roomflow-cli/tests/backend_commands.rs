//! Commands driven against the stub backend.

use roomflow_testing::{StubBackend, TestWorld, fixtures};
use serde_json::json;

#[test]
fn test_login_stores_session() {
    let backend = StubBackend::start();
    backend.respond("POST", "auth/login", 200, fixtures::login_response());
    let world = TestWorld::new().with_backend(&backend);

    let result = world
        .run(&["login", "ana@example.com", "--password", "secret123"])
        .unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().starts_with("Signed in.\n"));
    assert!(result.stdout().contains("Name:          Ana Nguyen"));

    let stored = world.stored_session();
    assert_eq!(stored["accessToken"], fixtures::ACCESS_TOKEN);
    assert_eq!(stored["refreshToken"], fixtures::REFRESH_TOKEN);
}

#[test]
fn test_login_rejects_bad_form_locally() {
    let backend = StubBackend::start();
    let world = TestWorld::new().with_backend(&backend);

    let result = world
        .run(&["login", "not-an-email", "--password", "secret123"])
        .unwrap();
    assert!(!result.success());
    assert!(result.stderr().starts_with("Error: "));
    assert!(backend.requests().is_empty());
}

#[test]
fn test_wrong_password_reports_backend_message() {
    let backend = StubBackend::start();
    backend.respond(
        "POST",
        "auth/login",
        401,
        json!({"message": "Invalid email or password"}),
    );
    let world = TestWorld::new().with_backend(&backend).signed_in();

    let result = world
        .run(&["login", "ana@example.com", "--password", "wrong-pass"])
        .unwrap();
    assert!(!result.success());
    assert!(result.stderr().contains("Error: Invalid email or password"));
    assert_eq!(world.stored_session()["accessToken"], fixtures::ACCESS_TOKEN);
}

#[test]
fn test_expired_session_is_cleared() {
    let backend = StubBackend::start();
    backend.respond(
        "GET",
        "bookings/upcoming",
        401,
        json!({"message": "Token expired"}),
    );
    let world = TestWorld::new().with_backend(&backend).signed_in();

    let result = world.run(&["bookings", "upcoming"]).unwrap();
    assert!(!result.success());
    assert!(
        result
            .stderr()
            .contains("Error: Session expired, please log in again")
    );
    assert!(world.stored_session().get("accessToken").is_none());

    let sent = backend.requests_to("GET", "bookings/upcoming");
    assert_eq!(
        sent[0].authorization.as_deref(),
        Some("Bearer access-token-123")
    );
}

#[test]
fn test_upcoming_bookings_table() {
    let backend = StubBackend::start();
    backend.respond_data(
        "GET",
        "bookings/upcoming",
        json!([fixtures::booking(11, "CONFIRMED")]),
    );
    let world = TestWorld::new().with_backend(&backend).signed_in();

    let result = world.run(&["bookings", "upcoming"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());
    let row = result.stdout().lines().nth(2).unwrap();
    assert!(row.starts_with("11     Seaside Hotel / Deluxe Double"));
    assert!(row.contains("Jan 4, 2024 - Jan 7, 2024"));
    assert!(row.ends_with("$330  Confirmed"));
}

#[test]
fn test_cancel_refuses_completed_booking() {
    let backend = StubBackend::start();
    backend.respond_data("GET", "bookings/12", fixtures::booking(12, "COMPLETED"));
    let world = TestWorld::new().with_backend(&backend).signed_in();

    let result = world.run(&["bookings", "cancel", "12"]).unwrap();
    assert!(!result.success());
    assert!(
        result
            .stderr()
            .contains("Booking #12 is completed and can no longer be cancelled")
    );
    assert!(backend.requests_to("PUT", "bookings/12/cancel").is_empty());
}

#[test]
fn test_cancel_confirmed_booking() {
    let backend = StubBackend::start();
    backend.respond_data("GET", "bookings/11", fixtures::booking(11, "CONFIRMED"));
    backend.respond(
        "PUT",
        "bookings/11/cancel",
        200,
        json!({"success": true, "message": "Booking cancelled successfully"}),
    );
    let world = TestWorld::new().with_backend(&backend).signed_in();

    let result = world.run(&["bookings", "cancel", "11"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());
    assert_eq!(result.stdout(), "Booking cancelled successfully\n");
}

#[test]
fn test_unread_count() {
    let backend = StubBackend::start();
    backend.respond_data("GET", "notifications/unread/count", json!({"count": 7}));
    let world = TestWorld::new().with_backend(&backend).signed_in();

    let result = world.run(&["notifications", "count"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());
    assert_eq!(result.stdout(), "Unread notifications: 7\n");
}

#[test]
fn test_badge_watch_reports_count() {
    let backend = StubBackend::start();
    backend.respond_data("GET", "notifications/unread/count", json!(120));
    let world = TestWorld::new().with_backend(&backend).signed_in();

    let result = world.run(&["badge", "watch", "--updates", "1"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());
    assert_eq!(result.stdout(), "Unread: 99+\n");
}

#[test]
fn test_book_submits_priced_draft() {
    let backend = StubBackend::start();
    backend.respond_data("GET", "rooms/3", fixtures::room(3, 100.0));
    backend.respond_data("POST", "bookings", fixtures::booking(21, "PENDING"));
    let world = TestWorld::new().with_backend(&backend).signed_in();

    let result = world
        .run(&[
            "book",
            "--room",
            "3",
            "--today",
            "2024-01-01",
            "--check-in",
            "2024-01-04",
            "--check-out",
            "2024-01-07",
            "--children",
            "1",
        ])
        .unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().starts_with("Seaside Hotel / Deluxe Double\n"));
    assert!(result.stdout().contains("Total          $330"));
    assert!(result.stdout().contains("Booked: #21 (Pending)"));

    let sent = backend.requests_to("POST", "bookings");
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].body,
        Some(json!({
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

#[test]
fn test_book_without_session_stops_before_submit() {
    let backend = StubBackend::start();
    backend.respond_data("GET", "rooms/3", fixtures::room(3, 100.0));
    let world = TestWorld::new().with_backend(&backend);

    let result = world
        .run(&[
            "book",
            "--room",
            "3",
            "--today",
            "2024-01-01",
            "--check-in",
            "2024-01-04",
            "--check-out",
            "2024-01-07",
        ])
        .unwrap();
    assert!(!result.success());
    assert!(backend.requests_to("POST", "bookings").is_empty());
}

#[test]
fn test_backend_down_is_reported() {
    let world = TestWorld::new().signed_in();

    let result = world.run(&["room", "show", "3"]).unwrap();
    assert!(!result.success());
    assert!(result.stderr().contains("Error: Network error"));
}
