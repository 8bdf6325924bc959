//! Booking lifecycle and store tests
//!
//! Services are exercised against the real in-memory store with the sync
//! worker running over test doubles of the remote record store. Dropping
//! the service closes the sync channel, so awaiting the worker handle
//! guarantees every queued mirror task has been processed.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use eict_server::error::{AppError, AppResult};
use eict_server::models::{Booking, BookingStatus, CreateBooking};
use eict_server::services::bookings::BookingsService;
use eict_server::store::BookingStore;
use eict_server::sync::{spawn_worker, RecordStore};

fn time(raw: &str) -> NaiveTime {
    NaiveTime::parse_from_str(raw, "%H:%M").expect("valid test time")
}

fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid test date")
}

fn request(equipment_id: &str, start: &str, end: &str, codes: &[&str]) -> CreateBooking {
    CreateBooking {
        student_name: "Aiman Hakim".to_string(),
        date: date("2026-01-15"),
        start_time: time(start),
        end_time: time(end),
        class_name: "4 Ibnu Sina".to_string(),
        location: "Makmal Komputer".to_string(),
        purpose: "PdP Sains Komputer".to_string(),
        equipment_id: equipment_id.to_string(),
        asset_codes: codes.iter().map(|c| c.to_string()).collect(),
    }
}

/// Remote double that records every call and always succeeds.
#[derive(Default)]
struct RecordingStore {
    calls: Mutex<Vec<String>>,
}

#[async_trait]
impl RecordStore for RecordingStore {
    async fn fetch_all(&self) -> AppResult<Vec<Booking>> {
        Ok(Vec::new())
    }

    async fn create(&self, booking: &Booking) -> AppResult<()> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(format!("create {}", booking.id));
        Ok(())
    }

    async fn update_status(
        &self,
        id: &str,
        status: BookingStatus,
        _approved_by: Option<String>,
        _returned_at: Option<String>,
    ) -> AppResult<()> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(format!("update {} {}", id, status));
        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(format!("delete {}", id));
        Ok(())
    }
}

mockall::mock! {
    FailingSheet {}

    #[async_trait]
    impl RecordStore for FailingSheet {
        async fn fetch_all(&self) -> AppResult<Vec<Booking>>;
        async fn create(&self, booking: &Booking) -> AppResult<()>;
        async fn update_status(
            &self,
            id: &str,
            status: BookingStatus,
            approved_by: Option<String>,
            returned_at: Option<String>,
        ) -> AppResult<()>;
        async fn delete(&self, id: &str) -> AppResult<()>;
    }
}

struct Harness {
    store: Arc<BookingStore>,
    remote: Arc<RecordingStore>,
    service: BookingsService,
    worker: tokio::task::JoinHandle<()>,
}

impl Harness {
    fn new() -> Self {
        let store = Arc::new(BookingStore::new());
        let remote = Arc::new(RecordingStore::default());
        let (sync, worker) = spawn_worker(remote.clone());
        let service = BookingsService::new(store.clone(), sync);
        Self {
            store,
            remote,
            service,
            worker,
        }
    }

    /// Drop the service, drain the sync queue and return the recorded calls.
    async fn finish(self) -> Vec<String> {
        drop(self.service);
        self.worker.await.expect("sync worker panicked");
        self.remote.calls.lock().expect("calls lock").clone()
    }
}

#[tokio::test]
async fn submit_stores_booking_and_mirrors_it() {
    let harness = Harness::new();

    let booking = harness
        .service
        .submit(request("laptop", "08:00", "10:00", &["LPT-1", "LPT-2"]))
        .expect("submission should succeed");

    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.quantity, 2);
    assert_eq!(booking.day, "Khamis"); // 2026-01-15
    assert_eq!(harness.store.len(), 1);

    let calls = harness.finish().await;
    assert_eq!(calls, vec![format!("create {}", booking.id)]);
}

#[tokio::test]
async fn submit_with_no_asset_codes_is_refused_before_the_store() {
    let harness = Harness::new();

    let err = harness
        .service
        .submit(request("laptop", "08:00", "10:00", &[]))
        .expect_err("empty selection must be refused");

    assert!(matches!(err, AppError::Validation(_)));
    assert!(harness.store.is_empty());
    assert!(harness.finish().await.is_empty());
}

#[tokio::test]
async fn submit_refuses_codes_held_by_an_overlapping_booking() {
    let harness = Harness::new();

    harness
        .service
        .submit(request("chromebook", "08:00", "10:00", &["CHR-1", "CHR-2"]))
        .expect("first submission should succeed");

    // Pending bookings already hold their units
    let err = harness
        .service
        .submit(request("chromebook", "09:00", "11:00", &["CHR-2"]))
        .expect_err("overlapping claim must be refused");
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(harness.store.len(), 1);

    // Touching windows do not overlap under the half-open rule
    harness
        .service
        .submit(request("chromebook", "10:00", "12:00", &["CHR-1", "CHR-2"]))
        .expect("back-to-back window should be free");
    assert_eq!(harness.store.len(), 2);

    harness.finish().await;
}

#[tokio::test]
async fn per_booking_unit_limit_is_enforced() {
    let harness = Harness::new();

    let err = harness
        .service
        .submit(request(
            "chromebook",
            "08:00",
            "10:00",
            &["CHR-1", "CHR-2", "CHR-3", "CHR-4", "CHR-5", "CHR-6"],
        ))
        .expect_err("six chromebooks exceed the limit of five");
    assert!(matches!(err, AppError::LimitExceeded(_)));

    harness
        .service
        .submit(request(
            "chromebook",
            "08:00",
            "10:00",
            &["CHR-1", "CHR-2", "CHR-3", "CHR-4", "CHR-5"],
        ))
        .expect("five chromebooks are allowed");

    harness.finish().await;
}

#[tokio::test]
async fn unknown_and_duplicate_codes_are_refused() {
    let harness = Harness::new();

    let err = harness
        .service
        .submit(request("chromebook", "08:00", "10:00", &["CHR-16"]))
        .expect_err("stock is 15, CHR-16 does not exist");
    assert!(matches!(err, AppError::Validation(_)));

    let err = harness
        .service
        .submit(request("drone", "08:00", "10:00", &["LPT-1"]))
        .expect_err("laptop code on a drone booking");
    assert!(matches!(err, AppError::Validation(_)));

    let err = harness
        .service
        .submit(request("laptop", "08:00", "10:00", &["LPT-1", "LPT-1"]))
        .expect_err("duplicate code within one booking");
    assert!(matches!(err, AppError::Validation(_)));

    assert!(harness.store.is_empty());
    harness.finish().await;
}

#[tokio::test]
async fn approval_requires_an_admin_name() {
    let harness = Harness::new();
    let booking = harness
        .service
        .submit(request("laptop", "08:00", "10:00", &["LPT-1"]))
        .expect("submission should succeed");

    let err = harness
        .service
        .approve(&booking.id, "   ")
        .expect_err("blank approver must be refused");
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(
        harness.store.get(&booking.id).expect("still stored").status,
        BookingStatus::Pending
    );

    let approved = harness
        .service
        .approve(&booking.id, "  Cikgu Siti  ")
        .expect("approval should succeed");
    assert_eq!(approved.status, BookingStatus::Approved);
    assert_eq!(approved.approved_by.as_deref(), Some("Cikgu Siti"));

    harness.finish().await;
}

#[tokio::test]
async fn rejection_leaves_approver_unset() {
    let harness = Harness::new();
    let booking = harness
        .service
        .submit(request("laptop", "08:00", "10:00", &["LPT-1"]))
        .expect("submission should succeed");

    let rejected = harness
        .service
        .reject(&booking.id)
        .expect("rejection should succeed");
    assert_eq!(rejected.status, BookingStatus::Rejected);
    assert!(rejected.approved_by.is_none());

    // A rejected booking is terminal
    let err = harness
        .service
        .approve(&booking.id, "Cikgu Siti")
        .expect_err("rejected bookings cannot be approved");
    assert!(matches!(err, AppError::Transition(_)));

    harness.finish().await;
}

#[tokio::test]
async fn returned_is_only_reachable_from_approved() {
    let harness = Harness::new();
    let booking = harness
        .service
        .submit(request("laptop", "08:00", "10:00", &["LPT-1"]))
        .expect("submission should succeed");

    let err = harness
        .service
        .return_booking(&booking.id)
        .expect_err("pending bookings cannot be returned");
    assert!(matches!(err, AppError::Transition(_)));
    let stored = harness.store.get(&booking.id).expect("still stored");
    assert_eq!(stored.status, BookingStatus::Pending);
    assert!(stored.returned_at.is_none(), "refusal must not stamp returned_at");

    harness
        .service
        .approve(&booking.id, "Cikgu Siti")
        .expect("approval should succeed");
    let returned = harness
        .service
        .return_booking(&booking.id)
        .expect("return should succeed");
    assert_eq!(returned.status, BookingStatus::Returned);
    assert!(returned.returned_at.is_some());

    harness.finish().await;
}

#[tokio::test]
async fn deletion_is_permanent_and_mirrored() {
    let harness = Harness::new();
    let booking = harness
        .service
        .submit(request("laptop", "08:00", "10:00", &["LPT-1"]))
        .expect("submission should succeed");

    harness
        .service
        .delete(&booking.id)
        .expect("deletion should succeed");
    assert!(harness.store.is_empty());

    let err = harness
        .service
        .delete(&booking.id)
        .expect_err("already deleted");
    assert!(matches!(err, AppError::NotFound(_)));

    let calls = harness.finish().await;
    assert_eq!(
        calls,
        vec![
            format!("create {}", booking.id),
            format!("delete {}", booking.id)
        ]
    );
}

#[tokio::test]
async fn drafts_hold_nothing_until_submitted() {
    let harness = Harness::new();

    // A draft may be saved without any selection
    let draft = harness
        .service
        .save_draft(request("chromebook", "08:00", "10:00", &[]))
        .expect("empty draft should be storable");
    assert_eq!(draft.status, BookingStatus::Draft);

    // But it cannot be submitted until codes are picked
    let err = harness
        .service
        .submit_draft(&draft.id)
        .expect_err("draft without codes cannot become pending");
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(
        harness.store.get(&draft.id).expect("still stored").status,
        BookingStatus::Draft
    );

    // Another student can book the same window meanwhile: the draft holds nothing
    harness
        .service
        .submit(request("chromebook", "08:00", "10:00", &["CHR-1"]))
        .expect("draft must not block the unit");

    let draft = harness
        .service
        .save_draft(request("chromebook", "09:00", "11:00", &["CHR-1"]))
        .expect("draft with a now-busy code is still storable");
    let err = harness
        .service
        .submit_draft(&draft.id)
        .expect_err("submission re-checks collisions");
    assert!(matches!(err, AppError::Conflict(_)));

    let draft = harness
        .service
        .save_draft(request("chromebook", "09:00", "11:00", &["CHR-2"]))
        .expect("draft should be storable");
    let submitted = harness
        .service
        .submit_draft(&draft.id)
        .expect("free code, draft becomes pending");
    assert_eq!(submitted.status, BookingStatus::Pending);

    harness.finish().await;
}

#[tokio::test]
async fn store_keeps_newest_first_and_partitions_for_admins() {
    let harness = Harness::new();
    let first = harness
        .service
        .submit(request("laptop", "08:00", "09:00", &["LPT-1"]))
        .expect("submission should succeed");
    let second = harness
        .service
        .submit(request("laptop", "09:00", "10:00", &["LPT-2"]))
        .expect("submission should succeed");
    let draft = harness
        .service
        .save_draft(request("laptop", "10:00", "11:00", &[]))
        .expect("draft should be storable");

    let snapshot = harness.store.snapshot();
    assert_eq!(snapshot[0].id, draft.id, "inserts prepend");
    assert_eq!(snapshot[2].id, first.id);

    harness
        .service
        .approve(&second.id, "Cikgu Siti")
        .expect("approval should succeed");

    let overview = harness.service.overview();
    assert_eq!(overview.pending.len(), 1);
    assert_eq!(overview.pending[0].id, first.id);
    assert_eq!(overview.in_use.len(), 1);
    assert_eq!(overview.in_use[0].id, second.id);
    // History carries decided records; the draft is not shown to admins
    assert_eq!(overview.history.len(), 1);
    assert_eq!(overview.history[0].id, second.id);

    harness.finish().await;
}

#[tokio::test]
async fn failed_remote_sync_keeps_the_local_state() {
    let mut remote = MockFailingSheet::new();
    remote
        .expect_create()
        .returning(|_| Err(AppError::Sync("record store unreachable".to_string())));

    let store = Arc::new(BookingStore::new());
    let (sync, worker) = spawn_worker(Arc::new(remote));
    let service = BookingsService::new(store.clone(), sync);

    let booking = service
        .submit(request("laptop", "08:00", "10:00", &["LPT-1"]))
        .expect("local submission succeeds regardless of the remote");

    drop(service);
    worker.await.expect("sync worker panicked");

    // Optimistic local state survives the failed mirror call
    assert_eq!(store.len(), 1);
    assert!(store.get(&booking.id).is_some());
}

#[test]
fn store_patch_and_remove_by_id() {
    let store = BookingStore::new();
    let id = Uuid::new_v4().to_string();
    store.insert(Booking {
        id: id.clone(),
        student_name: "Aiman".to_string(),
        date: date("2026-01-15"),
        day: "Khamis".to_string(),
        start_time: time("08:00"),
        end_time: time("10:00"),
        class_name: "4 Ibnu Sina".to_string(),
        location: "Kelas".to_string(),
        purpose: "PdP".to_string(),
        equipment_id: "laptop".to_string(),
        quantity: 1,
        asset_codes: vec!["LPT-1".to_string()],
        status: BookingStatus::Pending,
        timestamp: 1,
        approved_by: None,
        returned_at: None,
    });

    let patched = store
        .apply_status(&id, BookingStatus::Approved, Some("Cikgu Siti".to_string()), None)
        .expect("booking exists");
    assert_eq!(patched.status, BookingStatus::Approved);
    assert_eq!(patched.approved_by.as_deref(), Some("Cikgu Siti"));

    assert!(store.apply_status("missing", BookingStatus::Rejected, None, None).is_none());

    assert!(store.remove(&id).is_some());
    assert!(store.remove(&id).is_none());
    assert!(store.is_empty());
}
