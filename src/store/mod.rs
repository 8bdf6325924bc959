//! In-memory booking store
//!
//! The authoritative booking list for the whole process. Every mutation is
//! synchronous and immediate; mirroring to the remote record store happens
//! afterwards as a background task and never rolls a local change back.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::{Booking, BookingOverview, BookingStatus};

/// Authoritative in-memory collection of booking records, keyed by id.
///
/// Display order is newest-first by creation timestamp; inserts prepend so
/// the invariant holds without re-sorting.
#[derive(Debug, Default)]
pub struct BookingStore {
    inner: RwLock<Vec<Booking>>,
}

impl BookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the store from a remote snapshot, sorted newest-first.
    pub fn load(mut bookings: Vec<Booking>) -> Self {
        bookings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Self {
            inner: RwLock::new(bookings),
        }
    }

    // Poisoned locks are recovered; the list stays usable after a panic
    // elsewhere.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Booking>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Booking>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Optimistic insert: the booking is visible to readers immediately.
    pub fn insert(&self, booking: Booking) {
        self.write().insert(0, booking);
    }

    /// Patch the lifecycle fields of a booking in place.
    ///
    /// `approved_by` and `returned_at` overwrite only when provided, matching
    /// the partial-update shape of the remote protocol.
    pub fn apply_status(
        &self,
        id: &str,
        status: BookingStatus,
        approved_by: Option<String>,
        returned_at: Option<String>,
    ) -> Option<Booking> {
        let mut bookings = self.write();
        let booking = bookings.iter_mut().find(|b| b.id == id)?;
        booking.status = status;
        if approved_by.is_some() {
            booking.approved_by = approved_by;
        }
        if returned_at.is_some() {
            booking.returned_at = returned_at;
        }
        Some(booking.clone())
    }

    /// Permanently remove a booking. Returns the removed record, if any.
    pub fn remove(&self, id: &str) -> Option<Booking> {
        let mut bookings = self.write();
        let idx = bookings.iter().position(|b| b.id == id)?;
        Some(bookings.remove(idx))
    }

    pub fn get(&self, id: &str) -> Option<Booking> {
        self.read().iter().find(|b| b.id == id).cloned()
    }

    /// Read-only snapshot of the full list, newest first.
    pub fn snapshot(&self) -> Vec<Booking> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Partition the store for the admin view: requests awaiting a decision,
    /// equipment currently out, and the decided/finished history. Drafts are
    /// not shown to admins.
    pub fn overview(&self) -> BookingOverview {
        let bookings = self.read();
        let mut pending = Vec::new();
        let mut in_use = Vec::new();
        let mut history = Vec::new();
        for booking in bookings.iter() {
            match booking.status {
                BookingStatus::Pending => pending.push(booking.clone()),
                BookingStatus::Approved => {
                    in_use.push(booking.clone());
                    history.push(booking.clone());
                }
                BookingStatus::Rejected | BookingStatus::Returned => {
                    history.push(booking.clone())
                }
                BookingStatus::Draft => {}
            }
        }
        BookingOverview {
            pending,
            in_use,
            history,
        }
    }
}
