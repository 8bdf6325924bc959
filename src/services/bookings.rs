//! Booking lifecycle service
//!
//! Owns every mutation of the booking store: submission (with collision
//! refusal), the approve/reject/return transitions and deletion. Each local
//! mutation is followed by a queued mirror task for the remote sheet.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Local, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::malay_weekday, find_equipment, Booking, BookingOverview, BookingQuery,
        BookingStatus, CreateBooking, EquipmentConfig,
    },
    services::availability::{unavailable_asset_codes, AvailabilityQuery},
    store::BookingStore,
    sync::{SyncHandle, SyncTask},
};

#[derive(Clone)]
pub struct BookingsService {
    store: Arc<BookingStore>,
    sync: SyncHandle,
}

impl BookingsService {
    pub fn new(store: Arc<BookingStore>, sync: SyncHandle) -> Self {
        Self { store, sync }
    }

    /// List bookings newest-first, optionally filtered.
    pub fn list(&self, query: &BookingQuery) -> Vec<Booking> {
        self.store
            .snapshot()
            .into_iter()
            .filter(|b| query.matches(b))
            .collect()
    }

    pub fn get(&self, id: &str) -> AppResult<Booking> {
        self.store
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))
    }

    /// Admin read model: pending / in-use / history.
    pub fn overview(&self) -> BookingOverview {
        self.store.overview()
    }

    /// Submit a new booking request (PENDING). Refused unless the asset-code
    /// selection is non-empty, valid for the equipment and free over the
    /// requested window.
    pub fn submit(&self, data: CreateBooking) -> AppResult<Booking> {
        let equipment = self.validated_equipment(&data)?;
        self.check_asset_selection(equipment, &data, None)?;
        self.insert_booking(data, BookingStatus::Pending)
    }

    /// Save a draft. Drafts hold no inventory, so the asset-code selection
    /// is stored as-is and only re-checked when the draft is submitted.
    pub fn save_draft(&self, data: CreateBooking) -> AppResult<Booking> {
        self.validated_equipment(&data)?;
        self.insert_booking(data, BookingStatus::Draft)
    }

    /// Promote a draft to a pending request, re-running the full submission
    /// checks against the booking list as it is now.
    pub fn submit_draft(&self, id: &str) -> AppResult<Booking> {
        let booking = self.get(id)?;
        self.ensure_transition(&booking, BookingStatus::Pending)?;

        let equipment = find_equipment(&booking.equipment_id).ok_or_else(|| {
            AppError::Validation(format!("Unknown equipment '{}'", booking.equipment_id))
        })?;
        let data = CreateBooking {
            student_name: booking.student_name.clone(),
            date: booking.date,
            start_time: booking.start_time,
            end_time: booking.end_time,
            class_name: booking.class_name.clone(),
            location: booking.location.clone(),
            purpose: booking.purpose.clone(),
            equipment_id: booking.equipment_id.clone(),
            asset_codes: booking.asset_codes.clone(),
        };
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.check_asset_selection(equipment, &data, Some(id))?;

        self.apply(id, BookingStatus::Pending, None, None)
    }

    /// Approve a pending request, recording the approving officer.
    pub fn approve(&self, id: &str, admin_name: &str) -> AppResult<Booking> {
        let admin_name = admin_name.trim();
        if admin_name.is_empty() {
            return Err(AppError::Validation(
                "Approver name is required".to_string(),
            ));
        }
        let booking = self.get(id)?;
        self.ensure_transition(&booking, BookingStatus::Approved)?;
        self.apply(
            id,
            BookingStatus::Approved,
            Some(admin_name.to_string()),
            None,
        )
    }

    /// Reject a pending request. Leaves `approved_by` untouched.
    pub fn reject(&self, id: &str) -> AppResult<Booking> {
        let booking = self.get(id)?;
        self.ensure_transition(&booking, BookingStatus::Rejected)?;
        self.apply(id, BookingStatus::Rejected, None, None)
    }

    /// Mark approved equipment as returned, stamping the return time. The
    /// booking stops holding stock from this point on.
    pub fn return_booking(&self, id: &str) -> AppResult<Booking> {
        let booking = self.get(id)?;
        self.ensure_transition(&booking, BookingStatus::Returned)?;
        let returned_at = Local::now().format("%I:%M %p, %d/%m/%Y").to_string();
        self.apply(id, BookingStatus::Returned, None, Some(returned_at))
    }

    /// Permanently delete a booking, whatever its status.
    pub fn delete(&self, id: &str) -> AppResult<()> {
        self.store
            .remove(id)
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))?;
        self.sync.enqueue(SyncTask::Delete { id: id.to_string() });
        Ok(())
    }

    fn validated_equipment(&self, data: &CreateBooking) -> AppResult<&'static EquipmentConfig> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        find_equipment(&data.equipment_id).ok_or_else(|| {
            AppError::Validation(format!("Unknown equipment '{}'", data.equipment_id))
        })
    }

    /// Submission-time checks on the asset-code selection: non-empty, known
    /// codes, no duplicates, per-booking limit, and no collision with an
    /// active booking over the same window. `exclude` skips the booking's
    /// own record when re-submitting a draft.
    fn check_asset_selection(
        &self,
        equipment: &EquipmentConfig,
        data: &CreateBooking,
        exclude: Option<&str>,
    ) -> AppResult<()> {
        if data.asset_codes.is_empty() {
            return Err(AppError::Validation(
                "At least one asset code must be selected".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for code in &data.asset_codes {
            if !equipment.contains_code(code) {
                return Err(AppError::Validation(format!(
                    "'{}' is not a valid asset code for {}",
                    code, equipment.name
                )));
            }
            if !seen.insert(code.as_str()) {
                return Err(AppError::Validation(format!(
                    "Asset code '{}' selected more than once",
                    code
                )));
            }
        }

        if let Some(limit) = equipment.limit_per_booking {
            if data.asset_codes.len() as u32 > limit {
                return Err(AppError::LimitExceeded(format!(
                    "At most {} units of {} per booking",
                    limit, equipment.name
                )));
            }
        }

        // Collision refusal runs against the authoritative list, not the
        // client's possibly stale view of it.
        let candidate = AvailabilityQuery {
            equipment_id: Some(data.equipment_id.clone()),
            date: Some(data.date),
            start_time: Some(data.start_time),
            end_time: Some(data.end_time),
        };
        let snapshot: Vec<Booking> = self
            .store
            .snapshot()
            .into_iter()
            .filter(|b| exclude != Some(b.id.as_str()))
            .collect();
        let busy: HashSet<String> = unavailable_asset_codes(&candidate, &snapshot)
            .into_iter()
            .collect();
        let conflicting: Vec<&str> = data
            .asset_codes
            .iter()
            .filter(|code| busy.contains(code.as_str()))
            .map(|code| code.as_str())
            .collect();
        if !conflicting.is_empty() {
            return Err(AppError::Conflict(format!(
                "Asset codes already booked for this window: {}",
                conflicting.join(", ")
            )));
        }

        Ok(())
    }

    fn insert_booking(&self, data: CreateBooking, status: BookingStatus) -> AppResult<Booking> {
        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            student_name: data.student_name,
            date: data.date,
            day: malay_weekday(data.date).to_string(),
            start_time: data.start_time,
            end_time: data.end_time,
            class_name: data.class_name,
            location: data.location,
            purpose: data.purpose,
            equipment_id: data.equipment_id,
            quantity: data.asset_codes.len() as u32,
            asset_codes: data.asset_codes,
            status,
            timestamp: Utc::now().timestamp_millis(),
            approved_by: None,
            returned_at: None,
        };
        // Optimistic: local insert first, remote mirror in the background.
        self.store.insert(booking.clone());
        self.sync.enqueue(SyncTask::Create(Box::new(booking.clone())));
        tracing::info!(id = %booking.id, status = %booking.status, "booking stored");
        Ok(booking)
    }

    fn ensure_transition(&self, booking: &Booking, next: BookingStatus) -> AppResult<()> {
        if !booking.status.can_transition(next) {
            return Err(AppError::Transition(format!(
                "Cannot move booking {} from {} to {}",
                booking.id, booking.status, next
            )));
        }
        Ok(())
    }

    fn apply(
        &self,
        id: &str,
        status: BookingStatus,
        approved_by: Option<String>,
        returned_at: Option<String>,
    ) -> AppResult<Booking> {
        let booking = self
            .store
            .apply_status(id, status, approved_by.clone(), returned_at.clone())
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))?;
        self.sync.enqueue(SyncTask::UpdateStatus {
            id: id.to_string(),
            status,
            approved_by,
            returned_at,
        });
        tracing::info!(id = %id, status = %status, "booking status updated");
        Ok(booking)
    }
}
