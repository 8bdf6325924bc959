//! Business logic services

pub mod availability;
pub mod bookings;
pub mod stats;

use std::sync::Arc;

use crate::{store::BookingStore, sync::SyncHandle};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub availability: availability::AvailabilityService,
    pub bookings: bookings::BookingsService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services sharing the given store and sync handle
    pub fn new(store: Arc<BookingStore>, sync: SyncHandle) -> Self {
        Self {
            availability: availability::AvailabilityService::new(store.clone()),
            bookings: bookings::BookingsService::new(store.clone(), sync),
            stats: stats::StatsService::new(store),
        }
    }
}
