//! Dashboard statistics service

use std::sync::Arc;

use chrono::Datelike;
use indexmap::IndexMap;

use crate::{
    api::stats::{BorrowerCount, DashboardResponse, MonthlyCount, StatEntry, StockStatus},
    models::{find_equipment, BookingStatus, EQUIPMENT_CATALOG},
    store::BookingStore,
};

/// Malay month labels for the monthly trend chart.
const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mac", "Apr", "Mei", "Jun", "Jul", "Ogo", "Sep", "Okt", "Nov", "Dis",
];

#[derive(Clone)]
pub struct StatsService {
    store: Arc<BookingStore>,
}

impl StatsService {
    pub fn new(store: Arc<BookingStore>) -> Self {
        Self { store }
    }

    /// Compute the full dashboard summary from the current store snapshot.
    pub fn dashboard(&self) -> DashboardResponse {
        let bookings = self.store.snapshot();

        let active_bookings = bookings
            .iter()
            .filter(|b| b.status.holds_assets())
            .count() as i64;
        let approved_bookings = bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Approved)
            .count() as i64;

        // Monthly trend over the calendar year, all statuses included.
        let mut monthly = [0i64; 12];
        for booking in &bookings {
            monthly[booking.date.month0() as usize] += 1;
        }
        let monthly_trend = MONTH_LABELS
            .iter()
            .zip(monthly)
            .map(|(label, count)| MonthlyCount {
                month: (*label).to_string(),
                bookings: count,
            })
            .collect();

        // Usage per equipment name, in first-seen order.
        let mut usage: IndexMap<String, i64> = IndexMap::new();
        for booking in &bookings {
            let name = find_equipment(&booking.equipment_id)
                .map(|e| e.name.clone())
                .unwrap_or_else(|| booking.equipment_id.clone());
            *usage.entry(name).or_insert(0) += 1;
        }
        let popular_equipment = usage
            .iter()
            .max_by_key(|(_, count)| **count)
            .map(|(name, _)| name.clone());
        let equipment_usage: Vec<StatEntry> = usage
            .into_iter()
            .map(|(label, value)| StatEntry { label, value })
            .collect();

        // Top five borrowers by booking count.
        let mut borrowers: IndexMap<String, i64> = IndexMap::new();
        for booking in &bookings {
            *borrowers.entry(booking.student_name.clone()).or_insert(0) += 1;
        }
        let mut top_borrowers: Vec<BorrowerCount> = borrowers
            .into_iter()
            .map(|(name, count)| BorrowerCount { name, count })
            .collect();
        top_borrowers.sort_by(|a, b| b.count.cmp(&a.count));
        top_borrowers.truncate(5);

        // Stock remaining: only APPROVED bookings count as units out the
        // door; pending requests have not collected anything yet.
        let stock_status = EQUIPMENT_CATALOG
            .iter()
            .map(|equipment| {
                let in_use: i64 = bookings
                    .iter()
                    .filter(|b| {
                        b.equipment_id == equipment.id && b.status == BookingStatus::Approved
                    })
                    .map(|b| i64::from(b.quantity))
                    .sum();
                StockStatus {
                    equipment_id: equipment.id.clone(),
                    name: equipment.name.clone(),
                    total_stock: i64::from(equipment.total_stock),
                    remaining: (i64::from(equipment.total_stock) - in_use).max(0),
                }
            })
            .collect();

        DashboardResponse {
            active_bookings,
            approved_bookings,
            popular_equipment,
            monthly_trend,
            equipment_usage,
            top_borrowers,
            stock_status,
        }
    }
}
