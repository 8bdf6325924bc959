//! Data models for the e-ICT booking system

pub mod booking;
pub mod enums;
pub mod equipment;

// Re-export commonly used types
pub use booking::{ApproveBooking, Booking, BookingOverview, BookingQuery, CreateBooking};
pub use enums::BookingStatus;
pub use equipment::{find_equipment, EquipmentConfig, CLASS_LIST, EQUIPMENT_CATALOG, LOCATION_LIST};
