//! Equipment catalog model

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Static catalog entry for one type of bookable equipment.
///
/// The catalog is fixed at compile time; physical units are identified by
/// asset codes derived from `asset_code_prefix` rather than stored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EquipmentConfig {
    pub id: String,
    /// Display name, e.g. "Chromebook"
    pub name: String,
    /// Number of physical units owned by the school
    pub total_stock: u32,
    /// Cap on units a single booking may claim; `None` means the only bound
    /// is `total_stock`
    pub limit_per_booking: Option<u32>,
    /// Asset codes are `{prefix}-{n}` for n in 1..=total_stock
    pub asset_code_prefix: String,
}

impl EquipmentConfig {
    fn new(
        id: &str,
        name: &str,
        total_stock: u32,
        limit_per_booking: Option<u32>,
        prefix: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            total_stock,
            limit_per_booking,
            asset_code_prefix: prefix.to_string(),
        }
    }

    /// Enumerate the valid asset codes for this equipment, in ordinal order.
    ///
    /// Codes are generated on demand; the ordinal → code mapping is stable so
    /// repeated renders produce the same set.
    pub fn asset_codes(&self) -> impl Iterator<Item = String> + '_ {
        (1..=self.total_stock).map(move |n| format!("{}-{}", self.asset_code_prefix, n))
    }

    /// Whether `code` is one of this equipment's valid asset codes.
    pub fn contains_code(&self, code: &str) -> bool {
        let Some(ordinal) = code.strip_prefix(&self.asset_code_prefix) else {
            return false;
        };
        let Some(ordinal) = ordinal.strip_prefix('-') else {
            return false;
        };
        // Reject zero-padded or signed forms; stored codes are plain decimals
        if ordinal.is_empty() || ordinal.starts_with('0') || !ordinal.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        matches!(ordinal.parse::<u32>(), Ok(n) if n >= 1 && n <= self.total_stock)
    }
}

/// The school's ICT equipment catalog.
pub static EQUIPMENT_CATALOG: Lazy<Vec<EquipmentConfig>> = Lazy::new(|| {
    vec![
        EquipmentConfig::new("laptop", "Laptop", 21, None, "LPT"),
        EquipmentConfig::new("chromebook", "Chromebook", 15, Some(5), "CHR"),
        EquipmentConfig::new("tablet", "Samsung Tablet", 5, None, "TAB"),
        EquipmentConfig::new("projector_maiwp", "Projektor MAIWP", 2, None, "PRJ-M"),
        EquipmentConfig::new("projector_kpm", "Projektor KPM", 2, None, "PRJ-K"),
        EquipmentConfig::new("drone", "Drone", 1, None, "DRN"),
    ]
});

/// Class / group choices offered on the booking form.
pub static CLASS_LIST: &[&str] = &[
    "1 Al-Biruni",
    "1 Al-Farabi",
    "1 Al-Ghazali",
    "2 Al-Biruni",
    "2 Al-Farabi",
    "3 Al-Biruni",
    "3 Al-Farabi",
    "4 Ibnu Sina",
    "4 Ibnu Khaldun",
    "5 Ibnu Sina",
    "5 Ibnu Khaldun",
    "Pertandingan",
    "Pameran",
    "Kursus",
];

/// Usage location choices offered on the booking form.
pub static LOCATION_LIST: &[&str] = &[
    "Kelas",
    "Perpustakaan",
    "Bengkel RBT",
    "Makmal Sains",
    "Makmal Komputer",
    "Future Classroom",
    "Bilik Mesyuarat",
    "Tempat Pertandingan",
    "Tempat Kursus/ Pameran",
];

/// Look up a catalog entry by id.
pub fn find_equipment(id: &str) -> Option<&'static EquipmentConfig> {
    EQUIPMENT_CATALOG.iter().find(|e| e.id == id)
}
