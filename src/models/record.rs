//! Exported booking record.

use serde::Serialize;

use super::House;

/// Status literal for a booked day, as the source sites phrase it.
pub const STATUS_BOOKED: &str = "ติดจอง";

/// One booked calendar day, ready for export.
///
/// `month_label` keeps the site-native form (Thai-Buddhist or `YYYY-MM`) for
/// audit; normalization happens only when filtering. Only booked days are
/// ever materialized; absence of a record implies availability.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BookingRecord {
    #[serde(rename = "เว็บไซต์")]
    pub website: String,

    #[serde(rename = "ชื่อบ้าน")]
    pub house_name: String,

    #[serde(rename = "รหัส")]
    pub house_code: String,

    #[serde(rename = "เดือน")]
    pub month_label: String,

    #[serde(rename = "วันที่")]
    pub day: u32,

    #[serde(rename = "สถานะ")]
    pub status: String,
}

impl BookingRecord {
    /// Export column headers, in fixed order.
    pub const HEADERS: [&'static str; 6] =
        ["เว็บไซต์", "ชื่อบ้าน", "รหัส", "เดือน", "วันที่", "สถานะ"];

    /// Build a booked-day record for a house.
    pub fn booked(website: &str, house: &House, month_label: &str, day: u32) -> Self {
        Self {
            website: website.to_string(),
            house_name: house.name.clone(),
            house_code: house.code.clone(),
            month_label: month_label.to_string(),
            day,
            status: STATUS_BOOKED.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booked_carries_house_identity() {
        let house = House {
            id: "1758".to_string(),
            name: "Villa A".to_string(),
            code: "DV-10".to_string(),
        };
        let record = BookingRecord::booked("Deville Groups", &house, "มกราคม 2569", 5);
        assert_eq!(record.house_name, "Villa A");
        assert_eq!(record.house_code, "DV-10");
        assert_eq!(record.day, 5);
        assert_eq!(record.status, STATUS_BOOKED);
    }
}
