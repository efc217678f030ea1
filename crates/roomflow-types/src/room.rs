use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Room detail as returned by `rooms/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub room_id: u64,
    #[serde(alias = "roomType", alias = "roomName")]
    pub name: Option<String>,
    /// Nightly rate.
    #[serde(default)]
    pub price: Decimal,
    pub hotel_id: Option<u64>,
    pub hotel_name: Option<String>,
    pub description: Option<String>,
    pub capacity: Option<u32>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
}

impl RoomResponse {
    pub fn primary_image(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }
}
