use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::types::chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "property_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    Available,
    Pending, // Offer accepted, not yet closed
    Sold,
    Leased,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "property_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Residential,
    Commercial,
    Villa,
    Apartment,
    Penthouse,
    Land,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "listing_purpose", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ListingPurpose {
    Buy,
    Rent,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Property {
    pub id: Uuid,
    pub slug: String,

    pub status: PropertyStatus,
    pub property_type: PropertyType,
    pub purpose: ListingPurpose,

    pub price: i64,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub area_sqm: Option<f64>,

    pub location: String,
    pub coordinates: Option<JsonValue>,

    // Ordered list of image URLs
    pub images: JsonValue,
    pub featured: bool,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct PropertyTranslation {
    pub id: Uuid,
    pub property_id: Uuid,
    pub locale: String,

    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    // List of feature strings
    pub features: JsonValue,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
