use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;
use validator::Validate;

use crate::models::propertymodel::{
    ListingPurpose, Property, PropertyStatus, PropertyTranslation, PropertyType,
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PropertyTranslationDto {
    #[validate(length(min = 2, max = 10, message = "Locale must be a language tag like en or de"))]
    pub locale: String,

    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,

    #[validate(length(max = 300, message = "Subtitle must be at most 300 characters"))]
    pub subtitle: Option<String>,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    pub features: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyDto {
    // Optional: generated from the default translation title when absent
    pub slug: Option<String>,

    pub status: PropertyStatus,
    pub property_type: PropertyType,
    pub purpose: ListingPurpose,

    #[validate(range(min = 1, message = "Price must be positive"))]
    pub price: i64,

    #[validate(range(min = 0, max = 100, message = "Bedrooms must be between 0 and 100"))]
    pub bedrooms: Option<i32>,

    #[validate(range(min = 0, max = 100, message = "Bathrooms must be between 0 and 100"))]
    pub bathrooms: Option<i32>,

    pub area_sqm: Option<f64>,

    #[validate(length(min = 2, max = 255, message = "Location is required"))]
    pub location: String,

    pub coordinates: Option<JsonValue>,

    pub images: Option<Vec<String>>,
    pub featured: Option<bool>,

    #[validate]
    pub translations: Vec<PropertyTranslationDto>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePropertyDto {
    pub slug: Option<String>,

    pub status: Option<PropertyStatus>,
    pub property_type: Option<PropertyType>,
    pub purpose: Option<ListingPurpose>,

    #[validate(range(min = 1, message = "Price must be positive"))]
    pub price: Option<i64>,

    #[validate(range(min = 0, max = 100, message = "Bedrooms must be between 0 and 100"))]
    pub bedrooms: Option<i32>,

    #[validate(range(min = 0, max = 100, message = "Bathrooms must be between 0 and 100"))]
    pub bathrooms: Option<i32>,

    pub area_sqm: Option<f64>,

    #[validate(length(min = 2, max = 255, message = "Location is required"))]
    pub location: Option<String>,

    pub coordinates: Option<JsonValue>,

    pub images: Option<Vec<String>>,
    pub featured: Option<bool>,

    #[validate]
    pub translations: Option<Vec<PropertyTranslationDto>>,
}

/// Raw, untrusted query parameters of the public listing endpoint.
/// Numeric bounds arrive as strings and are parsed leniently; see
/// `PropertyFilter::from_query`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PropertyFilterQueryDto {
    pub purpose: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "minPrice")]
    pub min_price: Option<String>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LocaleQueryDto {
    pub locale: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PropertyListItemDto {
    pub id: Uuid,
    pub slug: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub status: PropertyStatus,
    pub property_type: PropertyType,
    pub purpose: ListingPurpose,
    pub price: i64,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub area_sqm: Option<f64>,
    pub location: String,
    pub images: JsonValue,
    pub featured: bool,
}

impl PropertyListItemDto {
    pub fn from_property(property: &Property, translation: Option<&PropertyTranslation>) -> Self {
        Self {
            id: property.id,
            slug: property.slug.clone(),
            title: translation.map(|t| t.title.clone()),
            subtitle: translation.and_then(|t| t.subtitle.clone()),
            status: property.status,
            property_type: property.property_type,
            purpose: property.purpose,
            price: property.price,
            bedrooms: property.bedrooms,
            bathrooms: property.bathrooms,
            area_sqm: property.area_sqm,
            location: property.location.clone(),
            images: property.images.clone(),
            featured: property.featured,
        }
    }
}
