use serde::{Deserialize, Serialize};

/// The single listing shown by the site.
///
/// The record is persisted in the key-value store under a fixed key and is
/// replaced wholesale on every admin write. Field names follow the JSON
/// contract the front-end consumes (`priceUnit`, `qrCodeUrl`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub title: String,
    pub address: String,
    pub price: f64,
    pub currency: String,
    pub price_unit: String,
    pub beds: u32,
    pub baths: u32,
    pub kitchens: u32,
    pub sqft: f64,
    pub qr_code_url: String,
    pub building_name: String,
    pub description: PropertyDescription,
    pub amenities: Vec<Amenity>,
    pub location_features: Vec<String>,
    pub lease_terms: Vec<String>,
    pub images: Vec<PropertyImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescription {
    pub room_info: String,
    pub location: String,
    pub highlights: Vec<String>,
}

/// Amenity entry; `icon` is a Material icon name the front-end renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    pub icon: String,
    pub name: String,
}

/// One listing photo. Array position in `Property::images` is display order.
/// The `id` is derived client-side from the room name plus a timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyImage {
    pub id: String,
    pub name: String,
    pub url: String,
}

/// Body of `POST /api/upload-image`.
///
/// Both fields are optional at the serde level so that absence is reported
/// by the validator ("Missing imageData or imageName") instead of a JSON
/// deserialization failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadImageRequest {
    #[serde(default)]
    pub image_data: Option<String>,
    #[serde(default)]
    pub image_name: Option<String>,
}

/// Body of `POST /api/auth`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthRequest {
    #[serde(default)]
    pub password: Option<String>,
}

/// One page-view counter, keyed by page slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageViews {
    pub page: String,
    pub views: i64,
}
