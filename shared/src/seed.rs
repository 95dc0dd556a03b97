//! Seed data for the property record.
//!
//! Returned (and persisted) on first read when the store holds no record,
//! and restored by the reset operation. Seed content is trusted and bypasses
//! the write validator.

use crate::models::{Amenity, Property, PropertyDescription, PropertyImage};

pub fn default_property() -> Property {
    Property {
        title: "Cozy MRT Apartment".to_string(),
        address: "Bang Ao, Bang Phlat, Bangkok 10700".to_string(),
        price: 13000.0,
        currency: "฿".to_string(),
        price_unit: "month".to_string(),
        beds: 1,
        baths: 1,
        kitchens: 1,
        sqft: 22.5,
        qr_code_url: "https://qr-official.line.me/gs/M_220xvrzg_BW.png?oat_content=qr".to_string(),
        building_name: "Chapter One Spark Charan".to_string(),
        description: PropertyDescription {
            room_info: "Premium 1 room (7F 22.5sqft).".to_string(),
            location: "150m to MRT07 BangPhlat station & nearby Bangsue station.".to_string(),
            highlights: vec![
                "Fitness center • Pool • Convenience downstairs".to_string(),
                "International hospital • Lotus nearby".to_string(),
            ],
        },
        amenities: vec![
            amenity("fitness_center", "Gym"),
            amenity("pool", "Pool"),
            amenity("business_center", "Workspace"),
            amenity("ac_unit", "A/C"),
            amenity("local_laundry_service", "Laundry"),
            amenity("kitchen", "Kitchen"),
        ],
        location_features: vec![
            "2-min walk to MRT station".to_string(),
            "Multiple convenience stores nearby".to_string(),
            "Close to shopping centers".to_string(),
            "Restaurants & cafes nearby".to_string(),
        ],
        lease_terms: vec![
            "Minimum lease: 1 year".to_string(),
            "Security deposit: 2 months rent".to_string(),
            "Management fee: Included in rent".to_string(),
            "Pet-friendly (upon discussion)".to_string(),
        ],
        images: vec![PropertyImage {
            id: "living_room".to_string(),
            name: "Living Room".to_string(),
            url: "https://bangkokmrt.vercel.app/og-image.jpg".to_string(),
        }],
    }
}

fn amenity(icon: &str, name: &str) -> Amenity {
    Amenity {
        icon: icon.to_string(),
        name: name.to_string(),
    }
}
