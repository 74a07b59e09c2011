use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

mod draft;

pub use draft::PropertyDraft;

/// Amenities a listing can advertise
pub const AMENITY_CATALOG: &[&str] = &[
    "Air Conditioning",
    "Balcony",
    "Dishwasher",
    "Elevator",
    "Fireplace",
    "Garden",
    "Gym",
    "Hardwood Floors",
    "Laundry",
    "Pool",
    "Security System",
    "Storage",
];

/// Utilities that can be included in the rent
pub const UTILITY_CATALOG: &[&str] = &[
    "Cable",
    "Electricity",
    "Gas",
    "Heating",
    "Internet",
    "Sewer",
    "Trash",
    "Water",
];

/// Kind of building
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PropertyType {
    #[default]
    Apartment,
    House,
    Condo,
    Townhouse,
}

/// Which pets tenants may keep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PetPolicy {
    #[default]
    NotAllowed,
    CatsOnly,
    DogsOnly,
    PetsAllowed,
}

/// Offered lease length
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr)]
pub enum LeaseTerms {
    #[serde(rename = "6_months")]
    #[strum(serialize = "6_months")]
    SixMonths,
    #[default]
    #[serde(rename = "12_months")]
    #[strum(serialize = "12_months")]
    TwelveMonths,
    #[serde(rename = "18_months")]
    #[strum(serialize = "18_months")]
    EighteenMonths,
    #[serde(rename = "24_months")]
    #[strum(serialize = "24_months")]
    TwentyFourMonths,
    #[serde(rename = "month_to_month")]
    #[strum(serialize = "month_to_month")]
    MonthToMonth,
}

/// Property record as exchanged with the backend API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub address: String,
    pub bedrooms: u32,
    pub bathrooms: f64,
    pub area: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_built: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_rent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_deposit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_date: Option<NaiveDate>,
    #[serde(default)]
    pub property_type: PropertyType,
    #[serde(default)]
    pub pet_policy: PetPolicy,
    #[serde(default)]
    pub lease_terms: LeaseTerms,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub utilities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    /// Backend fields this client does not edit, sent back untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
