use crate::error::FormError;
use crate::models::{LeaseTerms, PetPolicy, PropertyType};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Editable scalar fields of a property draft
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Field {
    Title,
    Description,
    Price,
    Address,
    Bedrooms,
    Bathrooms,
    Area,
    YearBuilt,
    Parking,
    MonthlyRent,
    SecurityDeposit,
    AvailableDate,
    PropertyType,
    PetPolicy,
    LeaseTerms,
}

impl Field {
    pub const REQUIRED: [Field; 7] = [
        Field::Title,
        Field::Description,
        Field::Price,
        Field::Address,
        Field::Bedrooms,
        Field::Bathrooms,
        Field::Area,
    ];

    pub const OPTIONAL: [Field; 5] = [
        Field::YearBuilt,
        Field::Parking,
        Field::MonthlyRent,
        Field::SecurityDeposit,
        Field::AvailableDate,
    ];

    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }

    /// Name shown to users in messages
    pub fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Description => "Description",
            Field::Price => "Price",
            Field::Address => "Address",
            Field::Bedrooms => "Number of bedrooms",
            Field::Bathrooms => "Number of bathrooms",
            Field::Area => "Area",
            Field::YearBuilt => "Year built",
            Field::Parking => "Parking spaces",
            Field::MonthlyRent => "Monthly rent",
            Field::SecurityDeposit => "Security deposit",
            Field::AvailableDate => "Available date",
            Field::PropertyType => "Property type",
            Field::PetPolicy => "Pet policy",
            Field::LeaseTerms => "Lease terms",
        }
    }

    /// Select fields carry no validation rule
    pub fn is_select(self) -> bool {
        matches!(self, Field::PropertyType | Field::PetPolicy | Field::LeaseTerms)
    }
}

/// Multi-select collections of a draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Collection {
    Amenities,
    Utilities,
}

impl Collection {
    pub fn catalog(self) -> &'static [&'static str] {
        match self {
            Collection::Amenities => crate::models::AMENITY_CATALOG,
            Collection::Utilities => crate::models::UTILITY_CATALOG,
        }
    }
}

/// One user edit to a single field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    Title(String),
    Description(String),
    Price(String),
    Address(String),
    Bedrooms(String),
    Bathrooms(String),
    Area(String),
    YearBuilt(String),
    Parking(String),
    MonthlyRent(String),
    SecurityDeposit(String),
    AvailableDate(String),
    PropertyType(PropertyType),
    PetPolicy(PetPolicy),
    LeaseTerms(LeaseTerms),
}

impl FieldEdit {
    /// Build an edit from raw input text, parsing select options
    pub fn from_input(field: Field, raw: &str) -> Result<Self, FormError> {
        let text = raw.to_string();
        let unknown = || FormError::UnknownOption {
            field,
            value: raw.to_string(),
        };

        Ok(match field {
            Field::Title => FieldEdit::Title(text),
            Field::Description => FieldEdit::Description(text),
            Field::Price => FieldEdit::Price(text),
            Field::Address => FieldEdit::Address(text),
            Field::Bedrooms => FieldEdit::Bedrooms(text),
            Field::Bathrooms => FieldEdit::Bathrooms(text),
            Field::Area => FieldEdit::Area(text),
            Field::YearBuilt => FieldEdit::YearBuilt(text),
            Field::Parking => FieldEdit::Parking(text),
            Field::MonthlyRent => FieldEdit::MonthlyRent(text),
            Field::SecurityDeposit => FieldEdit::SecurityDeposit(text),
            Field::AvailableDate => FieldEdit::AvailableDate(text),
            Field::PropertyType => FieldEdit::PropertyType(raw.trim().parse().map_err(|_| unknown())?),
            Field::PetPolicy => FieldEdit::PetPolicy(raw.trim().parse().map_err(|_| unknown())?),
            Field::LeaseTerms => FieldEdit::LeaseTerms(raw.trim().parse().map_err(|_| unknown())?),
        })
    }

    pub fn field(&self) -> Field {
        match self {
            FieldEdit::Title(_) => Field::Title,
            FieldEdit::Description(_) => Field::Description,
            FieldEdit::Price(_) => Field::Price,
            FieldEdit::Address(_) => Field::Address,
            FieldEdit::Bedrooms(_) => Field::Bedrooms,
            FieldEdit::Bathrooms(_) => Field::Bathrooms,
            FieldEdit::Area(_) => Field::Area,
            FieldEdit::YearBuilt(_) => Field::YearBuilt,
            FieldEdit::Parking(_) => Field::Parking,
            FieldEdit::MonthlyRent(_) => Field::MonthlyRent,
            FieldEdit::SecurityDeposit(_) => Field::SecurityDeposit,
            FieldEdit::AvailableDate(_) => Field::AvailableDate,
            FieldEdit::PropertyType(_) => Field::PropertyType,
            FieldEdit::PetPolicy(_) => Field::PetPolicy,
            FieldEdit::LeaseTerms(_) => Field::LeaseTerms,
        }
    }
}
