use super::{LeaseTerms, PetPolicy, PropertyRecord, PropertyType};
use crate::error::FormError;
use crate::form::validator::{parse_date, parse_value};
use crate::form::{Collection, Field, FieldEdit};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;
use std::str::FromStr;

/// In-progress edit of a property.
///
/// Scalar inputs keep the text the user typed so that the validator sees
/// exactly what was entered. Select fields are typed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDraft {
    id: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub address: String,
    pub bedrooms: String,
    pub bathrooms: String,
    pub area: String,
    pub year_built: String,
    pub parking: String,
    pub monthly_rent: String,
    pub security_deposit: String,
    pub available_date: String,
    pub property_type: PropertyType,
    pub pet_policy: PetPolicy,
    pub lease_terms: LeaseTerms,
    pub amenities: BTreeSet<String>,
    pub utilities: BTreeSet<String>,
    pub images: Vec<String>,
    #[serde(skip)]
    extra: serde_json::Map<String, serde_json::Value>,
}

impl PropertyDraft {
    pub fn from_record(record: &PropertyRecord) -> Self {
        fn opt<T: ToString>(value: &Option<T>) -> String {
            value.as_ref().map(ToString::to_string).unwrap_or_default()
        }

        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
            price: record.price.to_string(),
            address: record.address.clone(),
            bedrooms: record.bedrooms.to_string(),
            bathrooms: record.bathrooms.to_string(),
            area: record.area.to_string(),
            year_built: opt(&record.year_built),
            parking: opt(&record.parking),
            monthly_rent: opt(&record.monthly_rent),
            security_deposit: opt(&record.security_deposit),
            available_date: record
                .available_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            property_type: record.property_type,
            pet_policy: record.pet_policy,
            lease_terms: record.lease_terms,
            amenities: record.amenities.iter().cloned().collect(),
            utilities: record.utilities.iter().cloned().collect(),
            images: record.images.clone(),
            extra: record.extra.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Raw text of a scalar field; select fields render their option name
    pub fn value(&self, field: Field) -> String {
        match field {
            Field::Title => self.title.clone(),
            Field::Description => self.description.clone(),
            Field::Price => self.price.clone(),
            Field::Address => self.address.clone(),
            Field::Bedrooms => self.bedrooms.clone(),
            Field::Bathrooms => self.bathrooms.clone(),
            Field::Area => self.area.clone(),
            Field::YearBuilt => self.year_built.clone(),
            Field::Parking => self.parking.clone(),
            Field::MonthlyRent => self.monthly_rent.clone(),
            Field::SecurityDeposit => self.security_deposit.clone(),
            Field::AvailableDate => self.available_date.clone(),
            Field::PropertyType => self.property_type.to_string(),
            Field::PetPolicy => self.pet_policy.to_string(),
            Field::LeaseTerms => self.lease_terms.to_string(),
        }
    }

    /// True when the field holds something other than whitespace
    pub fn has_value(&self, field: Field) -> bool {
        !self.value(field).trim().is_empty()
    }

    pub fn apply(&mut self, edit: FieldEdit) {
        match edit {
            FieldEdit::Title(v) => self.title = v,
            FieldEdit::Description(v) => self.description = v,
            FieldEdit::Price(v) => self.price = v,
            FieldEdit::Address(v) => self.address = v,
            FieldEdit::Bedrooms(v) => self.bedrooms = v,
            FieldEdit::Bathrooms(v) => self.bathrooms = v,
            FieldEdit::Area(v) => self.area = v,
            FieldEdit::YearBuilt(v) => self.year_built = v,
            FieldEdit::Parking(v) => self.parking = v,
            FieldEdit::MonthlyRent(v) => self.monthly_rent = v,
            FieldEdit::SecurityDeposit(v) => self.security_deposit = v,
            FieldEdit::AvailableDate(v) => self.available_date = v,
            FieldEdit::PropertyType(v) => self.property_type = v,
            FieldEdit::PetPolicy(v) => self.pet_policy = v,
            FieldEdit::LeaseTerms(v) => self.lease_terms = v,
        }
    }

    pub fn collection(&self, collection: Collection) -> &BTreeSet<String> {
        match collection {
            Collection::Amenities => &self.amenities,
            Collection::Utilities => &self.utilities,
        }
    }

    pub(crate) fn collection_mut(&mut self, collection: Collection) -> &mut BTreeSet<String> {
        match collection {
            Collection::Amenities => &mut self.amenities,
            Collection::Utilities => &mut self.utilities,
        }
    }

    /// Convert back into the wire record
    pub fn to_record(&self) -> Result<PropertyRecord, FormError> {
        Ok(PropertyRecord {
            id: self.id.clone(),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            price: required(Field::Price, &self.price)?,
            address: self.address.trim().to_string(),
            bedrooms: required(Field::Bedrooms, &self.bedrooms)?,
            bathrooms: required(Field::Bathrooms, &self.bathrooms)?,
            area: required(Field::Area, &self.area)?,
            year_built: optional(Field::YearBuilt, &self.year_built)?,
            parking: optional(Field::Parking, &self.parking)?,
            monthly_rent: optional(Field::MonthlyRent, &self.monthly_rent)?,
            security_deposit: optional(Field::SecurityDeposit, &self.security_deposit)?,
            available_date: optional_date(&self.available_date)?,
            property_type: self.property_type,
            pet_policy: self.pet_policy,
            lease_terms: self.lease_terms,
            amenities: self.amenities.iter().cloned().collect(),
            utilities: self.utilities.iter().cloned().collect(),
            images: self.images.clone(),
            extra: self.extra.clone(),
        })
    }
}

fn required<T: FromStr>(field: Field, raw: &str) -> Result<T, FormError> {
    parse_value(raw).ok_or(FormError::InvalidDraft(field))
}

fn optional<T: FromStr>(field: Field, raw: &str) -> Result<Option<T>, FormError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    required(field, raw).map(Some)
}

fn optional_date(raw: &str) -> Result<Option<NaiveDate>, FormError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_date(raw)
        .map(Some)
        .ok_or(FormError::InvalidDraft(Field::AvailableDate))
}
