use crate::error::GatewayError;
use crate::gateway::traits::PropertyGateway;
use crate::models::{LeaseTerms, PetPolicy, PropertyRecord, PropertyType};
use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

/// In-memory property gateway (offline mode and tests)
#[derive(Default)]
pub struct MemoryGateway {
    records: RwLock<Vec<PropertyRecord>>,
    updates: AtomicUsize,
    fail_updates: RwLock<Option<String>>,
}

impl MemoryGateway {
    pub fn new(records: Vec<PropertyRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            ..Self::default()
        }
    }

    /// Gateway seeded with demo listings
    pub fn sample() -> Self {
        Self::new(Self::sample_records())
    }

    /// Make every following update fail with `message`; None restores success
    pub fn fail_updates_with(&self, message: Option<&str>) {
        *self.fail_updates.write() = message.map(String::from);
    }

    /// Number of update calls received, failed ones included
    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn get(&self, id: &str) -> Option<PropertyRecord> {
        self.records.read().iter().find(|r| r.id == id).cloned()
    }

    pub fn sample_records() -> Vec<PropertyRecord> {
        vec![
            PropertyRecord {
                id: "prop_1001".to_string(),
                title: "Bright two-bedroom near the river".to_string(),
                description: "Corner apartment with large windows, renovated kitchen and a quiet bedroom facing the courtyard.".to_string(),
                price: 425_000.0,
                address: "48 Riverside Drive, Apt 5B, Portland, OR".to_string(),
                bedrooms: 2,
                bathrooms: 1.5,
                area: 86.5,
                year_built: Some(1998),
                parking: Some(1),
                monthly_rent: Some(2_150.0),
                security_deposit: Some(2_150.0),
                available_date: None,
                property_type: PropertyType::Apartment,
                pet_policy: PetPolicy::CatsOnly,
                lease_terms: LeaseTerms::TwelveMonths,
                amenities: vec!["Balcony".to_string(), "Dishwasher".to_string(), "Gym".to_string(), "Pool".to_string()],
                utilities: vec!["Heating".to_string(), "Trash".to_string()],
                images: vec![
                    "https://images.rentals.test/prop_1001/living.jpg".to_string(),
                    "https://images.rentals.test/prop_1001/kitchen.jpg".to_string(),
                ],
                extra: serde_json::Map::new(),
            },
            PropertyRecord {
                id: "prop_1002".to_string(),
                title: "Family house with garden".to_string(),
                description: "Detached house on a quiet street with a fenced garden, two-car garage and a finished basement.".to_string(),
                price: 689_000.0,
                address: "1207 Maple Avenue, Beaverton, OR".to_string(),
                bedrooms: 4,
                bathrooms: 2.5,
                area: 210.0,
                year_built: Some(1976),
                parking: Some(2),
                monthly_rent: None,
                security_deposit: None,
                available_date: NaiveDate::from_ymd_opt(2031, 3, 1),
                property_type: PropertyType::House,
                pet_policy: PetPolicy::PetsAllowed,
                lease_terms: LeaseTerms::TwentyFourMonths,
                amenities: vec!["Fireplace".to_string(), "Garden".to_string(), "Storage".to_string()],
                utilities: vec![],
                images: vec!["https://images.rentals.test/prop_1002/front.jpg".to_string()],
                extra: serde_json::Map::new(),
            },
            PropertyRecord {
                id: "prop_1003".to_string(),
                title: "Downtown studio condo".to_string(),
                description: "Compact studio in a full-service building, walking distance to offices, shops and transit.".to_string(),
                price: 239_500.0,
                address: "300 SW Morrison Street, Unit 1410, Portland, OR".to_string(),
                bedrooms: 1,
                bathrooms: 1.0,
                area: 41.0,
                year_built: Some(2015),
                parking: None,
                monthly_rent: Some(1_395.0),
                security_deposit: Some(700.0),
                available_date: None,
                property_type: PropertyType::Condo,
                pet_policy: PetPolicy::NotAllowed,
                lease_terms: LeaseTerms::MonthToMonth,
                amenities: vec!["Elevator".to_string(), "Laundry".to_string(), "Security System".to_string()],
                utilities: vec!["Internet".to_string(), "Water".to_string()],
                images: vec![],
                extra: serde_json::Map::new(),
            },
        ]
    }
}

#[async_trait]
impl PropertyGateway for MemoryGateway {
    async fn list(&self) -> Result<Vec<PropertyRecord>, GatewayError> {
        Ok(self.records.read().clone())
    }

    async fn update(&self, id: &str, record: &PropertyRecord) -> Result<(), GatewayError> {
        self.updates.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = self.fail_updates.read().clone() {
            return Err(GatewayError::Rejected(message));
        }

        let mut records = self.records.write();
        let slot = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| GatewayError::Rejected("Property not found".to_string()))?;
        *slot = record.clone();

        info!("Stored property {} in memory", id);
        Ok(())
    }

    fn source_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_update_replaces_record() {
        let gateway = MemoryGateway::sample();
        let mut record = gateway.get("prop_1002").unwrap();
        record.price = 650_000.0;

        gateway.update("prop_1002", &record).await.unwrap();

        assert_eq!(gateway.get("prop_1002").unwrap().price, 650_000.0);
        assert_eq!(gateway.update_count(), 1);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let gateway = MemoryGateway::sample();
        let record = gateway.get("prop_1001").unwrap();

        let err = gateway.update("missing", &record).await.unwrap_err();
        assert_eq!(err, GatewayError::Rejected("Property not found".to_string()));
    }

    #[tokio::test]
    async fn test_forced_failure() {
        let gateway = MemoryGateway::sample();
        let record = gateway.get("prop_1001").unwrap();
        gateway.fail_updates_with(Some("Server is down"));

        let err = gateway.update("prop_1001", &record).await.unwrap_err();
        assert_eq!(err.to_string(), "Server is down");

        gateway.fail_updates_with(None);
        assert!(gateway.update("prop_1001", &record).await.is_ok());
        assert_eq!(gateway.update_count(), 2);
    }
}
