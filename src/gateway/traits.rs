use crate::error::GatewayError;
use crate::models::PropertyRecord;
use async_trait::async_trait;

/// Backend access used by the edit form.
/// Implemented over HTTP for real use and in memory for offline runs and tests.
#[async_trait]
pub trait PropertyGateway: Send + Sync {
    /// Fetch every property visible to the current user
    async fn list(&self) -> Result<Vec<PropertyRecord>, GatewayError>;

    /// Persist the full record under `id`
    async fn update(&self, id: &str, record: &PropertyRecord) -> Result<(), GatewayError>;

    /// Name of the backend, for logs
    fn source_name(&self) -> &'static str;
}
