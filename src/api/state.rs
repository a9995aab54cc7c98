use std::sync::Arc;

use crate::database::DatabaseManager;
use crate::generation::GenerationGateway;
use crate::transfer::{ObjectStorePrefix, TransferProvider};

/// Shared handler state. All gateways are constructed once at startup and
/// injected here; handlers never build clients lazily.
#[derive(Clone)]
pub struct ApiState {
    pub db: Arc<DatabaseManager>,
    pub generation: Arc<GenerationGateway>,
    pub transfer: Arc<dyn TransferProvider>,
    pub object_store: ObjectStorePrefix,
}
