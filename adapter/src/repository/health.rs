use std::sync::Arc;

use async_trait::async_trait;
use derive_new::new;
use kernel::{repository::health::HealthCheckRepository, store::DocumentStore};

#[derive(new)]
pub struct HealthCheckRepositoryImpl {
    store: Arc<dyn DocumentStore>,
}

#[async_trait]
impl HealthCheckRepository for HealthCheckRepositoryImpl {
    async fn check_db(&self) -> bool {
        self.store.ping().await
    }
}
