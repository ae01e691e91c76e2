use std::sync::Arc;

use crate::{
    config::CredentialSource,
    db::Store,
    services::{
        auth::TokenIssuer, catalog::CatalogSource, collections::CollectionManager,
        request_counter::RequestCounter,
    },
};

/// Shared application state
///
/// Every collaborator is injected here at start-up; handlers never reach for
/// process globals.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub counter: Arc<dyn RequestCounter>,
    pub catalog: Arc<dyn CatalogSource>,
    pub credentials: CredentialSource,
    pub tokens: TokenIssuer,
}

impl AppState {
    pub fn new(
        store: Arc<dyn Store>,
        counter: Arc<dyn RequestCounter>,
        catalog: Arc<dyn CatalogSource>,
        credentials: CredentialSource,
        tokens: TokenIssuer,
    ) -> Self {
        Self {
            store,
            counter,
            catalog,
            credentials,
            tokens,
        }
    }

    pub fn collections(&self) -> CollectionManager {
        CollectionManager::new(self.store.clone())
    }
}
