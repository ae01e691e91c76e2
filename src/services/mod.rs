pub mod auth;
pub mod catalog;
pub mod collections;
pub mod genres;
pub mod ingestion;
pub mod request_counter;

pub use catalog::{CatalogClient, CatalogSource, RetryPolicy};
pub use collections::{CollectionManager, CollectionUpdate};
pub use request_counter::{AtomicCounter, RequestCounter};
