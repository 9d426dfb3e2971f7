//! Iconografix core library
//!
//! Browse several icon catalogs through one registry, keep track of what the
//! user selected, and hand the selection to an embedding host.

pub mod catalog;
pub mod config;
pub mod error;
pub mod host;
pub mod registry;
pub mod selection;

pub use catalog::{CatalogProvider, ItemRecord, PaginationResult, ProviderDescriptor};
pub use config::IconografixConfig;
pub use error::{CatalogError, Result};
pub use host::{HostMessagingChannel, TargetOrigin};
pub use registry::{ProviderRegistry, ProviderStats};
pub use selection::{SelectionMode, SelectionStore};
