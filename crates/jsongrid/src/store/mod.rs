//! Observable, copy-on-write table store.

mod config;
mod data_store;
mod state;

pub use config::StoreConfig;
pub use data_store::{DataStore, SubscriptionId};
pub use state::{DataStoreState, StoreError};
