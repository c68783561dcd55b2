//! Store state: exactly one of four variants at a time.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{ErrorKind, GridError};
use crate::schema::DataSet;

/// A load failure as held by the store: a kind code plus a human message.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct StoreError {
    pub kind: ErrorKind,
    pub message: String,
}

impl StoreError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Machine-readable code, e.g. `MALFORMED_JSON`.
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl From<&GridError> for StoreError {
    fn from(err: &GridError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

impl From<GridError> for StoreError {
    fn from(err: GridError) -> Self {
        Self::from(&err)
    }
}

/// State of a [`DataStore`](super::DataStore).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum DataStoreState {
    /// Nothing loaded.
    #[default]
    Idle,
    /// A load is in progress.
    Loading,
    /// A fully validated data set.
    Loaded(Arc<DataSet>),
    /// The last load failed.
    Error(StoreError),
}

impl DataStoreState {
    pub fn name(&self) -> &'static str {
        match self {
            DataStoreState::Idle => "idle",
            DataStoreState::Loading => "loading",
            DataStoreState::Loaded(_) => "loaded",
            DataStoreState::Error(_) => "error",
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, DataStoreState::Loaded(_))
    }

    pub fn data_set(&self) -> Option<&Arc<DataSet>> {
        match self {
            DataStoreState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&StoreError> {
        match self {
            DataStoreState::Error(err) => Some(err),
            _ => None,
        }
    }
}
