use serde::{de::DeserializeOwned, Serialize};

use crate::{common::id::DocumentId, db::store::CollectionName};

pub mod auth;
pub mod car;
pub mod fleet;
pub mod person;
pub mod rental;
pub mod reserve;

/// Entidade persistida no banco de documentos.
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: CollectionName;

    fn id(&self) -> &DocumentId;
}
