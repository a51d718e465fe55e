//! MemberType loader
//!
//! Member types are a two-row reference table, so a whole request usually
//! settles every `memberType` field with a single fetch.

use std::collections::HashMap;
use std::sync::Arc;

use crate::dataloader::Loader;
use crate::models::{MemberType, MemberTypeId};
use crate::store::{Store, StoreError};

/// Bulk fetch of member types by id
#[derive(Clone)]
pub struct MemberTypeLoader {
    store: Arc<dyn Store>,
}

impl MemberTypeLoader {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

impl Loader<MemberTypeId> for MemberTypeLoader {
    type Value = MemberType;
    type Error = StoreError;

    async fn load(
        &self,
        keys: &[MemberTypeId],
    ) -> Result<HashMap<MemberTypeId, Self::Value>, Self::Error> {
        let member_types = self.store.find_member_types_by_ids(keys).await?;

        Ok(member_types.into_iter().map(|m| (m.id, m)).collect())
    }
}
