//! MemberType GraphQL type and id enum

use std::sync::Arc;

use async_graphql::{Enum, Object};

use crate::models::{MemberType as DbMemberType, MemberTypeId as DbMemberTypeId};

/// Member type identifier for GraphQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
#[graphql(rename_items = "lowercase")]
pub enum MemberTypeId {
    Basic,
    Business,
}

impl From<DbMemberTypeId> for MemberTypeId {
    fn from(id: DbMemberTypeId) -> Self {
        match id {
            DbMemberTypeId::Basic => Self::Basic,
            DbMemberTypeId::Business => Self::Business,
        }
    }
}

impl From<MemberTypeId> for DbMemberTypeId {
    fn from(id: MemberTypeId) -> Self {
        match id {
            MemberTypeId::Basic => Self::Basic,
            MemberTypeId::Business => Self::Business,
        }
    }
}

/// Membership tier exposed via GraphQL
pub struct MemberType {
    inner: Arc<DbMemberType>,
}

impl From<DbMemberType> for MemberType {
    fn from(member_type: DbMemberType) -> Self {
        Self {
            inner: Arc::new(member_type),
        }
    }
}

impl From<Arc<DbMemberType>> for MemberType {
    fn from(inner: Arc<DbMemberType>) -> Self {
        Self { inner }
    }
}

#[Object]
impl MemberType {
    async fn id(&self) -> MemberTypeId {
        self.inner.id.into()
    }

    /// Discount in percent
    async fn discount(&self) -> f64 {
        self.inner.discount
    }

    async fn posts_limit_per_month(&self) -> i32 {
        self.inner.posts_limit_per_month
    }
}
