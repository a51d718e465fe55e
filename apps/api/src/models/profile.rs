//! Profile model
//!
//! A user has at most one profile; `user_id` is unique in the store.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::member_type::MemberTypeId;

/// Profile record from the profiles table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Profile {
    pub id: Uuid,
    pub is_male: bool,
    pub year_of_birth: i32,
    pub user_id: Uuid,
    pub member_type_id: MemberTypeId,
}

/// Profile creation input
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProfile {
    pub is_male: bool,
    pub year_of_birth: i32,
    pub user_id: Uuid,
    pub member_type_id: MemberTypeId,
}

/// Partial profile update; the owning user never changes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeProfile {
    pub is_male: Option<bool>,
    pub year_of_birth: Option<i32>,
    pub member_type_id: Option<MemberTypeId>,
}

impl ChangeProfile {
    pub fn apply(&self, profile: &mut Profile) {
        if let Some(is_male) = self.is_male {
            profile.is_male = is_male;
        }
        if let Some(year_of_birth) = self.year_of_birth {
            profile.year_of_birth = year_of_birth;
        }
        if let Some(member_type_id) = self.member_type_id {
            profile.member_type_id = member_type_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_profile_keeps_owner() {
        let user_id = Uuid::new_v4();
        let mut profile = Profile {
            id: Uuid::new_v4(),
            is_male: false,
            year_of_birth: 1990,
            user_id,
            member_type_id: MemberTypeId::Basic,
        };

        ChangeProfile {
            member_type_id: Some(MemberTypeId::Business),
            ..Default::default()
        }
        .apply(&mut profile);

        assert_eq!(profile.user_id, user_id);
        assert_eq!(profile.member_type_id, MemberTypeId::Business);
        assert_eq!(profile.year_of_birth, 1990);
    }
}
