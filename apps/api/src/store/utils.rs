//! Shared SQL fragments and error classification for the Postgres store

/// SQLSTATE raised on unique constraint violations
pub const UNIQUE_VIOLATION: &str = "23505";

/// SQLSTATE raised on foreign key violations
pub const FOREIGN_KEY_VIOLATION: &str = "23503";

// ============================================================================
// SQL Column Constants
//
// These constants define the SELECT column lists for each entity type and
// must stay in field order with the corresponding FromRow model.
// ============================================================================

/// SQL columns for member type queries
pub const MEMBER_TYPE_COLUMNS: &str = "id, discount, posts_limit_per_month";

/// SQL columns for user queries
pub const USER_COLUMNS: &str = "id, name, balance";

/// SQL columns for post queries
pub const POST_COLUMNS: &str = "id, title, content, author_id";

/// SQL columns for profile queries
pub const PROFILE_COLUMNS: &str = "id, is_male, year_of_birth, user_id, member_type_id";

/// SQL columns for subscription queries
pub const SUBSCRIPTION_COLUMNS: &str = "subscriber_id, author_id";

/// Constraint violations the store turns into domain errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    Unique { constraint: Option<String> },
    ForeignKey { constraint: Option<String> },
}

impl Violation {
    /// Classify a database error by SQLSTATE
    pub fn classify(err: &sqlx::Error) -> Option<Self> {
        let db_err = err.as_database_error()?;
        let constraint = db_err.constraint().map(str::to_string);

        match db_err.code()?.as_ref() {
            UNIQUE_VIOLATION => Some(Self::Unique { constraint }),
            FOREIGN_KEY_VIOLATION => Some(Self::ForeignKey { constraint }),
            _ => None,
        }
    }

    pub fn constraint(&self) -> Option<&str> {
        match self {
            Self::Unique { constraint } | Self::ForeignKey { constraint } => constraint.as_deref(),
        }
    }
}
