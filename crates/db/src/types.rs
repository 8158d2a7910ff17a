use std::fmt;

use diesel_derive_newtype::DieselNewType;
use serde::{Deserialize, Serialize};
use svix_ksuid::KsuidLike;

#[derive(DieselNewType, Debug, Hash, PartialEq, Eq, Clone)]
pub struct DbId(String);

impl Default for DbId {
    fn default() -> Self {
        DbId(svix_ksuid::Ksuid::new(None, None).to_string())
    }
}

impl fmt::Display for DbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DbId {
    fn from(string: String) -> Self {
        DbId(string)
    }
}

impl From<svix_ksuid::Ksuid> for DbId {
    fn from(id: svix_ksuid::Ksuid) -> Self {
        DbId(id.to_string())
    }
}

#[derive(
    diesel_derive_enum::DbEnum, Debug, Clone, PartialEq, PartialOrd, Ord, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ExistingTypePath = "crate::schema::sql_types::VoteType"]
pub enum DbVoteType {
    Like,
    Dislike,
}

impl DbVoteType {
    /// Signed contribution of one vote to a rating counter.
    pub fn delta(&self) -> i32 {
        match self {
            Self::Like => 1,
            Self::Dislike => -1,
        }
    }
}

#[derive(
    diesel_derive_enum::DbEnum, Debug, Clone, PartialEq, PartialOrd, Ord, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[ExistingTypePath = "crate::schema::sql_types::PostStatus"]
pub enum DbPostStatus {
    Active,
    Inactive,
}

impl DbPostStatus {
    pub fn from_string(string: &str) -> Option<Self> {
        match string {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DbVoteType;

    #[test]
    fn vote_deltas_are_opposite() {
        assert_eq!(DbVoteType::Like.delta(), 1);
        assert_eq!(DbVoteType::Dislike.delta(), -1);
        assert_eq!(DbVoteType::Like.delta() + DbVoteType::Dislike.delta(), 0);
    }
}
