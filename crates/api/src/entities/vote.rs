use db::{models::Vote, types::DbVoteType};
use serde::Serialize;

/// Wire shape of a ledger entry. Consumed by the frontend to decide whether
/// the next action is a create or a delete, so the field names are part of
/// the API contract.
#[derive(Serialize, Debug)]
pub struct VoteRecord {
    pub id: String,
    #[serde(rename = "authorId")]
    pub author_id: String,
    #[serde(rename = "postId")]
    pub post_id: Option<String>,
    #[serde(rename = "commentId")]
    pub comment_id: Option<String>,
    #[serde(rename = "type")]
    pub vote_type: DbVoteType,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl VoteRecord {
    pub fn new(vote: Vote) -> Self {
        Self {
            id: vote.id.to_string(),
            author_id: vote.author_id.to_string(),
            post_id: vote.post_id.map(|id| id.to_string()),
            comment_id: vote.comment_id.map(|id| id.to_string()),
            vote_type: vote.vote_type,
            created_at: vote.published.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use db::{
        models::Vote,
        types::{DbId, DbVoteType},
    };

    use super::VoteRecord;

    #[test]
    fn wire_shape() {
        let vote = Vote {
            id: DbId::from(String::from("2a9VqRRRuxUEAq5BUwGJJYAZxxx")),
            author_id: DbId::from(String::from("2a9VqSSSuxUEAq5BUwGJJYAZyyy")),
            post_id: Some(DbId::from(String::from("2a9VqTTTuxUEAq5BUwGJJYAZzzz"))),
            comment_id: None,
            vote_type: DbVoteType::Dislike,
            published: Utc::now(),
        };

        let json = serde_json::to_value(VoteRecord::new(vote)).unwrap();
        assert_eq!(json["authorId"], "2a9VqSSSuxUEAq5BUwGJJYAZyyy");
        assert_eq!(json["postId"], "2a9VqTTTuxUEAq5BUwGJJYAZzzz");
        assert_eq!(json["commentId"], serde_json::Value::Null);
        assert_eq!(json["type"], "DISLIKE");
        assert!(json["createdAt"].is_string());
    }
}
