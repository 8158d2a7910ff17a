use chrono::{DateTime, Utc};
use db::models::Category;
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct CategoryView {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CategoryView {
    pub fn new(category: Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name,
            description: category.description,
            created_at: category.published,
        }
    }
}
