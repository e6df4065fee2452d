use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Category, CategoryNode};

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<Uuid>,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug,
            parent_id: category.parent_id,
            icon: category.icon,
            created_at: category.created_at,
        }
    }
}

/// A top-level category with its displayed children.
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryTreeResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub icon: Option<String>,
    pub children: Vec<CategoryResponse>,
}

impl From<CategoryNode> for CategoryTreeResponse {
    fn from(node: CategoryNode) -> Self {
        Self {
            id: node.category.id,
            name: node.category.name,
            slug: node.category.slug,
            icon: node.category.icon,
            children: node.children.into_iter().map(CategoryResponse::from).collect(),
        }
    }
}
