use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A node in the two-level taxonomy used to group listings.
///
/// Categories are seeded administratively; this service only reads them.
/// `parent_id = None` marks a top-level category.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<Uuid>,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct CategoryNode {
    pub category: Category,
    pub children: Vec<Category>,
}

/// Builds the displayed two-level tree from a flat category list.
///
/// Input order is preserved within each level (the repository already sorts
/// by name). Children whose `parent_id` matches no root are dropped; that is
/// a display rule, not an error.
pub fn build_category_tree(categories: Vec<Category>) -> Vec<CategoryNode> {
    let (roots, children): (Vec<Category>, Vec<Category>) =
        categories.into_iter().partition(Category::is_root);

    roots
        .into_iter()
        .map(|root| {
            let root_id = root.id;
            CategoryNode {
                category: root,
                children: children
                    .iter()
                    .filter(|child| child.parent_id == Some(root_id))
                    .cloned()
                    .collect(),
            }
        })
        .collect()
}
