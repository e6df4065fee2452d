use std::sync::Arc;

use tracing::warn;

use crate::api::dtos::{CategoryResponse, CategoryTreeResponse};
use crate::domain::build_category_tree;
use crate::error::{AppError, AppResult};
use crate::infrastructure::repositories::CategoryRepository;

/// Read side of the category taxonomy.
///
/// Browse listings never fail loudly: a store error degrades to an empty
/// result and a logged diagnostic. The by-slug lookup is a detail read and
/// does propagate transport errors, keeping "no such category" (NotFound)
/// distinct from "store is down".
#[derive(Clone)]
pub struct CatalogService {
    category_repo: Arc<dyn CategoryRepository>,
}

impl CatalogService {
    pub fn new(category_repo: Arc<dyn CategoryRepository>) -> Self {
        Self { category_repo }
    }

    /// All categories, name ascending. Empty on store failure.
    pub async fn list(&self) -> Vec<CategoryResponse> {
        match self.category_repo.find_all().await {
            Ok(categories) => categories.into_iter().map(CategoryResponse::from).collect(),
            Err(error) => {
                warn!(%error, "failed to fetch categories; serving empty list");
                Vec::new()
            }
        }
    }

    /// The two-level display tree. Empty on store failure.
    pub async fn tree(&self) -> Vec<CategoryTreeResponse> {
        match self.category_repo.find_all().await {
            Ok(categories) => build_category_tree(categories)
                .into_iter()
                .map(CategoryTreeResponse::from)
                .collect(),
            Err(error) => {
                warn!(%error, "failed to fetch categories; serving empty tree");
                Vec::new()
            }
        }
    }

    pub async fn get_by_slug(&self, slug: &str) -> AppResult<CategoryResponse> {
        let category = self
            .category_repo
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound("category not found".to_string()))?;
        Ok(category.into())
    }
}
