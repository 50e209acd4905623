//! The seam between the fetch controller and wherever questions come from.

use async_trait::async_trait;

use crate::trivia::category::{builtin_categories, Category, CategoryId};
use crate::trivia::error::FetchError;
use crate::trivia::question::Question;

/// A provider of random trivia questions.
///
/// `TriviaClient` talks to Open Trivia DB; tests use in-process fakes.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch one random multiple-choice question, optionally restricted to
    /// a category.
    async fn fetch_question(&self, category: Option<CategoryId>) -> Result<Question, FetchError>;

    /// List the categories the source offers.
    async fn fetch_categories(&self) -> Result<Vec<Category>, FetchError> {
        Ok(builtin_categories())
    }
}

/// Fetch the category list, falling back to the built-in list on failure.
pub async fn load_categories(source: &dyn QuestionSource) -> Vec<Category> {
    match source.fetch_categories().await {
        Ok(categories) if !categories.is_empty() => categories,
        Ok(_) => {
            tracing::warn!("Category endpoint returned no categories, using built-in list");
            builtin_categories()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load categories, using built-in list");
            builtin_categories()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unreachable;

    #[async_trait]
    impl QuestionSource for Unreachable {
        async fn fetch_question(&self, _: Option<CategoryId>) -> Result<Question, FetchError> {
            Err(FetchError::Network("unreachable".into()))
        }

        async fn fetch_categories(&self) -> Result<Vec<Category>, FetchError> {
            Err(FetchError::Network("unreachable".into()))
        }
    }

    struct Empty;

    #[async_trait]
    impl QuestionSource for Empty {
        async fn fetch_question(&self, _: Option<CategoryId>) -> Result<Question, FetchError> {
            Err(FetchError::Malformed("empty".into()))
        }

        async fn fetch_categories(&self) -> Result<Vec<Category>, FetchError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn load_categories_falls_back_on_error() {
        assert_eq!(load_categories(&Unreachable).await, builtin_categories());
    }

    #[tokio::test]
    async fn load_categories_falls_back_on_empty_list() {
        assert_eq!(load_categories(&Empty).await, builtin_categories());
    }
}
