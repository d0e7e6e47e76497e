//! Book (lendable catalog record) model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Book as stored in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    /// Branch (library location or section) holding the book
    pub branch: String,
    /// Cover image reference
    pub image: Option<String>,
    pub description: Option<String>,
    /// Available units
    pub quantity: i32,
    /// Loan duration in days
    pub max_days: i32,
}

impl Book {
    pub fn is_available(&self) -> bool {
        self.quantity > 0
    }
}

/// Catalog lookup by branch with an optional text query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookQuery {
    pub branch: String,
    pub query: Option<String>,
}

impl BookQuery {
    /// Build a query, treating a blank search string as absent
    pub fn new(branch: impl Into<String>, query: Option<String>) -> Self {
        let query = query
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());
        Self {
            branch: branch.into(),
            query,
        }
    }
}

/// Query string of the branch listing endpoint
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BranchBooksParams {
    /// Text searched in title and description
    pub query: Option<String>,
}
