use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A captured lead from the public "request our portfolio" form.
/// Insert-only: rows are never mutated after creation.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct PortfolioRequest {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub buyer_or_seller: String,
    pub budget: Option<String>,
    pub preferred_areas: Option<String>,
    pub type_of_home: Option<String>,
    pub timeline: Option<String>,
    pub locale: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}
