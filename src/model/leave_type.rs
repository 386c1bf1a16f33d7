use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct LeaveType {
    #[schema(example = "annual")]
    pub code: String,
    #[schema(example = "Annual Leave")]
    pub name: String,
    #[schema(example = "green", nullable = true)]
    pub color: Option<String>,
}
