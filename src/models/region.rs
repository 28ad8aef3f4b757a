use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Reference row mapping one region to its code on each job board.
/// Loading this table is owned by an external tool; the engine only
/// resolves codes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Region {
    pub id: i64,
    pub name: String,
    pub code_tv: String,
    pub code_hh: String,
    pub federal_district_code: String,
}
