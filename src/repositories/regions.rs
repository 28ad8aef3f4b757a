use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Result;
use crate::models::region::Region;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegionsRepository: Send + Sync {
    /// Lookup by the trudvsem region code, the code callers pass in.
    async fn get_by_code_tv(&self, code_tv: &str) -> Result<Option<Region>>;
}

#[derive(Clone)]
pub struct PgRegionsRepository {
    pool: PgPool,
}

impl PgRegionsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegionsRepository for PgRegionsRepository {
    async fn get_by_code_tv(&self, code_tv: &str) -> Result<Option<Region>> {
        let region = sqlx::query_as::<_, Region>(
            "SELECT id, name, code_tv, code_hh, federal_district_code \
             FROM regions WHERE code_tv = $1",
        )
        .bind(code_tv)
        .fetch_optional(&self.pool)
        .await?;
        Ok(region)
    }
}
