use std::sync::Arc;
use tracing::instrument;

use crate::error::{Error, Result};
use crate::models::region::Region;
use crate::repositories::RegionsRepository;

/// Resolves vendor region codes against the reference `regions` table.
#[derive(Clone)]
pub struct RegionService {
    repository: Arc<dyn RegionsRepository>,
}

impl RegionService {
    pub fn new(repository: Arc<dyn RegionsRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn get_region_by_code(&self, code_tv: &str) -> Result<Region> {
        let region = self.repository.get_by_code_tv(code_tv).await?;
        region.ok_or_else(|| Error::RegionNotFound {
            region_code: code_tv.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::regions::MockRegionsRepository;

    fn region() -> Region {
        Region {
            id: 1,
            name: "Удмуртская Республика".to_string(),
            code_tv: "1800000000000".to_string(),
            code_hh: "96".to_string(),
            federal_district_code: "52".to_string(),
        }
    }

    #[tokio::test]
    async fn resolves_a_known_code() {
        let mut repository = MockRegionsRepository::new();
        repository
            .expect_get_by_code_tv()
            .withf(|code| code == "1800000000000")
            .returning(|_| Ok(Some(region())));

        let service = RegionService::new(Arc::new(repository));
        let resolved = service.get_region_by_code("1800000000000").await.unwrap();
        assert_eq!(resolved.code_hh, "96");
    }

    #[tokio::test]
    async fn unknown_code_is_region_not_found() {
        let mut repository = MockRegionsRepository::new();
        repository.expect_get_by_code_tv().returning(|_| Ok(None));

        let service = RegionService::new(Arc::new(repository));
        let error = service.get_region_by_code("9999").await.unwrap_err();
        assert!(matches!(error, Error::RegionNotFound { .. }));
    }
}
