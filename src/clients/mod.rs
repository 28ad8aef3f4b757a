pub mod hh;
pub mod tv;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::raw::{HhVacancy, TvVacancy, TvVacancyEnvelope};

pub use hh::HhClient;
pub use tv::TvClient;

/// Outcome of a single-item vendor fetch. A vacancy that the vendor no
/// longer knows is a normal answer, not an error; transport and status
/// failures travel through `crate::error::Error` instead.
#[derive(Debug, Clone)]
pub enum Fetch<T> {
    Found(T),
    NotFound,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HhGateway: Send + Sync {
    /// All listing pages for a locality, concatenated. Empty means the
    /// vendor answered with no items.
    async fn list_vacancies(&self, location: &str, area_code: &str) -> Result<Vec<HhVacancy>>;

    async fn get_vacancy(&self, vacancy_id: &str) -> Result<Fetch<HhVacancy>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TvGateway: Send + Sync {
    async fn list_vacancies(&self, region_code: &str) -> Result<Vec<TvVacancyEnvelope>>;

    /// trudvsem addresses a single vacancy by the composite
    /// `(employer_code, vacancy_id)` key.
    async fn get_vacancy(&self, employer_code: &str, vacancy_id: &str)
        -> Result<Fetch<TvVacancy>>;
}
