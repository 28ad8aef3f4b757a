use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;
use tracing::{debug, warn};

use crate::clients::{Fetch, TvGateway};
use crate::error::{Error, Result};
use crate::models::raw::{TvListingResponse, TvVacancy, TvVacancyEnvelope};
use crate::models::vacancy::VacancySource;

/// Client for the "Работа России" (trudvsem.ru) open-data API.
#[derive(Clone)]
pub struct TvClient {
    client: Client,
    base_url: String,
}

impl TvClient {
    const PER_PAGE: u64 = 100;
    const SOCIAL_PROTECTED: &'static str = "Инвалид";

    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    // The API's `offset` parameter is a page index, not a row offset.
    fn page_params(&self, page: u64) -> Vec<(String, String)> {
        vec![
            ("social_protected".to_string(), Self::SOCIAL_PROTECTED.to_string()),
            ("limit".to_string(), Self::PER_PAGE.to_string()),
            ("offset".to_string(), page.to_string()),
        ]
    }

    fn page_count(total: u64) -> u64 {
        total.div_ceil(Self::PER_PAGE)
    }

    async fn get_listing(&self, url: &str, params: &[(String, String)]) -> Result<TvListingResponse> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|error| Error::VendorRequest {
                vendor: VacancySource::Trudvsem,
                url: url.to_string(),
                details: error.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%url, %status, %body, "trudvsem.ru request rejected");
            return Err(Error::VendorRequest {
                vendor: VacancySource::Trudvsem,
                url: url.to_string(),
                details: format!("HTTP status {status}"),
            });
        }

        response
            .json::<TvListingResponse>()
            .await
            .map_err(|error| Error::VendorRequest {
                vendor: VacancySource::Trudvsem,
                url: url.to_string(),
                details: format!("invalid response body: {error}"),
            })
    }
}

#[async_trait]
impl TvGateway for TvClient {
    async fn list_vacancies(&self, region_code: &str) -> Result<Vec<TvVacancyEnvelope>> {
        let url = format!("{}/vacancies/region/{}", self.base_url, region_code);

        let first_params = vec![(
            "social_protected".to_string(),
            Self::SOCIAL_PROTECTED.to_string(),
        )];
        let first_page = self.get_listing(&url, &first_params).await?;
        let pages = Self::page_count(first_page.meta.total);
        debug!(
            region_code,
            total = first_page.meta.total,
            pages,
            "trudvsem.ru first listing page received"
        );

        let mut vacancies = first_page.results.vacancies;
        if pages > 1 {
            let pending: Vec<_> = (1..pages)
                .map(|page| {
                    let params = self.page_params(page);
                    let url = url.clone();
                    async move { self.get_listing(&url, &params).await }
                })
                .collect();

            // Same rule as for hh.ru: a lost page invalidates the run.
            for page in join_all(pending).await {
                vacancies.extend(page?.results.vacancies);
            }
        }

        Ok(vacancies)
    }

    async fn get_vacancy(
        &self,
        employer_code: &str,
        vacancy_id: &str,
    ) -> Result<Fetch<TvVacancy>> {
        let url = format!(
            "{}/vacancies/vacancy/{}/{}",
            self.base_url, employer_code, vacancy_id
        );
        debug!(employer_code, vacancy_id, "requesting trudvsem.ru vacancy details");

        let listing = self.get_listing(&url, &[]).await?;
        match listing.results.vacancies.into_iter().next() {
            Some(envelope) => Ok(Fetch::Found(envelope.vacancy)),
            None => Ok(Fetch::NotFound),
        }
    }
}
