use async_trait::async_trait;
use futures::future::join_all;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::clients::{Fetch, HhGateway};
use crate::error::{Error, Result};
use crate::models::raw::{HhListingPage, HhVacancy};
use crate::models::vacancy::VacancySource;

/// Client for the hh.ru vacancies API. Listing requests always carry
/// the accessibility label, matching what the aggregation serves.
#[derive(Clone)]
pub struct HhClient {
    client: Client,
    base_url: String,
    access_token: String,
}

impl HhClient {
    const PER_PAGE: u32 = 100;
    const FIRST_PAGE: u32 = 0;
    const SOCIAL_PROTECTED_LABEL: &'static str = "accept_handicapped";

    pub fn new(client: Client, base_url: String, access_token: String) -> Self {
        Self {
            client,
            base_url,
            access_token,
        }
    }

    fn listing_params(&self, page: u32, area_code: &str, location: &str) -> Vec<(String, String)> {
        vec![
            ("page".to_string(), page.to_string()),
            ("per_page".to_string(), Self::PER_PAGE.to_string()),
            ("area".to_string(), area_code.to_string()),
            ("text".to_string(), location.to_string()),
            ("label".to_string(), Self::SOCIAL_PROTECTED_LABEL.to_string()),
        ]
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<T> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .query(params)
            .send()
            .await
            .map_err(|error| Error::VendorRequest {
                vendor: VacancySource::Hh,
                url: url.to_string(),
                details: error.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%url, %status, %body, "hh.ru request rejected");
            return Err(Error::VendorRequest {
                vendor: VacancySource::Hh,
                url: url.to_string(),
                details: format!("HTTP status {status}"),
            });
        }

        response.json::<T>().await.map_err(|error| Error::VendorRequest {
            vendor: VacancySource::Hh,
            url: url.to_string(),
            details: format!("invalid response body: {error}"),
        })
    }
}

#[async_trait]
impl HhGateway for HhClient {
    async fn list_vacancies(&self, location: &str, area_code: &str) -> Result<Vec<HhVacancy>> {
        let url = format!("{}/vacancies", self.base_url);

        let first_page: HhListingPage = self
            .get_json(&url, &self.listing_params(Self::FIRST_PAGE, area_code, location))
            .await?;
        debug!(
            location,
            area_code,
            pages = first_page.pages,
            found = first_page.found,
            "hh.ru first listing page received"
        );

        let mut items = first_page.items;
        if first_page.pages > 1 {
            let pending: Vec<_> = (1..first_page.pages)
                .map(|page| {
                    let params = self.listing_params(page, area_code, location);
                    let url = url.clone();
                    async move { self.get_json::<HhListingPage>(&url, &params).await }
                })
                .collect();

            // One failed page fails the whole vendor fetch; a partial
            // snapshot must never reach the replace-sync.
            for page in join_all(pending).await {
                items.extend(page?.items);
            }
        }

        Ok(items)
    }

    async fn get_vacancy(&self, vacancy_id: &str) -> Result<Fetch<HhVacancy>> {
        let url = format!("{}/vacancies/{}", self.base_url, vacancy_id);
        debug!(vacancy_id, "requesting hh.ru vacancy details");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|error| Error::VendorRequest {
                vendor: VacancySource::Hh,
                url: url.clone(),
                details: error.to_string(),
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Fetch::NotFound);
        }
        let status = response.status();
        if !status.is_success() {
            return Err(Error::VendorRequest {
                vendor: VacancySource::Hh,
                url,
                details: format!("HTTP status {status}"),
            });
        }

        let vacancy = response
            .json::<HhVacancy>()
            .await
            .map_err(|error| Error::VendorRequest {
                vendor: VacancySource::Hh,
                url,
                details: format!("invalid response body: {error}"),
            })?;
        Ok(Fetch::Found(vacancy))
    }
}
