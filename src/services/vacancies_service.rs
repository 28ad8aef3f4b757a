//! Aggregation pipeline and read paths over the canonical vacancy
//! store. Both vendors are queried in parallel and one vendor failing
//! never cancels the other; only a total failure aborts a search.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::clients::{Fetch, HhGateway, TvGateway};
use crate::dto::vacancy_dto::{
    FavoriteVacanciesPage, VacanciesInfo, VacanciesPage, VacanciesSearchRequest, VacancyDetails,
    VacancyListQuery,
};
use crate::error::{Error, Result};
use crate::models::region::Region;
use crate::models::vacancy::{FavoriteVacancy, NewVacancy, Vacancy, VacancySource};
use crate::repositories::{FavoritesRepository, VacanciesRepository};
use crate::services::location::normalize_location;
use crate::services::parsing::{
    self, parse_hh_details, parse_hh_listing, parse_tv_details, parse_tv_listing,
};
use crate::services::region_service::RegionService;

/// Cap on concurrent vendor calls during favorites batch enrichment.
const ENRICH_CONCURRENCY: usize = 5;

#[derive(Clone)]
pub struct VacanciesService {
    region_service: RegionService,
    vacancies_repository: Arc<dyn VacanciesRepository>,
    favorites_repository: Arc<dyn FavoritesRepository>,
    hh_client: Arc<dyn HhGateway>,
    tv_client: Arc<dyn TvGateway>,
    enrich_limit: Arc<Semaphore>,
}

impl VacanciesService {
    pub fn new(
        region_service: RegionService,
        vacancies_repository: Arc<dyn VacanciesRepository>,
        favorites_repository: Arc<dyn FavoritesRepository>,
        hh_client: Arc<dyn HhGateway>,
        tv_client: Arc<dyn TvGateway>,
    ) -> Self {
        Self {
            region_service,
            vacancies_repository,
            favorites_repository,
            hh_client,
            tv_client,
            enrich_limit: Arc::new(Semaphore::new(ENRICH_CONCURRENCY)),
        }
    }

    /// Normalizes the requested locality and resolves the region row.
    /// Validation failures propagate before any vendor is contacted.
    pub async fn validate_search(
        &self,
        request: &VacanciesSearchRequest,
    ) -> Result<(String, Region)> {
        request.validate()?;
        let location = normalize_location(&request.location)?;
        let region = self.region_service.get_region_by_code(&request.region_code).await?;
        Ok((location, region))
    }

    /// Runs one aggregation cycle: fetch both vendors, parse, and
    /// replace the locality's stored generation. Returns the per-source
    /// counts and failure flags of this run.
    #[instrument(skip(self))]
    pub async fn search(&self, request: VacanciesSearchRequest) -> Result<VacanciesInfo> {
        let (location, region) = self.validate_search(&request).await?;

        let (hh_result, tv_result) = tokio::join!(
            self.fetch_hh(&location, &region),
            self.fetch_tv(&location, &region),
        );

        if let (Err(hh_error), Err(tv_error)) = (&hh_result, &tv_result) {
            return Err(Error::AggregationFailed {
                hh_details: hh_error.to_string(),
                tv_details: tv_error.to_string(),
            });
        }

        let error_request_hh = hh_result.is_err();
        let error_request_tv = tv_result.is_err();
        if let Err(error) = &hh_result {
            warn!(%error, location, "hh.ru fetch failed, continuing with trudvsem.ru");
        }
        if let Err(error) = &tv_result {
            warn!(%error, location, "trudvsem.ru fetch failed, continuing with hh.ru");
        }

        let hh_vacancies = hh_result.unwrap_or_default();
        let tv_vacancies = tv_result.unwrap_or_default();
        let vacancies_count_hh = hh_vacancies.len();
        let vacancies_count_tv = tv_vacancies.len();

        let mut combined = hh_vacancies;
        combined.extend(tv_vacancies);
        let all_vacancies_count = combined.len();

        self.vacancies_repository
            .replace_for_location(&location, combined)
            .await?;
        info!(
            location,
            all_vacancies_count, vacancies_count_hh, vacancies_count_tv, "aggregation finished"
        );

        Ok(VacanciesInfo {
            all_vacancies_count,
            vacancies_count_hh,
            vacancies_count_tv,
            error_request_hh,
            error_request_tv,
            location,
            region_name: region.name,
        })
    }

    async fn fetch_hh(&self, location: &str, region: &Region) -> Result<Vec<NewVacancy>> {
        let items = self.hh_client.list_vacancies(location, &region.code_hh).await?;
        if items.is_empty() {
            return Err(Error::VacanciesNotFound {
                vendor: VacancySource::Hh,
                region_code: region.code_hh.clone(),
                location: location.to_string(),
            });
        }
        parse_hh_listing(&items, location)
    }

    async fn fetch_tv(&self, location: &str, region: &Region) -> Result<Vec<NewVacancy>> {
        let envelopes = self.tv_client.list_vacancies(&region.code_tv).await?;
        if envelopes.is_empty() {
            return Err(Error::VacanciesNotFound {
                vendor: VacancySource::Trudvsem,
                region_code: region.code_tv.clone(),
                location: location.to_string(),
            });
        }
        parse_tv_listing(&envelopes, location)
    }

    /// Stored vacancies of a locality, paginated. The count runs first
    /// so an empty locality answers without a second query.
    #[instrument(skip(self, query))]
    pub async fn list_by_location(
        &self,
        location: &str,
        query: VacancyListQuery,
    ) -> Result<VacanciesPage> {
        query.validate()?;
        let location = normalize_location(location)?;

        let total = self.vacancies_repository.count_for_location(&location).await?;
        if total == 0 {
            return Ok(VacanciesPage {
                total,
                page: query.page,
                page_size: query.page_size,
                items: Vec::new(),
            });
        }

        let rows = self
            .vacancies_repository
            .list_for_location(&location, query.page, query.page_size)
            .await?;
        Ok(VacanciesPage {
            total,
            page: query.page,
            page_size: query.page_size,
            items: rows.into_iter().map(Into::into).collect(),
        })
    }

    /// Fresh detail view of a stored vacancy, parsed from the owning
    /// vendor on every call.
    #[instrument(skip(self))]
    pub async fn vacancy_details(&self, vacancy_id: &str) -> Result<VacancyDetails> {
        let stored = self.get_vacancy_by_id(vacancy_id).await?;
        match stored.source() {
            Some(VacancySource::Hh) => self.details_hh(&stored.vacancy_id).await,
            Some(VacancySource::Trudvsem) => {
                self.details_tv(&stored.employer_code, &stored.vacancy_id).await
            }
            None => Err(Error::UnknownSource {
                vacancy_id: stored.vacancy_id,
                source_tag: stored.vacancy_source,
            }),
        }
    }

    /// The stored row as the last aggregation run left it.
    pub async fn get_vacancy_by_id(&self, vacancy_id: &str) -> Result<Vacancy> {
        let stored = self.vacancies_repository.get_by_vacancy_id(vacancy_id).await?;
        stored.ok_or_else(|| Error::VacancyNotFound {
            vacancy_id: vacancy_id.to_string(),
            details: "The vacancy is not present in the stored search results.".to_string(),
        })
    }

    async fn details_hh(&self, vacancy_id: &str) -> Result<VacancyDetails> {
        match self.hh_client.get_vacancy(vacancy_id).await? {
            Fetch::Found(vacancy) => parse_hh_details(&vacancy),
            Fetch::NotFound => Err(Error::VacancyNotFound {
                vacancy_id: vacancy_id.to_string(),
                details: "Could not find vacancy details on the external source (hh.ru)."
                    .to_string(),
            }),
        }
    }

    async fn details_tv(&self, employer_code: &str, vacancy_id: &str) -> Result<VacancyDetails> {
        match self.tv_client.get_vacancy(employer_code, vacancy_id).await? {
            Fetch::Found(vacancy) => parse_tv_details(&vacancy),
            Fetch::NotFound => Err(Error::VacancyNotFound {
                vacancy_id: vacancy_id.to_string(),
                details: "Could not find vacancy details on the external source (trudvsem.ru)."
                    .to_string(),
            }),
        }
    }

    /// Copies a stored vacancy into the user's favorites.
    #[instrument(skip(self))]
    pub async fn add_to_favorites(&self, user_id: i64, vacancy_id: &str) -> Result<()> {
        let stored = self.get_vacancy_by_id(vacancy_id).await?;
        self.favorites_repository.add(user_id, stored).await
    }

    #[instrument(skip(self))]
    pub async fn remove_from_favorites(&self, user_id: i64, vacancy_id: &str) -> Result<()> {
        let removed = self.favorites_repository.remove(user_id, vacancy_id).await?;
        if !removed {
            return Err(Error::VacancyNotFound {
                vacancy_id: vacancy_id.to_string(),
                details: "The specified vacancy was not found in the user's favorites."
                    .to_string(),
            });
        }
        Ok(())
    }

    /// The user's favorites page, re-enriched from the vendors. One
    /// detail entry comes back for every stored favorite on the page:
    /// items that cannot be refreshed degrade to the stored copy with
    /// status `not_found` instead of dropping out.
    #[instrument(skip(self, query))]
    pub async fn favorites(&self, user_id: i64, query: VacancyListQuery)
        -> Result<FavoriteVacanciesPage> {
        query.validate()?;

        let total = self.favorites_repository.count_for_user(user_id).await?;
        if total == 0 {
            return Ok(FavoriteVacanciesPage {
                total,
                page: query.page,
                page_size: query.page_size,
                items: Vec::new(),
            });
        }

        let rows = self
            .favorites_repository
            .list_for_user(user_id, query.page, query.page_size)
            .await?;
        let items = join_all(rows.iter().map(|row| self.enrich_favorite(row))).await;

        Ok(FavoriteVacanciesPage {
            total,
            page: query.page,
            page_size: query.page_size,
            items,
        })
    }

    async fn enrich_favorite(&self, row: &FavoriteVacancy) -> VacancyDetails {
        let _permit = match self.enrich_limit.acquire().await {
            Ok(permit) => permit,
            Err(_) => return row.as_details(parsing::STATUS_NOT_FOUND),
        };
        match self.fresh_favorite_details(row).await {
            Ok(details) => details,
            Err(error) => {
                warn!(
                    %error,
                    vacancy_id = row.vacancy_id,
                    "favorite enrichment failed, answering with the stored copy"
                );
                row.as_details(parsing::STATUS_NOT_FOUND)
            }
        }
    }

    async fn fresh_favorite_details(&self, row: &FavoriteVacancy) -> Result<VacancyDetails> {
        match row.source() {
            Some(VacancySource::Hh) => self.details_hh(&row.vacancy_id).await,
            Some(VacancySource::Trudvsem) => {
                self.details_tv(&row.employer_code, &row.vacancy_id).await
            }
            None => Err(Error::UnknownSource {
                vacancy_id: row.vacancy_id.clone(),
                source_tag: row.vacancy_source.clone(),
            }),
        }
    }
}
