use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vacancy::{FavoriteVacancy, Vacancy};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VacanciesSearchRequest {
    #[validate(length(min = 1))]
    pub region_code: String,
    #[validate(length(min = 1))]
    pub location: String,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VacancyListQuery {
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: i64,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    pub page_size: i64,
}

impl Default for VacancyListQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

/// Summary of one aggregation run, returned by the search operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacanciesInfo {
    pub all_vacancies_count: usize,
    pub vacancies_count_hh: usize,
    pub vacancies_count_tv: usize,
    pub error_request_hh: bool,
    pub error_request_tv: bool,
    pub location: String,
    pub region_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacancyOut {
    pub vacancy_id: String,
    pub location: String,
    pub name: String,
    pub description: String,
    pub salary: String,
    pub vacancy_url: String,
    pub vacancy_source: String,
    pub employer_name: String,
    pub employer_location: String,
    pub employer_phone: String,
    pub employer_code: String,
    pub experience_required: String,
    pub category: String,
    pub employment_type: String,
    pub schedule: String,
}

impl From<Vacancy> for VacancyOut {
    fn from(row: Vacancy) -> Self {
        Self {
            vacancy_id: row.vacancy_id,
            location: row.location,
            name: row.name,
            description: row.description,
            salary: row.salary,
            vacancy_url: row.vacancy_url,
            vacancy_source: row.vacancy_source,
            employer_name: row.employer_name,
            employer_location: row.employer_location,
            employer_phone: row.employer_phone,
            employer_code: row.employer_code,
            experience_required: row.experience_required,
            category: row.category,
            employment_type: row.employment_type,
            schedule: row.schedule,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacanciesPage {
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub items: Vec<VacancyOut>,
}

/// Detail view parsed fresh from the owning vendor on every call.
/// Richer than the list shape: contact person, employer email and the
/// full employment text only exist here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacancyDetails {
    pub vacancy_id: String,
    pub name: String,
    pub status: String,
    pub vacancy_url: String,
    pub social_protected: String,
    pub vacancy_source: String,
    pub description: String,
    pub employer_location: String,
    pub salary: String,
    pub employer_name: String,
    pub employer_code: String,
    pub employer_phone: String,
    pub employer_email: String,
    pub contact_person: String,
    pub employment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteVacanciesPage {
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub items: Vec<VacancyDetails>,
}

// Keeps the favorite row around for the degraded branch of batch
// enrichment; the stored copy is never mutated.
impl FavoriteVacancy {
    pub fn as_details(&self, status: &str) -> VacancyDetails {
        VacancyDetails {
            vacancy_id: self.vacancy_id.clone(),
            name: self.name.clone(),
            status: status.to_string(),
            vacancy_url: self.vacancy_url.clone(),
            social_protected: crate::services::parsing::SOCIAL_PROTECTED.to_string(),
            vacancy_source: self.vacancy_source.clone(),
            description: self.description.clone(),
            employer_location: self.employer_location.clone(),
            salary: self.salary.clone(),
            employer_name: self.employer_name.clone(),
            employer_code: self.employer_code.clone(),
            employer_phone: self.employer_phone.clone(),
            employer_email: crate::services::parsing::DEFAULT_EMAIL.to_string(),
            contact_person: crate::services::parsing::DEFAULT_NOT_SPECIFIED.to_string(),
            employment: self.employment_type.clone(),
        }
    }
}
