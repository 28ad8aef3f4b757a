use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Tag of the job board a vacancy was loaded from. Stored as-is in the
/// `vacancy_source` column; anything else in that column is treated as
/// an unknown source by the enrichment dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VacancySource {
    Hh,
    Trudvsem,
}

impl VacancySource {
    pub fn tag(&self) -> &'static str {
        match self {
            VacancySource::Hh => "hh",
            VacancySource::Trudvsem => "trudvsem",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "hh" => Some(VacancySource::Hh),
            "trudvsem" => Some(VacancySource::Trudvsem),
            _ => None,
        }
    }
}

impl fmt::Display for VacancySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VacancySource::Hh => write!(f, "hh.ru"),
            VacancySource::Trudvsem => write!(f, "trudvsem.ru"),
        }
    }
}

/// Stored canonical vacancy row. Every text column is NOT NULL: the
/// parsers substitute explicit placeholders for anything the vendor
/// left out, so consumers never branch on nullability.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vacancy {
    pub id: i64,
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
    pub created_at: Option<DateTime<Utc>>,
}

impl Vacancy {
    pub fn source(&self) -> Option<VacancySource> {
        VacancySource::from_tag(&self.vacancy_source)
    }
}

/// Canonical vacancy before it has a database identity; output of the
/// per-vendor parsers and input of the replace-sync insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVacancy {
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

/// Denormalized copy of a vacancy saved by a user. Never mutated by
/// re-enrichment; live data is fetched fresh on read.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FavoriteVacancy {
    pub id: i64,
    pub user_id: i64,
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
    pub created_at: Option<DateTime<Utc>>,
}

impl FavoriteVacancy {
    pub fn source(&self) -> Option<VacancySource> {
        VacancySource::from_tag(&self.vacancy_source)
    }
}
