//! Wire shapes of the two job-board APIs. Everything the vendor may
//! omit is an `Option` with a serde default; the parsers decide what a
//! missing field means. These structs are ephemeral and never persisted.

use serde::{Deserialize, Serialize};

// --- hh.ru ---

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HhListingPage {
    pub items: Vec<HhVacancy>,
    pub pages: u32,
    pub page: u32,
    pub found: u64,
}

/// One hh.ru vacancy. Listing items carry `snippet`, detail responses
/// carry `description` and richer `contacts`; the rest is shared.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HhVacancy {
    pub id: Option<String>,
    pub name: Option<String>,
    pub alternate_url: Option<String>,
    pub archived: Option<bool>,
    pub salary: Option<HhSalary>,
    pub employer: Option<HhEmployer>,
    pub area: Option<HhArea>,
    pub address: Option<HhAddress>,
    pub snippet: Option<HhSnippet>,
    pub experience: Option<HhNamed>,
    pub professional_roles: Vec<HhNamed>,
    pub employment: Option<HhNamed>,
    pub schedule: Option<HhNamed>,
    pub contacts: Option<HhContacts>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HhSalary {
    pub from: Option<i64>,
    pub to: Option<i64>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HhEmployer {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HhArea {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HhAddress {
    pub raw: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HhSnippet {
    pub requirement: Option<String>,
    pub responsibility: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HhNamed {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HhContacts {
    pub email: Option<String>,
    pub phones: Vec<HhPhone>,
}

/// Listings expose `formatted`, detail responses expose `number`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HhPhone {
    pub formatted: Option<String>,
    pub number: Option<String>,
}

// --- trudvsem.ru ---

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TvListingResponse {
    pub meta: TvMeta,
    pub results: TvResults,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TvMeta {
    pub total: u64,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TvResults {
    pub vacancies: Vec<TvVacancyEnvelope>,
}

/// trudvsem wraps every listing item in a `{"vacancy": {...}}` object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TvVacancyEnvelope {
    pub vacancy: TvVacancy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TvVacancy {
    pub id: Option<String>,
    #[serde(rename = "job-name")]
    pub job_name: Option<String>,
    pub vac_url: Option<String>,
    pub salary: Option<String>,
    pub duty: Option<String>,
    pub employment: Option<String>,
    pub schedule: Option<String>,
    pub social_protected: Option<String>,
    pub contact_person: Option<String>,
    pub company: Option<TvCompany>,
    pub category: Option<TvCategory>,
    pub requirement: Option<TvRequirement>,
    pub addresses: Option<TvAddresses>,
    pub contact_list: Vec<TvContact>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TvCompany {
    pub companycode: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TvCategory {
    pub specialisation: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TvRequirement {
    pub education: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TvAddresses {
    pub address: Vec<TvAddress>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TvAddress {
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TvContact {
    pub contact_type: Option<String>,
    pub contact_value: Option<String>,
}
