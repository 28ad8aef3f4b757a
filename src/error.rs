use http::StatusCode;

use crate::models::vacancy::VacancySource;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid location name '{location}': {details}")]
    LocationInvalid { location: String, details: String },

    #[error("No region data found for code '{region_code}'")]
    RegionNotFound { region_code: String },

    #[error("API request to '{vendor}' failed. URL: {url}. Details: {details}")]
    VendorRequest {
        vendor: VacancySource,
        url: String,
        details: String,
    },

    #[error(
        "No vacancies found for region_code='{region_code}', \
         location='{location}' in source '{vendor}'"
    )]
    VacanciesNotFound {
        vendor: VacancySource,
        region_code: String,
        location: String,
    },

    #[error(
        "Vacancy parsing error. Source: {vendor}. Vacancy ID: {vacancy_id}. \
         Employer code: {employer_code}. Details: {details}"
    )]
    Parse {
        vendor: VacancySource,
        vacancy_id: String,
        employer_code: String,
        details: String,
    },

    #[error(
        "Unable to retrieve or process vacancy data from all sources. \
         hh.ru: {hh_details}; trudvsem.ru: {tv_details}"
    )]
    AggregationFailed {
        hh_details: String,
        tv_details: String,
    },

    #[error("No vacancy found for vacancy_id='{vacancy_id}': {details}")]
    VacancyNotFound { vacancy_id: String, details: String },

    #[error("Unknown source '{source_tag}' for vacancy with vacancy_id='{vacancy_id}'")]
    UnknownSource {
        vacancy_id: String,
        source_tag: String,
    },

    #[error("Vacancy '{vacancy_id}' is already in favorites for user {user_id}")]
    AlreadyInFavorites { vacancy_id: String, user_id: i64 },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl Error {
    /// Status the transport layer should answer with. The HTTP host lives
    /// in a separate crate and only sees this mapping, never the variants.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::LocationInvalid { .. } | Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::RegionNotFound { .. }
            | Error::VacanciesNotFound { .. }
            | Error::VacancyNotFound { .. } => StatusCode::NOT_FOUND,
            Error::AlreadyInFavorites { .. } => StatusCode::CONFLICT,
            Error::VendorRequest { .. } | Error::AggregationFailed { .. } => {
                StatusCode::BAD_GATEWAY
            }
            Error::Config(_)
            | Error::Parse { .. }
            | Error::UnknownSource { .. }
            | Error::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::VacancyNotFound {
                vacancy_id: String::new(),
                details: "Resource not found".to_string(),
            },
            other => Error::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_class() {
        let bad_location = Error::LocationInvalid {
            location: "Ижевск1".to_string(),
            details: "numbers".to_string(),
        };
        assert_eq!(bad_location.status_code(), StatusCode::BAD_REQUEST);

        let missing_region = Error::RegionNotFound {
            region_code: "99".to_string(),
        };
        assert_eq!(missing_region.status_code(), StatusCode::NOT_FOUND);

        let duplicate = Error::AlreadyInFavorites {
            vacancy_id: "123".to_string(),
            user_id: 7,
        };
        assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);

        let total_outage = Error::AggregationFailed {
            hh_details: "timeout".to_string(),
            tv_details: "503".to_string(),
        };
        assert_eq!(total_outage.status_code(), StatusCode::BAD_GATEWAY);
    }

    // The vendor tag is payload, not a wrapped error: these variants
    // must render it in the message and never chain a source().
    #[test]
    fn vendor_tag_is_payload_not_a_chained_error() {
        let rejected = Error::VendorRequest {
            vendor: VacancySource::Hh,
            url: "https://api.hh.ru/vacancies".to_string(),
            details: "HTTP status 503".to_string(),
        };
        assert!(std::error::Error::source(&rejected).is_none());
        assert!(rejected.to_string().contains("hh.ru"));

        let unparsed = Error::Parse {
            vendor: VacancySource::Trudvsem,
            vacancy_id: "d2f1a2c0".to_string(),
            employer_code: "1832000000".to_string(),
            details: "missing id".to_string(),
        };
        assert!(std::error::Error::source(&unparsed).is_none());
        assert!(unparsed.to_string().contains("trudvsem.ru"));

        let empty_listing = Error::VacanciesNotFound {
            vendor: VacancySource::Hh,
            region_code: "96".to_string(),
            location: "Ижевск".to_string(),
        };
        assert!(std::error::Error::source(&empty_listing).is_none());

        let unknown = Error::UnknownSource {
            vacancy_id: "55".to_string(),
            source_tag: "superjob".to_string(),
        };
        assert!(std::error::Error::source(&unknown).is_none());
        assert!(unknown.to_string().contains("superjob"));
    }
}
