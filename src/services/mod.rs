pub mod location;
pub mod parsing;
pub mod region_service;
pub mod vacancies_service;

pub use region_service::RegionService;
pub use vacancies_service::VacanciesService;
