pub mod favorites;
pub mod regions;
pub mod vacancies;

pub use favorites::{FavoritesRepository, PgFavoritesRepository};
pub use regions::{PgRegionsRepository, RegionsRepository};
pub use vacancies::{PgVacanciesRepository, VacanciesRepository};
