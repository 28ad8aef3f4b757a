use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};
use tracing::debug;

use crate::error::Result;
use crate::models::vacancy::{NewVacancy, Vacancy};

const VACANCY_COLUMNS: &str = "id, vacancy_id, location, name, description, salary, \
     vacancy_url, vacancy_source, employer_name, employer_location, employer_phone, \
     employer_code, experience_required, category, employment_type, schedule, created_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VacanciesRepository: Send + Sync {
    /// Replace-sync: drop the locality's previous generation, then
    /// insert the new one. Runs as a single transaction so a reader
    /// never sees a mixed generation.
    async fn replace_for_location(&self, location: &str, vacancies: Vec<NewVacancy>)
        -> Result<()>;

    async fn count_for_location(&self, location: &str) -> Result<i64>;

    async fn list_for_location(
        &self,
        location: &str,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<Vacancy>>;

    async fn get_by_vacancy_id(&self, vacancy_id: &str) -> Result<Option<Vacancy>>;
}

#[derive(Clone)]
pub struct PgVacanciesRepository {
    pool: PgPool,
}

impl PgVacanciesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VacanciesRepository for PgVacanciesRepository {
    async fn replace_for_location(
        &self,
        location: &str,
        vacancies: Vec<NewVacancy>,
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM vacancies WHERE location = $1")
            .bind(location)
            .execute(&mut *tx)
            .await?;

        if !vacancies.is_empty() {
            let mut builder = QueryBuilder::new(
                "INSERT INTO vacancies (vacancy_id, location, name, description, salary, \
                 vacancy_url, vacancy_source, employer_name, employer_location, \
                 employer_phone, employer_code, experience_required, category, \
                 employment_type, schedule) ",
            );
            builder.push_values(vacancies.iter(), |mut row, vacancy| {
                row.push_bind(&vacancy.vacancy_id)
                    .push_bind(&vacancy.location)
                    .push_bind(&vacancy.name)
                    .push_bind(&vacancy.description)
                    .push_bind(&vacancy.salary)
                    .push_bind(&vacancy.vacancy_url)
                    .push_bind(&vacancy.vacancy_source)
                    .push_bind(&vacancy.employer_name)
                    .push_bind(&vacancy.employer_location)
                    .push_bind(&vacancy.employer_phone)
                    .push_bind(&vacancy.employer_code)
                    .push_bind(&vacancy.experience_required)
                    .push_bind(&vacancy.category)
                    .push_bind(&vacancy.employment_type)
                    .push_bind(&vacancy.schedule);
            });
            builder.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;
        debug!(
            location,
            deleted = deleted.rows_affected(),
            inserted = vacancies.len(),
            "vacancy generation replaced"
        );
        Ok(())
    }

    async fn count_for_location(&self, location: &str) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM vacancies WHERE location = $1",
        )
        .bind(location)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn list_for_location(
        &self,
        location: &str,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<Vacancy>> {
        let query = format!(
            "SELECT {VACANCY_COLUMNS} FROM vacancies WHERE location = $1 \
             ORDER BY id LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, Vacancy>(&query)
            .bind(location)
            .bind(page_size)
            .bind((page - 1) * page_size)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_by_vacancy_id(&self, vacancy_id: &str) -> Result<Option<Vacancy>> {
        let query = format!("SELECT {VACANCY_COLUMNS} FROM vacancies WHERE vacancy_id = $1");
        let row = sqlx::query_as::<_, Vacancy>(&query)
            .bind(vacancy_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}
