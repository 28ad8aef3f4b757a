use async_trait::async_trait;
use sqlx::PgPool;
use tracing::warn;

use crate::error::{Error, Result};
use crate::models::vacancy::{FavoriteVacancy, Vacancy};

const FAVORITE_COLUMNS: &str = "id, user_id, vacancy_id, location, name, description, \
     salary, vacancy_url, vacancy_source, employer_name, employer_location, \
     employer_phone, employer_code, experience_required, category, employment_type, \
     schedule, created_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoritesRepository: Send + Sync {
    /// Copies the stored vacancy into the user's favorites. A second
    /// add of the same `(user, vacancy)` pair is rejected by the unique
    /// constraint and surfaces as `AlreadyInFavorites`.
    async fn add(&self, user_id: i64, vacancy: Vacancy) -> Result<()>;

    /// Returns whether a row was actually removed.
    async fn remove(&self, user_id: i64, vacancy_id: &str) -> Result<bool>;

    async fn count_for_user(&self, user_id: i64) -> Result<i64>;

    async fn list_for_user(
        &self,
        user_id: i64,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<FavoriteVacancy>>;
}

#[derive(Clone)]
pub struct PgFavoritesRepository {
    pool: PgPool,
}

impl PgFavoritesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoritesRepository for PgFavoritesRepository {
    async fn add(&self, user_id: i64, vacancy: Vacancy) -> Result<()> {
        let result = sqlx::query(
            "INSERT INTO favorite_vacancies (user_id, vacancy_id, location, name, \
             description, salary, vacancy_url, vacancy_source, employer_name, \
             employer_location, employer_phone, employer_code, experience_required, \
             category, employment_type, schedule) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)",
        )
        .bind(user_id)
        .bind(&vacancy.vacancy_id)
        .bind(&vacancy.location)
        .bind(&vacancy.name)
        .bind(&vacancy.description)
        .bind(&vacancy.salary)
        .bind(&vacancy.vacancy_url)
        .bind(&vacancy.vacancy_source)
        .bind(&vacancy.employer_name)
        .bind(&vacancy.employer_location)
        .bind(&vacancy.employer_phone)
        .bind(&vacancy.employer_code)
        .bind(&vacancy.experience_required)
        .bind(&vacancy.category)
        .bind(&vacancy.employment_type)
        .bind(&vacancy.schedule)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_error)) if db_error.is_unique_violation() => {
                Err(Error::AlreadyInFavorites {
                    vacancy_id: vacancy.vacancy_id,
                    user_id,
                })
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn remove(&self, user_id: i64, vacancy_id: &str) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM favorite_vacancies WHERE user_id = $1 AND vacancy_id = $2",
        )
        .bind(user_id)
        .bind(vacancy_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            warn!(user_id, vacancy_id, "attempt to remove a favorite that does not exist");
            return Ok(false);
        }
        Ok(true)
    }

    async fn count_for_user(&self, user_id: i64) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM favorite_vacancies WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn list_for_user(
        &self,
        user_id: i64,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<FavoriteVacancy>> {
        let query = format!(
            "SELECT {FAVORITE_COLUMNS} FROM favorite_vacancies WHERE user_id = $1 \
             ORDER BY id LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, FavoriteVacancy>(&query)
            .bind(user_id)
            .bind(page_size)
            .bind((page - 1) * page_size)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
