//! Store tests against a live Postgres. Run with a `DATABASE_URL`
//! pointing at a migratable database:
//! `cargo test -- --ignored`

use std::env;

use vacancy_aggregator::models::vacancy::NewVacancy;
use vacancy_aggregator::repositories::{PgVacanciesRepository, VacanciesRepository};

async fn setup_pool() -> sqlx::PgPool {
    dotenvy::dotenv().ok();
    let url = env::var("DATABASE_URL").expect("DATABASE_URL");
    let pool = sqlx::PgPool::connect(&url).await.expect("pool");
    sqlx::migrate!("./migrations").run(&pool).await.expect("migrations");
    pool
}

fn new_vacancy(vacancy_id: &str, location: &str) -> NewVacancy {
    NewVacancy {
        vacancy_id: vacancy_id.to_string(),
        location: location.to_string(),
        name: "Оператор".to_string(),
        description: "Приём звонков.".to_string(),
        salary: "от 30000".to_string(),
        vacancy_url: "https://example.com/1".to_string(),
        vacancy_source: "hh".to_string(),
        employer_name: "Компания".to_string(),
        employer_location: location.to_string(),
        employer_phone: "+7".to_string(),
        employer_code: "1455".to_string(),
        experience_required: "Нет опыта".to_string(),
        category: "Оператор".to_string(),
        employment_type: "Полная занятость".to_string(),
        schedule: "Полный день".to_string(),
    }
}

#[tokio::test]
#[ignore = "needs a live Postgres via DATABASE_URL"]
async fn replace_deletes_the_old_generation_before_inserting() {
    let pool = setup_pool().await;
    let repository = PgVacanciesRepository::new(pool);
    let location = "Замещенск";

    repository
        .replace_for_location(location, vec![new_vacancy("1", location), new_vacancy("2", location)])
        .await
        .expect("first generation");

    // vacancy_id "2" recurs: the unique (location, source, id) key
    // would reject the insert if the old rows were still present
    repository
        .replace_for_location(location, vec![new_vacancy("2", location), new_vacancy("3", location)])
        .await
        .expect("second generation");

    assert_eq!(repository.count_for_location(location).await.unwrap(), 2);
    let rows = repository.list_for_location(location, 1, 10).await.unwrap();
    let ids: Vec<&str> = rows.iter().map(|row| row.vacancy_id.as_str()).collect();
    assert_eq!(ids, ["2", "3"]);
}

#[tokio::test]
#[ignore = "needs a live Postgres via DATABASE_URL"]
async fn replace_with_an_empty_generation_only_deletes() {
    let pool = setup_pool().await;
    let repository = PgVacanciesRepository::new(pool);
    let location = "Опустевск";

    repository
        .replace_for_location(location, vec![new_vacancy("1", location)])
        .await
        .expect("seed generation");
    repository
        .replace_for_location(location, Vec::new())
        .await
        .expect("empty generation");

    assert_eq!(repository.count_for_location(location).await.unwrap(), 0);
}
