//! Общие помощники для тестов: временная БД, фиксированные часы, запуск сервера

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use contracts::domain::a001_coin::CoinDto;
use contracts::enums::{NumismaticRarity, OptionConservation};
use sea_orm::DatabaseConnection;
use tempfile::TempDir;

use crate::shared::data::db::initialize_database;
use crate::system::audit::AuditorProvider;
use crate::system::state::AppState;

/// Аудитор с фиксированным временем
#[derive(Debug, Clone)]
pub struct FixedAuditor {
    actor: String,
    now: DateTime<Utc>,
}

impl FixedAuditor {
    pub fn new(actor: &str) -> Self {
        Self {
            actor: actor.to_string(),
            now: Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap(),
        }
    }

    pub fn advanced_days(mut self, days: i64) -> Self {
        self.now += Duration::days(days);
        self
    }
}

impl AuditorProvider for FixedAuditor {
    fn current_auditor(&self) -> String {
        self.actor.clone()
    }

    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

/// Пустая БД во временном каталоге. Каталог живёт, пока жив `TempDir`.
pub async fn temp_db() -> (TempDir, DatabaseConnection) {
    let dir = tempfile::tempdir().unwrap();
    let db = initialize_database(&dir.path().join("test.db")).await.unwrap();
    (dir, db)
}

pub fn sample_coin(name: &str, year: i32, material: &str, price: f64) -> CoinDto {
    CoinDto {
        name: name.into(),
        year,
        material: material.into(),
        weight: 5.0,
        diameter: 23.0,
        height: 1.5,
        price,
        conservation_obverse: Some(OptionConservation::BB),
        conservation_reverse: Some(OptionConservation::qBB),
        degree: Some(NumismaticRarity::C),
        ..CoinDto::default()
    }
}

/// Поднять приложение на случайном порту, вернуть базовый URL
pub async fn spawn_app() -> (TempDir, String) {
    let (dir, db) = temp_db().await;
    let state = AppState::new(db, Arc::new(FixedAuditor::new("tester")));
    let app = crate::routes::configure_routes(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (dir, format!("http://{}", addr))
}
