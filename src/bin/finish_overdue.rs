use dotenvy::dotenv;
use sqlx::sqlite::SqlitePoolOptions;
use std::env;

use matchup::notifications::LogSink;
use matchup::services::{lifecycle_service, now_iso};

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = SqlitePoolOptions::new()
        .connect(&db_url)
        .await
        .expect("cannot connect to database");

    match lifecycle_service::finish_overdue(&pool, &LogSink, &now_iso()).await {
        Ok(report) => {
            println!(
                "overdue sweep: candidates={}, finished={}",
                report.candidates, report.finished
            );
        }
        Err(e) => {
            eprintln!("overdue sweep failed: {}", e);
            std::process::exit(1);
        }
    }
}
