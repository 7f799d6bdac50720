use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use dotenvy::dotenv;
use sqlx::sqlite::SqlitePoolOptions;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use matchup::database::init_schema;
use matchup::notifications::LogSink;
use matchup::web::routes::{activities, users};
use matchup::web::AppState;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt::init();

    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = SqlitePoolOptions::new()
        .connect(&db_url)
        .await
        .expect("cannot connect to database");

    init_schema(&pool).await.expect("schema init failed");

    let state = AppState {
        pool,
        sink: Arc::new(LogSink),
    };

    let app = Router::new()
        .route("/users", post(users::create_user_handler))
        .route("/users/:user_id", get(users::get_user_handler))
        .route(
            "/users/:user_id/level",
            post(users::update_declared_level_handler),
        )
        .route(
            "/activities",
            get(activities::list_activities_handler).post(activities::create_activity_handler),
        )
        .route(
            "/activities/:activity_id",
            get(activities::get_activity_handler),
        )
        .route(
            "/activities/:activity_id/join",
            post(activities::join_activity_handler),
        )
        .route(
            "/activities/:activity_id/leave",
            post(activities::leave_activity_handler),
        )
        .route(
            "/activities/:activity_id/finish",
            post(activities::finish_activity_handler),
        )
        .route(
            "/activities/:activity_id/feedback",
            post(activities::submit_feedback_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .with_state(state);

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("cannot parse host/port");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!(
                "could not bind {}: {}. Trying fallback {}:{}",
                addr,
                e,
                host,
                port + 1
            );
            let fallback: SocketAddr = format!("{}:{}", host, port + 1)
                .parse()
                .expect("cannot parse fallback");
            tokio::net::TcpListener::bind(fallback)
                .await
                .expect("cannot bind fallback port")
        }
    };

    let bound_addr = listener.local_addr().unwrap();
    println!("server listening on http://{}", bound_addr);

    axum::serve(listener, app).await.unwrap();
}
