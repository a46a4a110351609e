use axum::{
    Router,
    routing::{delete, get, post, put},
};

use std::{env, sync::Arc};

use tower_http::trace::TraceLayer;

use notes_api::handlers::rest;
use notes_api::models::Note;
use notes_api::repository::PgRepository;
use notes_api::service::NoteService;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Fetch env variables
    let database_dsn =
        env::var("PG_DSN").expect("database dsn must be provided as an ENV variable");

    // Repository creation and migration
    let repo = PgRepository::<Note>::connect(database_dsn)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to establish database connection: {e}");
            panic!("failed to establish database connection: {e}");
        });
    let repo_ptr = Arc::new(tokio::sync::Mutex::new(repo));

    repo_ptr.lock().await.migrate().await.unwrap_or_else(|e| {
        tracing::error!("Failed to migrate database: {e}");
        panic!("failed to migrate database: {e}");
    });

    // Service creation
    let service = Arc::new(NoteService::new(repo_ptr.clone()));

    // Router config
    let app = Router::new()
        .route("/", get(rest::root))
        .route("/api/notes", post(rest::create_note))
        .route("/api/notes", get(rest::get_all_notes))
        .route("/api/notes/{id}", get(rest::get_one_note))
        .route("/api/notes/{id}", put(rest::update_note))
        .route("/api/notes/{id}", delete(rest::delete_note))
        .route("/api-doc/openapi.json", get(rest::openapi))
        .with_state(service)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await.unwrap();

    // Starting router
    tracing::info!("Started listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("failed to start server");
}
