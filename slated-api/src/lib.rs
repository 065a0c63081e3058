use axum::{http::Method, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod appointments;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod state;
pub mod validate;
pub mod worker;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    Router::new()
        .merge(appointments::routes())
        .merge(dashboard::routes())
        .merge(events::routes())
        .merge(validate::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
