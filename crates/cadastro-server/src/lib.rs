// Cadastro server - JSON API over the registration form engine
// One form per session, seeded from the entry route

pub mod error;
pub mod handlers;
pub mod settings;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};

pub use error::ErrorResponse;
pub use handlers::{BlurRequest, EditRequest, FormView};
pub use state::{AppState, SessionLimits};

/// Build the router. Entry paths live under `/<route_prefix>`.
pub fn router(state: AppState, route_prefix: &str) -> Router {
    let prefix = route_prefix.trim_matches('/');

    Router::new()
        .route(&format!("/{}", prefix), get(handlers::seed_handler))
        .route(&format!("/{}/*rest", prefix), get(handlers::seed_handler))
        .route("/forms/:session/edit", post(handlers::edit_handler))
        .route("/forms/:session/blur", post(handlers::blur_handler))
        .route("/forms/:session/submit", post(handlers::submit_handler))
        .route(
            "/forms/:session/notification/dismiss",
            post(handlers::dismiss_handler),
        )
        .with_state(state)
}
