// src/lib.rs

use axum::{
    routing::{get, post},
    Router,
};
use services::lifecycle::LifecycleScheduler;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub scheduler: LifecycleScheduler,
}

pub mod entities {
    pub mod prelude;
    pub mod auctions;
}

pub mod services {
    pub mod auction_store;
    pub mod memory_store;
    pub mod lifecycle;
}

pub mod jobs {
    pub mod auction_recovery;
}

pub mod models {
    pub mod auction;
}

pub mod handlers {
    pub mod auction;
}

pub mod config;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/auction", post(handlers::auction::create_auction))
        .route("/auction/{id}", get(handlers::auction::get_auction))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
