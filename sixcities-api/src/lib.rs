use axum::{http::Method, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod container;
pub mod controller;
pub mod error;
pub mod extract;
pub mod offers;
pub mod rdo;

pub use container::{connect_offer_model, create_offer_container, OfferContainer};
pub use controller::Controller;

pub fn app(container: &OfferContainer) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .nest("/offers", container.controller.clone().router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
