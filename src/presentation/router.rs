use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    ask_hotel_handler, conversational_refine_handler, health_handler, hotel_details_handler,
    hotel_reviews_handler, search_chat_handler, search_chat_stream_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/hotels/search-chat",
            get(search_chat_stream_handler).post(search_chat_handler),
        )
        .route(
            "/api/hotels/conversational-refine",
            post(conversational_refine_handler),
        )
        .route("/api/hotels/{hotel_id}", get(hotel_details_handler))
        .route("/api/hotels/{hotel_id}/reviews", get(hotel_reviews_handler))
        .route("/api/hotels/{hotel_id}/ask", post(ask_hotel_handler))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
