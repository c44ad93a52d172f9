//! Roadblock handlers

mod handler;
pub mod request;
pub mod response;


pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    middleware,
    routing::get,
    Router,
};

use crate::{
    middleware::auth::{api_key_middleware, auth_middleware},
    state::AppState,
};

/// Roadblock routes
///
/// The network endpoint is public behind the shared API key; everything
/// else needs a bearer token.
pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/network/{network}", get(handler::select_roadblock))
        .route_layer(middleware::from_fn_with_state(state.clone(), api_key_middleware));

    let admin = Router::new()
        .route(
            "/",
            get(handler::list_roadblocks).post(handler::create_roadblock),
        )
        .route(
            "/{id}",
            get(handler::get_roadblock)
                .put(handler::update_roadblock)
                .delete(handler::delete_roadblock),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(admin)
}
