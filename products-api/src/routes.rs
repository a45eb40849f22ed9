//! Router assembly

use axum::{routing::get, Router};

use crate::{
    handlers::{
        create_product, delete_product, get_product, list_products, update_availability,
        update_product,
    },
    health::{health, readiness},
    repository::ProductRepository,
    state::AppState,
};

/// Product routes, relative to the collection path
pub fn products_router<R: ProductRepository>() -> Router<AppState<R>> {
    Router::new()
        .route("/", get(list_products::<R>).post(create_product::<R>))
        .route(
            "/{id}",
            get(get_product::<R>)
                .put(update_product::<R>)
                .patch(update_availability::<R>)
                .delete(delete_product::<R>),
        )
}

/// Full application router: products under `service.base_path`, plus health checks
pub fn app<R: ProductRepository>(state: AppState<R>) -> Router {
    let base_path = normalize_base_path(&state.config().service.base_path);

    let checks = Router::new()
        .route("/health", get(health::<R>))
        .route("/ready", get(readiness::<R>));

    // axum cannot nest at the root
    let router = match base_path {
        Some(path) => checks.nest(&path, products_router::<R>()),
        None => checks.merge(products_router::<R>()),
    };

    router.with_state(state)
}

/// Leading slash, no trailing slash; `None` for the root
fn normalize_base_path(path: &str) -> Option<String> {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(format!("/{}", trimmed))
    }
}
