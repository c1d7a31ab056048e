// Export route modules
pub mod models;
pub mod relay;

use axum::Router;
use crate::state::AppState;

// Function to configure all routes
pub fn configure(state: AppState) -> Router {
    Router::new()
        .merge(relay::routes(state))
        .merge(models::routes())
}
