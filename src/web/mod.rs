pub mod pages;
pub mod routes;

pub use routes::{create_router, AppState, PredictForm};
