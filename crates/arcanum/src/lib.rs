pub mod errors;
pub mod models;
pub mod providers;
pub mod reply;
pub mod stream;
