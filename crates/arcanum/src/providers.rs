pub mod base;
pub mod catalog;
pub mod configs;
pub mod groq;
pub mod utils;
