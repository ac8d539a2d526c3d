pub mod app;
pub mod classify;
pub mod client;
pub mod clock;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use classify::Classifier;
pub use config::Config;
pub use state::AppState;
pub use storage::{load_book, persist_book};
