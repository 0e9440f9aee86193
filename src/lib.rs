pub mod aladhan;
pub mod alquran;
pub mod app;
pub mod audio;
pub mod azkar;
pub mod calendar;
pub mod config;
pub mod content;
pub mod dashboard;
pub mod errors;
pub mod hadith;
pub mod handlers;
pub mod misbaha;
pub mod models;
pub mod prayer;
pub mod proxy;
pub mod reader;
pub mod rotation;
pub mod state;
pub mod storage;
pub mod token;
pub mod ui;
pub mod upstream;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::{load_data, resolve_data_path};
