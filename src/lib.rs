pub mod analytics;
pub mod app;
pub mod config;
pub mod csv_export;
pub mod errors;
pub mod handlers;
pub mod history;
pub mod models;
pub mod state;
pub mod storage;
pub mod ui;
pub mod users;
pub mod wheel;
pub mod workspace;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::{load_data, persist_data};
pub use workspace::Workspace;
