pub mod api;
pub mod app;
pub mod config;
pub mod controller;
pub mod error;
pub mod file_io;
pub mod logger;
pub mod models;
pub mod quiz;
pub mod session;
pub mod ui;
pub mod utils;
pub mod worker;

// Re-exports for convenience
pub use api::{HttpBackend, QuizQuestion, StudyBackend};
pub use app::App;
pub use config::Config;
pub use controller::StudyToolsController;
pub use error::{BackendError, ConfigError};
pub use models::{BackendResponse, ErrorMessage, Focus, Operation, OperationStatus, PendingRequest, StudyState};
pub use session::{handle_key, insert_text};
pub use ui::draw_app;
pub use worker::{run_request, spawn_request};
