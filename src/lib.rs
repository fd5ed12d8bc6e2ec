// Library surface for the binary and for headless/integration tests.
pub mod app;
pub mod app_dirs;
pub mod backend;
pub mod config;
pub mod error;
pub mod game;
pub mod leaderboard;
pub mod logging;
pub mod notice;
pub mod region;
pub mod runtime;
pub mod scene;
pub mod store;
pub mod sync;
pub mod target;
pub mod ui;
pub mod viewport;

pub use error::{HuntError, HuntResult};

/// How often the event loop wakes without input, driving notice expiry.
pub const TICK_RATE_MS: u64 = 100;
