mod config;
mod game_session;

pub use config::{
    APP_NAME, ConfigError, load_or_default, load_settings, parse_settings, settings_path, store,
    validate,
};
pub use game_session::GameSession;
