//! Application metadata constants

pub const NAME: &str = "innkeeper";
pub const DISPLAY_NAME: &str = "Hotel Info Chatbot";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = "Ask questions about a hotel, answered from its own website";
pub const USER_AGENT: &str = concat!("innkeeper/", env!("CARGO_PKG_VERSION"));

/// Directory name for innkeeper data (env file, exports)
pub const DATA_DIR: &str = ".innkeeper";
/// Env file inside DATA_DIR
pub const ENV_FILE: &str = "env";
