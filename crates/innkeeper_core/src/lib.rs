pub mod error;
pub mod excerpt;
pub mod export;
pub mod session;
pub mod turn;

pub use error::{InnkeeperError, Result};
pub use excerpt::Excerpt;
pub use export::{export_file_name, render_transcript, Transcript};
pub use session::{Session, SessionId, SessionStatus};
pub use turn::{Role, Turn};
