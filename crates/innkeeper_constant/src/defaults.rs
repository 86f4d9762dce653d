//! Defaults for fetching, generation and export.

/// Hotel site used when no URL is supplied.
pub const HOTEL_URL: &str = "https://sriraghavendrahotel.com/";

pub const MODEL: &str = "llama-3.1-8b-instant";

/// Excerpts are cut to this many characters. Hard cut, may split a word.
pub const EXCERPT_CHAR_LIMIT: usize = 4000;
pub const FETCH_TIMEOUT_SECS: u64 = 10;
/// A failed fetch is not retried until this many seconds have passed.
pub const REFETCH_COOLDOWN_SECS: u64 = 5;

pub const MAX_OUTPUT_TOKENS: u32 = 500;
pub const TEMPERATURE: f32 = 0.7;
pub const TOP_P: f32 = 1.0;

/// Leading word of every user-visible failure message.
pub const ERROR_MARKER: &str = "Error";

/// Instruction text; the excerpt is appended verbatim.
pub const SYSTEM_INSTRUCTION: &str =
    "You are a helpful assistant answering questions based on the following hotel information:\n";

pub const EXPORT_FILE_PREFIX: &str = "hotel_chat_export_";
pub const EXPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";
