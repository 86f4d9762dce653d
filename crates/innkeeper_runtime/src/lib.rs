pub mod completion;
pub mod config;
pub mod error;
pub mod extract;
pub mod runtime;


pub use completion::{CompletionClient, GenerationParams};
pub use config::{LlmProvider, RuntimeConfig};
pub use error::{Result, RuntimeError};
pub use extract::{HttpExtractor, PageExtractor};
pub use runtime::Runtime;
