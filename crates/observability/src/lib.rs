//! innkeeper observability: `tracing` subscriber setup with optional OTLP export.
//!
//! # Quick Start
//!
//! ```no_run
//! use innkeeper_observability::{init, ObservabilityConfig};
//!
//! let config = ObservabilityConfig::new("innkeeper")
//!     .with_log_level("info");
//! init(config)?;
//!
//! // Or from environment variables
//! innkeeper_observability::init_from_env()?;
//!
//! tracing::info!("Service started");
//! # Ok::<(), innkeeper_observability::ObservabilityError>(())
//! ```
//!
//! # Environment Variables
//!
//! - `OTEL_SERVICE_NAME` or `SERVICE_NAME` - Service name
//! - `OTEL_SERVICE_VERSION` or `SERVICE_VERSION` - Service version
//! - `OTEL_EXPORTER_OTLP_ENDPOINT` - OTLP endpoint (export disabled when unset)
//! - `OTEL_LOG_LEVEL` or `RUST_LOG` - Log level filter

pub mod config;
pub mod error;
pub mod telemetry;
pub mod tracing;

pub use config::ObservabilityConfig;
pub use error::ObservabilityError;
pub use telemetry::{init, init_from_env, shutdown};
pub use self::tracing::{record_duration, record_error};
