//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → CLI overrides applied by the binary
//!     → validation.rs (semantic checks on the merged result)
//!     → ProbeConfig (validated, immutable)
//!     → passed by reference to every subsystem for one run
//! ```
//!
//! # Design Decisions
//! - Config is immutable once the run starts
//! - All fields have defaults to allow minimal configs (or no file at all)
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::LogFormat;
pub use schema::ObservabilityConfig;
pub use schema::OutputConfig;
pub use schema::ProbeConfig;
pub use schema::ProbeSettings;
pub use schema::ReportFormat;
pub use schema::ThresholdConfig;
pub use schema::TopologyConfig;
pub use schema::TopologySourceKind;
pub use validation::{validate_config, ValidationError};
