//! Typecast Core - path-indexed casting of JSON leaves inside records
//!
//! This crate rewrites selected scalar leaves of JSON documents to declared
//! types while keeping the shape of every document intact.
//!
//! # Main Components
//!
//! - **Paths**: compile `(path, type)` declarations into an exact index and a
//!   prefix set used to prune traversal
//! - **Visitor**: walk a document and cast declared leaves
//! - **Casting**: the [`Caster`] trait and the default [`JsonCaster`]
//! - **Filter**: per-record driver applying column casts and the visitor
//!
//! # Example
//!
//! ```
//! use typecast_core::{ColumnConfig, TargetType, TypecastConfig, TypecastFilter};
//! use serde_json::json;
//!
//! let config = TypecastConfig::new(vec![
//!     ColumnConfig::new("$.payload.user.age", TargetType::Long),
//! ]);
//! let filter = TypecastFilter::new(&config).unwrap();
//!
//! let record = json!({"payload": {"user": {"age": "42", "name": "Ann"}}});
//! let out = filter.filter(record.as_object().unwrap().clone()).unwrap();
//! assert_eq!(out["payload"]["user"]["age"], json!(42));
//! ```

pub mod cast;
pub mod config;
pub mod error;
pub mod filter;
pub mod path;
pub mod types;
pub mod visitor;

pub use cast::{CastFailure, CastResult, Caster, JsonCaster, TimestampSettings};
pub use config::{ColumnConfig, TypecastConfig};
pub use error::{Error, Result};
pub use filter::{FilterOutcome, Record, TypecastFilter};
pub use path::PathSpec;
pub use types::{TargetType, ValueKind};
pub use visitor::{VisitStats, Visitor};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
