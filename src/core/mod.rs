//! Core resolution and injection logic.
//!
//! # Modules
//!
//! - [`manifest`] - Reads the list of keys a deployment must supply
//! - [`resolver`] - Finds each key's value (secret file, then environment)
//! - [`artifact`] - Renders and atomically writes the runtime script
//! - [`diagnostics`] - Per-key audit lines for operators
//! - [`pipeline`] - Ties the stages together into one run
//!
//! # Example
//!
//! ```rust,no_run
//! use envject::config::EnvjectConfig;
//! use envject::core::diagnostics::Diagnostics;
//! use envject::core::pipeline::{run, RunPlan};
//!
//! # fn example() -> envject::domain::Result<()> {
//! let plan = RunPlan::from(&EnvjectConfig::default());
//! let report = run(&plan, &mut Diagnostics::stderr())?;
//! println!("Injected {} keys into {}", report.keys(), report.artifact_path.display());
//! # Ok(())
//! # }
//! ```

pub mod artifact;
pub mod diagnostics;
pub mod manifest;
pub mod pipeline;
pub mod resolver;
