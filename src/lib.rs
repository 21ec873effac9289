// envject - container configuration injector
// Copyright (c) 2025 Envject Contributors
// Licensed under the MIT License

//! # envject
//!
//! envject resolves a frontend's runtime configuration when its container
//! starts and writes it into a script the browser loads before the
//! application bundle. Code written against `process.env.API_URL` keeps
//! working whether the value came from a Docker Swarm secret or a plain
//! environment variable.
//!
//! ## Overview
//!
//! 1. **Manifest**: a YAML/JSON/TOML document lists the required keys
//! 2. **Resolve**: each key is read from `/run/secrets/<KEY>`, falling back
//!    to the environment variable `<KEY>`
//! 3. **Inject**: all values are written at once to `env-config.js`, which
//!    populates `globalThis.process.env`
//!
//! Resolution is all-or-nothing. If any key has no value the run fails,
//! names the key, and leaves the previous artifact untouched.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Manifest loading, resolution, artifact rendering
//! - [`domain`] - Keys, resolved values, errors
//! - [`config`] - Tool configuration and secret value wrappers
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use envject::config::load_config;
//! use envject::core::diagnostics::Diagnostics;
//! use envject::core::pipeline::{run, RunPlan};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config(None)?;
//!     let report = run(&RunPlan::from(&config), &mut Diagnostics::stderr())?;
//!     println!("{} keys written, sha256 {}", report.keys(), report.artifact.sha256());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
