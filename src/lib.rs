// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Blurb Developers

//! See README on crates.io or GitHub.

pub mod pattern;

mod style;
pub use style::*;
mod extract;
pub use extract::*;
mod detect;
pub use detect::*;
mod uncomment;
pub use uncomment::*;
mod comment;
pub use comment::*;
mod blockspec;
pub use blockspec::*;

pub mod boilerplate;
mod replace;
pub use replace::*;

mod config;
pub use config::*;

mod runner;
pub use runner::*;

#[cfg(feature = "cli")]
mod cli;
#[cfg(feature = "cli")]
pub use cli::*;
