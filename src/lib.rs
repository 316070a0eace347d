//! MathSim - an interactive terminal math learning simulator.
//!
//! MathSim lets a learner pick a topic and a difficulty, then read concept
//! notes, practise generated problems checked against a remote math API, or
//! graph functions of `x` on a fixed grid.
//!
//! # Features
//!
//! - Concept notes loaded from a bundled or user-supplied JSON catalogue
//! - Random practice problems with automatic answer checking
//! - Function grapher with grid, labelled axes and discontinuity handling
//! - Gruvbox color themes
//! - Clipboard integration
//!
//! # Example
//!
//! ```ignore
//! use mathsim::config::PlotConfig;
//! use mathsim::plot::{MevalEvaluator, PlotRenderer, RecordingSurface};
//!
//! let renderer = PlotRenderer::new(MevalEvaluator, PlotConfig::default());
//! let viewport = renderer.default_viewport()?;
//! let mut surface = RecordingSurface::new();
//! let outcome = renderer.render(&mut surface, "x^2", &viewport);
//! println!("{}", outcome.status);
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod api;
pub mod app;
pub mod clipboard;
pub mod concepts;
pub mod config;
pub mod error;
pub mod input;
pub mod plot;
pub mod problem;
pub mod session;
pub mod topic;
pub mod ui;

pub use error::{MathSimError, Result};
