//! # calc_core - Quickcalc Calculation Engine
//!
//! `calc_core` holds everything the Quickcalc site computes. Front ends
//! (`calc_web`, `calc_cli`) only parse input, call in here and render.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All inputs and outputs implement Serialize/Deserialize
//! - **Validate at the boundary**: Bad form values fail before any math runs
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculations::{evaluate, CalculatorRequest, FuelCostInput};
//!
//! let request = CalculatorRequest::FuelCost(FuelCostInput {
//!     distance: 400.0,
//!     efficiency: 15.0,
//!     fuel_price: 100.0,
//! });
//! let output = evaluate(&request).unwrap();
//! println!("{}", output.summary());
//! ```
//!
//! ## Modules
//!
//! - [`units`] - Unit tables and the conversion engine
//! - [`sync`] - Bidirectional converter fields as a single update step
//! - [`pixel_em`] - Pixel/em conversion with a configurable base size
//! - [`calculations`] - All standalone calculators
//! - [`forms`] - Parsing and validation of raw form text
//! - [`algebra`] - Model-backed algebra solver
//! - [`sitemap`] - Public page list
//! - [`config`] - Site configuration
//! - [`errors`] - Structured error types

pub mod algebra;
pub mod calculations;
pub mod config;
pub mod errors;
pub mod forms;
pub mod pixel_em;
pub mod sitemap;
pub mod sync;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{evaluate, CalculatorOutput, CalculatorRequest};
pub use config::SiteConfig;
pub use errors::{CalcError, CalcResult};
pub use units::{convert, Quantity, UnitTable};
