//! pagediff-test - Regression test framework for pagediff
//!
//! This crate provides the regression test harness shared by every crate's
//! `tests/*_reg.rs` files, supporting two modes:
//!
//! - **Compare**: Check computed values and rasters, record failures (default)
//! - **Display**: Additionally write produced images to `tests/regout/`
//!   for visual inspection
//!
//! It also provides [`synth`], generators for the synthetic page images the
//! tests run on, so no binary fixtures are needed.
//!
//! # Usage
//!
//! ```ignore
//! use pagediff_test::RegParams;
//!
//! let mut rp = RegParams::new("cluster");
//! rp.compare_values(2.0, regions.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! Set `REGTEST_MODE=display` to switch every test into display mode.

mod error;
mod params;
pub mod synth;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use std::path::Path;

/// Directory where display-mode images are saved: `<workspace>/tests/regout`
pub fn regout_dir() -> String {
    // this crate lives two levels below the workspace root
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    root.join("tests").join("regout").display().to_string()
}
