//! Check bookkeeping for `*_reg` tests
//!
//! A [`RegParams`] numbers every check, keeps going after a failed one, and
//! reports all failures together at [`RegParams::cleanup`].

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use pagediff_core::Raster;
use pagediff_io::ImageFormat;
use std::fs;

/// What a regression run does besides checking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Only run the checks
    #[default]
    Compare,
    /// Also save produced images under the regout directory
    Display,
}

impl RegTestMode {
    /// Read `REGTEST_MODE`; anything but `display` means compare
    pub fn from_env() -> Self {
        let value = std::env::var("REGTEST_MODE").unwrap_or_default();
        if value.eq_ignore_ascii_case("display") {
            RegTestMode::Display
        } else {
            RegTestMode::Compare
        }
    }
}

/// State of one regression test
pub struct RegParams {
    /// Test name without the `_reg` suffix, e.g. `"cluster"`
    pub test_name: String,
    /// Number of checks run so far
    index: usize,
    pub mode: RegTestMode,
    success: bool,
    failures: Vec<String>,
}

impl RegParams {
    /// Start a test; the mode comes from `REGTEST_MODE`.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();
        eprintln!("\n==== {}_reg ({:?}) ====", test_name, mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Number of checks run so far
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether produced images should be saved
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, what: &str, detail: String) -> bool {
        let msg = format!("{}_reg check #{} ({}): {}", self.test_name, self.index, what, detail);
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
        false
    }

    /// Check that `actual` is within `delta` of `expected`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        if (expected - actual).abs() <= delta {
            return true;
        }
        self.fail(
            "value",
            format!("expected {} +/- {}, got {}", expected, delta, actual),
        )
    }

    /// Check that two rasters match pixel for pixel.
    pub fn compare_raster(&mut self, r1: &Raster, r2: &Raster) -> bool {
        self.index += 1;

        if !r1.sizes_equal(r2) {
            let detail = format!(
                "{}x{} vs {}x{}",
                r1.width(),
                r1.height(),
                r2.width(),
                r2.height()
            );
            return self.fail("raster size", detail);
        }

        let mismatch = r1
            .data()
            .iter()
            .zip(r2.data())
            .position(|(p1, p2)| p1 != p2);
        match mismatch {
            Some(i) => {
                let x = i as u32 % r1.width();
                let y = i as u32 / r1.width();
                self.fail("raster", format!("first differing pixel at ({}, {})", x, y))
            }
            None => true,
        }
    }

    /// Check that two byte strings are identical.
    pub fn compare_strings(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;
        if data1 == data2 {
            return true;
        }
        let at = data1
            .iter()
            .zip(data2)
            .position(|(a, b)| a != b)
            .unwrap_or(data1.len().min(data2.len()));
        self.fail(
            "bytes",
            format!("{} vs {} bytes, first difference at offset {}", data1.len(), data2.len(), at),
        )
    }

    /// Write a raster to the regout directory when in display mode
    ///
    /// Does nothing in compare mode.
    pub fn write_raster(&mut self, raster: &Raster, tag: &str, format: ImageFormat) -> TestResult<()> {
        if !self.display() {
            return Ok(());
        }
        let path = self.output_path(tag, format.extension())?;
        pagediff_io::write_image(raster, &path, format).map_err(|e| TestError::ImageWrite {
            path: path.clone(),
            message: e.to_string(),
        })?;
        eprintln!("Wrote: {}", path);
        Ok(())
    }

    /// Write already-encoded image bytes to the regout directory when in
    /// display mode
    pub fn write_data(&mut self, data: &[u8], tag: &str, ext: &str) -> TestResult<()> {
        if !self.display() {
            return Ok(());
        }
        let path = self.output_path(tag, ext)?;
        fs::write(&path, data)?;
        eprintln!("Wrote: {}", path);
        Ok(())
    }

    fn output_path(&self, tag: &str, ext: &str) -> TestResult<String> {
        let dir = regout_dir();
        fs::create_dir_all(&dir)?;
        Ok(format!("{}/{}.{}.{}", dir, self.test_name, tag, ext))
    }

    /// Print the summary and return whether every check passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("{}_reg: all {} checks passed", self.test_name, self.index);
        } else {
            eprintln!(
                "{}_reg: {} of {} checks failed",
                self.test_name,
                self.failures.len(),
                self.index
            );
            for line in &self.failures {
                eprintln!("    {}", line);
            }
        }
        self.success
    }

    /// Whether every check so far passed
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Messages of the failed checks
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
