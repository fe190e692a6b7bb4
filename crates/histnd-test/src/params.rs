//! Regression test parameters and operations

use histnd_core::FPix;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Print computed values; mismatches are reported but not fatal
    Generate,
    /// Compare with expected values (default)
    #[default]
    Compare,
    /// Compare and print every checked value
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, mode, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "backproject")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn record_failure(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        if self.mode != RegTestMode::Generate {
            self.success = false;
        }
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        match self.mode {
            RegTestMode::Generate => eprintln!("  [{:02}] value = {}", self.index, actual),
            RegTestMode::Display => eprintln!(
                "  [{:02}] expected = {}, actual = {}",
                self.index, expected, actual
            ),
            RegTestMode::Compare => {}
        }

        // NaN never compares within delta
        if !(diff <= delta) {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.record_failure(msg);
            false
        } else {
            true
        }
    }

    /// Compare two FPix images pixel by pixel
    ///
    /// # Arguments
    ///
    /// * `fpix1` - First image
    /// * `fpix2` - Second image
    /// * `delta` - Maximum allowed per-pixel difference
    ///
    /// # Returns
    ///
    /// `true` if the images have the same size and every pixel matches
    /// within delta, `false` otherwise.
    pub fn compare_fpix(&mut self, fpix1: &FPix, fpix2: &FPix, delta: f32) -> bool {
        self.index += 1;

        if fpix1.dimensions() != fpix2.dimensions() {
            let msg = format!(
                "Failure in {}_reg: fpix comparison for index {} - dimension mismatch",
                self.test_name, self.index
            );
            self.record_failure(msg);
            return false;
        }

        let width = fpix1.width() as usize;
        let mismatch = fpix1
            .data()
            .iter()
            .zip(fpix2.data())
            .position(|(&a, &b)| !((a - b).abs() <= delta));

        if let Some(i) = mismatch {
            let msg = format!(
                "Failure in {}_reg: fpix comparison for index {} - pixel mismatch at ({}, {}): {} vs {}",
                self.test_name,
                self.index,
                i % width,
                i / width,
                fpix1.data()[i],
                fpix2.data()[i]
            );
            self.record_failure(msg);
            return false;
        }

        true
    }

    /// Compare two slices of values element by element
    ///
    /// # Returns
    ///
    /// `true` if the slices have the same length and every element matches
    /// within delta, `false` otherwise.
    pub fn compare_slices(&mut self, expected: &[f64], actual: &[f64], delta: f64) -> bool {
        self.index += 1;

        if expected.len() != actual.len() {
            let msg = format!(
                "Failure in {}_reg: slice comparison for index {} - length {} vs {}",
                self.test_name,
                self.index,
                expected.len(),
                actual.len()
            );
            self.record_failure(msg);
            return false;
        }

        let mismatch = expected
            .iter()
            .zip(actual)
            .position(|(&a, &b)| !((a - b).abs() <= delta));

        if let Some(i) = mismatch {
            let msg = format!(
                "Failure in {}_reg: slice comparison for index {} - element {}: expected {}, actual {}",
                self.test_name, self.index, i, expected[i], actual[i]
            );
            self.record_failure(msg);
            return false;
        }

        true
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all checks passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_env() {
        // Can't safely remove the env var here; just check a valid mode comes back
        let mode = RegTestMode::from_env();
        assert!(matches!(
            mode,
            RegTestMode::Compare | RegTestMode::Generate | RegTestMode::Display
        ));
    }

    #[test]
    fn test_compare_values_within_delta() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert_eq!(rp.index(), 2);
        assert!(rp.is_success());
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = RegParams::new("test");
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.compare_values(1.0, f64::NAN, 1.0));
        assert_eq!(rp.failures().len(), 2);
    }

    #[test]
    fn test_compare_fpix() {
        let mut rp = RegParams::new("test");
        let a = FPix::new_with_value(3, 3, 1.0).unwrap();
        let mut b = a.clone();
        assert!(rp.compare_fpix(&a, &b, 0.0));
        b.set_pixel(2, 1, 1.5).unwrap();
        assert!(!rp.compare_fpix(&a, &b, 0.1));
        assert!(rp.failures()[0].contains("(2, 1)"));
    }

    #[test]
    fn test_compare_fpix_dimension_mismatch() {
        let mut rp = RegParams::new("test");
        let a = FPix::new(3, 3).unwrap();
        let b = FPix::new(3, 4).unwrap();
        assert!(!rp.compare_fpix(&a, &b, 0.0));
    }

    #[test]
    fn test_compare_slices() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_slices(&[1.0, 2.0], &[1.0, 2.0], 0.0));
        assert!(!rp.compare_slices(&[1.0, 2.0], &[1.0], 0.0));
        assert!(!rp.compare_slices(&[1.0, 2.0], &[1.0, 3.0], 0.5));
    }
}
