//! Fixtures
//!
//! Named sets of cart scenarios stored as YAML, used to check the calculator
//! against known outcomes.

use std::{fs, path::PathBuf};

use thiserror::Error;

use crate::fixtures::scenarios::{Scenario, ScenariosFixture};

pub mod scenarios;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Two scenarios in one set share a name
    #[error("Duplicate scenario name: {0}")]
    DuplicateScenario(String),

    /// Scenario not found
    #[error("Scenario not found: {0}")]
    ScenarioNotFound(String),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Loaded scenarios, in file order
    scenarios: Vec<Scenario>,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            scenarios: Vec::new(),
        }
    }

    /// Load scenarios from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a
    /// scenario name is already loaded.
    pub fn load_scenarios(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("scenarios").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ScenariosFixture = serde_norway::from_str(&contents)?;

        for scenario in fixture.scenarios {
            if self.scenarios.iter().any(|loaded| loaded.name == scenario.name) {
                return Err(FixtureError::DuplicateScenario(scenario.name));
            }

            self.scenarios.push(scenario);
        }

        Ok(self)
    }

    /// Load a complete scenario set from the default fixtures directory
    ///
    /// # Errors
    ///
    /// Returns an error if the scenario file cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_scenarios(name)?;

        Ok(fixture)
    }

    /// All loaded scenarios, in file order
    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Get a scenario by name
    ///
    /// # Errors
    ///
    /// Returns an error if the scenario is not found.
    pub fn scenario(&self, name: &str) -> Result<&Scenario, FixtureError> {
        self.scenarios
            .iter()
            .find(|scenario| scenario.name == name)
            .ok_or_else(|| FixtureError::ScenarioNotFound(name.to_string()))
    }

    /// Run every scenario, collecting a description of each mismatch
    pub fn mismatches(&self) -> Vec<String> {
        self.scenarios.iter().filter_map(Scenario::mismatch).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use testresult::TestResult;

    use super::*;
    use crate::fixtures::scenarios::Expectation;

    fn write_set(contents: &str) -> Result<tempfile::TempDir, std::io::Error> {
        let dir = tempfile::tempdir()?;

        fs::create_dir_all(dir.path().join("scenarios"))?;
        fs::write(dir.path().join("scenarios").join("set.yml"), contents)?;

        Ok(dir)
    }

    #[test]
    fn loads_scenarios_in_file_order() -> TestResult {
        let dir = write_set(
            "scenarios:
  - name: first
    items:
      - { name: cake, price: 1000, quantity: 5 }
    codes: [FLAT_1000]
    expect: { subtotal: 5000, discount: 1000, total: 4000 }
  - name: second
    codes: [~]
    expect: { error: \"Discount codes must not be null or empty.\" }
",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_scenarios("set")?;

        let names: Vec<_> = fixture.scenarios().iter().map(|s| s.name.as_str()).collect();

        assert_eq!(names, ["first", "second"]);
        assert_eq!(
            fixture.scenario("second")?.expect,
            Expectation::Error {
                error: "Discount codes must not be null or empty.".to_owned()
            }
        );
        assert!(fixture.mismatches().is_empty());

        Ok(())
    }

    #[test]
    fn reports_mismatched_totals() -> TestResult {
        let dir = write_set(
            "scenarios:
  - name: wrong
    items:
      - { name: cake, price: 1000, quantity: 1 }
    codes: [BOGO]
    expect: { subtotal: 1000, discount: 500, total: 500 }
",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_scenarios("set")?;

        assert_eq!(fixture.mismatches().len(), 1);

        Ok(())
    }

    #[test]
    fn missing_file_is_io_error() {
        let mut fixture = Fixture::with_base_path("./does-not-exist");

        assert!(matches!(
            fixture.load_scenarios("nothing"),
            Err(FixtureError::Io(_))
        ));
    }

    #[test]
    fn malformed_yaml_is_yaml_error() -> TestResult {
        let dir = write_set("scenarios: [ { name: broken, expect: 12 } ]")?;
        let mut fixture = Fixture::with_base_path(dir.path());

        assert!(matches!(
            fixture.load_scenarios("set"),
            Err(FixtureError::Yaml(_))
        ));

        Ok(())
    }

    #[test]
    fn duplicate_scenario_names_are_rejected() -> TestResult {
        let dir = write_set(
            "scenarios:
  - { name: twice, codes: [BOGO], expect: { subtotal: 0, discount: 0, total: 0 } }
  - { name: twice, codes: [BOGO], expect: { subtotal: 0, discount: 0, total: 0 } }
",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());

        assert!(matches!(
            fixture.load_scenarios("set"),
            Err(FixtureError::DuplicateScenario(name)) if name == "twice"
        ));

        Ok(())
    }

    #[test]
    fn unknown_scenario_is_not_found() {
        let fixture = Fixture::with_base_path("./fixtures");

        assert!(matches!(
            fixture.scenario("missing"),
            Err(FixtureError::ScenarioNotFound(_))
        ));
    }
}
