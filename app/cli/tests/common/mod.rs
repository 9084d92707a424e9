//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for treemap pipeline integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use app_lib::PipelineConfig;
use tempfile::TempDir;

/// Test harness owning a scratch directory for inputs and outputs.
pub struct TestHarness {
    pub dir: TempDir,
}

impl TestHarness {
    /// Create a new test harness with an empty scratch directory.
    pub fn new() -> Self {
        TestHarness {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    /// Writes an input CSV and returns its path.
    pub fn write_input(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("write input");
        path
    }

    pub fn output_path(&self) -> PathBuf {
        self.dir.path().join("tickets-treemap.html")
    }

    pub fn debug_dir(&self) -> PathBuf {
        self.dir.path().join("debug_output")
    }

    /// A config that keeps every artifact inside the scratch directory.
    pub fn config_for(&self, input: &Path) -> PipelineConfig {
        PipelineConfig {
            input_path: input.to_path_buf(),
            output_path: self.output_path(),
            debug_dir: self.debug_dir(),
            ..PipelineConfig::default()
        }
    }

    pub fn read_output(&self) -> String {
        fs::read_to_string(self.output_path()).expect("read output html")
    }

    /// Parses the trace array embedded in the generated page.
    pub fn figure_data(&self) -> serde_json::Value {
        let html = self.read_output();
        let call = html.find("Plotly.newPlot(").expect("newPlot call");
        let start = call + html[call..].find('[').expect("data array");
        serde_json::Deserializer::from_str(&html[start..])
            .into_iter::<serde_json::Value>()
            .next()
            .expect("a JSON value")
            .expect("valid JSON")
    }
}

/// The three-row scenario: two "Tech > Login" rows and one "Billing" row.
pub struct TicketFixture;

impl TicketFixture {
    pub fn csv() -> &'static str {
        "Level 1;Level 2;Tickets\n\
         Tech;Login;1 200\n\
         Tech;Login;300\n\
         Billing;;500\n"
    }
}

/// Position of the node labelled `label` in a trace.
pub fn node_index(trace: &serde_json::Value, label: &str) -> usize {
    trace["labels"]
        .as_array()
        .expect("labels array")
        .iter()
        .position(|l| l == label)
        .unwrap_or_else(|| panic!("no node labelled {}", label))
}
