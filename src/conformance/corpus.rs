//! Corpus-based conformance testing.
//!
//! Vector format:
//!
//! ```json
//! {
//!   "id": "number_float",
//!   "op": "deserialize",
//!   "input": { "text": "42.0" },
//!   "expected": { "ok": 42.0 }
//! }
//! ```
//!
//! `expected` is either `{"ok": <json>}` or `{"err": {"code": N}}`. In the
//! `ok` form, JSON numbers without a fraction map to `Value::Integer` and
//! numbers with one map to `Value::Float`.
//!
//! Operations:
//!
//! - `deserialize` - strict parse of `input.text`
//! - `deserialize_lenient` - null-on-error parse of `input.text`
//! - `pointer` - strict parse of `input.text`, then lookup of `input.path`;
//!   a missing path is expected as `{"missing": true}`

use crate::error::ErrorCode;
use crate::json::{deserialize_with, Map, ParseOptions, Value};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Corpus manifest with metadata.
#[derive(Debug, Deserialize)]
pub struct CorpusManifest {
    /// Format version of the corpus file.
    pub format_version: String,
    /// Free-form description of what the corpus covers.
    #[serde(default)]
    pub description: String,
}

/// A corpus containing test vectors.
#[derive(Debug, Deserialize)]
pub struct Corpus {
    /// Corpus metadata.
    pub manifest: CorpusManifest,
    /// List of test vectors.
    pub vectors: Vec<TestVector>,
}

/// A single test vector.
#[derive(Debug, Deserialize)]
pub struct TestVector {
    /// Unique identifier for the test.
    pub id: String,
    /// Operation to test (e.g., "deserialize", "pointer").
    pub op: String,
    /// Input parameters for the operation.
    pub input: serde_json::Value,
    /// Expected result (success or error).
    pub expected: serde_json::Value,
}

/// Result of running a single test vector.
#[derive(Debug)]
pub enum TestResult {
    /// Test passed.
    Pass,
    /// Test failed with mismatch.
    Fail {
        /// Expected result from the corpus.
        expected: String,
        /// Actual result from the parser.
        actual: String,
    },
    /// Test was skipped (operation not known).
    Skip {
        /// Reason for skipping.
        reason: String,
    },
    /// The vector itself is malformed.
    Error {
        /// Error message.
        message: String,
    },
}

impl TestResult {
    /// Returns true if this is a passing result.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns true if this is a failing result.
    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail { .. })
    }
}

/// Results from running the corpus.
#[derive(Debug, Default)]
pub struct CorpusResults {
    /// Number of tests that passed.
    pub passed: usize,
    /// Number of tests that failed.
    pub failed: usize,
    /// Number of tests that were skipped.
    pub skipped: usize,
    /// Number of malformed vectors.
    pub errors: usize,
    /// Detailed results for each test.
    pub details: Vec<(String, TestResult)>,
}

impl CorpusResults {
    /// Create a new empty results container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a test result.
    pub fn record(&mut self, id: &str, result: TestResult) {
        match &result {
            TestResult::Pass => self.passed += 1,
            TestResult::Fail { .. } => self.failed += 1,
            TestResult::Skip { .. } => self.skipped += 1,
            TestResult::Error { .. } => self.errors += 1,
        }
        self.details.push((id.to_string(), result));
    }

    /// Get total number of tests run.
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped + self.errors
    }

    /// Returns true if all tests passed (no failures or errors).
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }

    /// Get a summary string of the results.
    pub fn summary(&self) -> String {
        format!(
            "{} passed, {} failed, {} skipped, {} errors (total: {})",
            self.passed,
            self.failed,
            self.skipped,
            self.errors,
            self.total()
        )
    }

    /// Get failures and malformed vectors.
    pub fn problems(&self) -> Vec<&(String, TestResult)> {
        self.details
            .iter()
            .filter(|(_, r)| matches!(r, TestResult::Fail { .. } | TestResult::Error { .. }))
            .collect()
    }
}

/// Corpus runner that executes test vectors.
pub struct CorpusRunner {
    corpus: Corpus,
}

impl CorpusRunner {
    /// Load corpus from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read corpus file: {}", e))?;
        Self::from_json(&content)
    }

    /// Load corpus from JSON text.
    pub fn from_json(content: &str) -> Result<Self, String> {
        let corpus: Corpus = serde_json::from_str(content)
            .map_err(|e| format!("Failed to parse corpus JSON: {}", e))?;
        Ok(Self { corpus })
    }

    /// Get the corpus manifest.
    pub fn manifest(&self) -> &CorpusManifest {
        &self.corpus.manifest
    }

    /// Get the number of test vectors.
    pub fn vector_count(&self) -> usize {
        self.corpus.vectors.len()
    }

    /// Run all test vectors and return results.
    pub fn run_all(&self) -> CorpusResults {
        let mut results = CorpusResults::new();

        for vector in &self.corpus.vectors {
            let result = self.run_vector(vector);
            results.record(&vector.id, result);
        }

        results
    }

    /// Run a single test vector.
    fn run_vector(&self, vector: &TestVector) -> TestResult {
        let Some(text) = vector.input.get("text").and_then(|v| v.as_str()) else {
            return TestResult::Error {
                message: "Missing 'text' in input".to_string(),
            };
        };

        match vector.op.as_str() {
            "deserialize" => {
                check(&vector.expected, deserialize_with(text, ParseOptions::strict()))
            }
            "deserialize_lenient" => {
                check(&vector.expected, deserialize_with(text, ParseOptions::lenient()))
            }
            "pointer" => self.run_pointer(vector, text),
            _ => TestResult::Skip {
                reason: format!("Unknown operation: {}", vector.op),
            },
        }
    }

    /// Run pointer test.
    fn run_pointer(&self, vector: &TestVector, text: &str) -> TestResult {
        let Some(path) = vector.input.get("path").and_then(|v| v.as_str()) else {
            return TestResult::Error {
                message: "Missing 'path' in input".to_string(),
            };
        };

        let result = deserialize_with(text, ParseOptions::strict())
            .map(|root| root.pointer(path).cloned());

        match result {
            // Missing paths are spelled `{"missing": true}`
            Ok(None) if vector.expected.get("missing").is_some() => TestResult::Pass,
            Ok(None) => TestResult::Fail {
                expected: vector.expected.to_string(),
                actual: "missing".to_string(),
            },
            Ok(Some(found)) => check(&vector.expected, Ok(found)),
            Err(e) => check(&vector.expected, Err(e)),
        }
    }
}

/// Compare a parse result against the `expected` block of a vector.
fn check(expected: &serde_json::Value, result: Result<Value, ErrorCode>) -> TestResult {
    if let Some(ok) = expected.get("ok") {
        let want = expected_value(ok);
        match result {
            Ok(actual) if actual == want => TestResult::Pass,
            Ok(actual) => TestResult::Fail {
                expected: format!("ok: {:?}", want),
                actual: format!("ok: {:?}", actual),
            },
            Err(e) => TestResult::Fail {
                expected: format!("ok: {:?}", want),
                actual: format!("err: {}", e),
            },
        }
    } else if let Some(err) = expected.get("err") {
        let Some(expected_code) = err.get("code").and_then(|v| v.as_u64()) else {
            return TestResult::Error {
                message: "Missing 'code' in expected err".to_string(),
            };
        };
        let expected_code = expected_code as u32;
        match result {
            Ok(actual) => TestResult::Fail {
                expected: format!("E{}", expected_code),
                actual: format!("ok: {:?}", actual),
            },
            Err(e) if e.code() == expected_code => TestResult::Pass,
            Err(e) => TestResult::Fail {
                expected: format!("E{}", expected_code),
                actual: format!("E{} ({})", e.code(), e),
            },
        }
    } else {
        TestResult::Error {
            message: "Invalid expected format".to_string(),
        }
    }
}

/// Build the value tree a corpus `ok` block describes.
fn expected_value(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Array(items) => Value::Array(items.iter().map(expected_value).collect()),
        serde_json::Value::Object(entries) => Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), expected_value(v)))
                .collect::<Map>(),
        ),
    }
}
