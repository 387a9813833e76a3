//! Corpus-driven conformance checks.
//!
//! A corpus is a JSON file of test vectors: an input text, the operation to
//! run on it, and either the expected value tree or the expected error code.
//! The corpus file itself is read with `serde_json`, so the checks never
//! depend on the parser they are checking.

pub mod corpus;

pub use corpus::{Corpus, CorpusManifest, CorpusResults, CorpusRunner, TestResult, TestVector};
