//! Batch review of the files touched by the last commit.
//!
//! 1) **Collect**: paths changed between `HEAD~1` and `HEAD` ([`collector`])
//! 2) **Classify**: keep reviewable code files ([`classifier`])
//! 3) **Extract**: full text and per-file diff ([`extractor`])
//! 4) **Prompt**: fixed review template ([`prompt`])
//! 5) **Ask**: one review-API call per file ([`gateway`])
//! 6) **Report**: one summary with per-file sections and counts ([`report`])
//!
//! [`runner::run_batch`] wires the steps together; [`ci_output`] publishes the
//! result as CI step outputs. Processing is strictly sequential and a failure
//! for one file never aborts the batch.

pub mod ci_output;
pub mod classifier;
pub mod collector;
pub mod config;
pub mod extractor;
pub mod gateway;
pub mod prompt;
pub mod report;
pub mod runner;
