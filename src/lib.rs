// Litmus: trust scoring and manipulation detection for news text.
//
// This is the library root. Each module corresponds to a stage of the
// analysis pipeline: pattern scanning, keyword bias inference, ML signal
// providers, trust score aggregation, and the orchestrator that ties
// them together.

pub mod analyzer;
pub mod bias;
pub mod config;
pub mod error;
pub mod history;
pub mod output;
pub mod patterns;
pub mod providers;
pub mod scoring;
pub mod web;
