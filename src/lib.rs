//! Symptom Intake - guided intake dialogue engine.
//!
//! This crate implements the conversational core of a symptom-intake front
//! end: a sequential, branching questionnaire with per-field validation and
//! conditional skips, plus a keyword-driven dispatcher that selects canned
//! replies for open-ended free text once the questionnaire completes.

pub mod application;
pub mod domain;
pub mod ports;
