//! Result Engine for school examinations
//!
//! This crate computes subject and overall grades from exam marks and
//! aggregates class statistics (class average, top scorer, grade
//! distribution, pass/fail counts) for monthly tests, quarterly, half-yearly
//! and annual exams.
//!
//! Grading scales and per-exam-type rules are data, loaded from YAML with
//! [`config::ConfigLoader`] or taken from [`config::GradingConfig::standard`].

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod statistics;
