#![forbid(unsafe_code)]

//! Core domain model and generation logic for the Setforge workout engine.
//!
//! This crate provides:
//! - Domain types (movements, templates, history, workouts)
//! - Seeded random source for reproducible generation
//! - Movement and template catalogs
//! - Intensity mapping and health capping
//! - Progression analysis
//! - Warm-up/cool-down planning
//! - The generation orchestrator

pub mod types;
pub mod error;
pub mod rng;
pub mod catalog;
pub mod templates;
pub mod intensity;
pub mod history;
pub mod progression;
pub mod recovery;
pub mod engine;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use rng::SeededRandom;
pub use catalog::{
    avoid_constraints, filter_by_equipment, movement_by_id, movement_catalog, sample_balanced,
    sample_balanced_with_counts, SampleOptions,
};
pub use templates::{select_template, template_catalog};
pub use intensity::{apply_health_caps, get_intensity_parameters};
pub use progression::{generate_progression_directives, FeedbackSource};
pub use engine::{generate_workout, generate_workout_at, validate_workout};
pub use config::Config;
