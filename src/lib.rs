#![doc(test(attr(deny(warnings))))]

//! Move Planner collects what a customer is moving, and from where to where,
//! through a step-by-step wizard and folds it into a single estimate request.
//! It also carries the crew-side job board used to staff scheduled moves.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod errors;
pub mod planner;
pub mod submission;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Move Planner tracing initialized.");
    });
}
