//! Catalog, classification, and aggregation logic for pharmaceutical
//! manufacturing processes. Rendering and command-line concerns live in
//! `pharmaflow-app`.

pub mod aggregate;
pub mod catalog;
pub mod classify;
pub mod error;
pub mod layout;
pub mod report;
