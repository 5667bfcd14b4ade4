//! Selection model and render planning for the Shelfscout mechanics picker.
//!
//! The WASM shell in `apps/shelfscout.com/mechanics-picker` owns every DOM
//! read and write; this crate owns everything that can be computed without a
//! document, so the picker's behavior is testable on native targets.

pub mod catalog;
pub mod config;
pub mod dropdown;
pub mod plan;
pub mod selection;
pub mod state;
