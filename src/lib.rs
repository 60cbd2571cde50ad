//! Cheza (workspace facade crate).
//!
//! The rules engine lives in `cheza-core` and its shared vocabulary in
//! `cheza-types`; this package re-exports both as `cheza::{core,types}` and
//! ships the `cheza-headless` driver.

pub use cheza_core as core;
pub use cheza_types as types;
