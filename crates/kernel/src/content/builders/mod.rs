//! Payload builders, one module per variant family.
//!
//! Every builder has the [`BuilderFn`](super::registry::BuilderFn) shape:
//! it decodes the stored value into a typed input with `run`, and emits a
//! normalized payload with resolved links and responsive images.

pub mod blog;
pub mod common;
pub mod general;
pub mod hero;
pub mod house;
pub mod journey;
pub mod multi_image;
pub mod projects;
pub mod quality_homes;
pub mod slider;
