//! Episode timeline construction.
//!
//! This module places every episode of a show on a continuous,
//! season-contiguous x-axis and smooths ratings within each season
//! with LOWESS, producing the table consumed by the renderers.

pub mod lowess;
pub mod normalize;
pub mod pipeline;
pub mod types;
