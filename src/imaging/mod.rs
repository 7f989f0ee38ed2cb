//! Symbol rasterisation: decode, fit and rotate into an in-memory bitmap.

mod transform;

pub use transform::transform_symbol;
