mod arc_length;
mod sample_count;

pub use arc_length::arc_length;
pub use sample_count::estimate_sample_count;
