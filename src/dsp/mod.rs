pub mod framing;
pub mod loudness;
pub mod spectrum;
pub mod stats;
pub mod windowing;
