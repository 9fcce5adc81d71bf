pub mod wav;
pub mod waveform;

pub use waveform::Waveform;
