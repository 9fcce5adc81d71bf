use std::path::Path;

use hound::{SampleFormat, WavReader};

use super::waveform::{downmix, Waveform};
use crate::error::FeatureExtractionError;

/// Load a WAV file as a mono waveform with samples in [-1.0, 1.0].
///
/// Integer PCM is scaled by 2^(bits-1); float PCM is taken as-is.
/// Multi-channel files are averaged down to mono.
pub fn load_waveform(path: &Path) -> Result<Waveform, FeatureExtractionError> {
    let mut reader = WavReader::open(path).map_err(|e| {
        FeatureExtractionError::Decode(format!("{}: {e}", path.display()))
    })?;

    let spec = reader.spec();

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Int => {
            let max_val = (1_i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<hound::Result<Vec<_>>>()
        }
        SampleFormat::Float => reader.samples::<f32>().collect::<hound::Result<Vec<_>>>(),
    }
    .map_err(|e| FeatureExtractionError::Decode(format!("{}: {e}", path.display())))?;

    let samples = downmix(&interleaved, spec.channels);

    log::debug!(
        "loaded {} ({} ch, {} Hz, {} frames)",
        path.display(),
        spec.channels,
        spec.sample_rate,
        samples.len()
    );

    Waveform::new(samples, spec.sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};

    fn write_i16(path: &Path, channels: u16, sample_rate: u32, samples: &[i16]) {
        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn mono_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ramp.wav");

        // A short ramp from -1.0 to 1.0
        let original: Vec<f32> = (0..1000).map(|i| (i as f32 / 1000.0) * 2.0 - 1.0).collect();
        let pcm: Vec<i16> = original.iter().map(|&s| (s * i16::MAX as f32) as i16).collect();
        write_i16(&path, 1, 16000, &pcm);

        let w = load_waveform(&path).unwrap();
        assert_eq!(w.sample_rate(), 16000);
        assert_eq!(w.samples().len(), original.len());

        // 16-bit quantization error is ~0.00003
        for (orig, loaded) in original.iter().zip(w.samples()) {
            assert!(
                (orig - loaded).abs() < 0.001,
                "Sample mismatch: original={orig}, loaded={loaded}"
            );
        }
    }

    #[test]
    fn stereo_is_downmixed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");

        // Left at half scale, right silent -> mono at quarter scale
        let half = i16::MAX / 2;
        let pcm: Vec<i16> = (0..200).flat_map(|_| [half, 0]).collect();
        write_i16(&path, 2, 8000, &pcm);

        let w = load_waveform(&path).unwrap();
        assert_eq!(w.samples().len(), 200);
        assert!(w.samples().iter().all(|&s| (s - 0.25).abs() < 0.001));
    }

    #[test]
    fn empty_file_is_empty_waveform() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.wav");
        write_i16(&path, 1, 16000, &[]);

        assert_eq!(
            load_waveform(&path),
            Err(FeatureExtractionError::EmptyWaveform)
        );
    }

    #[test]
    fn missing_file_is_decode_error() {
        let result = load_waveform(Path::new("/tmp/does-not-exist-speechcoach.wav"));
        assert!(matches!(result, Err(FeatureExtractionError::Decode(_))));
    }
}
