/// Samples per analysis frame.
pub const FRAME_LENGTH: usize = 2048;
/// Stride between consecutive frame starts.
pub const HOP_LENGTH: usize = 512;

/// Frame geometry for the sliding-window pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameConfig {
    pub frame_length: usize,
    pub hop_length: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            frame_length: FRAME_LENGTH,
            hop_length: HOP_LENGTH,
        }
    }
}

/// Iterate over full-length overlapping frames.
///
/// Frames start at `0, hop, 2*hop, ...` while `start + frame_length <= len`;
/// a trailing partial frame is never yielded. Input shorter than one frame
/// (or a zero-sized geometry) yields nothing.
pub fn frames(samples: &[f32], config: FrameConfig) -> impl Iterator<Item = &[f32]> {
    let FrameConfig {
        frame_length,
        hop_length,
    } = config;

    let count = frame_count(samples.len(), config);

    (0..count).map(move |i| {
        let start = i * hop_length;
        &samples[start..start + frame_length]
    })
}

/// Number of frames `frames` will yield for `len` samples.
pub fn frame_count(len: usize, config: FrameConfig) -> usize {
    if config.frame_length == 0 || config.hop_length == 0 || len < config.frame_length {
        return 0;
    }
    (len - config.frame_length) / config.hop_length + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_input_has_no_frames() {
        let samples = vec![0.0; FRAME_LENGTH - 1];
        assert_eq!(frames(&samples, FrameConfig::default()).count(), 0);
    }

    #[test]
    fn exactly_one_frame() {
        let samples = vec![0.0; FRAME_LENGTH];
        assert_eq!(frames(&samples, FrameConfig::default()).count(), 1);
    }

    #[test]
    fn partial_tail_is_dropped() {
        // 4096 samples: starts 0, 512, 1024, 1536, 2048 -> 5 frames.
        // A start at 2560 would need 4608 samples.
        let samples = vec![0.0; 4096 + 100];
        let all: Vec<&[f32]> = frames(&samples, FrameConfig::default()).collect();
        assert_eq!(all.len(), 5);
        assert!(all.iter().all(|f| f.len() == FRAME_LENGTH));
    }

    #[test]
    fn frames_overlap_by_stride() {
        let samples: Vec<f32> = (0..3000).map(|i| i as f32).collect();
        let all: Vec<&[f32]> = frames(&samples, FrameConfig::default()).collect();
        assert_eq!(all[0][0], 0.0);
        assert_eq!(all[1][0], HOP_LENGTH as f32);
        assert_eq!(all[1][FRAME_LENGTH - 1], (HOP_LENGTH + FRAME_LENGTH - 1) as f32);
    }

    #[test]
    fn zero_hop_yields_nothing() {
        let config = FrameConfig {
            frame_length: 4,
            hop_length: 0,
        };
        assert_eq!(frame_count(100, config), 0);
    }

    #[test]
    fn count_matches_iterator() {
        let config = FrameConfig {
            frame_length: 10,
            hop_length: 3,
        };
        for len in 0..50 {
            let samples = vec![0.0; len];
            assert_eq!(frames(&samples, config).count(), frame_count(len, config));
        }
    }
}
