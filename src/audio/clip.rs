//! WAV clip extraction along diarization segment boundaries.
//!
//! Clips are 16-bit PCM slices of the source file, written as
//! `part_{idx}.wav` where `idx` is the segment's position in the input list.
//! The transcription stage relies on that naming to keep positional order.

use crate::error::{IntervoxError, Result};
use crate::transcript::Segment;
use std::fs;
use std::path::{Path, PathBuf};

/// Duration of a WAV file in seconds.
pub fn wav_duration_secs(path: &Path) -> Result<f64> {
    let reader = hound::WavReader::open(path).map_err(|e| IntervoxError::AudioFormat {
        message: format!("failed to open WAV {}: {}", path.display(), e),
    })?;
    let spec = reader.spec();
    Ok(reader.duration() as f64 / spec.sample_rate as f64)
}

/// Cut one clip per segment out of the source WAV.
///
/// Boundaries are truncated to whole milliseconds before frame conversion
/// and clamped to the length of the file; a segment entirely past the end
/// still produces an (empty) clip so positions stay aligned. The source
/// sample spec is preserved in every clip.
pub fn cut_clips(audio: &Path, segments: &[Segment], out_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut reader = hound::WavReader::open(audio).map_err(|e| IntervoxError::AudioFormat {
        message: format!("failed to open WAV {}: {}", audio.display(), e),
    })?;
    let spec = reader.spec();
    let samples: Vec<i16> = reader
        .samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| IntervoxError::AudioFormat {
            message: format!(
                "failed to read samples from {} (16-bit PCM expected): {}",
                audio.display(),
                e
            ),
        })?;

    fs::create_dir_all(out_dir)?;

    let channels = spec.channels as u64;
    let rate = spec.sample_rate as u64;
    let total_frames = samples.len() as u64 / channels;

    let mut written = Vec::with_capacity(segments.len());
    for (idx, segment) in segments.iter().enumerate() {
        let start_ms = (segment.start * 1000.0) as u64;
        let end_ms = (segment.end * 1000.0) as u64;
        let start_frame = (start_ms * rate / 1000).min(total_frames);
        let end_frame = (end_ms * rate / 1000).min(total_frames).max(start_frame);
        let range = (start_frame * channels) as usize..(end_frame * channels) as usize;

        let out_path = out_dir.join(format!("part_{}.wav", idx));
        write_clip(&out_path, spec, &samples[range])?;
        println!(
            "exported: {} (duration: {:.3}s)",
            out_path.display(),
            end_ms.saturating_sub(start_ms) as f64 / 1000.0
        );
        written.push(out_path);
    }

    Ok(written)
}

fn write_clip(path: &Path, spec: hound::WavSpec, samples: &[i16]) -> Result<()> {
    let mut writer =
        hound::WavWriter::create(path, spec).map_err(|e| clip_error(path, &e.to_string()))?;
    for &sample in samples {
        writer
            .write_sample(sample)
            .map_err(|e| clip_error(path, &e.to_string()))?;
    }
    writer
        .finalize()
        .map_err(|e| clip_error(path, &e.to_string()))?;
    Ok(())
}

fn clip_error(path: &Path, message: &str) -> IntervoxError {
    IntervoxError::ClipExtraction {
        message: format!("{}: {}", path.display(), message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_test_wav(path: &Path, sample_rate: u32, channels: u16, samples: &[i16]) {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    fn read_samples(path: &Path) -> Vec<i16> {
        hound::WavReader::open(path)
            .unwrap()
            .samples::<i16>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap()
    }

    fn segment(start: f64, end: f64) -> Segment {
        Segment {
            start,
            end,
            speaker: "SPEAKER_00".to_string(),
        }
    }

    #[test]
    fn test_cut_two_segments_produces_positional_clips() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("audio.wav");
        let out_dir = dir.path().join("clips");

        // 1 second at 8 kHz, samples are a ramp so slices are identifiable
        let ramp: Vec<i16> = (0..8000).map(|i| i as i16).collect();
        write_test_wav(&audio, 8000, 1, &ramp);

        let segments = vec![segment(0.0, 0.5), segment(0.5, 1.0)];
        let written = cut_clips(&audio, &segments, &out_dir).unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(written[0], out_dir.join("part_0.wav"));
        assert_eq!(written[1], out_dir.join("part_1.wav"));

        let first = read_samples(&written[0]);
        assert_eq!(first.len(), 4000);
        assert_eq!(first[0], 0);
        assert_eq!(first[3999], 3999);

        let second = read_samples(&written[1]);
        assert_eq!(second.len(), 4000);
        assert_eq!(second[0], 4000);
    }

    #[test]
    fn test_segment_end_is_clamped_to_file_length() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("audio.wav");
        let out_dir = dir.path().join("clips");
        write_test_wav(&audio, 8000, 1, &vec![7i16; 8000]);

        let written = cut_clips(&audio, &[segment(0.5, 2.0)], &out_dir).unwrap();

        assert_eq!(read_samples(&written[0]).len(), 4000);
    }

    #[test]
    fn test_segment_past_end_yields_empty_clip() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("audio.wav");
        let out_dir = dir.path().join("clips");
        write_test_wav(&audio, 8000, 1, &vec![7i16; 8000]);

        let written = cut_clips(&audio, &[segment(2.0, 3.0)], &out_dir).unwrap();

        assert!(written[0].exists());
        assert_eq!(read_samples(&written[0]).len(), 0);
    }

    #[test]
    fn test_stereo_spec_is_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("audio.wav");
        let out_dir = dir.path().join("clips");

        // 1 second at 8 kHz stereo: 4000 frames, 8000 interleaved samples
        let interleaved: Vec<i16> = (0..8000).map(|i| i as i16).collect();
        write_test_wav(&audio, 8000, 2, &interleaved);

        let written = cut_clips(&audio, &[segment(0.25, 0.5)], &out_dir).unwrap();

        let reader = hound::WavReader::open(&written[0]).unwrap();
        assert_eq!(reader.spec().channels, 2);
        assert_eq!(reader.spec().sample_rate, 8000);

        // Frames 2000..4000, two samples per frame
        let samples = read_samples(&written[0]);
        assert_eq!(samples.len(), 4000);
        assert_eq!(samples[0], 4000);
    }

    #[test]
    fn test_millisecond_truncation_of_boundaries() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("audio.wav");
        let out_dir = dir.path().join("clips");
        write_test_wav(&audio, 1000, 1, &vec![1i16; 1000]);

        // 0.0335 s truncates to 33 ms, 0.0666 s to 66 ms
        let written = cut_clips(&audio, &[segment(0.0335, 0.0666)], &out_dir).unwrap();

        assert_eq!(read_samples(&written[0]).len(), 33);
    }

    #[test]
    fn test_missing_audio_is_audio_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("nope.wav");
        let out_dir = dir.path().join("clips");

        let result = cut_clips(&audio, &[segment(0.0, 1.0)], &out_dir);

        assert!(matches!(result, Err(IntervoxError::AudioFormat { .. })));
    }

    #[test]
    fn test_wav_duration_mono() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("audio.wav");
        write_test_wav(&audio, 8000, 1, &vec![0i16; 8000]);

        assert!((wav_duration_secs(&audio).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_wav_duration_counts_frames_not_samples() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("audio.wav");
        // 8000 interleaved stereo samples are 4000 frames
        write_test_wav(&audio, 8000, 2, &vec![0i16; 8000]);

        assert!((wav_duration_secs(&audio).unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_wav_duration_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = wav_duration_secs(&dir.path().join("nope.wav"));
        assert!(matches!(result, Err(IntervoxError::AudioFormat { .. })));
    }
}
