use freq_visualiser::audio::{AudioClip, AudioFile, AudioSource};
use freq_visualiser::export::{MemorySink, PngSequenceSink, SpectralAnalysis};
use freq_visualiser::model::Extrema;
use freq_visualiser::render::{Properties, RendererRegistry};
use freq_visualiser::{FramePipeline, VisualiserConfig};
use std::f64::consts::PI;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Interleaved 16-bit samples of a sine on channel 0, silence on the others
fn sine_samples(freq: f64, sample_rate: u32, secs: u32, channels: u16) -> Vec<i16> {
    let len = (sample_rate * secs) as usize;
    let mut out = Vec::with_capacity(len * channels as usize);
    for i in 0..len {
        let t = i as f64 / sample_rate as f64;
        out.push((12_000.0 * (2.0 * PI * freq * t).sin()) as i16);
        for _ in 1..channels {
            out.push(0);
        }
    }
    out
}

/// Write 16-bit integer PCM samples with hound
fn write_wav(path: &Path, sample_rate: u32, channels: u16, samples: &[i16]) {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("Failed to create WAV writer");
    for &s in samples {
        writer.write_sample(s).expect("Failed to write sample");
    }
    writer.finalize().expect("Failed to finalize WAV");
}

fn small_column_renderer() -> Box<dyn freq_visualiser::render::FrameRenderer> {
    let props = Properties::parse("IMG_WIDTH=128\nIMG_HEIGHT=72");
    RendererRegistry::with_builtin()
        .create("column", &props)
        .expect("Failed to create renderer")
}

#[test]
fn test_wav_decodes_first_channel() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let wav = temp_dir.path().join("stereo.wav");
    write_wav(&wav, 8000, 2, &sine_samples(1000.0, 8000, 1, 2));

    let clip = AudioFile::new(&wav).load().expect("Failed to decode wav");

    assert_eq!(clip.sample_rate, 8000);
    assert_eq!(clip.sample_size, 2);
    assert_eq!(clip.samples.len(), 8000);
    assert_eq!(clip.samples[0], 0);
    // 1000 Hz at 8 kHz peaks on the third sample
    assert_eq!(clip.samples[2], 12_000);
}

#[test]
fn test_export_writes_png_sequence() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let wav = temp_dir.path().join("tone.wav");
    write_wav(&wav, 8000, 1, &sine_samples(1000.0, 8000, 2, 1));

    let pipeline = FramePipeline::new(VisualiserConfig::new()).expect("Failed to create pipeline");
    let mut renderer = small_column_renderer();
    let mut sink = PngSequenceSink::new(temp_dir.path().join("frames")).unwrap();

    let analysis = pipeline
        .run(&AudioFile::new(&wav), renderer.as_mut(), &mut sink)
        .expect("Visualisation failed");

    assert_eq!(analysis.frame_count(), 16);
    assert_eq!(sink.written(), 16);
    for i in 0..16 {
        assert!(sink.frame_path(i).exists(), "missing frame {}", i);
    }
    assert!(!sink.frame_path(16).exists());

    // threshold 1016 Hz is bucket 5 of the default ten
    assert!(analysis.frames.iter().all(|f| f.peak_bucket() == Some(5)));

    let first = image::open(sink.frame_path(0)).unwrap().to_rgb8();
    assert_eq!(first.dimensions(), (128, 72));
}

#[test]
fn test_json_dump_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let pipeline = FramePipeline::new(VisualiserConfig::new().with_bucket_count(6)).unwrap();
    let clip = AudioClip::from_samples(8000, sine_samples(440.0, 8000, 1, 1).into_iter().map(i32::from).collect());

    let analysis = pipeline.analyze(&clip).unwrap();
    let path = temp_dir.path().join("frames.json");
    analysis.write_json(&path).unwrap();

    let loaded = SpectralAnalysis::read_json(&path).unwrap();
    assert_eq!(loaded, analysis);
    assert_eq!(loaded.thresholds.len(), 6);
    assert!(loaded.frames.iter().all(|f| f.len() == 6));
}

#[test]
fn test_every_builtin_renderer_runs() {
    let pipeline = FramePipeline::new(VisualiserConfig::new().with_extrema_window(4)).unwrap();
    let clip = AudioClip::from_samples(8000, sine_samples(250.0, 8000, 1, 1).into_iter().map(i32::from).collect());
    let props = Properties::parse("IMG_WIDTH=64\nIMG_HEIGHT=48\nDEPTH_VALUE=3");
    let registry = RendererRegistry::with_builtin();

    for name in registry.names() {
        let mut renderer = registry.create(name, &props).unwrap();
        let mut sink = MemorySink::new();
        pipeline.run(&clip, renderer.as_mut(), &mut sink).unwrap();

        assert_eq!(sink.frames.len(), 8, "renderer {}", name);
        assert!(sink.frames.iter().all(|f| f.dimensions() == (64, 48)));
    }
}

#[test]
fn test_silent_clip_extrema_are_zero() {
    let pipeline = FramePipeline::new(VisualiserConfig::new()).unwrap();
    let clip = AudioClip::from_samples(8000, vec![0; 8000]);

    let analysis = pipeline.analyze(&clip).unwrap();
    assert_eq!(analysis.frame_count(), 8);
    assert!(pipeline
        .extrema(&analysis)
        .iter()
        .all(|e| *e == Extrema::new(0, 0)));
}

#[test]
fn test_missing_audio_is_fatal() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let pipeline = FramePipeline::new(VisualiserConfig::new()).unwrap();
    let mut renderer = small_column_renderer();
    let mut sink = MemorySink::new();

    let result = pipeline.run(
        &AudioFile::new(temp_dir.path().join("missing.wav")),
        renderer.as_mut(),
        &mut sink,
    );
    assert!(result.is_err());
    assert!(sink.frames.is_empty());
}

#[test]
fn test_truncated_audio_writes_no_frames() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let wav = temp_dir.path().join("cut.wav");
    write_wav(&wav, 8000, 1, &sine_samples(1000.0, 8000, 1, 1));

    let bytes = fs::read(&wav).unwrap();
    fs::write(&wav, &bytes[..bytes.len() / 2]).unwrap();

    let pipeline = FramePipeline::new(VisualiserConfig::new()).unwrap();
    let mut renderer = small_column_renderer();
    let mut sink = MemorySink::new();

    let result = pipeline.run(&AudioFile::new(&wav), renderer.as_mut(), &mut sink);
    assert!(result.is_err());
    assert!(sink.frames.is_empty());
}
