// Unit tests for domain models

use super::*;

#[test]
fn test_segment_bounds_complete() {
    let segment = SegmentSpec::new("00:00:10", "00:00:20");
    assert_eq!(segment.bounds(), Some(("00:00:10", "00:00:20")));
    assert!(segment.is_complete());
}

#[test]
fn test_segment_bounds_missing_end() {
    let segment = SegmentSpec::start_only("00:00:10");
    assert_eq!(segment.bounds(), None);
    assert!(!segment.is_complete());
}

#[test]
fn test_segment_bounds_empty_strings() {
    let segment = SegmentSpec::new("", "00:00:20");
    assert!(!segment.is_complete());

    let segment = SegmentSpec::new("00:00:10", "");
    assert!(!segment.is_complete());
}

#[test]
fn test_segment_deserialize_missing_keys() {
    let segments: Vec<SegmentSpec> =
        serde_json::from_str(r#"[{"start": "00:00:00", "end": "00:00:05"}, {"start": "00:00:10"}, {}]"#)
            .unwrap();

    assert_eq!(segments.len(), 3);
    assert!(segments[0].is_complete());
    assert_eq!(segments[1].end, None);
    assert_eq!(segments[2], SegmentSpec::default());
}

#[test]
fn test_media_kind_suffix() {
    assert_eq!(MediaKind::Audio.file_suffix(), "audio.mp3");
    assert_eq!(MediaKind::Video.file_suffix(), "video.mp4");
    assert_eq!(MediaKind::Video.to_string(), "video");
}

#[test]
fn test_export_result_push_keeps_order() {
    let mut result = ExportResult::empty();
    assert!(result.is_empty());

    result.push(MediaKind::Audio, PathBuf::from("a1.mp3"));
    result.push(MediaKind::Video, PathBuf::from("v1.mp4"));
    result.push(MediaKind::Audio, PathBuf::from("a2.mp3"));

    assert_eq!(
        result.audio_segments,
        vec![PathBuf::from("a1.mp3"), PathBuf::from("a2.mp3")]
    );
    assert_eq!(result.video_segments, vec![PathBuf::from("v1.mp4")]);
    assert_eq!(result.total_files(), 3);
}

#[test]
fn test_export_result_json_shape() {
    let mut result = ExportResult::empty();
    result.push(MediaKind::Audio, PathBuf::from("out/a.mp3"));

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["audio_segments"][0], "out/a.mp3");
    assert!(json["video_segments"].as_array().unwrap().is_empty());
}
