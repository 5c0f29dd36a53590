pub mod config;
pub mod metadata;
pub mod server;
pub mod youtube;

use serde::Serialize;

/// A single captioned segment; timing exists upstream but only text is kept
#[derive(Debug, Clone)]
pub struct Segment {
    pub text: String,
}

/// One available caption track as listed by the provider
#[derive(Debug, Clone)]
pub struct TranscriptTrack {
    pub language: String,
    pub language_code: String,
    pub is_generated: bool,
}

/// Concatenated transcript for a video, plus the selected track's descriptors
#[derive(Debug, Clone)]
pub struct Transcript {
    pub video_id: String,
    pub text: String,
    pub track: TranscriptTrack,
}

/// Descriptive fields returned alongside the transcript
#[derive(Debug, Clone, Serialize)]
pub struct VideoMetadata {
    pub video_id: String,
    pub title: String,
    pub author: String,
    pub publish_date: String,
    pub language: String,
    pub language_code: String,
    pub is_generated: bool,
    pub url: String,
    pub fetched_at: String,
}

/// Canonical watch-page URL for a video ID
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

/// Join segment texts with a single ASCII space, preserving segment order.
/// No trimming or normalization is applied.
pub fn join_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
