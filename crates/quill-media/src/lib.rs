//! # quill-media
//!
//! Video metadata and transcripts, fetched by running `yt-dlp`.
//!
//! - [`VideoSource`]: the contract the note agents depend on
//! - [`YtDlp`]: implementation over the `yt-dlp` executable
//! - [`ProcessRunner`]: subprocess seam, real ([`TokioProcessRunner`]) or mocked
//! - [`vtt::vtt_to_text`]: WebVTT subtitles to plain transcript text

#![deny(unsafe_code)]

pub mod errors;
pub mod info;
pub mod process;
pub mod source;
pub mod vtt;
pub mod ytdlp;

pub use errors::{MediaError, Result};
pub use info::{Chapter, VideoInfo};
pub use process::{ProcessOptions, ProcessOutput, ProcessRunner, TokioProcessRunner};
pub use source::VideoSource;
pub use ytdlp::{YtDlp, YtDlpConfig};
