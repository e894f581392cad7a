//! [`VideoSource`] over the `yt-dlp` command-line tool.
//!
//! - metadata: `yt-dlp -j -- <url>`, JSON on stdout
//! - transcript: `yt-dlp --write-auto-subs --sub-lang <lang> --skip-download
//!   -o %(id)s.%(ext)s -- <url>` inside a fresh temporary directory, which is
//!   removed once the `.vtt` file has been read
//!
//! Only the exit status decides success. Output on stderr with status 0 is
//! logged and otherwise ignored, since `yt-dlp` prints warnings there.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use crate::errors::{MediaError, Result};
use crate::info::VideoInfo;
use crate::process::{ProcessOptions, ProcessOutput, ProcessRunner, TokioProcessRunner};
use crate::source::VideoSource;
use crate::vtt::vtt_to_text;

/// How to invoke `yt-dlp`.
#[derive(Clone, Debug)]
pub struct YtDlpConfig {
    /// Executable name or path.
    pub program: String,
    /// Subtitle language for transcripts.
    pub sub_lang: String,
    /// Per-invocation timeout.
    pub timeout: Option<Duration>,
}

impl Default for YtDlpConfig {
    fn default() -> Self {
        Self {
            program: "yt-dlp".to_string(),
            sub_lang: "en".to_string(),
            timeout: Some(Duration::from_secs(300)),
        }
    }
}

/// `yt-dlp`-backed video source.
pub struct YtDlp {
    config: YtDlpConfig,
    runner: Arc<dyn ProcessRunner>,
}

impl YtDlp {
    /// Source that spawns real processes.
    pub fn new(config: YtDlpConfig) -> Self {
        Self::with_runner(config, Arc::new(TokioProcessRunner))
    }

    /// Source that runs through `runner`.
    pub fn with_runner(config: YtDlpConfig, runner: Arc<dyn ProcessRunner>) -> Self {
        Self { config, runner }
    }

    /// Active configuration.
    pub fn config(&self) -> &YtDlpConfig {
        &self.config
    }

    fn info_args(url: &str) -> Vec<String> {
        vec!["-j".into(), "--".into(), url.into()]
    }

    fn transcript_args(&self, url: &str) -> Vec<String> {
        vec![
            "--write-auto-subs".into(),
            "--sub-lang".into(),
            self.config.sub_lang.clone(),
            "--skip-download".into(),
            "-o".into(),
            "%(id)s.%(ext)s".into(),
            "--".into(),
            url.into(),
        ]
    }

    async fn run_checked(&self, args: &[String], cwd: &Path) -> Result<ProcessOutput> {
        let opts = ProcessOptions {
            working_directory: cwd.to_path_buf(),
            timeout: self.config.timeout,
        };
        let output = self.runner.run(&self.config.program, args, &opts).await?;

        if !output.success() {
            return Err(MediaError::Failed {
                program: self.config.program.clone(),
                status: output.exit_code,
                stderr: output.stderr.trim().to_string(),
            });
        }
        if !output.stderr.trim().is_empty() {
            warn!(
                program = %self.config.program,
                stderr = %output.stderr.trim(),
                "extractor wrote to stderr"
            );
        }
        Ok(output)
    }
}

#[async_trait]
impl VideoSource for YtDlp {
    #[instrument(skip(self))]
    async fn video_info(&self, url: &str) -> Result<VideoInfo> {
        let cwd = std::env::temp_dir();
        let output = self.run_checked(&Self::info_args(url), &cwd).await?;
        let info = VideoInfo::from_ytdlp_json(&output.stdout, url)?;
        info!(title = %info.title, chapters = info.chapters.len(), "video metadata fetched");
        Ok(info)
    }

    #[instrument(skip(self))]
    async fn transcript(&self, url: &str) -> Result<String> {
        let dir = tempfile::tempdir()?;
        let _ = self
            .run_checked(&self.transcript_args(url), dir.path())
            .await?;

        let Some(vtt_path) = find_subtitle_file(dir.path()).await? else {
            return Err(MediaError::TranscriptMissing {
                url: url.to_string(),
            });
        };
        debug!(path = %vtt_path.display(), "reading subtitles");

        let vtt = tokio::fs::read_to_string(&vtt_path).await?;
        let text = vtt_to_text(&vtt);
        info!(chars = text.len(), "transcript fetched");
        Ok(text)
    }
}

/// First `.vtt` file in `dir` by name.
async fn find_subtitle_file(dir: &Path) -> Result<Option<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut found = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "vtt") {
            found.push(path);
        }
    }
    found.sort();
    Ok(found.into_iter().next())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::sync::Mutex;

    type Call = (String, Vec<String>, PathBuf);

    type Handler = Box<dyn Fn(&[String], &ProcessOptions) -> ProcessOutput + Send + Sync>;

    struct MockRunner {
        handler: Handler,
        calls: Mutex<Vec<Call>>,
    }

    impl MockRunner {
        fn new(
            handler: impl Fn(&[String], &ProcessOptions) -> ProcessOutput + Send + Sync + 'static,
        ) -> Arc<Self> {
            Arc::new(Self {
                handler: Box::new(handler),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProcessRunner for MockRunner {
        async fn run(
            &self,
            program: &str,
            args: &[String],
            opts: &ProcessOptions,
        ) -> Result<ProcessOutput> {
            self.calls.lock().unwrap().push((
                program.to_string(),
                args.to_vec(),
                opts.working_directory.clone(),
            ));
            Ok((self.handler)(args, opts))
        }
    }

    fn output(stdout: &str, stderr: &str, exit_code: i32) -> ProcessOutput {
        ProcessOutput {
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            exit_code,
            duration_ms: 5,
        }
    }

    const URL: &str = "https://www.youtube.com/watch?v=2utAfvGAbgg&t=10";

    #[tokio::test]
    async fn video_info_passes_url_as_single_argument() {
        let runner = MockRunner::new(|_, _| {
            output(r#"{"fulltitle": "Entropy", "uploader": "Chan"}"#, "", 0)
        });
        let source = YtDlp::with_runner(YtDlpConfig::default(), runner.clone());

        let info = source.video_info(URL).await.unwrap();
        assert_eq!(info.title, "Entropy");
        assert_eq!(info.video_url, URL);

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "yt-dlp");
        assert_eq!(calls[0].1, vec!["-j", "--", URL]);
    }

    #[tokio::test]
    async fn non_zero_exit_is_failure() {
        let runner = MockRunner::new(|_, _| output("", "ERROR: Unsupported URL\n", 1));
        let source = YtDlp::with_runner(YtDlpConfig::default(), runner);
        let err = source.video_info("nope").await.unwrap_err();
        assert_matches!(err, MediaError::Failed { status: 1, ref stderr, .. } if stderr == "ERROR: Unsupported URL");
    }

    #[tokio::test]
    async fn stderr_warnings_with_success_are_tolerated() {
        let runner = MockRunner::new(|_, _| output(r#"{"title": "t"}"#, "WARNING: slow", 0));
        let source = YtDlp::with_runner(YtDlpConfig::default(), runner);
        assert_eq!(source.video_info(URL).await.unwrap().title, "t");
    }

    #[tokio::test]
    async fn transcript_reads_vtt_from_temp_dir() {
        let runner = MockRunner::new(|_, opts| {
            let vtt = "WEBVTT\n\n00:00.000 --> 00:01.000\nhello <c>there</c>\n";
            std::fs::write(opts.working_directory.join("2utAfvGAbgg.es.vtt"), vtt).unwrap();
            output("", "", 0)
        });
        let config = YtDlpConfig {
            sub_lang: "es".into(),
            ..YtDlpConfig::default()
        };
        let source = YtDlp::with_runner(config, runner.clone());

        let text = source.transcript(URL).await.unwrap();
        assert_eq!(text, "hello there");

        let calls = runner.calls();
        assert_eq!(
            calls[0].1,
            vec![
                "--write-auto-subs",
                "--sub-lang",
                "es",
                "--skip-download",
                "-o",
                "%(id)s.%(ext)s",
                "--",
                URL
            ]
        );
        // temporary directory is gone afterwards
        assert!(!calls[0].2.exists());
    }

    #[tokio::test]
    async fn transcript_missing_when_no_vtt_written() {
        let runner = MockRunner::new(|_, _| output("", "", 0));
        let source = YtDlp::with_runner(YtDlpConfig::default(), runner);
        let err = source.transcript(URL).await.unwrap_err();
        assert_matches!(err, MediaError::TranscriptMissing { .. });
    }
}
