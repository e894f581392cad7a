//! Subcommand bodies.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use quill_media::VideoSource;
use quill_runtime::{
    ArticleGenerator, NoteRequest, RegularNoteAgent, VideoNoteAgent, VideoNoteRequest,
};
use quill_settings::QuillSettings;
use tracing::info;

use crate::wiring;
use crate::{ArticleArgs, NoteArgs, VideoNoteArgs};

pub(crate) fn prompts(settings: &QuillSettings) -> Result<()> {
    let store = wiring::prompt_store(settings);
    let templates = store
        .list()
        .with_context(|| format!("failed to list prompts in {}", store.dir().display()))?;
    for (id, path) in &templates {
        println!("{id}\t{}", path.display());
    }
    Ok(())
}

pub(crate) async fn article(settings: &QuillSettings, args: ArticleArgs) -> Result<()> {
    let mut blocks = args.blocks;
    if let Some(path) = &args.blocks_file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read blocks from {}", path.display()))?;
        blocks.extend(parse_blocks(&text));
    }
    if blocks.is_empty() {
        bail!("no blocks given; use --block or --blocks-file");
    }

    let personality = args
        .personality
        .unwrap_or_else(|| settings.generator.personality.clone());
    let client = wiring::prompt_client(settings)?;
    let mut generator = ArticleGenerator::new(client, blocks).with_personality(personality);

    let _ = generator
        .generate()
        .await
        .context("article generation failed")?;

    if let Some(index) = args.modify {
        let template = args
            .template
            .unwrap_or_else(|| settings.generator.modify_template.clone());
        let rules = args.rules.unwrap_or_default();
        let _ = generator
            .modify_section(index, &template, &rules)
            .await
            .with_context(|| format!("failed to modify section {index}"))?;
    }

    let text = generator.article().render();
    write_output(args.out.as_deref(), &text)
}

pub(crate) async fn note(settings: &QuillSettings, args: NoteArgs) -> Result<()> {
    let note_to_extend = match (&args.extend, &args.extend_file) {
        (Some(text), _) => Some(text.clone()),
        (None, Some(path)) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
        ),
        (None, None) => None,
    };
    let request = NoteRequest {
        title: args.title,
        pages: args.pages,
        link: args.link,
        image: args.image,
        tags: args.tags,
        note_to_extend,
    };

    let agent = RegularNoteAgent::new(wiring::prompt_client(settings)?, wiring::vault(settings));
    let saved = agent.run(&request).await.context("note generation failed")?;
    println!("{}", saved.path.display());
    Ok(())
}

pub(crate) async fn video_note(settings: &QuillSettings, args: VideoNoteArgs) -> Result<()> {
    let source: Arc<dyn VideoSource> = Arc::new(wiring::video_source(settings));
    let agent = VideoNoteAgent::new(
        wiring::prompt_client(settings)?,
        wiring::vault(settings),
        source,
    );
    let request = VideoNoteRequest {
        url: args.url,
        pages: args.pages,
    };
    let saved = agent
        .run(&request)
        .await
        .with_context(|| format!("video note for {} failed", request.url))?;
    println!("{}", saved.path.display());
    Ok(())
}

pub(crate) async fn video_info(settings: &QuillSettings, url: &str) -> Result<()> {
    let source = wiring::video_source(settings);
    let info = source
        .video_info(url)
        .await
        .with_context(|| format!("failed to fetch metadata for {url}"))?;
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

/// One topic per non-blank line, trimmed.
fn parse_blocks(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
}

fn write_output(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = text.len(), "article written");
        }
        None => println!("{text}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn blocks_skip_blank_lines() {
        let blocks: Vec<String> = parse_blocks("  Intro \n\n\tDetails\r\n   \nWrap up").collect();
        assert_eq!(blocks, ["Intro", "Details", "Wrap up"]);
    }

    #[test]
    fn output_goes_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("article.md");
        write_output(Some(&path), "# A\n\nB").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# A\n\nB");
    }

    #[test]
    fn prompts_lists_shipped_directory() {
        let mut settings = QuillSettings::default();
        settings.prompts.dir = format!("{}/../../prompts", env!("CARGO_MANIFEST_DIR"));
        prompts(&settings).unwrap();
    }

    #[test]
    fn prompts_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let mut settings = QuillSettings::default();
        settings.prompts.dir = dir.path().join("absent").display().to_string();
        assert!(prompts(&settings).is_err());
    }

    #[tokio::test]
    async fn article_without_blocks_fails_before_any_request() {
        let args = ArticleArgs {
            blocks: Vec::new(),
            blocks_file: None,
            out: None,
            modify: None,
            rules: None,
            template: None,
            personality: None,
        };
        let err = article(&QuillSettings::default(), args).await.unwrap_err();
        assert!(err.to_string().contains("no blocks"));
    }
}
