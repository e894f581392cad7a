#![allow(missing_docs)]

use std::fs;
use std::sync::Arc;

use quill_core::{Classify, ErrorKind};
use quill_llm::{InferenceError, MockClient};
use quill_prompts::PromptStore;
use quill_runtime::generator::MODIFY_TEMPLATE;
use quill_runtime::{Article, ArticleGenerator, GeneratorState, PromptClient};
use tempfile::TempDir;

struct Harness {
    prompts: TempDir,
    mock: Arc<MockClient>,
    client: PromptClient,
}

fn harness() -> Harness {
    let prompts = TempDir::new().unwrap();
    let write = |name: &str, body: &str| fs::write(prompts.path().join(name), body).unwrap();
    write(
        "articleGeneratorInitial.prompt",
        "[intro] <<PERSONALITY>>\nTOPIC: <<TOPIC>>",
    );
    write(
        "articleGenerator.prompt",
        "[next] <<PERSONALITY>>\nTOPIC: <<TOPIC>>\nARTICLE:\n<<ARTICLE>>",
    );
    write(
        "articleGeneratorModifyBlock.prompt",
        "[modify]\nBLOCK:\n<<CURRENT_BLOCK>>\nRULES: <<RULES>>\nARTICLE:\n<<ARTICLE>>",
    );
    let mock = Arc::new(MockClient::new());
    let client = PromptClient::new(mock.clone(), PromptStore::new(prompts.path()));
    Harness {
        prompts,
        mock,
        client,
    }
}

#[tokio::test]
async fn each_request_carries_the_article_so_far() {
    let h = harness();
    for text in ["# Title\n\nIntro.", "## Part one\n\nBody.", "## Part two\n\nMore."] {
        h.mock.push_text(text);
    }

    let mut generator = ArticleGenerator::new(h.client.clone(), ["B0", "B1", "B2"]);
    let sections = generator.generate().await.unwrap().to_vec();
    assert_eq!(sections.len(), 3);

    let prompts = h.mock.prompts();
    assert!(prompts[0].starts_with("[intro]"));
    assert!(prompts[0].contains("TOPIC: B0"));

    assert!(prompts[1].contains("TOPIC: B1"));
    assert!(prompts[1].ends_with(&format!("ARTICLE:\n{}", sections[0])));

    let joined = format!("{}\n\n{}", sections[0], sections[1]);
    assert!(prompts[2].contains("TOPIC: B2"));
    assert!(prompts[2].ends_with(&format!("ARTICLE:\n{joined}")));

    assert_eq!(
        generator.article().render(),
        format!("{}\n\n{}\n\n{}", sections[0], sections[1], sections[2])
    );
}

#[tokio::test]
async fn personality_reaches_every_prompt() {
    let h = harness();
    h.mock.push_text("a");
    h.mock.push_text("b");
    let mut generator =
        ArticleGenerator::new(h.client.clone(), ["x", "y"]).with_personality("You are terse");
    let _ = generator.generate().await.unwrap();
    assert!(
        h.mock
            .prompts()
            .iter()
            .all(|p| p.contains("You are terse"))
    );
}

#[tokio::test]
async fn modify_keeps_neighbours_byte_identical() {
    let h = harness();
    for text in ["S0 ✓", "S1", "S2\n  trailing  ", "S1 rewritten"] {
        h.mock.push_text(text);
    }
    let mut generator = ArticleGenerator::new(h.client.clone(), ["B0", "B1", "B2"]);
    let before = generator.generate().await.unwrap().to_vec();

    let _ = generator
        .modify_section(1, MODIFY_TEMPLATE, "shorter")
        .await
        .unwrap();

    let after = generator.article().sections();
    assert_eq!(after[0], before[0]);
    assert_eq!(after[1], "S1 rewritten");
    assert_eq!(after[2], before[2]);

    let prompt = h.mock.prompts().pop().unwrap();
    assert!(prompt.contains("BLOCK:\nS1\n"));
    assert!(prompt.contains("RULES: shorter"));
    assert!(prompt.ends_with(&before.join("\n\n")));
}

#[tokio::test]
async fn modify_with_unknown_template_is_not_found() {
    let h = harness();
    let article = Article::from(vec!["one".to_string(), "two".to_string()]);
    let mut generator =
        ArticleGenerator::new(h.client.clone(), ["B0", "B1"]).with_article(article.clone());

    let err = generator
        .modify_section(0, "DOES_NOT_EXIST", "rules")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(generator.article(), &article);
    assert_eq!(h.mock.call_count(), 0);
}

#[tokio::test]
async fn resume_after_failure_does_not_repeat_the_introduction() {
    let h = harness();
    h.mock.push_text("S0");
    h.mock.push_error(InferenceError::MalformedResponse {
        message: "no choices".into(),
    });
    let mut generator = ArticleGenerator::new(h.client.clone(), ["B0", "B1", "B2"]);

    let err = generator.generate().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Inference);
    assert_eq!(generator.state(), GeneratorState::Seeded);

    h.mock.push_text("S1");
    h.mock.push_text("S2");
    let sections = generator.generate().await.unwrap();
    assert_eq!(sections, ["S0", "S1", "S2"]);

    let intro_calls = h
        .mock
        .prompts()
        .iter()
        .filter(|p| p.starts_with("[intro]"))
        .count();
    assert_eq!(intro_calls, 1);
}

#[tokio::test]
async fn missing_continuation_template_stops_after_seed() {
    let h = harness();
    fs::remove_file(h.prompts.path().join("articleGenerator.prompt")).unwrap();
    h.mock.push_text("S0");

    let mut generator = ArticleGenerator::new(h.client.clone(), ["B0", "B1"]);
    let err = generator.generate().await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(generator.article().sections(), ["S0"]);
}
