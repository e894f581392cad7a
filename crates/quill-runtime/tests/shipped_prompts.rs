#![allow(missing_docs)]

use std::collections::BTreeSet;
use std::path::PathBuf;

use quill_prompts::{PromptStore, placeholder_names};

fn shipped_store() -> PromptStore {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../prompts");
    PromptStore::new(root)
}

fn names(store: &PromptStore, id: &str) -> BTreeSet<String> {
    let template = store.load(id).unwrap();
    placeholder_names(&template).into_iter().collect()
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn every_runtime_template_ships() {
    let store = shipped_store();
    let ids: Vec<String> = store.list().unwrap().into_keys().collect();
    assert_eq!(
        ids,
        [
            "ARTICLE_GENERATOR",
            "ARTICLE_GENERATOR_INITIAL",
            "ARTICLE_GENERATOR_MODIFY_BLOCK",
            "REGULAR_NOTE",
            "VIDEO_NOTE",
        ]
    );
}

#[test]
fn identifiers_are_stable_across_listings() {
    let store = shipped_store();
    let first = store.list().unwrap();
    let second = store.list().unwrap();
    assert_eq!(first, second);
    assert!(
        first["ARTICLE_GENERATOR_INITIAL"]
            .ends_with("articleGeneratorInitial.prompt")
    );
}

#[test]
fn templates_use_the_placeholders_the_runtime_fills() {
    let store = shipped_store();
    assert_eq!(
        names(&store, quill_runtime::generator::INITIAL_TEMPLATE),
        set(&["PERSONALITY", "TOPIC"])
    );
    assert_eq!(
        names(&store, quill_runtime::generator::CONTINUE_TEMPLATE),
        set(&["PERSONALITY", "TOPIC", "ARTICLE"])
    );
    assert_eq!(
        names(&store, quill_runtime::generator::MODIFY_TEMPLATE),
        set(&["PERSONALITY", "ARTICLE", "CURRENT_BLOCK", "RULES"])
    );
    assert_eq!(
        names(&store, quill_runtime::agents::REGULAR_NOTE_TEMPLATE),
        set(&["PAGES", "NOTE"])
    );
    assert_eq!(
        names(&store, quill_runtime::agents::VIDEO_NOTE_TEMPLATE),
        set(&["TITLE", "UPLOADER", "DESCRIPTION", "CHAPTERS", "TRANSCRIPT", "PAGES"])
    );
}
