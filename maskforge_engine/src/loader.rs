//! Loader utilities for building the engine from authored content.
//!
//! Lexicon and thesaurus tables are TOML-backed; intents, scenes, and the
//! player start state are RON-backed. Everything is validated together
//! before any runtime structure is built.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use log::info;
use maskforge_data::{ContentDef, Id, IntentDef, LexiconDef, PlayerDef, SceneDef, ThesaurusDef, validate_content};
use serde::de::DeserializeOwned;

use crate::engine::ParserEngine;
use crate::intent::Intent;
use crate::lexicon::{Lexicon, Thesaurus};
use crate::player::PlayerView;
use crate::scene::SceneIndex;

/// Load and validate all authored content from the data directory.
///
/// # Errors
/// Errors bubble up from file IO, deserialization, or validation.
pub fn load_content() -> Result<ContentDef> {
    let root = data_dir();
    let lexicon: LexiconDef = load_toml(&root.join("lexicon.toml")).context("while loading lexicon")?;
    let thesaurus: ThesaurusDef = load_toml(&root.join("thesaurus.toml")).context("while loading thesaurus")?;
    let intents: Vec<IntentDef> = load_ron(&root.join("intents.ron")).context("while loading intents")?;
    let scenes: Vec<SceneDef> = load_ron(&root.join("scenes.ron")).context("while loading scenes")?;
    let player: PlayerDef = load_ron(&root.join("player.ron")).context("while loading player start state")?;

    let content = ContentDef {
        lexicon,
        thesaurus,
        intents,
        scenes,
        player,
    };
    validate(&content)?;

    info!("{} noun entries loaded", content.lexicon.nouns.len());
    info!("{} verb synonyms loaded", content.thesaurus.synonyms.len());
    info!("{} intents loaded", content.intents.len());
    info!("{} scenes loaded", content.scenes.len());

    Ok(content)
}

/// Locate the content directory.
///
/// A `MASKFORGE_DATA` environment variable wins outright. Without it, the
/// loader probes the places cargo and a packaged binary leave the files:
/// `data/` when running from inside the package, `maskforge_engine/data`
/// when running from the workspace root, and the same two next to the
/// executable. When every probe misses, the plain `data/` path is returned
/// so the resulting IO error names a sensible location.
fn data_dir() -> PathBuf {
    if let Some(dir) = env::var_os("MASKFORGE_DATA") {
        return PathBuf::from(dir);
    }

    let mut probes = vec![PathBuf::from("data"), PathBuf::from("maskforge_engine/data")];
    if let Ok(exe) = env::current_exe() {
        // exe dir and its parent cover target/debug and target layouts
        for dir in exe.ancestors().skip(1).take(2) {
            probes.push(dir.join("data"));
            probes.push(dir.join("maskforge_engine/data"));
        }
    }

    probes
        .into_iter()
        .find(|probe| probe.is_dir())
        .unwrap_or_else(|| PathBuf::from("data"))
}

fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("while reading {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("while parsing {}", path.display()))
}

fn load_ron<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("while reading {}", path.display()))?;
    ron::from_str(&text).with_context(|| format!("while parsing {}", path.display()))
}

/// Validate loaded content and return a single aggregated error.
fn validate(content: &ContentDef) -> Result<()> {
    let errors = validate_content(content);
    if errors.is_empty() {
        return Ok(());
    }
    let details = errors
        .into_iter()
        .map(|err| format!("- {err}"))
        .collect::<Vec<_>>()
        .join("\n");
    bail!("content validation failed:\n{details}");
}

/// Assemble the understanding pipeline from validated content.
///
/// # Errors
/// Fails if the precomputed alias map cannot be built.
pub fn build_engine(content: &ContentDef) -> Result<ParserEngine> {
    let lexicon = Lexicon::from_def(&content.lexicon);
    let thesaurus = Thesaurus::from_def(&content.thesaurus);
    let intents = content.intents.iter().map(Intent::from_def).collect();
    let engine = ParserEngine::new(lexicon, thesaurus, intents).context("while building the alias map")?;
    Ok(engine)
}

/// Build the scene table keyed by scene id.
pub fn build_scenes(content: &ContentDef) -> BTreeMap<Id, SceneIndex> {
    content
        .scenes
        .iter()
        .map(|def| (def.id.clone(), SceneIndex::from_def(def)))
        .collect()
}

/// Build the player start state.
pub fn build_player(content: &ContentDef) -> PlayerView {
    PlayerView::from_def(&content.player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use maskforge_data::SlotName;

    #[test]
    fn data_dir_resolves_to_the_shipped_content() {
        // cargo runs tests with the package as cwd, so the `data` probe hits
        let root = data_dir();
        assert!(root.join("lexicon.toml").is_file(), "no lexicon under {root:?}");
        assert!(root.join("scenes.ron").is_file(), "no scenes under {root:?}");
    }

    #[test]
    fn lexicon_toml_shape_parses() {
        let text = r#"
            [nouns]
            crucible = ["bowl", "clay bowl"]

            [directions]
            n = ["north", "n"]
        "#;
        let def: LexiconDef = toml::from_str(text).unwrap();
        assert_eq!(def.nouns["crucible"], vec!["bowl", "clay bowl"]);
        assert_eq!(def.directions["n"], vec!["north", "n"]);
    }

    #[test]
    fn intent_ron_shape_parses() {
        let text = r#"
            [
                (
                    id: "UNLOCK",
                    root: "UNLOCK",
                    intent_type: PHYSICAL,
                    slots: [object, tool],
                    requirements: Some((
                        resources: { "TIME": 1 },
                    )),
                    effects: [
                        state(path: "object.locked", op: set, value: false),
                        advance_time(minutes: 1),
                    ],
                    hints: ["unlock chest with key"],
                ),
            ]
        "#;
        let defs: Vec<IntentDef> = ron::from_str(text).unwrap();
        assert_eq!(defs[0].slots, vec![SlotName::Object, SlotName::Tool]);
        assert_eq!(defs[0].effects.len(), 2);
    }

    #[test]
    fn validation_failure_aggregates_into_one_error() {
        let mut content = ContentDef::default();
        content.scenes.push(SceneDef {
            id: "forge".into(),
            description: "A forge.".into(),
            tags: Vec::new(),
            objects: Vec::new(),
            exits: BTreeMap::new(),
        });
        content.player.start_scene = "nowhere".into();
        let err = validate(&content).unwrap_err();
        assert!(err.to_string().contains("content validation failed"));
    }
}
