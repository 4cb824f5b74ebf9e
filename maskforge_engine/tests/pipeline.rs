use maskforge_data::SlotName;
use maskforge_engine as mf;
use mf::loader::{build_engine, build_player, build_scenes, load_content};
use mf::outcome::{FailReason, RequirementKey, ResolveResult};
use mf::repl::{ReplControl, Session, dispatch};

struct Demo {
    engine: mf::ParserEngine,
    scenes: std::collections::BTreeMap<String, mf::SceneIndex>,
    player: mf::PlayerView,
}

impl Demo {
    fn load() -> Self {
        let content = load_content().expect("demo content loads");
        Self {
            engine: build_engine(&content).expect("engine builds"),
            scenes: build_scenes(&content),
            player: build_player(&content),
        }
    }

    fn understand_at(&self, scene: &str, input: &str) -> ResolveResult {
        self.engine.understand(input, &self.scenes[scene], &self.player)
    }

    fn understand(&self, input: &str) -> ResolveResult {
        self.understand_at("mountain_forge", input)
    }
}

fn expect_resolved(result: ResolveResult) -> (String, std::collections::BTreeMap<SlotName, String>) {
    match result {
        ResolveResult::Resolved {
            intent_id, bindings, ..
        } => (intent_id, bindings),
        ResolveResult::Failed(failure) => panic!("expected resolution, got failure: {failure:?}"),
    }
}

fn expect_failed(result: ResolveResult) -> mf::ResolveFailure {
    match result {
        ResolveResult::Failed(failure) => failure,
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn test_demo_content_loads_and_validates() {
    let content = load_content().unwrap();
    assert_eq!(content.scenes.len(), 8);
    assert!(content.intents.len() > 25);
    assert_eq!(content.player.start_scene, "mountain_forge");
}

#[test]
fn test_lib_version() {
    assert!(!mf::MASKFORGE_VERSION.is_empty());
}

#[test]
fn test_go_direction_shorthand() {
    let demo = Demo::load();
    let (intent, bindings) = expect_resolved(demo.understand("go n"));
    assert_eq!(intent, "MOVE");
    assert_eq!(bindings.get(&SlotName::Direction).map(String::as_str), Some("n"));
}

#[test]
fn test_bare_direction_word_moves() {
    let demo = Demo::load();
    let (intent, bindings) = expect_resolved(demo.understand("north"));
    assert_eq!(intent, "MOVE");
    assert_eq!(bindings.get(&SlotName::Direction).map(String::as_str), Some("n"));
}

#[test]
fn test_direction_phrase_recovers_direction_word() {
    let demo = Demo::load();
    let (intent, bindings) = expect_resolved(demo.understand("go north path"));
    assert_eq!(intent, "MOVE");
    assert_eq!(bindings.get(&SlotName::Direction).map(String::as_str), Some("n"));
}

#[test]
fn test_direction_alias_canonicalizes_through_exit() {
    let demo = Demo::load();
    // "inside" is an alias of "in"; the forge's "in" exit leads to the sanctum
    let (intent, bindings) = expect_resolved(demo.understand("go inside"));
    assert_eq!(intent, "MOVE");
    assert_eq!(bindings.get(&SlotName::Direction).map(String::as_str), Some("in"));
}

#[test]
fn test_bare_exit_word_uses_out_exit() {
    let demo = Demo::load();
    let (intent, bindings) = expect_resolved(demo.understand("exit"));
    assert_eq!(intent, "MOVE");
    assert_eq!(bindings.get(&SlotName::Direction).map(String::as_str), Some("out"));
}

#[test]
fn test_missing_exit_is_a_slot_failure() {
    let demo = Demo::load();
    // the sanctum only has an "out" exit
    let failure = expect_failed(demo.understand_at("sanctum", "go n"));
    assert_eq!(failure.reason, FailReason::MissingSlotsOrReqs);
}

#[test]
fn test_examine_resolves_look_with_object() {
    let demo = Demo::load();
    let (intent, bindings) = expect_resolved(demo.understand("examine forge"));
    assert_eq!(intent, "LOOK");
    assert_eq!(bindings.get(&SlotName::Object).map(String::as_str), Some("hearth#1"));
}

#[test]
fn test_bare_look_resolves_look_around() {
    let demo = Demo::load();
    let (intent, bindings) = expect_resolved(demo.understand("look"));
    assert_eq!(intent, "LOOK_AROUND");
    assert!(bindings.is_empty());
}

#[test]
fn test_take_with_multiword_alias() {
    let demo = Demo::load();
    // "pick up" -> canonical verb, "blank mask" -> canonical noun id
    let (intent, bindings) = expect_resolved(demo.understand("pick up blank mask"));
    assert_eq!(intent, "TAKE");
    assert_eq!(
        bindings.get(&SlotName::Object).map(String::as_str),
        Some("mask_blank#1")
    );
}

#[test]
fn test_open_chest_by_multiword_name() {
    let demo = Demo::load();
    let (intent, bindings) = expect_resolved(demo.understand("open old chest"));
    assert_eq!(intent, "OPEN");
    assert_eq!(bindings.get(&SlotName::Object).map(String::as_str), Some("old_chest#1"));
}

#[test]
fn test_trailing_punctuation_is_tolerated() {
    let demo = Demo::load();
    let (intent, _) = expect_resolved(demo.understand("search hearth!"));
    assert_eq!(intent, "SEARCH");
}

#[test]
fn test_destroy_synonym() {
    let demo = Demo::load();
    let (intent, bindings) = expect_resolved(demo.understand("break crucible"));
    assert_eq!(intent, "DESTROY");
    assert_eq!(bindings.get(&SlotName::Object).map(String::as_str), Some("crucible#1"));
}

#[test]
fn test_single_letter_inventory() {
    let demo = Demo::load();
    let (intent, bindings) = expect_resolved(demo.understand("i"));
    assert_eq!(intent, "INVENTORY");
    assert!(bindings.is_empty());
}

#[test]
fn test_bare_rest_reinterprets_lone_verb() {
    let demo = Demo::load();
    let (intent, _) = expect_resolved(demo.understand("rest"));
    assert_eq!(intent, "REST");
}

#[test]
fn test_lone_verb_needing_arguments_prompts() {
    let demo = Demo::load();
    let failure = expect_failed(demo.understand("drop"));
    assert_eq!(failure.reason, FailReason::MissingSlotsOrReqs);
    assert_eq!(failure.message, "What do you want to drop?");
}

#[test]
fn test_slotless_social_verb_ignores_noise() {
    let demo = Demo::load();
    let (intent, bindings) = expect_resolved(demo.understand("shout hello?"));
    assert_eq!(intent, "SAY");
    assert!(bindings.is_empty());
}

#[test]
fn test_unknown_object_names_the_noun() {
    let demo = Demo::load();
    let failure = expect_failed(demo.understand("take halberd"));
    assert_eq!(failure.reason, FailReason::UnknownObject);
    assert_eq!(failure.message, "You don't see any 'halberd' here.");
}

#[test]
fn test_unknown_verb_suggests_scene_commands() {
    let demo = Demo::load();
    let failure = expect_failed(demo.understand("defenestrate crucible"));
    assert_eq!(failure.reason, FailReason::UnknownVerb);
    assert_eq!(failure.message, "I don't know how to 'defenestrate'.");
    assert!(!failure.suggested.is_empty());
    assert!(failure.suggested.len() <= 3);
}

#[test]
fn test_empty_input() {
    let demo = Demo::load();
    let failure = expect_failed(demo.understand(""));
    assert_eq!(failure.reason, FailReason::EmptyInput);
    assert_eq!(failure.message, "What do you want to do?");
}

#[test]
fn test_drop_requires_carrying_the_item() {
    let demo = Demo::load();
    // the crucible is in the scene but not in the starting inventory
    let failure = expect_failed(demo.understand("drop crucible"));
    assert_eq!(failure.reason, FailReason::UnknownObject);
    assert_eq!(failure.message, "You are not carrying a 'crucible'.");
}

#[test]
fn test_drop_carried_item_binds_inventory_id() {
    let demo = Demo::load();
    let (intent, bindings) = expect_resolved(demo.understand("drop canteen"));
    assert_eq!(intent, "DROP");
    assert_eq!(bindings.get(&SlotName::Object).map(String::as_str), Some("waterskin"));
}

#[test]
fn test_combine_binds_carried_ingredients() {
    let demo = Demo::load();
    let (intent, bindings) = expect_resolved(demo.understand("combine ash with waterskin"));
    assert_eq!(intent, "COMBINE");
    assert_eq!(bindings.get(&SlotName::Object).map(String::as_str), Some("ash"));
    assert_eq!(bindings.get(&SlotName::Tool).map(String::as_str), Some("waterskin"));
}

#[test]
fn test_combine_fails_on_missing_ingredient() {
    let demo = Demo::load();
    let failure = expect_failed(demo.understand("combine ash with clay"));
    assert_eq!(failure.reason, FailReason::UnknownObject);
    assert_eq!(failure.message, "You don't have any 'clay'.");
}

#[test]
fn test_unlock_binds_chest_and_key() {
    let demo = Demo::load();
    let (intent, bindings) = expect_resolved(demo.understand("unlock old chest with forge key"));
    assert_eq!(intent, "UNLOCK");
    assert_eq!(bindings.get(&SlotName::Object).map(String::as_str), Some("old_chest#1"));
    assert_eq!(bindings.get(&SlotName::Tool).map(String::as_str), Some("key_forge#1"));
}

#[test]
fn test_unbound_tool_slot_fails_cleanly() {
    let demo = Demo::load();
    // the bone flute names a known noun but sits in another scene
    let failure = expect_failed(demo.understand("unlock old chest with bone flute"));
    assert_eq!(failure.reason, FailReason::MissingSlotsOrReqs);
    assert_eq!(failure.message, "That doesn't make sense.");
}

#[test]
fn test_use_on_binds_tool_and_object() {
    let demo = Demo::load();
    let (intent, bindings) = expect_resolved(demo.understand("use crucible on hearth"));
    assert_eq!(intent, "USE");
    assert_eq!(bindings.get(&SlotName::Tool).map(String::as_str), Some("crucible#1"));
    assert_eq!(bindings.get(&SlotName::Object).map(String::as_str), Some("hearth#1"));
}

#[test]
fn test_pray_requires_a_sacred_location() {
    let demo = Demo::load();

    let failure = expect_failed(demo.understand("pray"));
    assert_eq!(
        failure.reason,
        FailReason::MissingRequirement(RequirementKey::LocationTag)
    );
    assert_eq!(failure.message, "You can't do that right now.");

    // the forgotten shrine carries the "sacred" tag
    let (intent, _) = expect_resolved(demo.understand_at("forgotten_shrine", "pray"));
    assert_eq!(intent, "PRAY");
}

#[test]
fn test_ask_about_binds_topic_verbatim() {
    let demo = Demo::load();
    let (intent, bindings) = expect_resolved(demo.understand_at("ridge_path", "ask traveler about bridge"));
    assert_eq!(intent, "ASK");
    assert_eq!(
        bindings.get(&SlotName::Object).map(String::as_str),
        Some("npc_traveler#1")
    );
    assert_eq!(bindings.get(&SlotName::Topic).map(String::as_str), Some("bridge"));
}

#[test]
fn test_resolution_is_deterministic() {
    let demo = Demo::load();
    for input in ["go n", "examine forge", "take crucible", "pray", "gibberish here"] {
        let first = demo.understand(input);
        let second = demo.understand(input);
        assert_eq!(first, second, "nondeterministic result for {input:?}");
    }
}

#[test]
fn test_dispatch_moves_the_session() {
    let demo = Demo::load();
    let mut session = Session::new(demo.engine, demo.scenes, demo.player, "mountain_forge".into());
    assert!(matches!(dispatch(&mut session, "go north"), Ok(ReplControl::Continue)));
    assert_eq!(session.current, "ridge_path");
    assert!(matches!(dispatch(&mut session, "go south"), Ok(ReplControl::Continue)));
    assert_eq!(session.current, "mountain_forge");
}

#[test]
fn test_dispatch_quit_signals() {
    let demo = Demo::load();
    let mut session = Session::new(demo.engine, demo.scenes, demo.player, "mountain_forge".into());
    assert!(matches!(dispatch(&mut session, ":quit"), Ok(ReplControl::Quit)));
}
