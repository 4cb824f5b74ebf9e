//! Demo REPL driving the understanding pipeline.
//!
//! The game loop here is deliberately thin: it feeds raw lines through the
//! engine, prints resolutions and failures, and implements just enough
//! state handling (movement, looking, inventory) to walk the demo scenes.

mod input;

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use log::info;
use maskforge_data::{EffectDef, Id, SlotName};

use crate::engine::ParserEngine;
use crate::outcome::{ResolveFailure, ResolveResult};
use crate::player::PlayerView;
use crate::scene::SceneIndex;
use crate::style::GameStyle;

use input::{InputEvent, InputManager};

/// Control flow signal used by handlers to exit the REPL.
pub enum ReplControl {
    Continue,
    Quit,
}

/// Everything one interactive session owns: the immutable engine plus the
/// scene the player currently stands in.
pub struct Session {
    pub engine: ParserEngine,
    pub scenes: BTreeMap<Id, SceneIndex>,
    pub player: PlayerView,
    pub current: Id,
}

impl Session {
    pub fn new(engine: ParserEngine, scenes: BTreeMap<Id, SceneIndex>, player: PlayerView, start: Id) -> Self {
        Self {
            engine,
            scenes,
            player,
            current: start,
        }
    }

    /// The scene the player is currently in.
    ///
    /// # Errors
    /// Fails if the current scene id is not in the scene table.
    pub fn current_scene(&self) -> Result<&SceneIndex> {
        self.scenes
            .get(&self.current)
            .with_context(|| format!("current scene '{}' not found", self.current))
    }
}

/// Run the main read-eval-print loop until the user quits.
///
/// # Errors
/// Propagates failures from scene lookups; input errors are reported and
/// retried rather than propagated.
pub fn run_repl(session: &mut Session) -> Result<()> {
    let mut input_manager = InputManager::new();
    describe_scene(session.current_scene()?);

    loop {
        let prompt = format!("\n[{}]>> ", session.current).prompt_style().to_string();

        let event = match input_manager.read_line(&prompt) {
            Ok(event) => event,
            Err(err) => {
                println!("{}", format!("Failed to read input: {err}. Try again.").error_style());
                continue;
            },
        };
        let line = match event {
            InputEvent::Line(line) => line,
            InputEvent::Eof => break,
            InputEvent::Interrupted => {
                println!("Command canceled.");
                continue;
            },
        };

        if let ReplControl::Quit = dispatch(session, &line)? {
            break;
        }
    }
    println!("{}", "The forge grows quiet behind you.".description_style());
    Ok(())
}

/// Handle one raw input line.
///
/// # Errors
/// Fails only on inconsistent session state, such as a missing scene.
pub fn dispatch(session: &mut Session, line: &str) -> Result<ReplControl> {
    let trimmed = line.trim();
    if matches!(trimmed, ":q" | ":quit" | "quit") {
        return Ok(ReplControl::Quit);
    }

    let result = {
        let scene = session.current_scene()?;
        session.engine.understand(trimmed, scene, &session.player)
    };

    match result {
        ResolveResult::Resolved {
            intent_id, bindings, ..
        } => {
            info!("resolved '{trimmed}' to {intent_id} with {} bindings", bindings.len());
            // echo what the pipeline understood before acting on it
            println!(
                "{}",
                format!("({})", intent_id.to_lowercase().replace('_', " ")).intent_style()
            );
            match intent_id.as_str() {
                "MOVE" | "EXIT" => move_handler(session, &bindings)?,
                "LOOK" => look_at_handler(session, &bindings)?,
                "LOOK_AROUND" => describe_scene(session.current_scene()?),
                "INVENTORY" => inventory_handler(&session.player),
                _ => effect_handler(session, &intent_id),
            }
        },
        ResolveResult::Failed(failure) => report_failure(&failure),
    }
    Ok(ReplControl::Continue)
}

/// Follow a bound exit and describe the destination.
fn move_handler(session: &mut Session, bindings: &BTreeMap<SlotName, String>) -> Result<()> {
    let Some(direction) = bindings.get(&SlotName::Direction) else {
        println!("{}", "You shuffle in place.".description_style());
        return Ok(());
    };
    let destination = session
        .current_scene()?
        .exits
        .get(direction)
        .cloned()
        .with_context(|| format!("exit '{direction}' points nowhere from '{}'", session.current))?;
    info!("moving {direction} from {} to {destination}", session.current);
    session.current = destination;
    describe_scene(session.current_scene()?);
    Ok(())
}

fn look_at_handler(session: &Session, bindings: &BTreeMap<SlotName, String>) -> Result<()> {
    let scene = session.current_scene()?;
    let Some(object) = bindings.get(&SlotName::Object).and_then(|id| scene.object_by_id(id)) else {
        describe_scene(scene);
        return Ok(());
    };
    match &object.inspect {
        Some(text) => println!("{}", text.description_style()),
        None => println!(
            "{}",
            format!("It's a {}. Nothing more to it.", object.name).description_style()
        ),
    }
    Ok(())
}

fn inventory_handler(player: &PlayerView) {
    if player.inventory.is_empty() {
        println!("{}", "You are carrying nothing.".description_style());
        return;
    }
    println!("{}", "You are carrying:".description_style());
    for item in &player.inventory {
        if item.quantity > 1 {
            println!("  {} x{}", item.name.object_style(), item.quantity);
        } else {
            println!("  {}", item.name.object_style());
        }
    }
}

/// Default handler: print the intent's message effect, if it declares one.
fn effect_handler(session: &Session, intent_id: &str) {
    let message = session.engine.intent_by_id(intent_id).and_then(|intent| {
        intent.effects.iter().find_map(|effect| match effect {
            EffectDef::Message { text: Some(text), .. } => Some(text.clone()),
            _ => None,
        })
    });
    match message {
        Some(text) => println!("{}", text.description_style()),
        None => println!("{}", "Nothing obvious happens.".description_style()),
    }
}

fn report_failure(failure: &ResolveFailure) {
    println!("{}", failure.message.error_style());
    for suggestion in &failure.suggested {
        println!("  try: {}", suggestion.suggestion_style());
    }
}

fn describe_scene(scene: &SceneIndex) {
    println!("\n{}", scene.id.replace('_', " ").scene_titlebar_style());
    println!("{}", scene.description.description_style());
    if !scene.objects.is_empty() {
        let names: Vec<&str> = scene.objects.iter().map(|o| o.name.as_str()).collect();
        println!("You notice: {}", names.join(", ").object_style());
    }
    if !scene.exits.is_empty() {
        let exits: Vec<&str> = scene.exits.keys().map(String::as_str).collect();
        println!("Exits: {}", exits.join(", ").suggestion_style());
    }
}
