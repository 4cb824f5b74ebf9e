//! Ordered surface patterns for the structural parser.
//!
//! Patterns are tried most-specific-first and the first full match wins:
//! two-argument forms before single-argument forms, specific verbs before
//! the generic verb+object shape, bare directions next, and a final
//! catch-all that treats any leftover phrase as something to inspect.

use lazy_static::lazy_static;
use maskforge_data::SlotName;
use regex::Regex;

/// One surface grammar shape with named capture groups.
pub struct SurfacePattern {
    pub regex: Regex,
    /// used as the verb when the pattern itself encodes the action
    pub intent_hint: &'static str,
    /// slots this pattern may capture, by group name
    pub slots: &'static [SlotName],
}

lazy_static! {
    pub static ref PATTERNS: Vec<SurfacePattern> = build_patterns();
}

fn pattern(source: &str, intent_hint: &'static str, slots: &'static [SlotName]) -> SurfacePattern {
    SurfacePattern {
        regex: Regex::new(source).expect("surface pattern must compile"),
        intent_hint,
        slots,
    }
}

fn build_patterns() -> Vec<SurfacePattern> {
    use SlotName::{Direction, Lexeme, Object, Tool, Topic};
    vec![
        // two-argument forms first
        pattern(
            r"(?i)^use\s+(?P<tool>.+?)\s+on\s+(?P<object>.+)$",
            "use_on",
            &[Tool, Object],
        ),
        pattern(
            r"(?i)^(?P<verb>give|offer|hand over)\s+(?P<tool>.+?)\s+to\s+(?P<object>.+)$",
            "give",
            &[Tool, Object],
        ),
        pattern(
            r"(?i)^(?P<verb>\w+)\s+(?P<object>.+?)\s+with\s+(?P<tool>.+)$",
            "generic",
            &[Object, Tool],
        ),
        // specific verbs before generic
        pattern(
            r"(?i)^(?P<verb>look|examine|inspect|check)\s+(?:at\s+)?(?P<object>.+)$",
            "inspect",
            &[Object],
        ),
        pattern(
            r"(?i)^(?P<verb>go|move|walk|run|enter|climb)\s+(?P<direction>.+)$",
            "move",
            &[Direction],
        ),
        pattern(
            r"(?i)^ask\s+(?P<object>.+?)\s+about\s+(?P<topic>.+)$",
            "ask_about",
            &[Object, Topic],
        ),
        pattern(
            r"(?i)^(?:whisper|invoke|chant|intone)\s+(?P<lexeme>\w+)(?:\s+(?:at|to)\s+(?P<object>.+))?$",
            "invoke_lexeme",
            &[Lexeme, Object],
        ),
        // generic verb + object
        pattern(r"(?i)^(?P<verb>\w+)\s+(?P<object>.+)$", "generic", &[Object]),
        // bare direction words imply movement
        pattern(
            r"(?i)^(?P<direction>north|south|east|west|n|s|e|w|in|out|inside|outside|enter|exit)$",
            "move",
            &[Direction],
        ),
        // single phrase: assume it's an object to be inspected
        pattern(r"(?i)^(?P<object>.+)$", "inspect", &[Object]),
    ]
}
