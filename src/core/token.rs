//! Format string scanning and token classification
//!
//! A format string is plain text with embedded placeholders of the shape
//! `%{NAME}%`, where `NAME` consists of uppercase letters, digits, and
//! underscores. Two markers may precede the name: `!` (override) demotes a
//! reserved token to ordinary handling, `*` (dynamic) defers the token's
//! value to log time. A backslash immediately before `%{` escapes the
//! placeholder: it is excluded from classification and rendered literally.
//!
//! Classification sorts every token name into exactly one of three sets
//! (special, dynamic, static) or rejects the format string with a typed
//! error. The same scanner drives substitution at render time.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::error::{LoggerError, Result};

/// Token carrying the caller-supplied message text. Mandatory in every
/// format string and never bindable to a parameter value.
pub const MESSAGE_TOKEN: &str = "MESSAGE";
/// Token carrying the rendered severity name.
pub const LEVEL_TOKEN: &str = "LEVEL";
/// Token carrying the clock collaborator's timestamp.
pub const TIME_TOKEN: &str = "TIME";

/// The closed set of reserved token names.
pub const RESERVED_TOKENS: [&str; 3] = [MESSAGE_TOKEN, LEVEL_TOKEN, TIME_TOKEN];

pub fn is_reserved(name: &str) -> bool {
    RESERVED_TOKENS.contains(&name)
}

/// One placeholder occurrence inside a format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Placeholder<'a> {
    pub name: &'a str,
    pub escaped: bool,
    pub overridden: bool,
    pub dynamic: bool,
    /// The placeholder text from `%{` through `}%`, escape marker excluded.
    pub raw: &'a str,
}

/// A format string split into literal runs and placeholder occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    Literal(&'a str),
    Placeholder(Placeholder<'a>),
}

struct ParsedBody<'a> {
    name: &'a str,
    overridden: bool,
    dynamic: bool,
    end: usize,
}

/// Try to parse a placeholder starting at `start` (the `%` of `%{`).
///
/// Marker order is fixed: override before dynamic. Anything that does not
/// close with `}%` directly after the name is not a placeholder.
fn parse_body(format: &str, start: usize) -> Option<ParsedBody<'_>> {
    let bytes = format.as_bytes();
    let mut pos = start + 2;

    let overridden = bytes.get(pos) == Some(&b'!');
    if overridden {
        pos += 1;
    }
    let dynamic = bytes.get(pos) == Some(&b'*');
    if dynamic {
        pos += 1;
    }

    let name_start = pos;
    while pos < bytes.len() && matches!(bytes[pos], b'A'..=b'Z' | b'0'..=b'9' | b'_') {
        pos += 1;
    }

    if bytes.get(pos) != Some(&b'}') || bytes.get(pos + 1) != Some(&b'%') {
        return None;
    }

    Some(ParsedBody {
        name: &format[name_start..pos],
        overridden,
        dynamic,
        end: pos + 2,
    })
}

/// Split a format string into literal and placeholder segments.
///
/// The escaping backslash is excluded from the literal segment preceding an
/// escaped placeholder, so rendering a segment list reproduces the intended
/// output text verbatim.
pub(crate) fn scan(format: &str) -> Vec<Segment<'_>> {
    let bytes = format.as_bytes();
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] == b'%' && bytes.get(pos + 1) == Some(&b'{') {
            if let Some(body) = parse_body(format, pos) {
                let escaped = pos > 0 && bytes[pos - 1] == b'\\';
                let literal_end = if escaped { pos - 1 } else { pos };
                if literal_end > literal_start {
                    segments.push(Segment::Literal(&format[literal_start..literal_end]));
                }
                segments.push(Segment::Placeholder(Placeholder {
                    name: body.name,
                    escaped,
                    overridden: body.overridden,
                    dynamic: body.dynamic,
                    raw: &format[pos..body.end],
                }));
                pos = body.end;
                literal_start = pos;
                continue;
            }
        }
        pos += 1;
    }

    if literal_start < bytes.len() {
        segments.push(Segment::Literal(&format[literal_start..]));
    }

    segments
}

/// Classification state of one token name, tracked across the scan.
///
/// Absence from the table is the implicit `Unseen` state; the only legal
/// transitions are out of it, so a second classification of any name is a
/// duplicate regardless of the target state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenState {
    Special,
    Dynamic,
    Static,
}

/// The classified token sets of a valid format string.
///
/// `special` holds the un-overridden reserved names whose values are
/// resolved by the runtime (`LEVEL`, `TIME`); the mandatory `MESSAGE`
/// presence is implied by successful classification and not stored.
/// `dynamic` names receive their values per log call; `statics` names are
/// bound to fixed values at configuration time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSets {
    pub special: BTreeSet<String>,
    pub dynamic: BTreeSet<String>,
    pub statics: HashMap<String, String>,
}

/// Classify every placeholder of `format` against `parameters`.
///
/// Runs left-to-right and fails on the first violated rule. Escaped
/// placeholders are skipped entirely. On success the returned sets are
/// exactly what a [`FormatTemplate`](super::template::FormatTemplate)
/// stores; classification has no side effects and is idempotent.
pub fn classify(format: &str, parameters: &HashMap<String, String>) -> Result<TokenSets> {
    let mut states: BTreeMap<&str, TokenState> = BTreeMap::new();

    for segment in scan(format) {
        let ph = match segment {
            Segment::Placeholder(ph) if !ph.escaped => ph,
            _ => continue,
        };

        if ph.name.is_empty() {
            return Err(LoggerError::EmptyTokenName);
        }

        let reserved = is_reserved(ph.name);
        if ph.dynamic && reserved && !ph.overridden {
            return Err(LoggerError::illegal_dynamic_marker(ph.name));
        }
        if ph.overridden && !reserved {
            return Err(LoggerError::illegal_override(ph.name));
        }

        let target = if reserved && !ph.overridden {
            TokenState::Special
        } else if ph.dynamic {
            TokenState::Dynamic
        } else {
            TokenState::Static
        };

        if states.insert(ph.name, target).is_some() {
            return Err(LoggerError::duplicate_token(ph.name));
        }
    }

    // Every format must render the caller's message through an un-overridden
    // MESSAGE placeholder. Presence is tracked here, independent of the
    // stored sets.
    if states.get(MESSAGE_TOKEN) != Some(&TokenState::Special) {
        return Err(LoggerError::MissingMessageToken);
    }

    // Reserved values come from the runtime, never from the parameter map,
    // so a reserved name demoted into the static set has nowhere to get a
    // value from.
    for (name, state) in &states {
        if *state == TokenState::Static && is_reserved(name) {
            return Err(LoggerError::reserved_misuse(*name));
        }
    }

    let mut sets = TokenSets::default();
    for (name, state) in &states {
        match state {
            TokenState::Special => {
                if *name != MESSAGE_TOKEN {
                    sets.special.insert((*name).to_string());
                }
            }
            TokenState::Dynamic => {
                sets.dynamic.insert((*name).to_string());
            }
            TokenState::Static => {
                let value = parameters
                    .get(*name)
                    .ok_or_else(|| LoggerError::missing_binding(*name))?;
                sets.statics.insert((*name).to_string(), value.clone());
            }
        }
    }

    // Cross-check the parameter map itself, in sorted order so the failing
    // key is deterministic. A key classified dynamic collides with the
    // per-call value; a key classified special, or any unconsumed reserved
    // key, tries to feed a runtime-supplied token from the parameter map.
    let mut keys: Vec<&String> = parameters.keys().collect();
    keys.sort();
    for key in keys {
        match states.get(key.as_str()).copied() {
            Some(TokenState::Dynamic) => return Err(LoggerError::duplicate_token(key)),
            Some(TokenState::Special) => return Err(LoggerError::reserved_misuse(key)),
            Some(TokenState::Static) => {}
            None => {
                if is_reserved(key) {
                    return Err(LoggerError::reserved_misuse(key));
                }
            }
        }
    }

    Ok(sets)
}
