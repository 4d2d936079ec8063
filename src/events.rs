//! Activity events and the set of event kinds a timer listens to

use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Kind of raw input event delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "mousemove")]
    MouseMove,
    #[serde(rename = "keydown")]
    KeyDown,
    #[serde(rename = "wheel")]
    Wheel,
    #[serde(rename = "DOMMouseScroll")]
    DomMouseScroll,
    #[serde(rename = "mousewheel")]
    MouseWheel,
    #[serde(rename = "mousedown")]
    MouseDown,
    #[serde(rename = "touchstart")]
    TouchStart,
    #[serde(rename = "touchmove")]
    TouchMove,
    #[serde(rename = "MSPointerDown")]
    MsPointerDown,
    #[serde(rename = "MSPointerMove")]
    MsPointerMove,
}

impl EventKind {
    pub const ALL: [EventKind; 10] = [
        EventKind::MouseMove,
        EventKind::KeyDown,
        EventKind::Wheel,
        EventKind::DomMouseScroll,
        EventKind::MouseWheel,
        EventKind::MouseDown,
        EventKind::TouchStart,
        EventKind::TouchMove,
        EventKind::MsPointerDown,
        EventKind::MsPointerMove,
    ];

    /// Name used by the host when subscribing to this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::MouseMove => "mousemove",
            EventKind::KeyDown => "keydown",
            EventKind::Wheel => "wheel",
            EventKind::DomMouseScroll => "DOMMouseScroll",
            EventKind::MouseWheel => "mousewheel",
            EventKind::MouseDown => "mousedown",
            EventKind::TouchStart => "touchstart",
            EventKind::TouchMove => "touchmove",
            EventKind::MsPointerDown => "MSPointerDown",
            EventKind::MsPointerMove => "MSPointerMove",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownEventKind(name.to_string()))
    }
}

/// Pointer coordinates carried by pointer events
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A raw activity event as handed over by the listener collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl ActivityEvent {
    pub fn new(kind: EventKind) -> Self {
        Self { kind, position: None }
    }

    pub fn at(kind: EventKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            position: Some(Position::new(x, y)),
        }
    }
}

/// Set of event kinds that count as activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventSet(BTreeSet<EventKind>);

impl EventSet {
    pub fn contains(&self, kind: EventKind) -> bool {
        self.0.contains(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = EventKind> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for EventSet {
    /// Every pointer, key, wheel and touch kind
    fn default() -> Self {
        EventKind::ALL.into_iter().collect()
    }
}

impl FromIterator<EventKind> for EventSet {
    fn from_iter<I: IntoIterator<Item = EventKind>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromStr for EventSet {
    type Err = Error;

    /// Parse a comma separated list such as `keydown,mousemove`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .filter(|part| !part.trim().is_empty())
            .map(|part| part.parse::<EventKind>())
            .collect()
    }
}
