//! Event types and sinks for observing placement runs.
//!
//! This module defines [`ScatterEvent`] and a set of sinks to collect or forward events
//! while executing a run via [`crate::scatter::runner::ScatterRunner`] or
//! [`crate::scatter::runner::generate_with_events`].
use crate::scatter::runner::{Placement, RunResult, StreamMode};

/// Describes events emitted by placement runs.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum ScatterEvent {
    /// Emitted when a run starts.
    RunStarted {
        /// Grid size as `(width, height)`.
        size: (usize, usize),
        /// Number of regions in the density table.
        region_count: usize,
        /// How random draws are assigned to cells.
        streams: StreamMode,
    },

    /// Emitted after a floor cell was sampled.
    CellEvaluated {
        x: usize,
        y: usize,
        /// Resolved density for the cell.
        density: f64,
        /// Whether the draw produced a placement.
        accepted: bool,
    },

    /// Emitted when a placement is made.
    PlacementMade { placement: Placement },

    /// Emitted when the run finishes.
    RunFinished { result: RunResult },

    /// Non-fatal warning generated during a run.
    Warning {
        /// Context string (e.g. "grid").
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`ScatterEvent`], used by sinks to opt out of event kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScatterEventKind {
    RunStarted,
    CellEvaluated,
    PlacementMade,
    RunFinished,
    Warning,
}

impl ScatterEvent {
    pub fn kind(&self) -> ScatterEventKind {
        match self {
            ScatterEvent::RunStarted { .. } => ScatterEventKind::RunStarted,
            ScatterEvent::CellEvaluated { .. } => ScatterEventKind::CellEvaluated,
            ScatterEvent::PlacementMade { .. } => ScatterEventKind::PlacementMade,
            ScatterEvent::RunFinished { .. } => ScatterEventKind::RunFinished,
            ScatterEvent::Warning { .. } => ScatterEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`ScatterEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: ScatterEvent);

    /// Whether the sink wants events of `kind`. Producers skip building unwanted events.
    #[inline]
    fn wants(&self, _kind: ScatterEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: ScatterEvent) {}

    #[inline]
    fn wants(&self, _kind: ScatterEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(ScatterEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(ScatterEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(ScatterEvent),
{
    #[inline]
    fn send(&mut self, event: ScatterEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally filtered by kind.
#[derive(Default)]
pub struct VecSink {
    events: Vec<ScatterEvent>,
    only: Option<Vec<ScatterEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect only the listed event kinds.
    pub fn only(kinds: &[ScatterEventKind]) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.to_vec()),
        }
    }

    pub fn into_inner(self) -> Vec<ScatterEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[ScatterEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: ScatterEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&self, kind: ScatterEventKind) -> bool {
        self.only.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning(context: &str) -> ScatterEvent {
        ScatterEvent::Warning {
            context: context.into(),
            message: "m".into(),
        }
    }

    #[test]
    fn vec_sink_collects_events() {
        let mut sink = VecSink::new();
        assert!(sink.is_empty());
        sink.send(warning("a"));
        sink.send(warning("b"));
        assert_eq!(sink.len(), 2);
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn vec_sink_filter_drops_other_kinds() {
        let mut sink = VecSink::only(&[ScatterEventKind::Warning]);
        assert!(sink.wants(ScatterEventKind::Warning));
        assert!(!sink.wants(ScatterEventKind::CellEvaluated));
        sink.send(ScatterEvent::CellEvaluated {
            x: 0,
            y: 0,
            density: 0.5,
            accepted: false,
        });
        sink.send(warning("kept"));
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.as_slice()[0].kind(), ScatterEventKind::Warning);
    }

    #[test]
    fn unit_sink_wants_nothing() {
        assert!(!EventSink::wants(&(), ScatterEventKind::PlacementMade));
    }

    #[test]
    fn fn_sink_invokes_callback() {
        let mut count = 0;
        let mut sink = FnSink::new(|_event| {
            count += 1;
        });
        sink.send(warning("ctx"));
        assert_eq!(count, 1);
    }
}
