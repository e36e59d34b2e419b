//! Event types and sinks for observing panel renders.
//!
//! This module defines [`RenderEvent`] and a set of sinks to emit, collect, or forward
//! events while rendering a panel via [`crate::render::render_panel_with_events`] or
//! updating a [`crate::view::DualMapView`].
use crate::classify::Breakpoints;
use crate::render::RenderMode;

/// Describes events emitted while rendering a panel.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum RenderEvent {
    /// Emitted when a panel render starts.
    PanelStarted {
        panel: String,
        mode: RenderMode,
        year: i32,
    },

    /// Emitted after breaks were computed for a field.
    BreaksComputed {
        panel: String,
        field: String,
        breaks: Breakpoints,
    },

    /// Emitted after dots were placed for one feature.
    DotsSampled {
        panel: String,
        feature_index: usize,
        /// Dots asked for (class index + 1).
        requested: usize,
        /// Dots actually placed.
        placed: usize,
    },

    /// Emitted when a panel produced no layer.
    PanelSkipped { panel: String, reason: String },

    /// Emitted when a panel render completes.
    PanelFinished {
        panel: String,
        regions: usize,
        dots: usize,
    },

    /// Non-fatal warning generated during rendering.
    Warning {
        /// Context string (e.g. panel id, field name).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`RenderEvent`], used by sinks to opt out of event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderEventKind {
    PanelStarted,
    BreaksComputed,
    DotsSampled,
    PanelSkipped,
    PanelFinished,
    Warning,
}

impl RenderEvent {
    pub fn kind(&self) -> RenderEventKind {
        match self {
            RenderEvent::PanelStarted { .. } => RenderEventKind::PanelStarted,
            RenderEvent::BreaksComputed { .. } => RenderEventKind::BreaksComputed,
            RenderEvent::DotsSampled { .. } => RenderEventKind::DotsSampled,
            RenderEvent::PanelSkipped { .. } => RenderEventKind::PanelSkipped,
            RenderEvent::PanelFinished { .. } => RenderEventKind::PanelFinished,
            RenderEvent::Warning { .. } => RenderEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`RenderEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: RenderEvent);

    /// Whether events of `kind` should be built and sent at all.
    #[inline]
    fn wants(&self, _kind: RenderEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: RenderEvent) {}

    #[inline]
    fn wants(&self, _kind: RenderEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(RenderEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(RenderEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(RenderEvent),
{
    #[inline]
    fn send(&mut self, event: RenderEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<RenderEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<RenderEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[RenderEvent] {
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

    /// Number of collected events of `kind`.
    pub fn count(&self, kind: RenderEventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: RenderEvent) {
        self.events.push(event);
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: RenderEvent) {
        let Some((last, rest)) = self.sinks.split_last_mut() else {
            return;
        };
        for sink in rest {
            if sink.wants(event.kind()) {
                sink.send(event.clone());
            }
        }
        if last.wants(event.kind()) {
            last.send(event);
        }
    }

    fn wants(&self, kind: RenderEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning(ctx: &str) -> RenderEvent {
        RenderEvent::Warning {
            context: ctx.into(),
            message: "msg".into(),
        }
    }

    #[test]
    fn vec_sink_collects_events() {
        let mut sink = VecSink::new();
        assert!(sink.is_empty());
        sink.send(warning("a"));
        sink.send(RenderEvent::PanelSkipped {
            panel: "A".into(),
            reason: "empty".into(),
        });
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.count(RenderEventKind::Warning), 1);
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn unit_sink_wants_nothing() {
        assert!(!().wants(RenderEventKind::Warning));
    }

    #[test]
    fn multi_sink_fans_out_events() {
        let mut multi = MultiSink::with_sinks(vec![VecSink::new(), VecSink::new()]);
        multi.send(warning("ctx"));
        assert_eq!(multi.len(), 2);
        assert_eq!(multi.sinks[0].len(), 1);
        assert_eq!(multi.sinks[1].len(), 1);
        assert!(matches!(
            multi.sinks[0].as_slice()[0],
            RenderEvent::Warning { .. }
        ));
    }

    #[test]
    fn empty_multi_sink_drops_events() {
        let mut multi: MultiSink<VecSink> = MultiSink::default();
        multi.send(warning("ctx"));
        assert!(multi.is_empty());
        assert!(!multi.wants(RenderEventKind::Warning));
    }

    #[test]
    fn fn_sink_invokes_callback() {
        let mut count = 0;
        let mut sink = FnSink::new(|_event| {
            count += 1;
        });
        sink.send(warning("ctx"));
        drop(sink);
        assert_eq!(count, 1);
    }
}
