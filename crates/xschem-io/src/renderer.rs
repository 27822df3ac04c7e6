//! The rendering backend seam (spec §6): batched draw primitives plus a
//! separate overlay channel for rubber-banded temporaries that can be
//! tile-erased without touching the main batch.

use xschem_geom::{Arc, Point, Rect};

/// Batching phase a draw call belongs to (spec §6): `Add` accumulates
/// into the backend's batch, `Now` flushes immediately, `End` clears the
/// batch without drawing (used to cancel a gesture's rubber-band).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Now,
    Add,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Line { layer: u8, phase: Phase, p1: Point, p2: Point },
    Rect { layer: u8, phase: Phase, rect: Rect },
    FilledRect { layer: u8, phase: Phase, rect: Rect },
    Arc { layer: u8, phase: Phase, arc: Arc },
    Polygon { layer: u8, phase: Phase, points: Vec<Point> },
    String { layer: u8, phase: Phase, text: String, at: Point },
}

pub trait Renderer {
    fn drawline(&mut self, layer: u8, phase: Phase, p1: Point, p2: Point);
    fn drawrect(&mut self, layer: u8, phase: Phase, rect: Rect);
    fn filledrect(&mut self, layer: u8, phase: Phase, rect: Rect);
    fn drawarc(&mut self, layer: u8, phase: Phase, arc: Arc);
    fn drawpolygon(&mut self, layer: u8, phase: Phase, points: &[Point]);
    fn draw_string(&mut self, layer: u8, phase: Phase, text: &str, at: Point);

    /// Temporary-primitive variant (spec §6 `drawtemp...`): paints into an
    /// overlay distinct from the main batch so rubber-banding can
    /// tile-erase just the previous position rather than repainting the
    /// whole viewport. Default implementation routes to the ordinary
    /// line call -- backends with a real overlay surface override this.
    fn drawtemp_line(&mut self, layer: u8, phase: Phase, p1: Point, p2: Point) {
        self.drawline(layer, phase, p1, p2);
    }
}

/// Discards every draw call; used where a `Renderer` is required but the
/// test or tool doesn't care about pixels (e.g. batch-mode CLI runs).
#[derive(Debug, Default)]
pub struct NoopRenderer;

impl Renderer for NoopRenderer {
    fn drawline(&mut self, _layer: u8, _phase: Phase, _p1: Point, _p2: Point) {}
    fn drawrect(&mut self, _layer: u8, _phase: Phase, _rect: Rect) {}
    fn filledrect(&mut self, _layer: u8, _phase: Phase, _rect: Rect) {}
    fn drawarc(&mut self, _layer: u8, _phase: Phase, _arc: Arc) {}
    fn drawpolygon(&mut self, _layer: u8, _phase: Phase, _points: &[Point]) {}
    fn draw_string(&mut self, _layer: u8, _phase: Phase, _text: &str, _at: Point) {}
}

/// Records every draw call verbatim, in order, for tests asserting on
/// exactly what the interaction layer asked the backend to paint.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<DrawCall>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn drawline(&mut self, layer: u8, phase: Phase, p1: Point, p2: Point) {
        self.calls.push(DrawCall::Line { layer, phase, p1, p2 });
    }

    fn drawrect(&mut self, layer: u8, phase: Phase, rect: Rect) {
        self.calls.push(DrawCall::Rect { layer, phase, rect });
    }

    fn filledrect(&mut self, layer: u8, phase: Phase, rect: Rect) {
        self.calls.push(DrawCall::FilledRect { layer, phase, rect });
    }

    fn drawarc(&mut self, layer: u8, phase: Phase, arc: Arc) {
        self.calls.push(DrawCall::Arc { layer, phase, arc });
    }

    fn drawpolygon(&mut self, layer: u8, phase: Phase, points: &[Point]) {
        self.calls.push(DrawCall::Polygon {
            layer,
            phase,
            points: points.to_vec(),
        });
    }

    fn draw_string(&mut self, layer: u8, phase: Phase, text: &str, at: Point) {
        self.calls.push(DrawCall::String {
            layer,
            phase,
            text: text.to_string(),
            at,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_renderer_captures_calls_in_order() {
        let mut r = RecordingRenderer::new();
        r.drawline(0, Phase::Add, Point::origin(), Point::new(1.0, 0.0));
        r.filledrect(1, Phase::Now, Rect::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(r.calls.len(), 2);
        assert!(matches!(r.calls[0], DrawCall::Line { layer: 0, phase: Phase::Add, .. }));
        assert!(matches!(r.calls[1], DrawCall::FilledRect { layer: 1, phase: Phase::Now, .. }));
    }

    #[test]
    fn noop_renderer_drops_everything() {
        let mut r = NoopRenderer;
        r.drawline(0, Phase::Now, Point::origin(), Point::origin());
    }

    #[test]
    fn drawtemp_default_falls_back_to_drawline() {
        let mut r = RecordingRenderer::new();
        r.drawtemp_line(2, Phase::Add, Point::origin(), Point::new(5.0, 5.0));
        assert_eq!(r.calls.len(), 1);
        assert!(matches!(r.calls[0], DrawCall::Line { layer: 2, .. }));
    }
}
