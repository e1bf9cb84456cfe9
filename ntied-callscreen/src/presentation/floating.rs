use std::time::Duration;

use super::{Point, Rect, Size, Vector};

/// Where the floating preview currently sits.
///
/// `Unset` means no position was ever chosen; it is snapped to the top-trailing
/// corner. An explicit `At(Point::ZERO)` is a legitimate position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PreviewOrigin {
    #[default]
    Unset,
    At(Point),
}

/// Keeps a fixed-size picture-in-picture preview inside a bounding rectangle,
/// snapping it to the nearest edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatingVideoPositioner {
    preview_size: Size,
}

impl FloatingVideoPositioner {
    pub fn new(preview_size: Size) -> Self {
        Self { preview_size }
    }

    pub fn preview_size(&self) -> Size {
        self.preview_size
    }

    /// Compute the snapped rect for `origin` within `bounds`.
    pub fn snap(&self, bounds: Rect, origin: PreviewOrigin) -> Rect {
        let (candidate_origin, unset) = match origin {
            PreviewOrigin::Unset => (bounds.origin, true),
            PreviewOrigin::At(point) => (point, false),
        };
        let candidate = Rect::from_origin(candidate_origin, self.preview_size);
        let mut snapped = candidate;

        if unset || candidate.min_y() < bounds.min_y() {
            snapped.origin.y = bounds.min_y();
        } else if candidate.max_y() > bounds.max_y() {
            snapped.origin.y = bounds.max_y() - self.preview_size.height;
        }

        let flush = candidate.min_x() == bounds.min_x() || candidate.max_x() == bounds.max_x();
        if unset || !flush {
            let from_leading = (candidate.min_x() - bounds.min_x()).abs();
            let from_trailing = (bounds.max_x() - candidate.max_x()).abs();
            // Ties go to the trailing edge.
            snapped.origin.x = if !unset && from_leading < from_trailing {
                bounds.min_x()
            } else {
                bounds.max_x() - self.preview_size.width
            };
        }

        snapped
    }
}

/// Tracks the floating preview origin across drags and layout changes.
#[derive(Clone, Debug)]
pub struct FloatingPreview {
    positioner: FloatingVideoPositioner,
    fling_duration: Duration,
    bounds: Option<Rect>,
    origin: PreviewOrigin,
    dragging: bool,
}

impl FloatingPreview {
    pub fn new(preview_size: Size, fling_duration: Duration) -> Self {
        Self {
            positioner: FloatingVideoPositioner::new(preview_size),
            fling_duration,
            bounds: None,
            origin: PreviewOrigin::Unset,
            dragging: false,
        }
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub fn origin(&self) -> PreviewOrigin {
        self.origin
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Current preview rect; `None` until bounds are known.
    ///
    /// While a drag is in progress the raw accumulated origin is returned.
    pub fn frame(&self) -> Option<Rect> {
        let bounds = self.bounds?;
        match (self.dragging, self.origin) {
            (true, PreviewOrigin::At(point)) => Some(Rect::from_origin(
                point,
                self.positioner.preview_size(),
            )),
            _ => Some(self.positioner.snap(bounds, self.origin)),
        }
    }

    /// Bounds changed (rotation, safe area). The origin is re-snapped.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = Some(bounds);
        self.resnap();
    }

    /// Re-snap the current origin against the current bounds.
    pub fn resnap(&mut self) {
        if let Some(bounds) = self.bounds {
            self.dragging = false;
            self.origin = PreviewOrigin::At(self.positioner.snap(bounds, self.origin).origin);
        }
    }

    /// Apply an incremental pan translation; no snapping or clamping.
    pub fn pan_changed(&mut self, translation: Vector) {
        let Some(current) = self.frame() else {
            return;
        };
        self.dragging = true;
        self.origin = PreviewOrigin::At(current.origin.translated(translation));
    }

    /// Settle after a pan ends or is cancelled, flinging along `velocity`.
    pub fn pan_ended(&mut self, velocity: Vector) -> Option<Rect> {
        let bounds = self.bounds?;
        let current = self.frame()?;
        let destination = current
            .origin
            .translated(velocity.scaled(self.fling_duration.as_secs_f64()));
        let snapped = self.positioner.snap(bounds, PreviewOrigin::At(destination));
        self.dragging = false;
        self.origin = PreviewOrigin::At(snapped.origin);
        Some(snapped)
    }
}
