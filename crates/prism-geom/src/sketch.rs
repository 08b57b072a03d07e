//! Two-gesture sketch session: drag a circle, then drag a segment.
//!
//! The session is a linear state machine with no way back:
//!
//! ```text
//! AwaitingCircle --release(valid circle)--> AwaitingLine --release(valid segment)--> Done
//! ```
//!
//! While a drag is active the session holds a *preview* shape. Previews are
//! never part of committed state; they are dropped on release (after being
//! committed if valid) and on [`SketchSession::cancel`].

use glam::DVec2;

use crate::intersect::{intersect, Circle, IntersectionSet, Segment};

/// Which shape the next completed drag commits.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Stage {
    #[default]
    AwaitingCircle,
    AwaitingLine,
    /// Terminal. Further gestures are ignored.
    Done,
}

/// Transient shape shown while dragging.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Preview {
    Circle(Circle),
    Segment(Segment),
}

/// Result of [`SketchSession::release`].
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseOutcome {
    /// No drag was active (or the session is done).
    Ignored,
    /// A drag ended without a usable preview; the stage did not advance.
    Skipped,
    CircleCommitted(Circle),
    SegmentCommitted {
        segment: Segment,
        intersections: IntersectionSet,
    },
}

#[derive(Debug, Clone, Default)]
pub struct SketchSession {
    stage: Stage,

    /// Drag anchor in NDC. `Some` exactly while a drag is active.
    anchor: Option<DVec2>,
    preview: Option<Preview>,

    circle: Option<Circle>,
    segment: Option<Segment>,
    intersections: IntersectionSet,
}

impl SketchSession {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    #[inline]
    pub fn preview(&self) -> Option<Preview> {
        self.preview
    }

    #[inline]
    pub fn circle(&self) -> Option<Circle> {
        self.circle
    }

    #[inline]
    pub fn segment(&self) -> Option<Segment> {
        self.segment
    }

    #[inline]
    pub fn intersections(&self) -> &IntersectionSet {
        &self.intersections
    }

    /// Committed circle if any, otherwise the circle being dragged.
    pub fn visible_circle(&self) -> Option<Circle> {
        self.circle.or(match self.preview {
            Some(Preview::Circle(c)) => Some(c),
            _ => None,
        })
    }

    /// Committed segment if any, otherwise the segment being dragged.
    pub fn visible_segment(&self) -> Option<Segment> {
        self.segment.or(match self.preview {
            Some(Preview::Segment(s)) => Some(s),
            _ => None,
        })
    }

    /// Starts a drag at `point` (NDC). Returns `false` once the session is done.
    pub fn press(&mut self, point: DVec2) -> bool {
        if self.stage == Stage::Done {
            return false;
        }

        self.anchor = Some(point);
        self.preview = None;
        true
    }

    /// Updates the preview for the current stage. No-op unless dragging.
    ///
    /// Returns `true` when the preview changed.
    pub fn drag(&mut self, point: DVec2) -> bool {
        let Some(anchor) = self.anchor else {
            return false;
        };

        self.preview = match self.stage {
            Stage::AwaitingCircle => Some(Preview::Circle(Circle::new(anchor, anchor.distance(point)))),
            Stage::AwaitingLine => Some(Preview::Segment(Segment::new(anchor, point))),
            Stage::Done => return false,
        };

        true
    }

    /// Ends the drag and commits the preview if it is usable.
    pub fn release(&mut self) -> ReleaseOutcome {
        if self.anchor.take().is_none() {
            return ReleaseOutcome::Ignored;
        }

        let preview = self.preview.take();

        match (self.stage, preview) {
            (Stage::AwaitingCircle, Some(Preview::Circle(circle))) if circle.is_valid() => {
                self.circle = Some(circle);
                self.stage = Stage::AwaitingLine;
                log::debug!("sketch stage: AwaitingCircle -> AwaitingLine");
                ReleaseOutcome::CircleCommitted(circle)
            }

            (Stage::AwaitingLine, Some(Preview::Segment(segment))) if segment.is_valid() => {
                let Some(circle) = self.circle else {
                    return ReleaseOutcome::Skipped;
                };

                self.segment = Some(segment);
                self.intersections = intersect(&circle, &segment);
                self.stage = Stage::Done;
                log::debug!("sketch stage: AwaitingLine -> Done");

                ReleaseOutcome::SegmentCommitted {
                    segment,
                    intersections: self.intersections.clone(),
                }
            }

            (Stage::Done, _) => ReleaseOutcome::Ignored,

            _ => ReleaseOutcome::Skipped,
        }
    }

    /// Abandons an active drag without committing anything.
    pub fn cancel(&mut self) {
        self.anchor = None;
        self.preview = None;
    }
}
