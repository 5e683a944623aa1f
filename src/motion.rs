//! What a controller's position means: an angle for the carousel, a scroll
//! offset over a duplicated track for the marquee.

use std::fmt;

use log::debug;

use crate::config::{RotationConfig, ScrollConfig};
use crate::inertia::DragState;

/// Position-specific behaviour plugged into an
/// [`InertialController`](crate::inertia::InertialController).
pub trait Motion {
    /// `(position, velocity)` after the pointer moved to `x` during a drag.
    fn drag(&self, state: &DragState, x: f64) -> (f64, f64);

    /// Position after one frame of idle drift.
    fn auto_drift(&self, position: f64) -> f64;

    /// Maps an integrated position back into the motion's valid range.
    fn normalize(&self, position: f64) -> f64 {
        position
    }

    /// Presents `position` to the user.
    fn write(&mut self, position: f64);
}

/// Visual output of a controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    Rotate3d { degrees: f64, perspective_px: f64 },
    ScrollOffset(f64),
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Transform::Rotate3d {
                degrees,
                perspective_px,
            } => write!(f, "perspective({perspective_px}px) rotateY({degrees}deg)"),
            Transform::ScrollOffset(px) => write!(f, "{px}px"),
        }
    }
}

pub trait TransformSink {
    fn write(&mut self, transform: Transform);
}

/// Scroll container whose direct children form a horizontal strip.
pub trait ScrollTrack: TransformSink {
    fn child_count(&self) -> usize;
    /// Appends a clone of every current child after the originals.
    fn duplicate_children(&mut self);
    /// Full scrollable width, duplicates included.
    fn scroll_width(&self) -> f64;
}

/// Unbounded spin in degrees.
pub struct Rotation<T> {
    sink: T,
    cfg: RotationConfig,
}

impl<T: TransformSink> Rotation<T> {
    pub fn new(sink: T, cfg: RotationConfig) -> Self {
        Self { sink, cfg }
    }

    pub fn sink(&self) -> &T {
        &self.sink
    }
}

impl<T: TransformSink> Motion for Rotation<T> {
    fn drag(&self, state: &DragState, x: f64) -> (f64, f64) {
        let delta = x - state.last_x;
        // Velocity is the raw per-event delta, so flick strength depends on
        // how often the host delivers move events.
        (state.position + delta * self.cfg.drag_gain, delta)
    }

    fn auto_drift(&self, position: f64) -> f64 {
        position - self.cfg.auto_speed
    }

    fn write(&mut self, position: f64) {
        self.sink.write(Transform::Rotate3d {
            degrees: position,
            perspective_px: self.cfg.perspective_px,
        });
    }
}

/// Looping horizontal offset. The track is doubled once at construction so
/// that offset `w / 2` looks identical to offset `0`.
pub struct Scroll<T> {
    track: T,
    cfg: ScrollConfig,
}

impl<T: ScrollTrack> Scroll<T> {
    pub fn new(mut track: T, cfg: ScrollConfig) -> Self {
        let children = track.child_count();
        if children > 0 {
            track.duplicate_children();
            debug!("marquee track doubled: {children} -> {}", track.child_count());
        }
        Self { track, cfg }
    }

    pub fn track(&self) -> &T {
        &self.track
    }

    /// Offset at which the duplicated half begins; 0 for an empty track.
    pub fn loop_width(&self) -> f64 {
        let half = self.track.scroll_width() / 2.0;
        if half.is_finite() && half > 0.0 {
            half
        } else {
            0.0
        }
    }
}

impl<T: ScrollTrack> Motion for Scroll<T> {
    fn drag(&self, state: &DragState, x: f64) -> (f64, f64) {
        // Absolute from the drag origin; accumulating deltas would drift.
        let position = state.start_position - (x - state.start_x) * self.cfg.drag_gain;
        (position, state.last_x - x)
    }

    fn auto_drift(&self, position: f64) -> f64 {
        let next = position + self.cfg.auto_speed;
        let half = self.loop_width();
        if half > 0.0 && next >= half {
            0.0
        } else {
            next
        }
    }

    fn normalize(&self, position: f64) -> f64 {
        let half = self.loop_width();
        if half > 0.0 {
            // rem_euclid can round up to `half` itself for tiny negatives.
            let wrapped = position.rem_euclid(half);
            if wrapped >= half {
                0.0
            } else {
                wrapped
            }
        } else {
            position.max(0.0)
        }
    }

    fn write(&mut self, position: f64) {
        self.track.write(Transform::ScrollOffset(position));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inertia::Phase;

    #[derive(Default)]
    struct Sink(Vec<Transform>);

    impl TransformSink for Sink {
        fn write(&mut self, transform: Transform) {
            self.0.push(transform);
        }
    }

    struct Strip {
        widths: Vec<f64>,
        last: Option<Transform>,
    }

    impl TransformSink for Strip {
        fn write(&mut self, transform: Transform) {
            self.last = Some(transform);
        }
    }

    impl ScrollTrack for Strip {
        fn child_count(&self) -> usize {
            self.widths.len()
        }

        fn duplicate_children(&mut self) {
            let copy = self.widths.clone();
            self.widths.extend(copy);
        }

        fn scroll_width(&self) -> f64 {
            self.widths.iter().sum()
        }
    }

    fn strip(widths: &[f64]) -> Strip {
        Strip {
            widths: widths.to_vec(),
            last: None,
        }
    }

    fn dragging(position: f64, x: f64) -> DragState {
        DragState {
            position,
            phase: Phase::Dragging,
            last_x: x,
            start_x: x,
            start_position: position,
            ..DragState::default()
        }
    }

    #[test]
    fn rotate_css() {
        let t = Transform::Rotate3d {
            degrees: -12.5,
            perspective_px: 1000.0,
        };
        assert_eq!(t.to_string(), "perspective(1000px) rotateY(-12.5deg)");
    }

    #[test]
    fn rotation_accumulates_half_the_delta() {
        let r = Rotation::new(Sink::default(), RotationConfig::default());
        let (pos, vel) = r.drag(&dragging(10.0, 100.0), 140.0);
        assert_eq!(pos, 30.0);
        assert_eq!(vel, 40.0);
        assert_eq!(r.auto_drift(0.0), -0.2);
    }

    #[test]
    fn rotation_writes_perspective_transform() {
        let mut r = Rotation::new(Sink::default(), RotationConfig::default());
        r.write(720.0);
        assert_eq!(
            r.sink().0,
            [Transform::Rotate3d {
                degrees: 720.0,
                perspective_px: 1000.0
            }]
        );
        assert_eq!(r.normalize(720.0), 720.0);
    }

    #[test]
    fn scroll_track_is_doubled_once() {
        let s = Scroll::new(strip(&[100.0, 150.0, 50.0]), ScrollConfig::default());
        assert_eq!(s.track().child_count(), 6);
        assert_eq!(s.loop_width(), 300.0);
    }

    #[test]
    fn scroll_writes_offset() {
        let mut s = Scroll::new(strip(&[80.0]), ScrollConfig::default());
        s.write(12.0);
        assert_eq!(s.track().last, Some(Transform::ScrollOffset(12.0)));
    }

    #[test]
    fn scroll_drag_is_absolute_from_origin() {
        let s = Scroll::new(strip(&[500.0, 500.0]), ScrollConfig::default());
        let mut state = dragging(100.0, 50.0);
        state.last_x = 45.0;
        let (pos, vel) = s.drag(&state, 40.0);
        assert_eq!(pos, 120.0);
        assert_eq!(vel, 5.0);
    }

    #[test]
    fn auto_drift_wraps_to_zero() {
        let s = Scroll::new(strip(&[100.0, 100.0]), ScrollConfig::default());
        assert_eq!(s.auto_drift(150.0), 151.0);
        assert_eq!(s.auto_drift(199.0), 0.0);
        assert_eq!(s.auto_drift(199.5), 0.0);
    }

    #[test]
    fn normalize_never_goes_negative() {
        let s = Scroll::new(strip(&[100.0, 100.0]), ScrollConfig::default());
        assert_eq!(s.normalize(-30.0), 170.0);
        assert_eq!(s.normalize(230.0), 30.0);
        assert_eq!(s.normalize(200.0), 0.0);
    }

    #[test]
    fn empty_track_is_left_alone() {
        let s = Scroll::new(strip(&[]), ScrollConfig::default());
        assert_eq!(s.track().child_count(), 0);
        assert_eq!(s.loop_width(), 0.0);
        assert_eq!(s.auto_drift(10.0), 11.0);
        assert_eq!(s.normalize(-4.0), 0.0);
    }
}
