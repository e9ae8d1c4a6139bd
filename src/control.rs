//! This file is part of the xilem_audio_controls project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

//! The gesture engine shared by every control in this crate.
//!
//! A [`Control`] turns pointer gestures into a value inside a closed range.
//! The value itself is owned by the caller and handed in as `&mut f64` on
//! every call, so the engine never caches a stale copy of it. Widgets only
//! forward pointer events and render whatever value comes out.

use std::f64::consts::PI;
use std::ops::RangeInclusive;

use tracing::{debug, trace};
use xilem::masonry::vello::kurbo::{Point, Size};

use crate::range::{clamp, clamp_in_place, denormalized, span};
use crate::theme::{DEFAULT_MAXIMUM_ANGLE, DEFAULT_MINIMUM_ANGLE};

/// How a control interprets pointer movement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Geometry {
    /// Relative drag. Horizontal and vertical deltas, each scaled by its own
    /// sensitivity and by the control's size, are added to the value the
    /// gesture started with. Moving right or up increases the value.
    TwoDimensionalDrag { x_sensitivity: f64, y_sensitivity: f64 },
    /// The pointer's horizontal position inside the control maps straight
    /// onto the range, left edge to right edge.
    HorizontalPoint,
    /// The pointer's angle around the control's center, in degrees measured
    /// clockwise from straight down, maps onto the range across
    /// `minimum..=maximum`. Angles outside the span snap to the nearer end.
    Angle { minimum: f64, maximum: f64 },
}

impl Geometry {
    /// Angular geometry over the default 45°..315° span.
    pub const fn angle() -> Self {
        Self::Angle {
            minimum: DEFAULT_MINIMUM_ANGLE,
            maximum: DEFAULT_MAXIMUM_ANGLE,
        }
    }
}

/// Anchor of an in-progress gesture.
#[derive(Clone, Copy, Debug)]
struct GestureSession {
    location: Point,
    value: f64,
    last: Point,
}

type Callback = Box<dyn FnMut() + Send + Sync>;
type ChangeCallback = Box<dyn FnMut(f64) + Send + Sync>;

/// Converts pointer gestures into a clamped value.
pub struct Control {
    range: RangeInclusive<f64>,
    geometry: Geometry,
    enabled: bool,
    session: Option<GestureSession>,
    on_started: Option<Callback>,
    on_ended: Option<Callback>,
    on_change: Option<ChangeCallback>,
}

impl Control {
    pub fn new(range: RangeInclusive<f64>, geometry: Geometry) -> Self {
        Self {
            range,
            geometry,
            enabled: true,
            session: None,
            on_started: None,
            on_ended: None,
            on_change: None,
        }
    }

    /// Called once at the start of every gesture.
    pub fn on_started(mut self, f: impl FnMut() + Send + Sync + 'static) -> Self {
        self.on_started = Some(Box::new(f));
        self
    }

    /// Called once at the end of every gesture.
    pub fn on_ended(mut self, f: impl FnMut() + Send + Sync + 'static) -> Self {
        self.on_ended = Some(Box::new(f));
        self
    }

    /// Called with the new value whenever a gesture changes it.
    pub fn on_change(mut self, f: impl FnMut(f64) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// A new engine for another range and geometry, taking over callbacks and
    /// the enabled flag.
    ///
    /// A gesture in progress carries on, re-anchored at `value` (clamped to the
    /// new range) and the last pointer location it saw.
    pub fn reconfigured(self, range: RangeInclusive<f64>, geometry: Geometry, value: f64) -> Self {
        let value = clamp(value, &range);
        let session = self.session.map(|s| GestureSession {
            location: s.last,
            value,
            last: s.last,
        });
        Self {
            range,
            geometry,
            enabled: self.enabled,
            session,
            on_started: self.on_started,
            on_ended: self.on_ended,
            on_change: self.on_change,
        }
    }

    pub fn range(&self) -> &RangeInclusive<f64> {
        &self.range
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// A disabled control ignores gesture starts and updates. Ending a gesture
    /// is always accepted.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether a gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Pull a host-supplied value back into range.
    ///
    /// Returns `true` if the value had to be corrected.
    pub fn appear(&self, value: &mut f64) -> bool {
        let before = *value;
        clamp_in_place(value, &self.range);
        let corrected = before != *value;
        if corrected {
            debug!(before, after = *value, "clamped out-of-range control value");
        }
        corrected
    }

    /// Begin a gesture at `location`, anchored at the current `value`.
    ///
    /// A session that was never ended is replaced without firing `on_ended`.
    pub fn start(&mut self, value: &f64, location: Point) {
        if !self.enabled {
            return;
        }
        trace!(x = location.x, y = location.y, value = *value, "gesture started");
        self.session = Some(GestureSession {
            location,
            value: *value,
            last: location,
        });
        if let Some(f) = self.on_started.as_mut() {
            f();
        }
    }

    /// Move the active gesture to `location` in a control of the given `size`.
    ///
    /// Writes the clamped result through `value` and returns it if it changed.
    /// Degenerate geometry and updates outside a gesture leave `value` alone.
    pub fn update(&mut self, value: &mut f64, location: Point, size: Size) -> Option<f64> {
        if !self.enabled {
            return None;
        }
        let session = self.session.as_mut()?;
        session.last = location;
        let session = *session;
        let candidate = self.candidate(session, location, size)?;
        let new_value = clamp(candidate, &self.range);
        if (new_value - *value).abs() <= f64::EPSILON && *value == clamp(*value, &self.range) {
            return None;
        }
        *value = new_value;
        if let Some(f) = self.on_change.as_mut() {
            f(new_value);
        }
        Some(new_value)
    }

    /// Finish the active gesture. Does nothing if there is none.
    pub fn end(&mut self) {
        if self.session.take().is_none() {
            return;
        }
        trace!("gesture ended");
        if let Some(f) = self.on_ended.as_mut() {
            f();
        }
    }

    /// Hand the current layout size to `produce` and return whatever it builds.
    pub fn content<R>(&self, size: Size, produce: impl FnOnce(Size) -> R) -> R {
        produce(size)
    }

    fn candidate(&self, session: GestureSession, location: Point, size: Size) -> Option<f64> {
        match self.geometry {
            Geometry::TwoDimensionalDrag {
                x_sensitivity,
                y_sensitivity,
            } => {
                if size.width <= 0.0 || size.height <= 0.0 {
                    return None;
                }
                let delta = location - session.location;
                let n = delta.x / size.width * x_sensitivity - delta.y / size.height * y_sensitivity;
                Some(session.value + n * span(&self.range))
            }
            Geometry::HorizontalPoint => {
                if size.width <= 0.0 {
                    return None;
                }
                Some(denormalized(location.x / size.width, &self.range))
            }
            Geometry::Angle { minimum, maximum } => {
                if size.width <= 0.0 || size.height <= 0.0 {
                    return None;
                }
                let center = Point::new(size.width / 2.0, size.height / 2.0);
                let angle = pointer_angle(center, location)?;
                Some(denormalized(
                    normalized_angle(angle, minimum, maximum),
                    &self.range,
                ))
            }
        }
    }
}

/// Angle of `location` around `center`, in degrees clockwise from straight
/// down in y-down screen coordinates, within `0..360`.
///
/// `None` when the pointer sits exactly on the center.
pub fn pointer_angle(center: Point, location: Point) -> Option<f64> {
    let d = location - center;
    if d.x == 0.0 && d.y == 0.0 {
        return None;
    }
    Some((-d.x).atan2(d.y).to_degrees().rem_euclid(360.0))
}

/// Position of `angle` within `minimum..=maximum`, as `0..=1`.
///
/// The span may cross straight down, e.g. `-45..=45` or `270..=450`.
/// Angles outside it snap to whichever end is closer going around the
/// circle; ties go to `minimum`.
pub fn normalized_angle(angle: f64, minimum: f64, maximum: f64) -> f64 {
    let sweep = maximum - minimum;
    if sweep <= 0.0 {
        return 0.0;
    }
    let rel = (angle - minimum).rem_euclid(360.0);
    if rel <= sweep {
        return rel / sweep;
    }
    if rel - sweep < 360.0 - rel { 1.0 } else { 0.0 }
}

/// Location on a circle of `radius` around `center` at `angle` degrees
/// measured the same way as [`pointer_angle`].
pub fn point_at_angle(center: Point, radius: f64, angle: f64) -> Point {
    let a = angle * PI / 180.0;
    Point::new(center.x - a.sin() * radius, center.y + a.cos() * radius)
}
