//! This file is part of the xilem_audio_controls project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use std::f64::consts::PI;
use std::ops::RangeInclusive;

use xilem::masonry::accesskit::{Node, Role};
use xilem::masonry::core::{
    AccessCtx, BoxConstraints, EventCtx, LayoutCtx, PaintCtx, PointerButtonEvent, PointerEvent,
    PointerUpdate, PropertiesMut, PropertiesRef, RegisterCtx, Update, UpdateCtx, Widget, WidgetId,
    WidgetMut,
};
use xilem::masonry::vello::Scene;
use xilem::masonry::vello::kurbo::{Affine, Circle, Point, Size, Stroke, Vec2};
use xilem::masonry::vello::peniko::Fill;

use smallvec::SmallVec;
use tracing::trace_span;

use crate::control::{Control, Geometry};
use crate::range::normalized;
use crate::style::ControlStyle;
use crate::widgets::{ControlAction, drag, press, reconfigure, release};

const KNOB_SIZE: f64 = 60.0;
const RIM_WIDTH: f64 = 1.5;
const INDICATOR_RADIUS_FACTOR: f64 = 0.16;
const INDICATOR_DISTANCE_FACTOR: f64 = 0.7;
/// Where the indicator sits at the lower bound, radians clockwise from straight down.
const SWEEP_OFFSET: f64 = 0.2 * PI;
/// Angle covered between the lower and the upper bound.
const SWEEP: f64 = 1.6 * PI;

/// Default drag sensitivity along each axis.
pub const DEFAULT_SENSITIVITY: f64 = 2.0;

/// A rotary knob adjusted by dragging in any direction.
///
/// A dot on the knob face shows the value on a fixed 288° sweep
/// with the gap at the bottom.
pub struct Knob {
    value: f64,
    control: Control,
    style: ControlStyle,
    /// Clamped initial value still to be reported to the host.
    correction: Option<f64>,
}

impl Knob {
    pub fn new(range: RangeInclusive<f64>, value: f64, style: ControlStyle) -> Self {
        Self::with_sensitivity(range, value, style, DEFAULT_SENSITIVITY, DEFAULT_SENSITIVITY)
    }

    pub fn with_sensitivity(
        range: RangeInclusive<f64>,
        mut value: f64,
        style: ControlStyle,
        x_sensitivity: f64,
        y_sensitivity: f64,
    ) -> Self {
        let control = Control::new(
            range,
            Geometry::TwoDimensionalDrag { x_sensitivity, y_sensitivity },
        );
        let correction = control.appear(&mut value).then_some(value);
        Self { value, control, style, correction }
    }

    pub fn set_value(this: &mut WidgetMut<'_, Self>, value: f64) {
        let mut v = value;
        this.widget.control.appear(&mut v);
        if (this.widget.value - v).abs() > f64::EPSILON {
            this.widget.value = v;
            this.ctx.request_render();
        }
    }

    pub fn set_range(this: &mut WidgetMut<'_, Self>, range: RangeInclusive<f64>) {
        let geometry = this.widget.control.geometry();
        let value = this.widget.value;
        reconfigure(&mut this.widget.control, range, geometry, value);
        let mut v = this.widget.value;
        this.widget.control.appear(&mut v);
        this.widget.value = v;
        this.ctx.request_render();
    }

    pub fn set_sensitivity(this: &mut WidgetMut<'_, Self>, x_sensitivity: f64, y_sensitivity: f64) {
        let range = this.widget.control.range().clone();
        let value = this.widget.value;
        reconfigure(
            &mut this.widget.control,
            range,
            Geometry::TwoDimensionalDrag { x_sensitivity, y_sensitivity },
            value,
        );
    }

    pub fn set_style(this: &mut WidgetMut<'_, Self>, style: ControlStyle) {
        this.widget.style = style;
        this.ctx.request_render();
    }

    /// Indicator angle for a normalized value, radians clockwise from straight down.
    pub(crate) fn indicator_angle(n: f64) -> f64 {
        SWEEP_OFFSET + n * SWEEP
    }

    /// Offset of the indicator dot from the knob center.
    pub(crate) fn indicator_offset(n: f64, distance: f64) -> Vec2 {
        let a = Self::indicator_angle(n);
        Vec2::new(-a.sin() * distance, a.cos() * distance)
    }
}

impl Widget for Knob {
    type Action = ControlAction;

    fn on_pointer_event(
        &mut self,
        ctx: &mut EventCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        event: &PointerEvent,
    ) {
        match event {
            PointerEvent::Down(PointerButtonEvent { state, .. }) if !ctx.is_disabled() => {
                ctx.request_focus();
                ctx.capture_pointer();
                let pos = ctx.local_position(state.position);
                let size = ctx.size();
                for action in press(&mut self.control, &mut self.value, pos, size, false) {
                    ctx.submit_action::<ControlAction>(action);
                }
                ctx.request_render();
            }
            PointerEvent::Move(PointerUpdate { current, .. }) if !ctx.is_disabled() => {
                if ctx.is_active() {
                    let pos = ctx.local_position(current.position);
                    let size = ctx.size();
                    if let Some(action) = drag(&mut self.control, &mut self.value, pos, size) {
                        ctx.submit_action::<ControlAction>(action);
                        ctx.request_render();
                    }
                }
            }
            PointerEvent::Up(..) | PointerEvent::Cancel(..) => {
                if let Some(action) = release(&mut self.control) {
                    ctx.submit_action::<ControlAction>(action);
                    ctx.request_render();
                }
                if ctx.is_active() {
                    ctx.release_pointer();
                }
            }
            _ => {}
        }
    }

    fn accepts_pointer_interaction(&self) -> bool { true }
    fn accepts_focus(&self) -> bool { true }
    fn register_children(&mut self, _ctx: &mut RegisterCtx<'_>) {}

    fn update(&mut self, ctx: &mut UpdateCtx<'_>, _props: &mut PropertiesMut<'_>, event: &Update) {
        match event {
            Update::WidgetAdded => {
                if let Some(v) = self.correction.take() {
                    ctx.submit_action::<ControlAction>(ControlAction::Changed(v));
                }
            }
            Update::DisabledChanged(disabled) => {
                self.control.set_enabled(!disabled);
                ctx.request_render();
            }
            _ => {}
        }
    }

    fn layout(&mut self, _ctx: &mut LayoutCtx<'_>, _props: &mut PropertiesMut<'_>, bc: &BoxConstraints) -> Size {
        bc.constrain(Size::new(KNOB_SIZE, KNOB_SIZE))
    }

    fn paint(&mut self, ctx: &mut PaintCtx<'_>, _props: &PropertiesRef<'_>, scene: &mut Scene) {
        let disabled = ctx.is_disabled();
        let n = normalized(self.value, self.control.range());
        let background = ControlStyle::paint_color(self.style.background_color, disabled);
        let foreground = ControlStyle::paint_color(self.style.foreground_color, disabled);

        self.control.content(ctx.size(), |size| {
            let center = Point::new(size.width / 2.0, size.height / 2.0);
            let r = size.width.min(size.height) / 2.0 - RIM_WIDTH;
            if r <= 0.0 { return; }

            // Body
            let body = Circle::new(center, r);
            scene.fill(Fill::NonZero, Affine::IDENTITY, background, None, &body);
            scene.stroke(&Stroke::new(RIM_WIDTH), Affine::IDENTITY, foreground, None, &body);

            // Indicator dot
            let dot_center = center + Self::indicator_offset(n, r * INDICATOR_DISTANCE_FACTOR);
            let dot_r = (r * INDICATOR_RADIUS_FACTOR).max(1.5);
            let dot = Circle::new(dot_center, dot_r);
            scene.fill(Fill::NonZero, Affine::IDENTITY, foreground, None, &dot);
        });
    }

    fn accessibility_role(&self) -> Role { Role::Slider }

    fn accessibility(&mut self, _ctx: &mut AccessCtx<'_>, _props: &PropertiesRef<'_>, node: &mut Node) {
        node.set_numeric_value(self.value);
        node.set_min_numeric_value(*self.control.range().start());
        node.set_max_numeric_value(*self.control.range().end());
    }

    fn children_ids(&self) -> SmallVec<[WidgetId; 16]> { SmallVec::new() }

    fn make_trace_span(&self, id: WidgetId) -> tracing::Span {
        trace_span!("Knob", id = id.trace())
    }
}

#[cfg(test)]
mod tests {
    use xilem::masonry::vello::peniko::Color;

    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn indicator_sweeps_from_lower_left_to_lower_right() {
        assert!((Knob::indicator_angle(0.0) - 0.2 * PI).abs() < EPS);
        assert!((Knob::indicator_angle(1.0) - 1.8 * PI).abs() < EPS);
        assert!((Knob::indicator_angle(0.5) - PI).abs() < EPS);
    }

    #[test]
    fn indicator_is_straight_up_at_midpoint() {
        let offset = Knob::indicator_offset(0.5, 10.0);
        assert!(offset.x.abs() < EPS, "x should be 0, got {}", offset.x);
        assert!((offset.y + 10.0).abs() < EPS, "y should be -10, got {}", offset.y);
    }

    #[test]
    fn indicator_starts_left_of_center() {
        let start = Knob::indicator_offset(0.0, 10.0);
        let end = Knob::indicator_offset(1.0, 10.0);
        assert!(start.x < 0.0 && start.y > 0.0, "lower bound should be lower left: {start:?}");
        assert!(end.x > 0.0 && end.y > 0.0, "upper bound should be lower right: {end:?}");
    }

    #[test]
    fn constructor_clamps_initial_value() {
        let knob = Knob::new(0.0..=1.0, 3.0, ControlStyle::new(Color::BLACK));
        assert_eq!(knob.value, 1.0);
        assert_eq!(knob.correction, Some(1.0));
    }

    #[test]
    fn in_range_value_needs_no_correction() {
        let knob = Knob::new(0.0..=1.0, 0.3, ControlStyle::new(Color::BLACK));
        assert_eq!(knob.correction, None);
    }
}
