//! This file is part of the xilem_audio_controls project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use std::ops::RangeInclusive;

use xilem::core::{MessageContext, Mut, View, ViewMarker};
use xilem::core::MessageResult;
use xilem::masonry::vello::peniko::Color;
use xilem::{Pod, ViewCtx};

use crate::control::Geometry;
use crate::style::{FontFace, StyleOverrides};
use crate::theme::{ACCENT_FOREGROUND, DEFAULT_MAXIMUM_ANGLE, DEFAULT_MINIMUM_ANGLE};
use crate::views::GestureCallback;
use crate::widgets::ControlAction;
use crate::widgets::arc_knob::ArcKnob as ArcKnobWidget;

/// A labelled knob with an arc fill, adjusted by pointing around its center.
///
/// The label is replaced by the numeric value while the knob is held.
pub struct ArcKnob<State, F> {
    label: String,
    range: RangeInclusive<f64>,
    value: f64,
    origin: f64,
    minimum_angle: f64,
    maximum_angle: f64,
    on_change: F,
    on_started: Option<GestureCallback<State>>,
    on_ended: Option<GestureCallback<State>>,
    style: StyleOverrides,
}

/// Create an arc knob.
///
/// The arc is filled from the lower bound of `range`; use
/// [`ArcKnob::origin`] for bipolar controls such as pan.
pub fn arc_knob<State, Action>(
    label: impl Into<String>,
    range: RangeInclusive<f64>,
    value: f64,
    on_change: impl Fn(&mut State, f64) -> Action + Send + Sync + 'static,
) -> ArcKnob<State, impl Fn(&mut State, f64) -> Action + Send + Sync + 'static> {
    ArcKnob {
        label: label.into(),
        origin: *range.start(),
        range,
        value,
        minimum_angle: DEFAULT_MINIMUM_ANGLE,
        maximum_angle: DEFAULT_MAXIMUM_ANGLE,
        on_change,
        on_started: None,
        on_ended: None,
        style: StyleOverrides::default(),
    }
}

impl<State, F> ArcKnob<State, F> {
    /// Value the arc fill grows from.
    pub fn origin(mut self, origin: f64) -> Self {
        self.origin = origin;
        self
    }

    /// Angles, in degrees clockwise from straight down, of the lower and upper bound.
    pub fn angular_span(mut self, minimum: f64, maximum: f64) -> Self {
        self.minimum_angle = minimum;
        self.maximum_angle = maximum;
        self
    }

    pub fn on_started(mut self, f: impl Fn(&mut State) + Send + Sync + 'static) -> Self {
        self.on_started = Some(Box::new(f));
        self
    }

    pub fn on_ended(mut self, f: impl Fn(&mut State) + Send + Sync + 'static) -> Self {
        self.on_ended = Some(Box::new(f));
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.style.background_color = Some(color);
        self
    }

    pub fn foreground_color(mut self, color: Color) -> Self {
        self.style.foreground_color = Some(color);
        self
    }

    pub fn corner_radius(mut self, radius: f64) -> Self {
        self.style.corner_radius = Some(radius);
        self
    }

    pub fn font(mut self, font_face: FontFace) -> Self {
        self.style.font_face = Some(font_face);
        self
    }
}

impl<State, F> ViewMarker for ArcKnob<State, F> {}

impl<F, State, Action> View<State, Action, ViewCtx> for ArcKnob<State, F>
where
    State: 'static,
    Action: 'static,
    F: Fn(&mut State, f64) -> Action + Send + Sync + 'static,
{
    type Element = Pod<ArcKnobWidget>;
    type ViewState = ();

    fn build(&self, ctx: &mut ViewCtx, _: &mut State) -> (Self::Element, Self::ViewState) {
        let w = ArcKnobWidget::new(
            self.label.clone(),
            self.range.clone(),
            self.value,
            self.origin,
            Geometry::Angle { minimum: self.minimum_angle, maximum: self.maximum_angle },
            self.style.resolve(ACCENT_FOREGROUND),
        );
        let pod = ctx.with_action_widget(|ctx| ctx.create_pod(w));
        (pod, ())
    }

    fn rebuild(
        &self, prev: &Self, _: &mut (), _: &mut ViewCtx,
        mut element: Mut<'_, Self::Element>, _: &mut State,
    ) {
        if prev.range != self.range { ArcKnobWidget::set_range(&mut element, self.range.clone()); }
        if prev.minimum_angle != self.minimum_angle || prev.maximum_angle != self.maximum_angle {
            ArcKnobWidget::set_angular_span(&mut element, self.minimum_angle, self.maximum_angle);
        }
        if prev.value != self.value { ArcKnobWidget::set_value(&mut element, self.value); }
        if prev.origin != self.origin { ArcKnobWidget::set_origin(&mut element, self.origin); }
        if prev.label != self.label { ArcKnobWidget::set_label(&mut element, self.label.clone()); }
        if prev.style != self.style {
            ArcKnobWidget::set_style(&mut element, self.style.resolve(ACCENT_FOREGROUND));
        }
    }

    fn teardown(&self, _: &mut (), ctx: &mut ViewCtx, element: Mut<'_, Self::Element>) {
        ctx.teardown_leaf(element);
    }

    fn message(
        &self, _: &mut (), message: &mut MessageContext,
        _: Mut<'_, Self::Element>, state: &mut State,
    ) -> MessageResult<Action> {
        if message.take_first().is_some() { return MessageResult::Stale; }
        match message.take_message::<ControlAction>() {
            Some(action) => super::dispatch(*action, state, &self.on_change, &self.on_started, &self.on_ended),
            None => MessageResult::Stale,
        }
    }
}
