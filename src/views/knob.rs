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

use crate::style::{FontFace, StyleOverrides};
use crate::theme::KNOB_FOREGROUND;
use crate::views::GestureCallback;
use crate::widgets::ControlAction;
use crate::widgets::knob::{DEFAULT_SENSITIVITY, Knob as KnobWidget};

/// A rotary knob view for continuous parameter control.
///
/// Drag up or right to increase the value, down or left to decrease it.
pub struct Knob<State, F> {
    range: RangeInclusive<f64>,
    value: f64,
    on_change: F,
    on_started: Option<GestureCallback<State>>,
    on_ended: Option<GestureCallback<State>>,
    x_sensitivity: f64,
    y_sensitivity: f64,
    style: StyleOverrides,
}

/// Create a rotary knob.
///
/// A `value` outside `range` is clamped, and the clamped value is reported
/// through `on_change` once the knob is added to the tree.
pub fn knob<State, Action>(
    range: RangeInclusive<f64>,
    value: f64,
    on_change: impl Fn(&mut State, f64) -> Action + Send + Sync + 'static,
) -> Knob<State, impl Fn(&mut State, f64) -> Action + Send + Sync + 'static> {
    Knob {
        range,
        value,
        on_change,
        on_started: None,
        on_ended: None,
        x_sensitivity: DEFAULT_SENSITIVITY,
        y_sensitivity: DEFAULT_SENSITIVITY,
        style: StyleOverrides::default(),
    }
}

impl<State, F> Knob<State, F> {
    /// How far a drag across the whole knob moves the value, per axis,
    /// as a multiple of the range.
    pub fn sensitivity(mut self, x: f64, y: f64) -> Self {
        self.x_sensitivity = x;
        self.y_sensitivity = y;
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

impl<State, F> ViewMarker for Knob<State, F> {}

impl<F, State, Action> View<State, Action, ViewCtx> for Knob<State, F>
where
    State: 'static,
    Action: 'static,
    F: Fn(&mut State, f64) -> Action + Send + Sync + 'static,
{
    type Element = Pod<KnobWidget>;
    type ViewState = ();

    fn build(&self, ctx: &mut ViewCtx, _: &mut State) -> (Self::Element, Self::ViewState) {
        let w = KnobWidget::with_sensitivity(
            self.range.clone(),
            self.value,
            self.style.resolve(KNOB_FOREGROUND),
            self.x_sensitivity,
            self.y_sensitivity,
        );
        let pod = ctx.with_action_widget(|ctx| ctx.create_pod(w));
        (pod, ())
    }

    fn rebuild(
        &self, prev: &Self, _: &mut (), _: &mut ViewCtx,
        mut element: Mut<'_, Self::Element>, _: &mut State,
    ) {
        if prev.range != self.range { KnobWidget::set_range(&mut element, self.range.clone()); }
        if prev.value != self.value { KnobWidget::set_value(&mut element, self.value); }
        if prev.x_sensitivity != self.x_sensitivity || prev.y_sensitivity != self.y_sensitivity {
            KnobWidget::set_sensitivity(&mut element, self.x_sensitivity, self.y_sensitivity);
        }
        if prev.style != self.style {
            KnobWidget::set_style(&mut element, self.style.resolve(KNOB_FOREGROUND));
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
