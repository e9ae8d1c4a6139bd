//! This file is part of the xilem_audio_controls project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use xilem::core::MessageResult;

use crate::widgets::ControlAction;

pub mod arc_knob;
pub mod indexed_slider;
pub mod knob;

/// Host callback for the start or end of a gesture.
pub(crate) type GestureCallback<State> = Box<dyn Fn(&mut State) + Send + Sync>;

/// Route a control action to the matching host callback.
pub(crate) fn dispatch<State, Action>(
    action: ControlAction,
    state: &mut State,
    on_change: &impl Fn(&mut State, f64) -> Action,
    on_started: &Option<GestureCallback<State>>,
    on_ended: &Option<GestureCallback<State>>,
) -> MessageResult<Action> {
    let callback = match action {
        ControlAction::Changed(value) => return MessageResult::Action(on_change(state, value)),
        ControlAction::Started => on_started,
        ControlAction::Ended => on_ended,
    };
    match callback {
        Some(f) => {
            f(state);
            MessageResult::RequestRebuild
        }
        None => MessageResult::Nop,
    }
}
