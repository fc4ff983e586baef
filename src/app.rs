use crate::atlas;
use crate::camera::Camera;
use crate::game::{InputEvent, LoopControl, Session};
use crate::projection::{self, DebugOverlay};
use crate::render::SceneView;
use chargrid::{
    app::{App as ChargridApp, ControlFlow},
    input::{keys, Input, KeyboardInput, MouseInput},
    render::{ColModify, Frame, View, ViewContext},
};
use direction::CardinalDirection;
use std::time::Duration;
use tracing::info;

fn input_event(input: Input) -> Option<InputEvent> {
    match input {
        Input::Keyboard(keys::ETX) | Input::Keyboard(keys::ESCAPE) => Some(InputEvent::Quit),
        Input::Keyboard(key) => match key {
            KeyboardInput::Left => Some(InputEvent::Move(CardinalDirection::West)),
            KeyboardInput::Right => Some(InputEvent::Move(CardinalDirection::East)),
            KeyboardInput::Up => Some(InputEvent::Move(CardinalDirection::North)),
            KeyboardInput::Down => Some(InputEvent::Move(CardinalDirection::South)),
            KeyboardInput::Char(' ') => Some(InputEvent::Interact),
            _ => None,
        },
        _ => None,
    }
}

struct AppData {
    session: Session,
    debug: Option<DebugOverlay>,
}

impl AppData {
    fn new(session: Session, debug: bool) -> Self {
        Self {
            session,
            debug: if debug {
                Some(DebugOverlay::default())
            } else {
                None
            },
        }
    }
}

pub struct App {
    data: AppData,
    view: SceneView,
}

impl App {
    pub fn new(session: Session, debug: bool, camera: Camera) -> Self {
        Self {
            data: AppData::new(session, debug),
            view: SceneView::new(camera),
        }
    }

    fn track_pointer(&mut self, input: Input) {
        if let Input::Mouse(MouseInput::MouseMove { coord, .. }) = input {
            if let Some(debug) = self.data.debug.as_mut() {
                debug.pointer = Some(self.view.screen_to_world(coord));
            }
        }
    }
}

impl ChargridApp for App {
    fn on_input(&mut self, input: Input) -> Option<ControlFlow> {
        self.track_pointer(input);
        match self.data.session.handle_event(input_event(input)?) {
            LoopControl::Continue => None,
            LoopControl::Exit => {
                info!("quitting");
                Some(ControlFlow::Exit)
            }
        }
    }
    fn on_frame<F, C>(
        &mut self,
        _since_last_frame: Duration,
        view_context: ViewContext<C>,
        frame: &mut F,
    ) -> Option<ControlFlow>
    where
        F: Frame,
        C: ColModify,
    {
        let commands = projection::project(&self.data.session, self.data.debug.as_ref());
        let quads = atlas::quads(&commands);
        self.view.view(&quads, view_context, frame);
        None
    }
}
