//! Window, GL context and the main loop.
//!
//! [App] is the one place holding mutable state across frames. GLFW events are translated into
//! [InputEvent]s here and the camera is only ever changed through [transition].

use std::sync::mpsc::Receiver;

use glfw::{Action, Context, Key, OpenGlProfileHint, WindowEvent, WindowHint, WindowMode};
use log::{info, trace};

use crate::{
    backend::GlBackend,
    config::Config,
    input::{transition, ButtonAction, Controls, HeldKeys, InputEvent, MouseButton, ViewState},
    renderer::Renderer,
    scene::{self, Scene},
    time::FrameClock,
};

#[derive(Debug, thiserror::Error)]
/// Fatal startup failures. Nothing is drawn when one of these occurs.
pub enum Error {
    #[error("Failed to initialise GLFW: {0:?}")]
    /// GLFW itself could not start.
    GlfwInit(glfw::InitError),

    #[error("Failed to create a {width}x{height} window with OpenGL {major}.{minor} core")]
    /// No window or no context of the requested version.
    WindowCreation {
        #[allow(missing_docs)]
        width: u32,
        #[allow(missing_docs)]
        height: u32,
        #[allow(missing_docs)]
        major: u32,
        #[allow(missing_docs)]
        minor: u32,
    },

    #[error("Failed to load OpenGL function `{0}`")]
    /// The context does not expose a function the renderer needs.
    GlLoader(&'static str),

    #[error(transparent)]
    /// The configured sphere arrangement is invalid.
    Scene(#[from] scene::Error),
}

/// Application context: window, camera state, frame clock and renderer.
pub struct App {
    // Declared first so GL objects are released while the context still exists.
    renderer: Renderer<GlBackend>,

    view: ViewState,
    controls: Controls,
    clock: FrameClock,

    events: Receiver<(f64, WindowEvent)>,
    window: glfw::Window,
    glfw: glfw::Glfw,
}

impl App {
    /// Open the window, make its context current, load GL and set up the renderer.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let mut glfw = glfw::init(glfw::LOG_ERRORS).map_err(Error::GlfwInit)?;

        let window_config = &config.window;
        let (major, minor) = window_config.gl_version;
        glfw.window_hint(WindowHint::ContextVersion(major, minor));
        glfw.window_hint(WindowHint::OpenGlProfile(OpenGlProfileHint::Core));
        glfw.window_hint(WindowHint::OpenGlForwardCompat(true));
        glfw.window_hint(WindowHint::Resizable(window_config.resizable));

        let (mut window, events) = glfw
            .create_window(
                window_config.width,
                window_config.height,
                &window_config.title,
                WindowMode::Windowed,
            )
            .ok_or(Error::WindowCreation {
                width: window_config.width,
                height: window_config.height,
                major,
                minor,
            })?;

        window.make_current();
        window.set_key_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_mouse_button_polling(true);
        window.set_framebuffer_size_polling(true);

        let backend = GlBackend::load(|symbol| window.get_proc_address(symbol) as *const _)
            .map_err(Error::GlLoader)?;

        info!(
            "OpenGL version: {}",
            backend.version().as_deref().unwrap_or("unknown")
        );
        info!(
            "OpenGL renderer: {}",
            backend.renderer().as_deref().unwrap_or("unknown")
        );

        let scene = Scene::arranged(&config.scene)?;
        let mut renderer = Renderer::new(backend, config, scene);

        let (width, height) = window.get_framebuffer_size();
        renderer.resize(width.max(0) as u32, height.max(0) as u32);

        Ok(Self {
            renderer,
            view: ViewState::default(),
            controls: config.controls,
            clock: FrameClock::new(),
            events,
            window,
            glfw,
        })
    }

    /// Run frames until the window is asked to close.
    pub fn run(mut self) {
        while !self.window.should_close() {
            self.glfw.poll_events();

            let pending = glfw::flush_messages(&self.events)
                .map(|(_, event)| event)
                .collect::<Vec<_>>();
            for event in pending {
                self.handle_event(event);
            }

            let dt = self.clock.tick(self.glfw.get_time());
            let frame = InputEvent::Frame {
                dt,
                held: self.held_keys(),
            };
            self.view = transition(self.view, &frame, &self.controls);

            self.renderer.render(&self.view.camera);
            self.window.swap_buffers();
        }

        info!("Window closed, shutting down");
    }

    fn handle_event(&mut self, event: WindowEvent) {
        let response = respond(&event, || self.window.get_cursor_pos());

        match response {
            Response::Close => self.window.set_should_close(true),
            Response::Resize(width, height) => self.renderer.resize(width, height),
            Response::Input(input) => {
                trace!("{input:?}");
                self.view = transition(self.view, &input, &self.controls);
            }
            Response::Ignore => {}
        }
    }

    fn held_keys(&self) -> HeldKeys {
        let down = |key| self.window.get_key(key) == Action::Press;

        HeldKeys {
            forward: down(Key::W),
            backward: down(Key::S),
            left: down(Key::A),
            right: down(Key::D),
        }
    }
}

#[derive(Debug, PartialEq)]
enum Response {
    Close,
    Resize(u32, u32),
    Input(InputEvent),
    Ignore,
}

/// Decide what a GLFW event does to the application.
fn respond(event: &WindowEvent, cursor: impl FnOnce() -> (f64, f64)) -> Response {
    match *event {
        WindowEvent::Key(Key::Escape, _, Action::Press, _) => Response::Close,
        WindowEvent::FramebufferSize(width, height) => {
            Response::Resize(width.max(0) as u32, height.max(0) as u32)
        }
        _ => match translate(event, cursor) {
            Some(input) => Response::Input(input),
            None => Response::Ignore,
        },
    }
}

/// Map a GLFW event onto camera input. `cursor` is only queried for button events, which do not
/// carry a position of their own.
fn translate(event: &WindowEvent, cursor: impl FnOnce() -> (f64, f64)) -> Option<InputEvent> {
    match *event {
        WindowEvent::CursorPos(x, y) => Some(InputEvent::CursorMoved { x, y }),
        WindowEvent::MouseButton(button, action, _) => {
            let action = match action {
                Action::Press => ButtonAction::Press,
                Action::Release => ButtonAction::Release,
                Action::Repeat => return None,
            };
            let button = match button {
                glfw::MouseButton::Button1 => MouseButton::Primary,
                _ => MouseButton::Other,
            };
            let (x, y) = cursor();

            Some(InputEvent::MouseButton {
                button,
                action,
                x,
                y,
            })
        }
        _ => None,
    }
}
