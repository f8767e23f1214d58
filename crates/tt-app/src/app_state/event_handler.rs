//! `ApplicationHandler` implementation for the winit event loop.

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use super::core::TorrentHostApp;
use super::types::UserEvent;

impl ApplicationHandler<UserEvent> for TorrentHostApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if !self.initialize_window(event_loop) {
            event_loop.exit();
            return;
        }

        self.open_splash(event_loop);
        self.start_status_poller();
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: UserEvent) {
        match event {
            UserEvent::Status(status) => self.handle_status(status),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.splash.as_ref().is_some_and(|s| s.id() == window_id) {
            if let WindowEvent::CloseRequested = event {
                self.close_splash();
            }
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.close_ui(),

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    self.sync_content_bounds();
                }
                self.track_window_geometry();
            }

            WindowEvent::Moved(_) => self.track_window_geometry(),

            WindowEvent::ScaleFactorChanged { .. } => self.sync_content_bounds(),

            WindowEvent::CursorMoved { position, .. } => self.handle_cursor_moved(position),

            WindowEvent::MouseInput { state, button, .. } => self.handle_mouse_input(state, button),

            WindowEvent::MouseWheel { delta, .. } => self.handle_mouse_wheel(delta),

            WindowEvent::ModifiersChanged(modifiers) => self.handle_modifiers(modifiers.state()),

            WindowEvent::Destroyed => {
                self.shutdown();
                self.should_exit = true;
            }

            _ => {}
        }

        if self.should_exit {
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.poll_and_schedule(event_loop);
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}

impl TorrentHostApp {
    /// Propagate the client size to the surface, engine and forwarder.
    fn sync_content_bounds(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let interactive = self.pointer.forwarder.is_interactive_resize();
        session.resize(interactive);
        self.pointer.forwarder.set_bounds(session.window().client_rect());
    }

    fn track_window_geometry(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.window_mut().track_geometry();
        }
    }
}
