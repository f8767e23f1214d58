//! Direct hosting: the engine owns a child window inside the host window.

use std::sync::{Arc, Mutex};

use tt_bridge::deliver_script;
use tt_common::{Dpi, HostError, PixelPoint, PixelRect};
use wry::raw_window_handle::HasWindowHandle;
use wry::{DragDropEvent, PageLoadEvent, WebContext, WebView, WebViewBuilder};

use super::{EngineEvent, EngineHandle, EngineOptions};
use crate::input::EngineInput;

fn logical_rect(bounds: PixelRect, dpi: Dpi) -> wry::Rect {
    let scale = dpi.scale_factor();
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(
            bounds.x as f64 / scale,
            bounds.y as f64 / scale,
        )),
        size: wry::dpi::Size::Logical(wry::dpi::LogicalSize::new(
            bounds.width as f64 / scale,
            bounds.height as f64 / scale,
        )),
    }
}

fn push(events: &Arc<Mutex<Vec<EngineEvent>>>, event: EngineEvent) {
    if let Ok(mut evts) = events.lock() {
        evts.push(event);
    }
}

pub struct DirectEngine {
    webview: WebView,
    events: Arc<Mutex<Vec<EngineEvent>>>,
    _context: WebContext,
}

impl DirectEngine {
    /// Create the engine as a child of `window`, covering `bounds`.
    pub fn create<W: HasWindowHandle>(
        window: &W,
        bounds: PixelRect,
        dpi: Dpi,
        options: &EngineOptions,
    ) -> Result<Self, HostError> {
        let events: Arc<Mutex<Vec<EngineEvent>>> = Arc::new(Mutex::new(Vec::new()));
        let mut context = WebContext::new(options.user_data_dir.clone());

        let mut builder = WebViewBuilder::with_web_context(&mut context)
            .with_bounds(logical_rect(bounds, dpi))
            .with_devtools(options.devtools)
            .with_focused(true)
            .with_visible(true);

        for script in &options.init_scripts {
            builder = builder.with_initialization_script(script);
        }

        let ipc_events = Arc::clone(&events);
        builder = builder.with_ipc_handler(move |request| {
            let body = request.body().to_string();
            tracing::trace!(body_len = body.len(), "direct engine message");
            push(&ipc_events, EngineEvent::Message(body));
        });

        let load_events = Arc::clone(&events);
        builder = builder.with_on_page_load_handler(move |event, url| {
            if let PageLoadEvent::Finished = event {
                tracing::debug!(url = %url, "direct engine navigation completed");
                push(&load_events, EngineEvent::NavigationCompleted { success: true });
            }
        });

        let drop_events = Arc::clone(&events);
        builder = builder.with_drag_drop_handler(move |event| {
            if let DragDropEvent::Drop { paths, .. } = event {
                if !paths.is_empty() {
                    push(&drop_events, EngineEvent::FilesDropped(paths));
                }
                return true;
            }
            false
        });

        let webview = builder
            .build_as_child(window)
            .map_err(|e| HostError::WebView(e.to_string()))?;

        tracing::info!("direct engine created");
        Ok(Self {
            webview,
            events,
            _context: context,
        })
    }
}

impl EngineHandle for DirectEngine {
    fn navigate(&mut self, url: &str) -> Result<(), HostError> {
        self.webview
            .load_url(url)
            .map_err(|e| HostError::WebView(e.to_string()))
    }

    fn post_message(&mut self, json: &str) -> Result<(), HostError> {
        self.webview
            .evaluate_script(&deliver_script(json))
            .map_err(|e| HostError::WebView(e.to_string()))
    }

    fn set_bounds(&mut self, bounds: PixelRect, dpi: Dpi) -> Result<(), HostError> {
        self.webview
            .set_bounds(logical_rect(bounds, dpi))
            .map_err(|e| HostError::WebView(e.to_string()))
    }

    fn set_visible(&mut self, visible: bool) -> Result<(), HostError> {
        self.webview
            .set_visible(visible)
            .map_err(|e| HostError::WebView(e.to_string()))
    }

    fn send_input(&mut self, _input: &EngineInput) -> Result<(), HostError> {
        Ok(())
    }

    fn caption_at(&self, _point: PixelPoint) -> bool {
        false
    }

    fn drain_events(&mut self) -> Vec<EngineEvent> {
        match self.events.lock() {
            Ok(mut evts) => std::mem::take(&mut *evts),
            Err(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_converted_to_logical_units() {
        let rect = logical_rect(PixelRect::new(30, 60, 1500, 900), Dpi(144));
        match (rect.position, rect.size) {
            (wry::dpi::Position::Logical(p), wry::dpi::Size::Logical(s)) => {
                assert!((p.x - 20.0).abs() < 1e-9);
                assert!((p.y - 40.0).abs() < 1e-9);
                assert!((s.width - 1000.0).abs() < 1e-9);
                assert!((s.height - 600.0).abs() < 1e-9);
            }
            other => panic!("expected logical rect, got {other:?}"),
        }
    }
}
