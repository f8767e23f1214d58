//! Composed hosting: a WebView2 composition controller rendering into the
//! surface's content visual, with input forwarded by the host.

use std::path::Path;
use std::sync::{mpsc, Arc, Mutex};

use tt_common::{Dpi, HostError, PixelPoint, PixelRect};
use webview2_com::Microsoft::Web::WebView2::Win32::{
    CreateCoreWebView2EnvironmentWithOptions, ICoreWebView2,
    ICoreWebView2AddScriptToExecuteOnDocumentCreatedCompletedHandler,
    ICoreWebView2CompositionController, ICoreWebView2CompositionController4,
    ICoreWebView2Controller, ICoreWebView2Controller3, ICoreWebView2Environment3,
    ICoreWebView2EnvironmentOptions, ICoreWebView2Settings9, COREWEBVIEW2_BOUNDS_MODE_USE_RAW_PIXELS,
    COREWEBVIEW2_MOUSE_EVENT_KIND, COREWEBVIEW2_MOUSE_EVENT_VIRTUAL_KEYS,
    COREWEBVIEW2_NON_CLIENT_REGION_KIND, COREWEBVIEW2_NON_CLIENT_REGION_KIND_CAPTION,
};
use webview2_com::{
    take_pwstr, wait_with_pump, CoreWebView2EnvironmentOptions,
    CreateCoreWebView2CompositionControllerCompletedHandler,
    CreateCoreWebView2EnvironmentCompletedHandler, NavigationCompletedEventHandler,
    WebMessageReceivedEventHandler,
};
use windows::core::{Error, Interface, HSTRING, PCWSTR, PWSTR};
use windows::Win32::Foundation::{BOOL, E_FAIL, HWND, POINT, RECT};

use super::{EngineEvent, EngineHandle, EngineOptions};
use crate::composition::dcomp::DcompSurface;
use crate::input::EngineInput;

fn init_err(step: &'static str) -> impl Fn(Error) -> HostError {
    move |e| HostError::initialization(step, e.to_string())
}

fn webview_err(e: Error) -> HostError {
    HostError::WebView(e.to_string())
}

fn push(events: &Arc<Mutex<Vec<EngineEvent>>>, event: EngineEvent) {
    if let Ok(mut evts) = events.lock() {
        evts.push(event);
    }
}

fn to_rect(bounds: PixelRect) -> RECT {
    RECT {
        left: bounds.x,
        top: bounds.y,
        right: bounds.right(),
        bottom: bounds.bottom(),
    }
}

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Create the WebView2 environment, pumping messages until it completes.
pub fn create_environment(user_data_dir: Option<&Path>) -> Result<ICoreWebView2Environment3, HostError> {
    let (tx, rx) = mpsc::channel::<Result<ICoreWebView2Environment3, Error>>();
    let options = CoreWebView2EnvironmentOptions::default();
    let data_dir = user_data_dir.map(|p| HSTRING::from(p.as_os_str()));

    unsafe {
        let handler = CreateCoreWebView2EnvironmentCompletedHandler::create(Box::new(
            move |result, environment| {
                let outcome = match result {
                    Ok(()) => match environment {
                        Some(env) => env.cast(),
                        None => Err(Error::from(E_FAIL)),
                    },
                    Err(err) => Err(err),
                };
                let _ = tx.send(outcome);
                Ok(())
            },
        ));

        let data_dir_ptr = match &data_dir {
            Some(dir) => PCWSTR(dir.as_ptr()),
            None => PCWSTR::null(),
        };

        CreateCoreWebView2EnvironmentWithOptions(
            PCWSTR::null(),
            data_dir_ptr,
            &ICoreWebView2EnvironmentOptions::from(options),
            &handler,
        )
        .map_err(init_err("environment"))?;
    }

    match wait_with_pump(rx) {
        Ok(result) => result.map_err(init_err("environment")),
        Err(e) => Err(HostError::initialization(
            "environment",
            format!("message pump failed: {e:?}"),
        )),
    }
}

fn create_controller(
    environment: &ICoreWebView2Environment3,
    hwnd: HWND,
) -> Result<(ICoreWebView2Controller, ICoreWebView2CompositionController), HostError> {
    let (tx, rx) = mpsc::channel::<
        Result<(ICoreWebView2Controller, ICoreWebView2CompositionController), Error>,
    >();

    unsafe {
        let handler = CreateCoreWebView2CompositionControllerCompletedHandler::create(Box::new(
            move |result, controller| {
                let outcome = match result {
                    Ok(()) => match controller {
                        Some(ctrl) => ctrl.cast().map(|base| (base, ctrl.clone())),
                        None => Err(Error::from(E_FAIL)),
                    },
                    Err(err) => Err(err),
                };
                let _ = tx.send(outcome);
                Ok(())
            },
        ));

        environment
            .CreateCoreWebView2CompositionController(hwnd, &handler)
            .map_err(init_err("composition controller"))?;
    }

    match wait_with_pump(rx) {
        Ok(result) => result.map_err(init_err("composition controller")),
        Err(e) => Err(HostError::initialization(
            "composition controller",
            format!("message pump failed: {e:?}"),
        )),
    }
}

// =============================================================================
// ENGINE
// =============================================================================

pub struct ComposedEngine {
    controller: ICoreWebView2Controller,
    composition: ICoreWebView2CompositionController,
    non_client: Option<ICoreWebView2CompositionController4>,
    webview: ICoreWebView2,
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl ComposedEngine {
    /// Create a composition controller for `hwnd` and bind it to the
    /// surface's content visual.
    pub fn create(
        environment: &ICoreWebView2Environment3,
        hwnd: HWND,
        surface: &DcompSurface,
        bounds: PixelRect,
        dpi: Dpi,
        options: &EngineOptions,
    ) -> Result<Self, HostError> {
        let (controller, composition) = create_controller(environment, hwnd)?;
        let events: Arc<Mutex<Vec<EngineEvent>>> = Arc::new(Mutex::new(Vec::new()));

        let webview = unsafe {
            composition
                .SetRootVisualTarget(surface.content_visual())
                .map_err(init_err("root visual target"))?;
            surface.commit()?;

            let scaled: ICoreWebView2Controller3 =
                controller.cast().map_err(init_err("raw pixel bounds"))?;
            scaled
                .SetBoundsMode(COREWEBVIEW2_BOUNDS_MODE_USE_RAW_PIXELS)
                .map_err(init_err("raw pixel bounds"))?;
            scaled
                .SetShouldDetectMonitorScaleChanges(false)
                .map_err(init_err("raw pixel bounds"))?;
            scaled
                .SetRasterizationScale(dpi.scale_factor())
                .map_err(init_err("raw pixel bounds"))?;

            controller
                .SetBounds(to_rect(bounds))
                .map_err(init_err("controller bounds"))?;
            controller
                .SetIsVisible(true)
                .map_err(init_err("controller visibility"))?;

            controller.CoreWebView2().map_err(init_err("core webview"))?
        };

        unsafe {
            let settings = webview.Settings().map_err(init_err("settings"))?;
            settings
                .SetAreDevToolsEnabled(options.devtools)
                .map_err(init_err("settings"))?;
            if let Ok(settings9) = settings.cast::<ICoreWebView2Settings9>() {
                let _ = settings9.SetIsNonClientRegionSupportEnabled(true);
            }

            for script in &options.init_scripts {
                webview
                    .AddScriptToExecuteOnDocumentCreated(
                        &HSTRING::from(script.as_str()),
                        None::<&ICoreWebView2AddScriptToExecuteOnDocumentCreatedCompletedHandler>,
                    )
                    .map_err(init_err("init scripts"))?;
            }

            let message_events = Arc::clone(&events);
            let mut token = 0i64;
            webview
                .add_WebMessageReceived(
                    &WebMessageReceivedEventHandler::create(Box::new(move |_sender, args| {
                        if let Some(args) = args {
                            let mut message = PWSTR::null();
                            if args.WebMessageAsJson(&mut message).is_ok() {
                                push(&message_events, EngineEvent::Message(take_pwstr(message)));
                            }
                        }
                        Ok(())
                    })),
                    &mut token,
                )
                .map_err(init_err("message handler"))?;

            let nav_events = Arc::clone(&events);
            webview
                .add_NavigationCompleted(
                    &NavigationCompletedEventHandler::create(Box::new(move |_sender, args| {
                        let mut success = BOOL::default();
                        if let Some(args) = args {
                            let _ = args.IsSuccess(&mut success);
                        }
                        push(
                            &nav_events,
                            EngineEvent::NavigationCompleted {
                                success: success.as_bool(),
                            },
                        );
                        Ok(())
                    })),
                    &mut token,
                )
                .map_err(init_err("navigation handler"))?;
        }

        let non_client = composition.cast::<ICoreWebView2CompositionController4>().ok();

        tracing::info!("composed engine created");
        Ok(Self {
            controller,
            composition,
            non_client,
            webview,
            events,
        })
    }
}

impl EngineHandle for ComposedEngine {
    fn navigate(&mut self, url: &str) -> Result<(), HostError> {
        unsafe { self.webview.Navigate(&HSTRING::from(url)) }.map_err(webview_err)
    }

    fn post_message(&mut self, json: &str) -> Result<(), HostError> {
        unsafe { self.webview.PostWebMessageAsJson(&HSTRING::from(json)) }.map_err(webview_err)
    }

    fn set_bounds(&mut self, bounds: PixelRect, dpi: Dpi) -> Result<(), HostError> {
        unsafe {
            if let Ok(scaled) = self.controller.cast::<ICoreWebView2Controller3>() {
                scaled
                    .SetRasterizationScale(dpi.scale_factor())
                    .map_err(webview_err)?;
            }
            self.controller.SetBounds(to_rect(bounds)).map_err(webview_err)
        }
    }

    fn set_visible(&mut self, visible: bool) -> Result<(), HostError> {
        unsafe { self.controller.SetIsVisible(visible) }.map_err(webview_err)
    }

    fn send_input(&mut self, input: &EngineInput) -> Result<(), HostError> {
        unsafe {
            self.composition.SendMouseInput(
                COREWEBVIEW2_MOUSE_EVENT_KIND(input.kind.code() as _),
                COREWEBVIEW2_MOUSE_EVENT_VIRTUAL_KEYS(input.virtual_keys as _),
                input.mouse_data,
                POINT {
                    x: input.point.x,
                    y: input.point.y,
                },
            )
        }
        .map_err(webview_err)
    }

    fn caption_at(&self, point: PixelPoint) -> bool {
        let Some(non_client) = &self.non_client else {
            return false;
        };
        let mut kind = COREWEBVIEW2_NON_CLIENT_REGION_KIND::default();
        let queried = unsafe {
            non_client.GetNonClientRegionAtPoint(
                POINT {
                    x: point.x,
                    y: point.y,
                },
                &mut kind,
            )
        };
        queried.is_ok() && kind == COREWEBVIEW2_NON_CLIENT_REGION_KIND_CAPTION
    }

    fn drain_events(&mut self) -> Vec<EngineEvent> {
        match self.events.lock() {
            Ok(mut evts) => std::mem::take(&mut *evts),
            Err(_) => Vec::new(),
        }
    }
}

impl Drop for ComposedEngine {
    fn drop(&mut self) {
        unsafe {
            let _ = self.controller.Close();
        }
    }
}
