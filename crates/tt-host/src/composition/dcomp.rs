//! DirectComposition surface over a D3D11 device.

use tt_common::{HostError, PixelRect};
use windows::core::{Error, Interface};
use windows::Win32::Foundation::{E_FAIL, HWND};
use windows::Win32::Graphics::Direct3D::{
    D3D_DRIVER_TYPE, D3D_DRIVER_TYPE_HARDWARE, D3D_DRIVER_TYPE_WARP,
};
use windows::Win32::Graphics::Direct3D11::{
    D3D11CreateDevice, ID3D11Device, D3D11_CREATE_DEVICE_BGRA_SUPPORT, D3D11_SDK_VERSION,
};
use windows::Win32::Graphics::DirectComposition::{
    DCompositionCreateDevice, IDCompositionDevice, IDCompositionRectangleClip,
    IDCompositionTarget, IDCompositionVisual,
};
use windows::Win32::Graphics::Dwm::DwmFlush;
use windows::Win32::Graphics::Dxgi::IDXGIDevice;
use winit::raw_window_handle::{HasWindowHandle, RawWindowHandle};

use super::{CompositionSurface, SurfaceBuilder};

/// The Win32 handle behind a winit window.
pub fn window_hwnd(window: &winit::window::Window) -> Option<HWND> {
    match window.window_handle().ok()?.as_raw() {
        RawWindowHandle::Win32(handle) => Some(HWND(handle.hwnd.get() as *mut _)),
        _ => None,
    }
}

fn create_d3d_device(driver: D3D_DRIVER_TYPE) -> windows::core::Result<ID3D11Device> {
    let mut device = None;
    unsafe {
        D3D11CreateDevice(
            None,
            driver,
            None,
            D3D11_CREATE_DEVICE_BGRA_SUPPORT,
            None,
            D3D11_SDK_VERSION,
            Some(&mut device),
            None,
            None,
        )?;
    }
    device.ok_or_else(|| Error::from(E_FAIL))
}

fn set_clip_rect(clip: &IDCompositionRectangleClip, client: PixelRect) -> windows::core::Result<()> {
    unsafe {
        clip.SetLeft2(client.x as f32)?;
        clip.SetTop2(client.y as f32)?;
        clip.SetRight2(client.right() as f32)?;
        clip.SetBottom2(client.bottom() as f32)?;
    }
    Ok(())
}

// =============================================================================
// BUILDER
// =============================================================================

/// Partially built surface. Fields fill in step by step.
pub struct DcompBuilder {
    hwnd: HWND,
    d3d: Option<ID3D11Device>,
    device: Option<IDCompositionDevice>,
    root: Option<IDCompositionVisual>,
    content: Option<IDCompositionVisual>,
    clip: Option<IDCompositionRectangleClip>,
}

impl DcompBuilder {
    pub fn new(hwnd: HWND) -> Self {
        Self {
            hwnd,
            d3d: None,
            device: None,
            root: None,
            content: None,
            clip: None,
        }
    }
}

impl SurfaceBuilder for DcompBuilder {
    type Surface = DcompSurface;

    fn create_device(&mut self) -> Result<(), HostError> {
        let d3d = match create_d3d_device(D3D_DRIVER_TYPE_HARDWARE) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(error = %e, "hardware D3D device unavailable, trying WARP");
                create_d3d_device(D3D_DRIVER_TYPE_WARP)
                    .map_err(|e| HostError::initialization("d3d device", e.to_string()))?
            }
        };

        let dxgi: IDXGIDevice = d3d
            .cast()
            .map_err(|e| HostError::initialization("dxgi device", e.to_string()))?;
        let device: IDCompositionDevice = unsafe { DCompositionCreateDevice(&dxgi) }
            .map_err(|e| HostError::initialization("composition device", e.to_string()))?;

        self.d3d = Some(d3d);
        self.device = Some(device);
        Ok(())
    }

    fn build_visual_tree(&mut self, client: PixelRect) -> Result<(), HostError> {
        let device = self
            .device
            .as_ref()
            .ok_or_else(|| HostError::initialization("visual tree", "no composition device"))?;

        let step = |e: Error| HostError::initialization("visual tree", e.to_string());
        unsafe {
            let root = device.CreateVisual().map_err(step)?;
            let content = device.CreateVisual().map_err(step)?;
            root.AddVisual(&content, false, None::<&IDCompositionVisual>)
                .map_err(step)?;

            let clip = device.CreateRectangleClip().map_err(step)?;
            set_clip_rect(&clip, client).map_err(step)?;
            content.SetClip(&clip).map_err(step)?;

            self.root = Some(root);
            self.content = Some(content);
            self.clip = Some(clip);
        }
        Ok(())
    }

    fn attach_target(self) -> Result<DcompSurface, HostError> {
        let missing = || HostError::initialization("render target", "visual tree not built");
        let d3d = self.d3d.ok_or_else(missing)?;
        let device = self.device.ok_or_else(missing)?;
        let root = self.root.ok_or_else(missing)?;
        let content = self.content.ok_or_else(missing)?;
        let clip = self.clip.ok_or_else(missing)?;

        let step = |e: Error| HostError::initialization("render target", e.to_string());
        let target = unsafe {
            let target = device.CreateTargetForHwnd(self.hwnd, true).map_err(step)?;
            target.SetRoot(&root).map_err(step)?;
            device.Commit().map_err(step)?;
            target
        };

        tracing::debug!("composition surface attached");
        Ok(DcompSurface {
            _d3d: d3d,
            device,
            _target: target,
            _root: root,
            content,
            clip,
        })
    }
}

// =============================================================================
// SURFACE
// =============================================================================

pub struct DcompSurface {
    _d3d: ID3D11Device,
    device: IDCompositionDevice,
    _target: IDCompositionTarget,
    _root: IDCompositionVisual,
    content: IDCompositionVisual,
    clip: IDCompositionRectangleClip,
}

impl DcompSurface {
    /// The visual the composed engine renders into.
    pub fn content_visual(&self) -> &IDCompositionVisual {
        &self.content
    }

    pub fn commit(&self) -> Result<(), HostError> {
        unsafe { self.device.Commit() }
            .map_err(|e| HostError::Other(format!("composition commit failed: {e}")))
    }
}

impl CompositionSurface for DcompSurface {
    fn resize(&mut self, client: PixelRect, interactive: bool) -> Result<(), HostError> {
        let fail = |e: Error| HostError::Other(format!("composition resize failed: {e}"));
        set_clip_rect(&self.clip, client).map_err(fail)?;
        unsafe {
            self.device.Commit().map_err(fail)?;
            if interactive {
                self.device.WaitForCommitCompletion().map_err(fail)?;
                DwmFlush().map_err(fail)?;
            }
        }
        Ok(())
    }
}
