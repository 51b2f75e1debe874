//! GPU device access for uploading page quads.
//!
//! [`GpuContext`] bundles the wgpu device and queue that [`GpuQuad`] uploads
//! through. Applications that already own a device wrap it with
//! [`GpuContext::from_parts`]; tools without a window can ask for a
//! headless one with [`GpuContext::new_headless`].
//!
//! [`GpuQuad`]: crate::GpuQuad

use crate::error::GpuError;
use tracing::debug;

/// The wgpu device and queue used for buffer and texture uploads.
///
/// Fields are public so callers can reach the full wgpu API.
#[derive(Debug)]
pub struct GpuContext {
    /// The logical GPU device for creating resources.
    pub device: wgpu::Device,
    /// The command queue for submitting writes.
    pub queue: wgpu::Queue,
}

impl GpuContext {
    /// Wraps a device and queue the application already created.
    pub fn from_parts(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self { device, queue }
    }

    /// Creates a device with no presentation surface.
    ///
    /// Blocks the calling thread until the adapter and device are ready.
    pub fn new_headless() -> Result<Self, GpuError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter: false,
        }))?;

        debug!(adapter = ?adapter.get_info().name, "Selected GPU adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("Page Quad Device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: Default::default(),
            trace: Default::default(),
            experimental_features: Default::default(),
        }))?;

        Ok(Self { device, queue })
    }
}
