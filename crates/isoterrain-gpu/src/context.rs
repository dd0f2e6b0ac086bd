//! Headless compute device.

use glam::UVec3;
use pollster::FutureExt;

use crate::error::{ComputeError, ComputeResult};

/// A wgpu device and queue without a surface.
pub struct ComputeContext {
    /// The wgpu device.
    pub device: wgpu::Device,
    /// The command queue.
    pub queue: wgpu::Queue,
    info: wgpu::AdapterInfo,
    limits: wgpu::Limits,
}

impl ComputeContext {
    /// Requests a high-performance adapter and a device with the adapter's
    /// full limits, so large storage buffers are available where the
    /// hardware supports them.
    pub async fn new() -> ComputeResult<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| ComputeError::AdapterCreationFailed(e.to_string()))?;

        let info = adapter.get_info();
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("isoterrain compute device"),
                required_features: wgpu::Features::empty(),
                required_limits: adapter.limits(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        log::info!("using compute adapter {} ({:?})", info.name, info.backend);
        Ok(Self::from_parts(device, queue, info))
    }

    /// Blocking variant of [`ComputeContext::new`].
    pub fn new_blocking() -> ComputeResult<Self> {
        Self::new().block_on()
    }

    /// Wraps a device created elsewhere.
    pub fn from_parts(device: wgpu::Device, queue: wgpu::Queue, info: wgpu::AdapterInfo) -> Self {
        let limits = device.limits();
        Self {
            device,
            queue,
            info,
            limits,
        }
    }

    /// Adapter the device was created on.
    pub fn adapter_info(&self) -> &wgpu::AdapterInfo {
        &self.info
    }

    /// Limits the device was created with.
    pub fn limits(&self) -> &wgpu::Limits {
        &self.limits
    }

    /// Checks that a `tile`³ workgroup fits the device.
    pub fn check_tile_size(&self, tile: u32) -> ComputeResult<()> {
        let invocations = u64::from(tile).pow(3);
        let limit = self.limits.max_compute_invocations_per_workgroup;
        let per_axis = self
            .limits
            .max_compute_workgroup_size_x
            .min(self.limits.max_compute_workgroup_size_y)
            .min(self.limits.max_compute_workgroup_size_z);
        if invocations > u64::from(limit) || tile > per_axis {
            return Err(ComputeError::UnsupportedTileSize {
                tile,
                invocations,
                limit,
            });
        }
        Ok(())
    }

    /// Checks a workgroup count against the per-dimension dispatch limit.
    pub fn check_dispatch(&self, tiles: UVec3) -> ComputeResult<()> {
        let limit = self.limits.max_compute_workgroups_per_dimension;
        let largest = tiles.max_element();
        if largest > limit {
            return Err(ComputeError::DispatchTooLarge {
                tiles: largest,
                limit,
            });
        }
        Ok(())
    }

    /// Checks that a storage buffer of `size` bytes can be created and bound.
    pub fn check_storage_size(&self, label: &'static str, size: u64) -> ComputeResult<()> {
        let limit = self
            .limits
            .max_buffer_size
            .min(u64::from(self.limits.max_storage_buffer_binding_size));
        if size > limit {
            return Err(ComputeError::BufferTooLarge { label, size, limit });
        }
        Ok(())
    }

    /// Runs `f` inside out-of-memory and validation error scopes, turning
    /// any captured device error into an `Err`.
    pub fn capture<T>(&self, stage: &str, f: impl FnOnce(&wgpu::Device) -> T) -> ComputeResult<T> {
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        self.device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        let value = f(&self.device);
        let out_of_memory = self.device.pop_error_scope().block_on();
        let validation = self.device.pop_error_scope().block_on();

        if let Some(err) = out_of_memory {
            log::error!("{stage}: {err}");
            return Err(ComputeError::OutOfMemory(stage.to_string()));
        }
        if let Some(err) = validation {
            return Err(ComputeError::Validation {
                stage: stage.to_string(),
                message: err.to_string(),
            });
        }
        Ok(value)
    }

    /// Records one compute pass of `tiles` workgroups and submits it.
    pub fn dispatch(
        &self,
        label: &str,
        pipeline: &wgpu::ComputePipeline,
        bind_group: &wgpu::BindGroup,
        tiles: UVec3,
    ) -> ComputeResult<()> {
        self.check_dispatch(tiles)?;
        log::debug!("{label}: dispatching {}x{}x{} workgroups", tiles.x, tiles.y, tiles.z);
        self.capture(label, |device| {
            let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some(label),
            });
            {
                let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                    label: Some(label),
                    timestamp_writes: None,
                });
                pass.set_pipeline(pipeline);
                pass.set_bind_group(0, bind_group, &[]);
                pass.dispatch_workgroups(tiles.x, tiles.y, tiles.z);
            }
            self.queue.submit(std::iter::once(encoder.finish()));
        })
    }

    /// Blocks until all submitted work has finished.
    pub fn wait_idle(&self) -> ComputeResult<()> {
        self.device
            .poll(wgpu::PollType::wait_indefinitely())
            .map_err(|e| ComputeError::PollFailed(e.to_string()))?;
        Ok(())
    }
}
