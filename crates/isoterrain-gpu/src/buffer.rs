//! GPU buffer management.

use std::ops::Deref;

use wgpu::util::DeviceExt;

use crate::context::ComputeContext;
use crate::error::{ComputeError, ComputeResult};

/// A buffer that is destroyed as soon as it goes out of scope, so device
/// memory is released on every exit path of a stage.
#[derive(Debug)]
pub struct ScopedBuffer {
    buffer: wgpu::Buffer,
    label: &'static str,
}

impl ScopedBuffer {
    pub fn new(buffer: wgpu::Buffer, label: &'static str) -> Self {
        Self { buffer, label }
    }
}

impl Deref for ScopedBuffer {
    type Target = wgpu::Buffer;

    fn deref(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}

impl Drop for ScopedBuffer {
    fn drop(&mut self) {
        log::trace!("releasing {} ({} bytes)", self.label, self.buffer.size());
        self.buffer.destroy();
    }
}

/// Creates a uniform buffer from data.
pub fn create_uniform_buffer<T: bytemuck::Pod>(
    device: &wgpu::Device,
    data: &T,
    label: Option<&str>,
) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label,
        contents: bytemuck::bytes_of(data),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

/// Creates a storage buffer from data. It can also be copied back.
pub fn create_storage_buffer<T: bytemuck::Pod>(
    device: &wgpu::Device,
    data: &[T],
    label: Option<&str>,
) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label,
        contents: bytemuck::cast_slice(data),
        usage: wgpu::BufferUsages::STORAGE
            | wgpu::BufferUsages::COPY_DST
            | wgpu::BufferUsages::COPY_SRC,
    })
}

/// Creates an uninitialised storage buffer of `size` bytes.
pub fn create_empty_storage_buffer(
    device: &wgpu::Device,
    size: u64,
    label: Option<&str>,
) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label,
        size,
        usage: wgpu::BufferUsages::STORAGE
            | wgpu::BufferUsages::COPY_DST
            | wgpu::BufferUsages::COPY_SRC,
        mapped_at_creation: false,
    })
}

/// Copies the first `size` bytes of `source` to the host.
///
/// `size` must be a multiple of 4. Only those bytes are transferred; the
/// staging buffer is sized to match and released before returning.
pub fn read_buffer<T: bytemuck::Pod>(
    ctx: &ComputeContext,
    source: &wgpu::Buffer,
    size: u64,
) -> ComputeResult<Vec<T>> {
    if size == 0 {
        return Ok(Vec::new());
    }

    let staging = ctx.capture("readback staging", |device| {
        ScopedBuffer::new(
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("readback staging"),
                size,
                usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }),
            "readback staging",
        )
    })?;

    ctx.capture("readback copy", |device| {
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("readback copy encoder"),
        });
        encoder.copy_buffer_to_buffer(source, 0, &staging, 0, size);
        ctx.queue.submit(std::iter::once(encoder.finish()));
    })?;

    let slice = staging.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    ctx.wait_idle()?;
    rx.recv()
        .map_err(|e| ComputeError::BufferMapFailed(e.to_string()))?
        .map_err(|e| ComputeError::BufferMapFailed(e.to_string()))?;

    let data = slice.get_mapped_range();
    let values = bytemuck::cast_slice::<u8, T>(&data).to_vec();
    drop(data);
    staging.unmap();

    Ok(values)
}
