//! Append-only triangle buffer with an atomic length counter.

use isoterrain_core::Triangle;

use crate::buffer::{
    create_empty_storage_buffer, create_storage_buffer, read_buffer, ScopedBuffer,
};
use crate::context::ComputeContext;
use crate::error::{ComputeError, ComputeResult};

/// Fixed-capacity triangle storage plus its counter.
///
/// Kernels reserve a slot with `atomicAdd` on the counter and write the
/// triangle only when the slot is below capacity, so the counter can run
/// past capacity but storage never overflows. Both buffers are released
/// when this value is dropped.
pub struct TriangleAppendBuffer {
    triangles: ScopedBuffer,
    counter: ScopedBuffer,
    capacity: u32,
}

impl TriangleAppendBuffer {
    /// Allocates room for `capacity` triangles and a zeroed counter.
    pub fn new(ctx: &ComputeContext, capacity: u64) -> ComputeResult<Self> {
        let size = capacity * Triangle::SIZE;
        ctx.check_storage_size("triangle buffer", size)?;
        let capacity = u32::try_from(capacity).map_err(|_| ComputeError::BufferTooLarge {
            label: "triangle buffer",
            size,
            limit: u64::from(u32::MAX) * Triangle::SIZE,
        })?;

        let (triangles, counter) = ctx.capture("triangle buffer allocation", |device| {
            (
                create_empty_storage_buffer(
                    device,
                    size.max(Triangle::SIZE),
                    Some("triangle buffer"),
                ),
                create_storage_buffer(device, &[0u32], Some("triangle counter")),
            )
        })?;
        log::debug!("allocated triangle buffer: {capacity} triangles, {size} bytes");

        Ok(Self {
            triangles: ScopedBuffer::new(triangles, "triangle buffer"),
            counter: ScopedBuffer::new(counter, "triangle counter"),
            capacity,
        })
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn triangles(&self) -> &wgpu::Buffer {
        &self.triangles
    }

    pub fn counter(&self) -> &wgpu::Buffer {
        &self.counter
    }

    /// Resets the counter to zero.
    pub fn clear(&self, ctx: &ComputeContext) {
        ctx.queue.write_buffer(&self.counter, 0, bytemuck::bytes_of(&0u32));
    }

    /// Number of appends the kernel performed. May exceed capacity.
    pub fn read_count(&self, ctx: &ComputeContext) -> ComputeResult<u32> {
        let count: Vec<u32> = read_buffer(ctx, &self.counter, 4)?;
        Ok(count.first().copied().unwrap_or_default())
    }

    /// Reads the counter, then copies exactly that many triangles back.
    ///
    /// A counter above capacity means triangles were dropped; that is
    /// reported as [`ComputeError::CapacityExceeded`] rather than truncated.
    pub fn read_back(&self, ctx: &ComputeContext) -> ComputeResult<Vec<Triangle>> {
        let count = self.read_count(ctx)?;
        if count > self.capacity {
            return Err(ComputeError::CapacityExceeded {
                emitted: u64::from(count),
                capacity: u64::from(self.capacity),
            });
        }
        let triangles = read_buffer(ctx, &self.triangles, u64::from(count) * Triangle::SIZE)?;
        log::debug!("read back {count} triangles");
        Ok(triangles)
    }
}
