//! Noise volumes as filterable 3D textures.

use isoterrain_core::{NoiseSet, NoiseVolume, NOISE_VOLUME_COUNT};

use crate::context::ComputeContext;
use crate::error::ComputeResult;

/// Device copies of a [`NoiseSet`] plus the repeat/trilinear sampler that
/// reads them.
pub struct NoiseTextures {
    textures: Vec<wgpu::Texture>,
    views: Vec<wgpu::TextureView>,
    sampler: wgpu::Sampler,
}

impl NoiseTextures {
    /// Uploads every volume of `noise` as an `R16Float` 3D texture.
    pub fn upload(ctx: &ComputeContext, noise: &NoiseSet) -> ComputeResult<Self> {
        let (textures, sampler) = ctx.capture("noise upload", |device| {
            let textures: Vec<wgpu::Texture> = noise
                .volumes()
                .iter()
                .enumerate()
                .map(|(i, volume)| create_noise_texture(device, &ctx.queue, volume, i))
                .collect();
            (textures, create_noise_sampler(device))
        })?;
        let views = textures
            .iter()
            .map(|t| t.create_view(&wgpu::TextureViewDescriptor::default()))
            .collect();

        log::debug!(
            "uploaded {} noise textures of {}^3",
            NOISE_VOLUME_COUNT,
            noise.volume_size()
        );
        Ok(Self {
            textures,
            views,
            sampler,
        })
    }

    pub fn views(&self) -> &[wgpu::TextureView] {
        &self.views
    }

    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }
}

impl Drop for NoiseTextures {
    fn drop(&mut self) {
        for texture in &self.textures {
            texture.destroy();
        }
    }
}

/// Packs texels as `f16` bits in upload order (x fastest).
pub fn pack_texels(volume: &NoiseVolume) -> Vec<u16> {
    volume
        .texels()
        .iter()
        .map(|&v| half::f16::from_f32(v).to_bits())
        .collect()
}

fn create_noise_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    volume: &NoiseVolume,
    index: usize,
) -> wgpu::Texture {
    let size = volume.size();
    let extent = wgpu::Extent3d {
        width: size,
        height: size,
        depth_or_array_layers: size,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(&format!("noise volume {index}")),
        size: extent,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D3,
        format: wgpu::TextureFormat::R16Float,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    let half_data = pack_texels(volume);
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        bytemuck::cast_slice(&half_data),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(size * 2), // 1 channel * 2 bytes per f16
            rows_per_image: Some(size),
        },
        extent,
    );

    texture
}

/// Wrap addressing and trilinear filtering on every axis.
fn create_noise_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("Noise Sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_texels_preserves_order() {
        let texels = vec![0.0, 0.25, 0.5, 0.75, 0.125, 0.375, 0.625, 0.875];
        let volume = NoiseVolume::from_texels(2, texels).unwrap();
        let packed = pack_texels(&volume);
        assert_eq!(packed.len(), 8);
        for (bits, &v) in packed.iter().zip(volume.texels()) {
            assert_eq!(half::f16::from_bits(*bits).to_f32(), v);
        }
    }
}
