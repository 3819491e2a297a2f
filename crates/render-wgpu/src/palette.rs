use cardroom_scene::MaterialHandle;
use cardroom_scene::room::{BACK_WALL, CARD, FLOOR, SIDE_WALL};
use std::collections::BTreeMap;

/// Shading parameters for one material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialParams {
    /// Base colour, sRGB components in [0, 1].
    pub color: [f32; 3],
    pub metalness: f32,
    pub roughness: f32,
    /// Strength of the glossy top layer.
    pub clearcoat: f32,
}

impl MaterialParams {
    /// Matte diffuse material from a 0xRRGGBB colour.
    pub fn matte(hex: u32) -> Self {
        Self {
            color: hex_to_rgb(hex),
            metalness: 0.0,
            roughness: 1.0,
            clearcoat: 0.0,
        }
    }
}

fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// Convert one sRGB component to linear.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Renderer-owned table from material handles to shading parameters.
#[derive(Debug, Clone)]
pub struct MaterialPalette {
    materials: BTreeMap<MaterialHandle, MaterialParams>,
    fallback: MaterialParams,
}

impl Default for MaterialPalette {
    fn default() -> Self {
        let mut materials = BTreeMap::new();
        materials.insert(BACK_WALL, MaterialParams::matte(0xfffaec));
        materials.insert(SIDE_WALL, MaterialParams::matte(0xf5ecd5));
        materials.insert(FLOOR, MaterialParams::matte(0x3d3d3d));
        materials.insert(
            CARD,
            MaterialParams {
                color: [1.0, 1.0, 1.0],
                metalness: 0.8,
                roughness: 0.4,
                clearcoat: 1.0,
            },
        );
        Self {
            materials,
            fallback: MaterialParams::matte(0xff00ff),
        }
    }
}

impl MaterialPalette {
    pub fn insert(&mut self, handle: MaterialHandle, params: MaterialParams) {
        self.materials.insert(handle, params);
    }

    /// Parameters for `handle`; unknown handles render magenta.
    pub fn get(&self, handle: MaterialHandle) -> MaterialParams {
        self.materials.get(&handle).copied().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_materials_present() {
        let palette = MaterialPalette::default();
        let floor = palette.get(FLOOR);
        assert!((floor.color[0] - 0x3d as f32 / 255.0).abs() < 1e-6);
        assert_eq!(palette.get(CARD).metalness, 0.8);
    }

    #[test]
    fn unknown_handle_uses_fallback() {
        let palette = MaterialPalette::default();
        assert_eq!(palette.get(MaterialHandle(999)).color, [1.0, 0.0, 1.0]);
    }

    #[test]
    fn srgb_endpoints() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
        assert!(srgb_to_linear(0.5) < 0.5);
    }
}
