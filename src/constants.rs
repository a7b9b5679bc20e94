/// Scene, lighting and post-processing tuning for the web frontend.
///
/// Layout and motion constants live in `tree_core::constants`; this module
/// only carries what the renderer needs.
// Tree group placement in world space
pub const TREE_GROUP_OFFSET_Y: f32 = -1.5;

// Background clear (linear of sRGB #080402)
pub const CLEAR_COLOR: [f64; 3] = [0.002428, 0.001214, 0.000607];

// Ambient fill
pub const AMBIENT_COLOR: u32 = 0x331100;
pub const AMBIENT_INTENSITY: f32 = 0.15;

// Sky/ground hemisphere standing in for the sunset environment
pub const HEMI_SKY_COLOR: u32 = 0xFFB47A;
pub const HEMI_GROUND_COLOR: u32 = 0x2A1208;
pub const HEMI_INTENSITY: f32 = 0.35;

// Golden key spot
pub const KEY_LIGHT_POSITION: [f32; 3] = [15.0, 12.0, 15.0];
pub const KEY_LIGHT_COLOR: u32 = 0xFFCF8F;
pub const KEY_LIGHT_INTENSITY: f32 = 200.0;
pub const KEY_LIGHT_ANGLE: f32 = 0.4; // cone half-angle (rad)
pub const KEY_LIGHT_PENUMBRA: f32 = 0.3; // share of the cone that fades

// Key light shadow map
pub const SHADOW_MAP_SIZE: u32 = 2048;
pub const KEY_SHADOW_NEAR: f32 = 5.0;
pub const KEY_SHADOW_FAR: f32 = 50.0;
pub const SHADOW_BIAS_CONSTANT: i32 = 2;
pub const SHADOW_BIAS_SLOPE: f32 = 2.0;

// Warm rim spot behind the tree
pub const RIM_LIGHT_POSITION: [f32; 3] = [-15.0, 15.0, -10.0];
pub const RIM_LIGHT_COLOR: u32 = 0xFFDDAA;
pub const RIM_LIGHT_INTENSITY: f32 = 100.0;
pub const RIM_LIGHT_ANGLE: f32 = 0.5;
pub const RIM_LIGHT_PENUMBRA: f32 = 1.0;

// Deep red fill from below
pub const FILL_LIGHT_POSITION: [f32; 3] = [0.0, -5.0, 8.0];
pub const FILL_LIGHT_COLOR: u32 = 0xB03010;
pub const FILL_LIGHT_INTENSITY: f32 = 30.0;
pub const FILL_LIGHT_RANGE: f32 = 15.0; // falls to zero at this distance

// Glow of the unlit decor layers
pub const SPARKLE_GLOW: f32 = 4.0;
pub const STAR_FIELD_GLOW: f32 = 1.0;

// Post-processing
pub const BLOOM_THRESHOLD: f32 = 0.7;
pub const BLOOM_STRENGTH: f32 = 1.2;
pub const BLOOM_RADIUS: f32 = 0.8; // blur tap spacing in bloom texels
pub const TONE_EXPOSURE: f32 = 0.9;
pub const VIGNETTE_OFFSET: f32 = 0.1;
pub const VIGNETTE_DARKNESS: f32 = 0.7;
pub const GRAIN_OPACITY: f32 = 0.04;
