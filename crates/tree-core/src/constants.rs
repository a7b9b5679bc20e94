use std::f32::consts::PI;

// Layout and motion tuning shared by the core and the web frontend.

// Particle counts per class (fixed at generation time)
pub const NEEDLE_COUNT: usize = 1800;
pub const SPHERE_ORNAMENT_COUNT: usize = 150;
pub const BELL_ORNAMENT_COUNT: usize = 40;
pub const DIAMOND_ORNAMENT_COUNT: usize = 40;
pub const FAIRY_LIGHT_COUNT: usize = 300;
pub const RIBBON_SEGMENT_COUNT: usize = 400;
pub const GIFT_COUNT: usize = 15;
pub const STAR_COUNT: usize = 1;

// Tree volume
pub const TREE_HEIGHT: f32 = 10.0;
pub const TREE_RADIUS: f32 = 3.5;
pub const SCATTER_RADIUS: f32 = 25.0; // must enclose the tree so both states read apart

// Needles: golden-angle spiral inside the cone
pub const GOLDEN_ANGLE: f32 = 2.39996;
pub const NEEDLE_RADIAL_FILL: f32 = 0.9; // fraction of the cone cross-section used
pub const NEEDLE_CORE_OFFSET: f32 = 0.1; // keeps needles off the trunk axis

// Ornaments sit just outside the foliage
pub const ORNAMENT_SURFACE_PUSH: f32 = 1.05;
pub const SPHERE_ORNAMENT_SCALE: f32 = 1.0;
pub const BELL_ORNAMENT_SCALE: f32 = 0.8;
pub const DIAMOND_ORNAMENT_SCALE: f32 = 0.9;

// Helices wrapped around the cone
pub const LIGHT_TURNS: f32 = 12.0;
pub const LIGHT_RADIUS_OFFSET: f32 = 0.15;
pub const RIBBON_TURNS: f32 = 6.0;
pub const RIBBON_RADIUS_OFFSET: f32 = 0.35; // outside the lights
pub const RIBBON_PHASE: f32 = PI;

// Gifts on the floor ring
pub const GIFT_RING_INNER: f32 = 1.5;
pub const GIFT_RING_SPAN: f32 = 2.5;
pub const GIFT_FLOOR_DROP: f32 = 0.6;

// Star on the apex
pub const STAR_LIFT: f32 = 0.2;
pub const STAR_SCALE: f32 = 0.6;

// Assembly factor
pub const ASSEMBLY_DAMPING: f32 = 2.5; // responsiveness (1/s)
pub const INITIAL_ASSEMBLY: f32 = 0.0;

// Group spin (rad/s); faster while scattered
pub const GROUP_YAW_BASE: f32 = 0.05;
pub const GROUP_YAW_SCATTER_BOOST: f32 = 0.1;

// Transition swirl applies only strictly inside this window
pub const SWIRL_WINDOW_MIN: f32 = 0.01;
pub const SWIRL_WINDOW_MAX: f32 = 0.99;
pub const SWIRL_HALF_TURNS: f32 = 3.0;

// Idle floating noise
pub const FLOAT_AMPLITUDE: f32 = 1.5;
pub const FLOAT_FLOOR: f32 = 0.05;

// Class policies
pub const RIBBON_SNAP_THRESHOLD: f32 = 0.8;
pub const RIBBON_THICKNESS: [f32; 3] = [0.15, 1.0, 0.02]; // width, length, depth
pub const STAR_SPIN_RATE: f32 = 0.5;
pub const ORNAMENT_SWAY: f32 = 0.1;
pub const NEEDLE_MIN_SCALE: f32 = 0.6;
pub const ORNAMENT_MIN_SCALE: f32 = 0.2;

// Palette (sRGB hex)
pub const EMERALD: u32 = 0x2E8B57;
pub const DEEP_GREEN: u32 = 0x052912;
pub const GOLD: u32 = 0xFFD700;
pub const METALLIC_GOLD: u32 = 0xD4AF37;
pub const RUBY_RED: u32 = 0xC41E3A;
pub const BRIGHT_RED: u32 = 0xFF0000;
pub const SILVER: u32 = 0xE0E0E0;
pub const ROYAL_BLUE: u32 = 0x4169E1;
pub const WARM_WHITE: u32 = 0xFFFDD0;
pub const GIFT_DARK_RED: u32 = 0x8B0000;
pub const GIFT_DARK_GREEN: u32 = 0x006400;
pub const RIBBON_RED: u32 = 0xB22222;

pub const SPHERE_ORNAMENT_COLORS: [u32; 4] = [RUBY_RED, METALLIC_GOLD, ROYAL_BLUE, SILVER];
pub const BELL_ORNAMENT_COLORS: [u32; 2] = [GOLD, METALLIC_GOLD];
pub const DIAMOND_ORNAMENT_COLORS: [u32; 2] = [SILVER, RUBY_RED];
pub const FAIRY_LIGHT_COLORS: [u32; 5] = [0xFF0000, 0x00FF00, 0xFFD700, 0x0000FF, 0xFFA500];
pub const GIFT_COLORS: [u32; 5] = [GIFT_DARK_RED, GIFT_DARK_GREEN, METALLIC_GOLD, RUBY_RED, ROYAL_BLUE];

// Needle tint variation
pub const FOLIAGE_EMERALD_CHANCE: f32 = 0.4;
pub const FOLIAGE_SHADE_MIN: f32 = 0.7;
pub const FOLIAGE_SHADE_SPAN: f32 = 0.5;

// Gold sparkles drifting inside the tree group
pub const SPARKLE_COUNT: usize = 80;
pub const SPARKLE_VOLUME: f32 = 12.0; // edge of the cube they start in
pub const SPARKLE_SIZE: f32 = 0.06;
pub const SPARKLE_SPEED: f32 = 0.4;
pub const SPARKLE_DRIFT: f32 = 0.2;
pub const SPARKLE_TWINKLE_RATE: f32 = 3.0;
pub const SPARKLE_MIN_SCALE: f32 = 0.3;
pub const SPARKLE_OPACITY: f32 = 0.3;

// Background star shell in world space
pub const STAR_FIELD_COUNT: usize = 2000;
pub const STAR_FIELD_RADIUS: f32 = 100.0;
pub const STAR_FIELD_DEPTH: f32 = 50.0;
pub const STAR_FIELD_SIZE: f32 = 0.3;
pub const STAR_FIELD_SATURATION: f32 = 0.5;
pub const STAR_FIELD_LIGHTNESS: f32 = 0.9;
pub const STAR_FIELD_DEPTH_FADE: f32 = 0.6; // brightness lost from the inner to the outer edge
