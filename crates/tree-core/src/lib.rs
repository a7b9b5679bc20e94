pub mod camera;
pub mod constants;
pub mod decor;
pub mod error;
pub mod layout;
pub mod palette;
pub mod sampler;
pub mod state;
pub mod transform;

pub use camera::{Camera, CameraRig};
pub use decor::{DecorLayer, SparkleField, StarField};
pub use error::{CoreError, Result};
pub use layout::{Particle, ParticleClass, TreeLayout, UpdatePolicy};
pub use palette::seed_instance_colors;
pub use state::{AnimationState, TreeMode};
pub use transform::{InstanceBuffer, InstanceRaw, InstanceSink, TransformEngine};
