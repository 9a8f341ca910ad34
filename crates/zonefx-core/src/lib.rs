pub mod config;
pub mod constants;
pub mod debug;
pub mod effects;
pub mod membership;
pub mod particles;
pub mod ramp;
pub mod registry;
pub mod system;
pub mod visual;
pub mod zone;

pub use config::*;
pub use constants::*;
pub use debug::*;
pub use effects::*;
pub use membership::*;
pub use particles::*;
pub use ramp::*;
pub use registry::*;
pub use system::*;
pub use visual::*;
pub use zone::*;
