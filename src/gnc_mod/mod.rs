pub mod controller;
pub mod phase;
pub mod guidance;
pub mod rate_limit;
pub mod approach;

pub use controller::Controller;
pub use phase::ControlPhase;
pub use guidance::{ApproachGains, BlendTier};
pub use approach::ApproachController;
