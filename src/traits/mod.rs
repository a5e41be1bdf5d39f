pub mod controller;
pub mod view_target;

pub use controller::*;
pub use view_target::*;
