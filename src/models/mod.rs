//! Plant and controller models

mod liquid;
mod pid;

pub use liquid::Liquid;
pub use pid::PidController;
