pub mod controller;
pub mod strategy;
pub mod treasury;
pub mod vault;

pub use controller::*;
pub use strategy::*;
pub use treasury::*;
pub use vault::*;
