pub mod deposit;
pub mod earn;
pub mod governance;
pub mod harvest;
pub mod initialize_controller;
pub mod initialize_strategy;
pub mod initialize_treasury;
pub mod initialize_vault;
pub mod set_strategy;
pub mod treasury;
pub mod view;
pub mod withdraw;

pub use deposit::*;
pub use earn::*;
pub use governance::*;
pub use harvest::*;
pub use initialize_controller::*;
pub use initialize_strategy::*;
pub use initialize_treasury::*;
pub use initialize_vault::*;
pub use set_strategy::*;
pub use treasury::*;
pub use view::*;
pub use withdraw::*;
