pub mod contact;
pub mod task;

pub use contact::*;
pub use task::*;
