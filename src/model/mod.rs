pub mod caller;
pub mod common;
pub mod estimate;
pub mod party;
pub mod release;

pub use caller::*;
pub use common::*;
pub use estimate::*;
pub use party::*;
pub use release::*;
