pub mod caller_extractor;
pub mod error;
pub mod estimate_handlers;
pub mod handlers;
pub mod release_handlers;
pub mod routes;

pub use error::*;
pub use handlers::*;
pub use routes::*;
