mod data_stores;
mod error;
mod project;
mod project_id;
mod project_name;
mod request_context;
mod role;
mod roster;
mod user_id;

pub use data_stores::*;
pub use error::*;
pub use project::*;
pub use project_id::*;
pub use project_name::*;
pub use request_context::*;
pub use role::*;
pub use roster::*;
pub use user_id::*;
