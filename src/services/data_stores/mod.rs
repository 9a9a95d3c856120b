mod hashmap_project_store;
mod postgres_project_store;

pub use hashmap_project_store::*;
pub use postgres_project_store::*;
