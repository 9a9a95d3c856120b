mod add_member;
mod get_members;
mod get_project;
mod get_project_list;
mod new_project;
mod remove_member;
mod update_member;
mod update_team;

pub use add_member::*;
pub use get_members::*;
pub use get_project::*;
pub use get_project_list::*;
pub use new_project::*;
pub use remove_member::*;
pub use update_member::*;
pub use update_team::*;
