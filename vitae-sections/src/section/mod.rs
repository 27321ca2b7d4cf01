//! Commands for custom sections: create, update, remove, read.

mod add;
mod get;
mod list;
mod remove;
mod update;

pub use add::AddSection;
pub use get::GetSection;
pub use list::ListSections;
pub use remove::RemoveSection;
pub use update::UpdateSection;
