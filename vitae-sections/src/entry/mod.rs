//! Commands for section entries: the Entry Store.

mod add;
mod get;
mod list;
mod remove;
mod update;

pub use add::AddEntry;
pub use get::GetEntry;
pub use list::ListEntries;
pub use remove::RemoveEntry;
pub use update::UpdateEntry;
