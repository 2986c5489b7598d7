pub mod citation;
pub mod entry;
pub mod sheet;
pub mod snapshot;
