//! Views: pure functions from API payloads to renderable models.

pub mod alerts;
pub mod filter;
pub mod medicine_list;
pub mod summary;

pub use alerts::*;
pub use filter::*;
pub use medicine_list::*;
pub use summary::*;
