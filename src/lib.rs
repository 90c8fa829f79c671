//! To-do list manager: a JSON-backed task store plus its terminal front end.

pub mod cli;
pub mod error;
pub mod logging;
pub mod menu;
pub mod task;
pub mod task_store;
pub mod ui;

pub use error::{Result, StoreError};
pub use task::Task;
pub use task_store::TaskStore;
