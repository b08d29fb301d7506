//! Application layer for Ticklist
//!
//! Provides the task list view model plus the pure view derivation it
//! is built on. The view model talks to any [`ticklist_store::TaskStore`]
//! implementation, so it can be driven against the hosted backend or an
//! in-memory fake.

pub mod error;
pub mod view;
pub mod viewmodel;

pub use error::{AppError, AppResult};
pub use view::{derive_view, SortKey, Tab};
pub use viewmodel::{TaskListViewModel, COMPLETE_NOTICE};
