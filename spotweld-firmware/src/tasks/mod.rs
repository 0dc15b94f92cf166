//! Embassy tasks
//!
//! Only the display refresh runs as a task. The control loop is blocking and
//! runs in thread mode from `main`.

pub mod refresh;

pub use refresh::refresh_task;
