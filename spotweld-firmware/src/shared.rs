//! State shared between the control loop and the refresh task

use spotweld_core::DisplayBuffer;

/// Written by the control loop, read by the refresh task
pub static DISPLAY: DisplayBuffer = DisplayBuffer::new();
