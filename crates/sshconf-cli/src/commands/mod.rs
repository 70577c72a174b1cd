//! Command handlers.

pub mod hosts;
pub mod maintenance;
pub mod make;
pub mod misc;
pub mod password;
