pub mod adaptors;
pub mod auth;
pub mod calculator;
pub mod grading;
pub mod notify;
