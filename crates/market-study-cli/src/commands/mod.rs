pub mod projection;
pub mod study;
