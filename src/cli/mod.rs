pub mod args;
pub mod exit;
pub mod separator;
