pub mod failure;
pub mod summary;

pub use failure::render_failure;
pub use summary::render_summary;
