//! Application services - use cases composed from the ports.

mod posts;

pub use posts::PostService;
