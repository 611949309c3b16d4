pub mod fetch;
pub mod resources;
pub mod seed;

pub use resources::ResourceStore;
