pub mod case;
pub mod code;
pub mod config;
pub mod dataset;
pub mod error;
pub mod program;
pub mod resource;
pub mod results;
pub mod submission;

pub use error::AppError;
pub use resource::{Resource, ResourceMeta};
