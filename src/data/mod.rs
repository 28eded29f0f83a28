mod movies;
mod runtime;

pub use movies::*;
pub use runtime::*;
