mod errors;
pub mod health_check;
pub mod movies;

pub use errors::*;
pub use health_check::*;
pub use movies::*;
