mod movies;
mod performance;
mod static_files;

pub use movies::*;
pub use performance::*;
pub use static_files::*;
