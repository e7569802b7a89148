mod labels;
mod time;
pub mod types;

pub use labels::*;
pub use time::*;
