mod field;
mod frame;
mod values;

pub use field::*;
pub use frame::*;
pub use values::*;
