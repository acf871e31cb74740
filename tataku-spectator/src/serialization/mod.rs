mod error;
mod reader;
mod writer;
mod serializable;

pub use error::*;
pub use reader::*;
pub use writer::*;
pub use serializable::*;
