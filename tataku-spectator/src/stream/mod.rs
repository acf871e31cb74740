mod event;
mod source;
mod router;
mod simulated;

pub use event::*;
pub use source::*;
pub use router::*;
pub use simulated::*;
