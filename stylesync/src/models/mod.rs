mod clothing;
mod recommendation;

pub use clothing::*;
pub use recommendation::*;
