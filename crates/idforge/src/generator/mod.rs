mod flake;
mod interface;
mod mutex;
mod random;
mod sortable;

pub use flake::*;
pub use interface::*;
pub use mutex::*;
pub use random::*;
pub use sortable::*;
