mod flake;
mod identifier;
mod sortable;

pub use flake::*;
pub use identifier::*;
pub use sortable::*;
