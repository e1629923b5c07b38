mod lock;
#[cfg(test)]
mod tests;
mod worker;

pub use lock::*;
pub use worker::*;
