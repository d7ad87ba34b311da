pub use board::*;
pub use errors::*;
pub use game::*;
pub use protocol::*;
pub use rules::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod errors;
mod game;
mod protocol;
mod rules;
mod visualization;
