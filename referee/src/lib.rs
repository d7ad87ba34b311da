mod recording;
mod script;
mod session;
pub use recording::*;
pub use script::*;
pub use session::*;

pub struct Config {
    pub recorder: Option<recording::Recorder>,
    /// Print the board to stderr after every accepted event.
    pub show_board: bool,
}
