pub mod session;
pub mod tictactoe;
mod session_rng;

pub use session_rng::SessionRng;
