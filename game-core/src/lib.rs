pub mod game_state;
pub mod heroes;

// Re-export main components
pub use game_state::*;
pub use heroes::*;
