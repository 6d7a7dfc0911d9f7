pub mod router;
pub mod terminal;

pub use router::TerminalRouter;
pub use terminal::TerminalUi;
