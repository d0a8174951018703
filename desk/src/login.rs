pub mod cmd;
mod prompt;
pub mod state;
pub mod store;
