//! Command implementations for the duotone CLI.

mod batch;
mod convert;
mod filter;
mod init;
mod preset;
mod preview;

// Re-export all command functions
pub use batch::{cmd_batch, BatchArgs};
pub use convert::cmd_convert;
pub use filter::{cmd_filter, FilterArgs};
pub use init::cmd_init;
pub use preset::{cmd_preset_create, cmd_preset_list, cmd_preset_show};
pub use preview::cmd_preview;
