//! Unix-specific platform implementations

mod memory;
mod paths;
#[cfg(target_os = "linux")]
mod procfs;
mod process;
mod signals;
mod system;
#[cfg(target_os = "linux")]
mod utmp;

pub use memory::UnixMemory;
pub use paths::UnixPaths;
pub use process::UnixProcesses;
pub use signals::UnixSignals;
pub use system::UnixSystem;
