//! Gantry Common
//!
//! Tasks that can be used out of the box: file chunking, executable
//! presence checks, directory creation, and line counting. Each one
//! implements the [`gantry_task::Task`] contract and addresses its output
//! through the canonical path builder, so re-running with the same
//! parameters reuses the prior result.

pub mod fs;

mod directory;
mod executable;
mod line_count;
mod split;

pub use directory::Directory;
pub use executable::Executable;
pub use line_count::LineCount;
pub use split::SplitFile;
