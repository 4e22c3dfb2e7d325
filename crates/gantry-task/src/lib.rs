//! Gantry Task
//!
//! Deterministic artifact addressing for task pipelines. A task is
//! identified by a stable type name, a storage tag, and the parameters that
//! are meaningful to its output; this crate turns that identity into a
//! reproducible filesystem path, normalizes parameters so semantically
//! equivalent inputs share one output, and defines the contract ([`Task`])
//! every concrete task implements.
//!
//! Scheduling is external. This layer only answers *where* a task's output
//! belongs and *whether* that output already exists — re-running a pipeline
//! with the same parameters reuses prior results, while different
//! parameters produce distinct, non-colliding outputs.

mod config;
mod error;
mod normalize;
mod params;
mod path;
mod target;
mod task;

pub use config::TaskConfig;
pub use error::TaskError;
pub use normalize::{Rule, Substitute, first_of_month, normalize};
pub use params::{ParamValue, Parameters};
pub use path::{DEFAULT_EXT, PathOptions, artifact_path};
pub use target::LocalTarget;
pub use task::{Outcome, Task, execute};
