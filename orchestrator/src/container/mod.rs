//! Container management module for the Scratchpad orchestrator
//!
//! A container is a directory under the configured data directory, named by a
//! random identifier. This module handles:
//! - Creating containers and seeding them with the runtime's entry program
//! - Creating, reading and overwriting files inside a container
//! - Running a container file with the configured runtime
//!
//! Containers are not sandboxes. Executed files run as ordinary child
//! processes of the orchestrator with its privileges.

mod error;
mod executor;
mod lock;
mod manager;
mod naming;

pub use error::{ContainerError, ErrorKind, ExecutionError};
pub use executor::{CommandSpec, ProcessExecutor, SystemExecutor};
pub use lock::ContainerLocks;
pub use manager::ContainerManager;
pub use naming::{ContainerId, FileName};
