//! Pieces shared by every crate of the workspace: logging setup, runtime
//! environment checks and small wire types.

pub mod env;
pub mod types;
pub mod utils;
