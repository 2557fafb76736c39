pub mod common;
pub mod file;
pub mod session;
pub mod webhook;

pub use common::*;
pub use file::*;
pub use session::*;
pub use webhook::*;
