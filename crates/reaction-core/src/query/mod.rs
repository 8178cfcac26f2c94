//! Query options and revision windows
//!
//! `QueryOpt` is what callers send; `RevisionWindow` is the validated sync
//! cursor the aggregation engine works with.

mod options;
mod window;

pub use options::{QueryOpt, SubsQuery};
pub use window::RevisionWindow;
