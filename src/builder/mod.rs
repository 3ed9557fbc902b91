//! Fluent construction of state-machine definitions.
//!
//! [`WorkflowBuilder`] assembles the document one state at a time while
//! tracking a current-state cursor; the option bags in [`options`] keep the
//! call sites terse. Service-specific task helpers live in
//! [`integrations`](crate::integrations) and chain exactly like the native
//! state creators here.

pub mod error;
pub mod options;
pub mod workflow;

pub use error::BuildError;
pub use options::{
    CatchSpec, ChoiceSpec, MapOptions, PassOptions, RetrySpec, StateOptions, WaitOptions,
};
pub use workflow::WorkflowBuilder;
