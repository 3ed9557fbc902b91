//! Amazon States Language document model.
//!
//! This module contains the pure data types for a state-machine definition:
//! - The [`StateMachine`] root document
//! - The [`State`] union with one variant per state kind
//! - Choice rules, retry and catch policies
//!
//! All types here are plain serde containers. They carry no behavior beyond
//! serialization; the definition is assembled through
//! [`WorkflowBuilder`](crate::builder::WorkflowBuilder) and interpreted only
//! by the remote service.

mod policy;
mod state;

pub use policy::{CatchPolicy, ErrorList, RetryPolicy};
pub use state::{
    Branch, ChoiceRule, ChoiceState, Comparison, MapState, ParallelState, PassState, State,
    StateFlow, TaskState, WaitState,
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Root state-machine definition document.
///
/// Serializes to the exact JSON shape the service accepts: `Comment`,
/// `StartAt` and an insertion-ordered `States` map. Round-tripping the
/// document through JSON yields a structurally identical value.
///
/// # Example
///
/// ```rust
/// use stepflow::builder::WorkflowBuilder;
///
/// let machine = WorkflowBuilder::new()
///     .start_with("Done")
///     .pass("Done", Default::default())
///     .end()
///     .build()
///     .unwrap();
///
/// let json = machine.to_json().unwrap();
/// assert!(json.contains("\"StartAt\":\"Done\""));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StateMachine {
    /// Human-readable description of the workflow.
    pub comment: String,
    /// Name of the state the execution begins in.
    pub start_at: String,
    /// All states, keyed by name. Insertion order is preserved on emission.
    pub states: IndexMap<String, State>,
}

impl StateMachine {
    /// Render the definition as compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Render the definition as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl From<StateMachine> for Branch {
    /// Reuse a built machine as a `Parallel` branch or `Map` iterator.
    /// The comment is dropped; branches carry none.
    fn from(machine: StateMachine) -> Self {
        Branch {
            start_at: machine.start_at,
            states: machine.states,
        }
    }
}
