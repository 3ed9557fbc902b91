//! Branching Constructs
//!
//! Demonstrates choice rules, parallel branches, a map over input items and
//! a timed wait, plus retry/catch policies and the opt-in graph check.
//!
//! Run with: cargo run --example branching

use stepflow::builder::{
    CatchSpec, ChoiceSpec, MapOptions, RetrySpec, StateOptions, WaitOptions, WorkflowBuilder,
};
use stepflow::definition::{Branch, Comparison};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Branch graphs are ordinary workflows reused as fragments.
    let audit: Branch = WorkflowBuilder::new()
        .start_with("Audit")
        .lambda(
            "Audit",
            "arn:aws:lambda:us-east-1:123456789012:function:audit",
            StateOptions::new().end(),
        )
        .build()?
        .into();

    let archive: Branch = WorkflowBuilder::new()
        .start_with("Archive")
        .lambda(
            "Archive",
            "arn:aws:lambda:us-east-1:123456789012:function:archive",
            StateOptions::new().end(),
        )
        .build()?
        .into();

    let per_item: Branch = WorkflowBuilder::new()
        .start_with("Handle")
        .lambda(
            "Handle",
            "arn:aws:lambda:us-east-1:123456789012:function:handle-item",
            StateOptions::new().end(),
        )
        .build()?
        .into();

    let builder = WorkflowBuilder::with_comment("Priority routing")
        .start_with("Triage")
        .choice(
            "Triage",
            vec![
                ChoiceSpec::new(
                    "$.priority",
                    Comparison::StringEquals("high".to_string()),
                    "Escalate",
                ),
                ChoiceSpec::new(
                    "$.priority",
                    Comparison::StringEquals("low".to_string()),
                    "Defer",
                )
                .otherwise(),
            ],
        )
        .lambda(
            "Escalate",
            "arn:aws:lambda:us-east-1:123456789012:function:escalate",
            StateOptions::new().next("FanOut").timeout_seconds(60),
        )
        .wait("Defer", WaitOptions::new().seconds(300).next("FanOut"))?
        .parallel(
            "FanOut",
            vec![audit, archive],
            StateOptions::new().next("EachItem"),
        )
        .map(
            "EachItem",
            per_item,
            MapOptions::new()
                .items_path("$.items")
                .max_concurrency(4)
                .common(StateOptions::new().end()),
        )
        .add_retry(
            "Escalate",
            vec![RetrySpec::new("States.TaskFailed").max_attempts(5)],
        )?
        .add_catch(
            "Escalate",
            vec![CatchSpec::new("States.ALL", "Defer").result_path("$.failure")],
        )?;

    builder.validate()?;
    let machine = builder.build()?;
    println!("{}", machine.to_json_pretty()?);
    Ok(())
}
