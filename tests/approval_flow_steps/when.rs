//! When steps for approval flow BDD scenarios.

use super::world::{ApprovalWorld, participant, run_async};
use rstest_bdd_macros::when;
use taskgate::approval::services::Decision;

#[when("the request is submitted")]
fn submit_request(world: &mut ApprovalWorld) -> Result<(), eyre::Report> {
    let request = world
        .pending_request
        .take()
        .ok_or_else(|| eyre::eyre!("missing pending request in scenario world"))?;
    world.last_submit_result = Some(run_async(world.coordinator.submit(request)));
    Ok(())
}

fn decide(world: &mut ApprovalWorld, name: &str, decision: Decision) -> Result<(), eyre::Report> {
    let id = world
        .submission
        .as_ref()
        .map(|submission| submission.id().clone())
        .ok_or_else(|| eyre::eyre!("missing submission in scenario world"))?;
    let outcome = run_async(world.coordinator.decide(&id, participant(name), decision));
    world.decisions.push(outcome);
    Ok(())
}

#[when(r#""{name}" approves the submission"#)]
fn approve_submission(world: &mut ApprovalWorld, name: String) -> Result<(), eyre::Report> {
    decide(world, &name, Decision::Approve)
}

#[when(r#""{name}" rejects the submission because "{reason}""#)]
fn reject_submission(
    world: &mut ApprovalWorld,
    name: String,
    reason: String,
) -> Result<(), eyre::Report> {
    decide(world, &name, Decision::Reject { reason })
}
