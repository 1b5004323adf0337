//! Then steps for approval flow BDD scenarios.

use super::world::{ApprovalWorld, run_async};
use rstest_bdd_macros::then;
use taskgate::{
    approval::{
        domain::ValidationError, ports::PendingTaskRegistry, services::ApprovalError,
    },
    remote::domain::{HrefLink, RemoteTaskPayload},
};

fn created_task(world: &ApprovalWorld) -> Result<RemoteTaskPayload, eyre::Report> {
    world
        .api
        .created()
        .into_iter()
        .next()
        .ok_or_else(|| eyre::eyre!("no remote task was created"))
}

#[then(r#"the remote task estimate is "{estimate}""#)]
fn remote_estimate(world: &ApprovalWorld, estimate: String) -> Result<(), eyre::Report> {
    let payload = created_task(world)?;
    if payload.estimated_time.as_deref() != Some(estimate.as_str()) {
        return Err(eyre::eyre!(
            "expected estimate {estimate}, found {:?}",
            payload.estimated_time
        ));
    }
    Ok(())
}

#[then(r#"the remote task is linked to version "{name}""#)]
fn remote_version(world: &ApprovalWorld, name: String) -> Result<(), eyre::Report> {
    let (version_id, _) = world
        .version
        .as_ref()
        .filter(|(_, known)| *known == name)
        .ok_or_else(|| eyre::eyre!("unknown version {name}"))?;
    let payload = created_task(world)?;
    if payload.links.version != Some(HrefLink::version(*version_id)) {
        return Err(eyre::eyre!(
            "expected version link for {name}, found {:?}",
            payload.links.version
        ));
    }
    Ok(())
}

#[then(r#"the remote task description ends with "{suffix}""#)]
fn remote_description(world: &ApprovalWorld, suffix: String) -> Result<(), eyre::Report> {
    let payload = created_task(world)?;
    if !payload.description.raw.ends_with(&suffix) {
        return Err(eyre::eyre!(
            "description {:?} does not end with {suffix:?}",
            payload.description.raw
        ));
    }
    Ok(())
}

#[then("the submission is no longer pending")]
fn submission_resolved(world: &ApprovalWorld) -> Result<(), eyre::Report> {
    let submission = world
        .submission
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing submission in scenario world"))?;
    let entry = run_async(world.registry.get(submission.id()))?;
    if entry.is_some() {
        return Err(eyre::eyre!("submission {} is still pending", submission.id()));
    }
    Ok(())
}

#[then("nothing is pending")]
fn nothing_pending(world: &ApprovalWorld) -> Result<(), eyre::Report> {
    if !run_async(world.registry.is_empty())? {
        return Err(eyre::eyre!("registry is not empty"));
    }
    Ok(())
}

#[then("no remote task is created")]
fn no_remote_task(world: &ApprovalWorld) -> Result<(), eyre::Report> {
    let created = world.api.created();
    if !created.is_empty() {
        return Err(eyre::eyre!("expected no remote task, found {}", created.len()));
    }
    Ok(())
}

#[then("exactly one remote task is created")]
fn one_remote_task(world: &ApprovalWorld) -> Result<(), eyre::Report> {
    let created = world.api.created();
    if created.len() != 1 {
        return Err(eyre::eyre!("expected one remote task, found {}", created.len()));
    }
    Ok(())
}

#[then("the submission is refused for a missing title")]
fn refused_for_missing_title(world: &ApprovalWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_submit_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing submit result"))?;
    if !matches!(
        result,
        Err(ApprovalError::Validation(ValidationError::MissingTitle))
    ) {
        return Err(eyre::eyre!("expected MissingTitle error, got {result:?}"));
    }
    Ok(())
}

#[then("the last decision reports the submission as already processed")]
fn last_decision_not_found(world: &ApprovalWorld) -> Result<(), eyre::Report> {
    let result = world
        .decisions
        .last()
        .ok_or_else(|| eyre::eyre!("no decision was made"))?;
    if !matches!(result, Err(ApprovalError::NotFound(_))) {
        return Err(eyre::eyre!("expected NotFound error, got {result:?}"));
    }
    Ok(())
}
