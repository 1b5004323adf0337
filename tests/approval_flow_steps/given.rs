//! Given steps for approval flow BDD scenarios.

use super::world::{ApprovalWorld, participant, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskgate::{
    approval::domain::SubmitTaskRequest,
    remote::domain::{Project, ProjectId, Version, VersionId, VersionStatus},
};

#[given(r#"a remote project "{name}" with identifier "{identifier}" and version "{version}""#)]
fn remote_project(world: &mut ApprovalWorld, name: String, identifier: String, version: String) {
    let project_id = ProjectId::new(4);
    let version_id = VersionId::new(9);
    world.api.add_project(Project::new(
        project_id,
        name.clone(),
        identifier,
        format!("/api/v3/projects/{project_id}"),
    ));
    world.api.add_version(
        project_id,
        Version::new(version_id, version.clone(), VersionStatus::Open),
    );
    world.project = Some((project_id, name));
    world.version = Some((version_id, version));
}

#[given(r#""{requester}" asks "{approver}" to approve "{title}""#)]
fn request_for_approval(
    world: &mut ApprovalWorld,
    requester: String,
    approver: String,
    title: String,
) -> Result<(), eyre::Report> {
    let (project_id, project_name) = world
        .project
        .clone()
        .ok_or_else(|| eyre::eyre!("missing remote project in scenario world"))?;
    world.pending_request = Some(
        SubmitTaskRequest::new(title, participant(&requester), participant(&approver))
            .with_project(project_id, project_name)
            .with_interaction_id("bdd-1"),
    );
    Ok(())
}

#[given(r#"the request is estimated at "{hours}" hours"#)]
fn request_estimate(world: &mut ApprovalWorld, hours: String) -> Result<(), eyre::Report> {
    let request = world
        .pending_request
        .take()
        .ok_or_else(|| eyre::eyre!("missing pending request in scenario world"))?;
    world.pending_request = Some(request.with_estimate(hours));
    Ok(())
}

#[given(r#"the request targets version "{name}""#)]
fn request_version(world: &mut ApprovalWorld, name: String) -> Result<(), eyre::Report> {
    let (version_id, known) = world
        .version
        .clone()
        .ok_or_else(|| eyre::eyre!("missing remote version in scenario world"))?;
    if known != name {
        return Err(eyre::eyre!("unknown version {name}, remote has {known}"));
    }
    let request = world
        .pending_request
        .take()
        .ok_or_else(|| eyre::eyre!("missing pending request in scenario world"))?;
    world.pending_request = Some(request.with_version(version_id, name));
    Ok(())
}

#[given("the request has been submitted")]
fn request_submitted(world: &mut ApprovalWorld) -> Result<(), eyre::Report> {
    let request = world
        .pending_request
        .take()
        .ok_or_else(|| eyre::eyre!("missing pending request in scenario world"))?;
    let submission = run_async(world.coordinator.submit(request))
        .wrap_err("submit request in scenario setup")?;
    world.submission = Some(submission);
    Ok(())
}
