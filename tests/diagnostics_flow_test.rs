//! Diagnostics reconciliation across consecutive builds
//!
//! Exercises the retract-then-publish cycle: stale diagnostics from an
//! earlier build are withdrawn by the key that owns them, and only that
//! key's records are disturbed.

use async_trait::async_trait;
use buildloom::diagnostics::InMemoryDiagnostics;
use buildloom::engine::{BuildPlan, BuildScheduler, Participant, StepContext};
use buildloom::model::{
    BuildKind, ParticipantKey, Project, ProjectId, Severity, SourceLocation,
};
use std::collections::BTreeSet;
use std::path::Path;
use tokio_util::sync::CancellationToken;

fn key(name: &str) -> ParticipantKey {
    ParticipantKey::new("org.example:validator", "validate", name)
}

/// Validates one file: clears its own previous findings, then re-adds a
/// message only when told to.
struct Revalidator {
    file: &'static str,
    message: Option<(&'static str, u32)>,
}

#[async_trait]
impl Participant for Revalidator {
    async fn build(&mut self, step: &mut StepContext<'_>) -> anyhow::Result<BTreeSet<ProjectId>> {
        step.collector.clear_messages_for(self.file);
        if let Some((text, line)) = self.message {
            step.collector.add_message(
                SourceLocation::new(self.file, line, 1),
                Some(text),
                Severity::Error,
                None,
            );
        }
        Ok(BTreeSet::new())
    }
}

async fn run_build(
    scheduler: &BuildScheduler,
    project: &mut Project,
    plan: BuildPlan,
    sink: &mut InMemoryDiagnostics,
) {
    scheduler
        .run(
            project,
            plan,
            None,
            BuildKind::Full,
            &CancellationToken::new(),
            sink,
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_stale_diagnostic_is_retracted_when_not_reproduced() {
    let scheduler = BuildScheduler::builder().build();
    let mut project = Project::new("app", "/work/app");
    let mut sink = InMemoryDiagnostics::new();
    let k = key("default");

    // Build 1 reports a problem at line 5
    let plan = BuildPlan::new().phase(
        k.clone(),
        vec![Box::new(Revalidator {
            file: "src/a.rs",
            message: Some(("unused import", 5)),
        })],
    );
    run_build(&scheduler, &mut project, plan, &mut sink).await;
    assert_eq!(sink.owned_by(Some(&k)).len(), 1);
    assert_eq!(sink.owned_by(Some(&k))[0].location.line, 5);

    // Build 2 revalidates and no longer reproduces it
    let plan = BuildPlan::new().phase(
        k.clone(),
        vec![Box::new(Revalidator {
            file: "src/a.rs",
            message: None,
        })],
    );
    run_build(&scheduler, &mut project, plan, &mut sink).await;
    assert!(sink.owned_by(Some(&k)).is_empty());
    assert!(sink.for_file(Path::new("src/a.rs")).is_empty());
}

#[tokio::test]
async fn test_reproduced_diagnostic_is_replaced_not_duplicated() {
    let scheduler = BuildScheduler::builder().build();
    let mut project = Project::new("app", "/work/app");
    let mut sink = InMemoryDiagnostics::new();
    let k = key("default");

    for line in [5, 9] {
        let plan = BuildPlan::new().phase(
            k.clone(),
            vec![Box::new(Revalidator {
                file: "src/a.rs",
                message: Some(("unused import", line)),
            })],
        );
        run_build(&scheduler, &mut project, plan, &mut sink).await;
    }

    let owned = sink.owned_by(Some(&k));
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].location.line, 9);
}

#[tokio::test]
async fn test_retraction_never_crosses_keys() {
    let scheduler = BuildScheduler::builder().build();
    let mut project = Project::new("app", "/work/app");
    let mut sink = InMemoryDiagnostics::new();
    let ka = key("a");
    let kb = key("b");

    // Both keys report against the same file
    let plan = BuildPlan::new()
        .phase(
            ka.clone(),
            vec![Box::new(Revalidator {
                file: "src/shared.rs",
                message: Some(("a's finding", 3)),
            })],
        )
        .phase(
            kb.clone(),
            vec![Box::new(Revalidator {
                file: "src/shared.rs",
                message: Some(("b's finding", 8)),
            })],
        );
    run_build(&scheduler, &mut project, plan, &mut sink).await;
    assert_eq!(sink.for_file(Path::new("src/shared.rs")).len(), 2);

    // Only key A revalidates; B's diagnostic must survive
    let plan = BuildPlan::new().phase(
        ka.clone(),
        vec![Box::new(Revalidator {
            file: "src/shared.rs",
            message: None,
        })],
    );
    run_build(&scheduler, &mut project, plan, &mut sink).await;

    assert!(sink.owned_by(Some(&ka)).is_empty());
    let remaining = sink.owned_by(Some(&kb));
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].text, "b's finding");
}
