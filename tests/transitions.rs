// ABOUTME: Integration tests for alias transitions against the in-memory service.
// ABOUTME: Covers preconditions, no-op cases, and the exact writes each operation makes.

mod support;

use async_trait::async_trait;
use lad::deploy::{
    BuildRunner, CanaryOutcome, CanaryRequest, Deployer, PromoteOutcome, SwitchOutcome,
};
use lad::diagnostics::{Diagnostics, WarningKind};
use lad::error::{Error, ErrorKind, ExitCode, Result};
use parking_lot::Mutex;
use lad::types::{AliasName, Routing};
use support::{AliasCall, Operation, function, pct, service, service_with_canary, v};

mod canary_tests {
    use super::*;

    #[tokio::test]
    async fn canary_rejected_when_live_equals_latest() {
        let svc = service(3, "3", "2", "3");
        let f = function();
        let deployer = Deployer::new(&svc, &f);

        let err = deployer.canary(pct(10)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PreconditionViolation);
        assert_eq!(err.exit_code(), ExitCode::InvalidInput);
        assert!(err.to_string().contains("deploy a new version first"));
        assert!(svc.mutations().is_empty());
    }

    #[tokio::test]
    async fn canary_zero_clears_even_when_live_equals_latest() {
        let svc = service_with_canary(3, "3", "2", "3", 10);
        let f = function();
        let deployer = Deployer::new(&svc, &f);

        let outcome = deployer.canary(pct(0)).await.unwrap();
        assert_eq!(outcome, CanaryOutcome::Cleared { version: v("3") });
        assert_eq!(svc.alias(&f, AliasName::Live).unwrap().routing, None);
    }

    #[tokio::test]
    async fn canary_then_promote() {
        let svc = service(4, "3", "2", "4");
        let f = function();
        let deployer = Deployer::new(&svc, &f);

        deployer.canary(pct(50)).await.unwrap();
        let live = svc.alias(&f, AliasName::Live).unwrap();
        assert_eq!(live.version, v("3"));
        assert_eq!(live.routing, Some(Routing::new(v("4"), pct(50))));

        let mut diag = Diagnostics::default();
        let outcome = deployer.promote(false, &mut diag).await.unwrap();
        assert_eq!(
            outcome,
            PromoteOutcome::Promoted {
                previous: v("3"),
                live: v("4")
            }
        );
        assert!(!diag.has_warnings());

        let live = svc.alias(&f, AliasName::Live).unwrap();
        assert_eq!(live.version, v("4"));
        assert_eq!(live.routing, None);
        assert_eq!(svc.alias(&f, AliasName::Previous).unwrap().version, v("3"));
    }

    #[tokio::test]
    async fn auto_promote_after_75_percent() {
        let svc = service(4, "3", "2", "4");
        let f = function();
        let deployer = Deployer::new(&svc, &f);
        let request = CanaryRequest::new(Some(75), None, true).unwrap();
        let mut diag = Diagnostics::default();

        deployer.canary(request.weight).await.unwrap();
        let outcome = deployer.promote(true, &mut diag).await.unwrap();

        assert_eq!(
            outcome,
            PromoteOutcome::Promoted {
                previous: v("3"),
                live: v("4")
            }
        );
        assert!(!diag.has_warnings());
        let live = svc.alias(&f, AliasName::Live).unwrap();
        assert_eq!(live.version, v("4"));
        assert_eq!(live.routing, None);
        assert_eq!(svc.alias(&f, AliasName::Previous).unwrap().version, v("3"));
    }

    #[tokio::test]
    async fn canary_full_weight_is_written_as_routing() {
        let svc = service(4, "3", "2", "4");
        let f = function();
        let deployer = Deployer::new(&svc, &f);

        deployer.canary(pct(100)).await.unwrap();
        let live = svc.alias(&f, AliasName::Live).unwrap();
        assert_eq!(live.version, v("3"));
        assert_eq!(live.routing.unwrap().weight.fraction(), 1.0);
    }
}

mod deploy_tests {
    use super::*;

    /// Build step that records what ran and fails at the chosen step.
    struct ScriptedBuild {
        fail_on: &'static str,
        steps: Mutex<Vec<&'static str>>,
    }

    impl ScriptedBuild {
        fn failing_on(step: &'static str) -> Self {
            Self {
                fail_on: step,
                steps: Mutex::new(Vec::new()),
            }
        }

        fn step(&self, step: &'static str) -> Result<()> {
            self.steps.lock().push(step);
            if step == self.fail_on {
                return Err(Error::Build {
                    step: format!("sam {step}"),
                    message: "exit status: 1".to_string(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl BuildRunner for ScriptedBuild {
        async fn build(&self) -> Result<()> {
            self.step("build")
        }

        async fn deploy(&self, _description: &str) -> Result<()> {
            self.step("deploy")
        }
    }

    #[tokio::test]
    async fn failed_build_publishes_nothing() {
        let svc = service(3, "3", "2", "3");
        let f = function();
        let deployer = Deployer::new(&svc, &f);
        let build = ScriptedBuild::failing_on("build");
        let mut diag = Diagnostics::default();

        let err = deployer
            .deploy(Some(&build as &dyn BuildRunner), "x", &mut diag)
            .await
            .unwrap_err();

        assert_eq!(err.exit_code(), ExitCode::ServiceError);
        assert_eq!(*build.steps.lock(), vec!["build"]);
        assert!(svc.mutations().is_empty());
        assert_eq!(svc.alias(&f, AliasName::Latest).unwrap().version, v("3"));
    }

    #[tokio::test]
    async fn failed_sam_deploy_publishes_nothing() {
        let svc = service(3, "3", "2", "3");
        let f = function();
        let deployer = Deployer::new(&svc, &f);
        let build = ScriptedBuild::failing_on("deploy");
        let mut diag = Diagnostics::default();

        let err = deployer
            .deploy(Some(&build as &dyn BuildRunner), "x", &mut diag)
            .await
            .unwrap_err();

        assert_eq!(err.exit_code(), ExitCode::ServiceError);
        assert_eq!(*build.steps.lock(), vec!["build", "deploy"]);
        assert!(svc.mutations().is_empty());
        assert_eq!(svc.alias(&f, AliasName::Latest).unwrap().version, v("3"));
    }

    #[tokio::test]
    async fn successful_build_runs_before_publish() {
        let svc = service(3, "3", "2", "3");
        let f = function();
        let deployer = Deployer::new(&svc, &f);
        let build = ScriptedBuild::failing_on("none");
        let mut diag = Diagnostics::default();

        let outcome = deployer
            .deploy(Some(&build as &dyn BuildRunner), "x", &mut diag)
            .await
            .unwrap();

        assert_eq!(*build.steps.lock(), vec!["build", "deploy"]);
        assert_eq!(outcome.version, v("4"));
        assert_eq!(svc.alias(&f, AliasName::Latest).unwrap().version, v("4"));
    }

    #[tokio::test]
    async fn deploy_publishes_and_moves_latest() {
        let svc = service(3, "3", "2", "3");
        let f = function();
        let deployer = Deployer::new(&svc, &f);
        let mut diag = Diagnostics::default();

        let outcome = deployer
            .deploy(None, "Deployed at 2026-01-01 10:00:00", &mut diag)
            .await
            .unwrap();
        assert_eq!(outcome.version, v("4"));
        assert_eq!(svc.alias(&f, AliasName::Latest).unwrap().version, v("4"));
        assert_eq!(svc.alias(&f, AliasName::Live).unwrap().version, v("3"));
        assert_eq!(
            svc.mutations()[0],
            AliasCall::PublishVersion {
                description: "Deployed at 2026-01-01 10:00:00".to_string()
            }
        );
    }

    #[tokio::test]
    async fn deploy_blocked_by_active_canary() {
        let svc = service_with_canary(4, "3", "2", "4", 25);
        let f = function();
        let deployer = Deployer::new(&svc, &f);
        let mut diag = Diagnostics::default();

        let err = deployer.deploy(None, "x", &mut diag).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PreconditionViolation);
        assert!(err.to_string().contains("promote or rollback"));
        assert!(svc.mutations().is_empty());
    }

    #[tokio::test]
    async fn deploy_proceeds_when_canary_check_cannot_read_live() {
        let svc = service(3, "3", "2", "3");
        svc.fail_after(Operation::GetAlias, 0, "throttled");
        let f = function();
        let deployer = Deployer::new(&svc, &f);
        let mut diag = Diagnostics::default();

        let outcome = deployer.deploy(None, "x", &mut diag).await.unwrap();
        assert_eq!(outcome.version, v("4"));
        assert!(diag.has(WarningKind::CanaryCheck));
    }

    #[tokio::test]
    async fn deploy_publish_failure_leaves_latest_alone() {
        let svc = service(3, "3", "2", "3");
        svc.fail(Operation::PublishVersion, "connection refused");
        let f = function();
        let deployer = Deployer::new(&svc, &f);
        let mut diag = Diagnostics::default();

        let err = deployer.deploy(None, "x", &mut diag).await.unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::NetworkError);
        assert_eq!(svc.alias(&f, AliasName::Latest).unwrap().version, v("3"));
    }
}

mod promote_tests {
    use super::*;

    #[tokio::test]
    async fn promote_is_noop_when_live_equals_latest() {
        let svc = service(4, "4", "3", "4");
        let f = function();
        let deployer = Deployer::new(&svc, &f);
        let mut diag = Diagnostics::default();

        let outcome = deployer.promote(false, &mut diag).await.unwrap();
        assert_eq!(outcome, PromoteOutcome::NothingToPromote { version: v("4") });
        assert!(svc.mutations().is_empty());
        assert_eq!(svc.alias(&f, AliasName::Previous).unwrap().version, v("3"));
    }

    #[tokio::test]
    async fn promote_without_canary_warns() {
        let svc = service(4, "3", "2", "4");
        let f = function();
        let deployer = Deployer::new(&svc, &f);
        let mut diag = Diagnostics::default();

        deployer.promote(false, &mut diag).await.unwrap();
        assert!(diag.has(WarningKind::NoActiveCanary));
    }

    #[tokio::test]
    async fn promote_skip_canary_suppresses_warning() {
        let svc = service(4, "3", "2", "4");
        let f = function();
        let deployer = Deployer::new(&svc, &f);
        let mut diag = Diagnostics::default();

        deployer.promote(true, &mut diag).await.unwrap();
        assert!(!diag.has_warnings());
        assert_eq!(svc.alias(&f, AliasName::Live).unwrap().version, v("4"));
    }

    #[tokio::test]
    async fn promote_twice_is_noop_second_time() {
        let svc = service_with_canary(4, "3", "2", "4", 75);
        let f = function();
        let deployer = Deployer::new(&svc, &f);
        let mut diag = Diagnostics::default();

        deployer.promote(false, &mut diag).await.unwrap();
        let writes = svc.mutations().len();
        let again = deployer.promote(false, &mut diag).await.unwrap();
        assert_eq!(again, PromoteOutcome::NothingToPromote { version: v("4") });
        assert_eq!(svc.mutations().len(), writes);
    }
}

mod switch_tests {
    use super::*;

    #[tokio::test]
    async fn switch_to_live_version_makes_no_writes() {
        let svc = service(5, "5", "4", "5");
        let f = function();
        let deployer = Deployer::new(&svc, &f);

        let outcome = deployer.switch(&v("5")).await.unwrap();
        assert_eq!(outcome, SwitchOutcome::AlreadyLive { version: v("5") });
        assert!(svc.mutations().is_empty());
    }

    #[tokio::test]
    async fn switch_leaves_previous_and_latest() {
        let svc = service_with_canary(6, "5", "4", "6", 10);
        let f = function();
        let deployer = Deployer::new(&svc, &f);

        let outcome = deployer.switch(&v("2")).await.unwrap();
        assert_eq!(
            outcome,
            SwitchOutcome::Switched {
                from: v("5"),
                to: v("2")
            }
        );
        let live = svc.alias(&f, AliasName::Live).unwrap();
        assert_eq!(live.version, v("2"));
        assert_eq!(live.routing, None);
        assert_eq!(svc.alias(&f, AliasName::Previous).unwrap().version, v("4"));
        assert_eq!(svc.alias(&f, AliasName::Latest).unwrap().version, v("6"));
    }

    #[tokio::test]
    async fn switch_to_unknown_version_is_not_found() {
        let svc = service(5, "5", "4", "5");
        let f = function();
        let deployer = Deployer::new(&svc, &f);

        let err = deployer.switch(&v("42")).await.unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::ResourceNotFound);
        assert!(svc.mutations().is_empty());
    }
}
