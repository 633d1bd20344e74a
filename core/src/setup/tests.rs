//! Tests for the role routines and the setup runner

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::acl::{AclRegistry, AuthorizationMethod, ResourcePermission, RoleAcl};
    use crate::capture::{CaptureBuffer, Console};
    use crate::error::{AclSeedError, Result, SetupError, StoreError};
    use crate::store::SeedStore;
    use std::collections::{BTreeSet, HashSet};

    /// Records every registration without validating it
    #[derive(Default)]
    struct RecordingRegistry {
        calls: Vec<RoleAcl>,
    }

    impl AclRegistry for RecordingRegistry {
        fn register_role(&mut self, acl: RoleAcl) -> Result<()> {
            self.calls.push(acl);
            Ok(())
        }
    }

    /// Rejects every registration
    struct RejectingRegistry;

    impl AclRegistry for RejectingRegistry {
        fn register_role(&mut self, _acl: RoleAcl) -> Result<()> {
            Err(StoreError::EmptyRoleName.into())
        }
    }

    fn run_routine(routine: SetupFn, features: Features) -> Vec<RoleAcl> {
        let mut registry = RecordingRegistry::default();
        routine(&mut registry, &SetupContext::new(features)).unwrap();
        registry.calls
    }

    fn routine(name: &str) -> &'static SetupRoutine {
        ROUTINES.iter().find(|r| r.name == name).unwrap()
    }

    const GATED: [(&str, &str); 4] = [
        ("exam_reviewer", FEATURE_EXAMS),
        ("video_uploader", FEATURE_VIDEO),
        ("file_task_reviewer", FEATURE_FILE_TASKS),
        ("purchaser", FEATURE_ECOMMERCE),
    ];

    #[test]
    fn test_routine_table_has_fourteen_unique_entries() {
        assert_eq!(ROUTINES.len(), 14);

        let names: HashSet<&str> = ROUTINES.iter().map(|r| r.name).collect();
        assert_eq!(names.len(), 14);

        let roles: HashSet<&str> = ROUTINES.iter().map(|r| r.role).collect();
        assert_eq!(roles.len(), 14);
    }

    #[test]
    fn test_each_routine_declares_its_listed_role() {
        for routine in ROUTINES {
            let calls = run_routine(routine.run, Features::all());
            assert_eq!(calls.len(), 1, "routine {}", routine.name);
            assert_eq!(calls[0].role, routine.role, "routine {}", routine.name);
        }
    }

    #[test]
    fn test_every_declaration_passes_validation() {
        for routine in ROUTINES {
            for acl in run_routine(routine.run, Features::all()) {
                acl.validate().unwrap();
            }
        }
    }

    #[test]
    fn test_ungated_routines_register_without_features() {
        let gated: HashSet<&str> = GATED.iter().map(|(name, _)| *name).collect();
        for routine in ROUTINES.iter().filter(|r| !gated.contains(r.name)) {
            let calls = run_routine(routine.run, Features::new());
            assert_eq!(calls.len(), 1, "routine {}", routine.name);
        }
    }

    #[test]
    fn test_gated_routine_absent_flag_is_noop() {
        for (name, feature) in GATED {
            // every other flag installed, only this one missing
            let features: Features = KNOWN_FEATURES.into_iter().filter(|f| *f != feature).collect();
            let calls = run_routine(routine(name).run, features);
            assert!(calls.is_empty(), "routine {} ran without {}", name, feature);
        }
    }

    fn group_check(group_name: &str) -> AuthorizationMethod {
        AuthorizationMethod::new("membership.actor_member_of_group").param("group_name", group_name)
    }

    #[test]
    fn test_gated_routine_present_flag_registers_once() {
        for (name, feature) in GATED {
            let calls = run_routine(routine(name).run, Features::new().with(feature));
            assert_eq!(calls.len(), 1, "routine {}", name);
        }
    }

    #[test]
    fn test_exam_reviewer_literal_declaration() {
        let calls = run_routine(roles::exam_reviewer::setup, Features::new().with(FEATURE_EXAMS));
        let expected = RoleAcl::new("Exam Reviewer")
            .method(group_check("Exam Reviewers"))
            .resource("Exam", ResourcePermission::new().read(["name", "passing_score", "questions"]))
            .resource(
                "ExamSession",
                ResourcePermission::new()
                    .read(["assignment", "date_completed", "date_started", "passed", "score"])
                    .update(["passed", "score"]),
            )
            .resource(
                "Response",
                ResourcePermission::new()
                    .read(["correct", "exam_session", "question", "text"])
                    .update(["correct"]),
            );
        assert_eq!(calls, vec![expected]);
    }

    #[test]
    fn test_file_task_reviewer_literal_declaration() {
        let calls = run_routine(
            roles::file_task_reviewer::setup,
            Features::new().with(FEATURE_FILE_TASKS),
        );
        let expected = RoleAcl::new("File Task Reviewer")
            .method(group_check("File Task Reviewers"))
            .resource(
                "FileUpload",
                ResourcePermission::new().read(["description", "name", "organization"]),
            )
            .resource(
                "FileUploadAttempt",
                ResourcePermission::new()
                    .read(["assignment", "date_completed", "date_started", "deliverable", "file_upload"])
                    .update(["approved", "reviewer_comments"]),
            );
        assert_eq!(calls, vec![expected]);
    }

    #[test]
    fn test_purchaser_literal_declaration() {
        let calls = run_routine(roles::purchaser::setup, Features::new().with(FEATURE_ECOMMERCE));
        let expected = RoleAcl::new("Purchaser")
            .method("general.actor_is_authenticated")
            .method("ownership.actor_owns_purchase_order")
            .resource("ClaimVoucher", ResourcePermission::new().read(["code", "product"]))
            .resource(
                "Product",
                ResourcePermission::new().read(["description", "name", "price", "sku"]),
            )
            .resource(
                "PurchaseOrder",
                ResourcePermission::new()
                    .create()
                    .read(["is_paid", "product_claims", "products", "user"])
                    .update(["product_claims", "products"]),
            )
            .arbitrary_perm("redeem_claim_vouchers");
        assert_eq!(calls, vec![expected]);
    }

    #[test]
    fn test_everybody_literal_declaration() {
        let calls = run_routine(roles::everybody::setup, Features::new());
        let expected = RoleAcl::new("Everybody")
            .method("general.actor_is_anybody")
            .resource("Category", ResourcePermission::new().read(["name", "parent"]))
            .resource(
                "Event",
                ResourcePermission::new().read(["description", "end", "name", "start", "title", "venue"]),
            )
            .resource(
                "Session",
                ResourcePermission::new().read(["end", "event", "name", "start", "status", "title"]),
            )
            .resource("User", ResourcePermission::new().create())
            .resource("Venue", ResourcePermission::new().read(["name", "region"]))
            .arbitrary_perm("check_usernames");
        assert_eq!(calls, vec![expected]);
    }

    #[test]
    fn test_video_uploader_literal_declaration() {
        let calls = run_routine(roles::video_uploader::setup, Features::new().with(FEATURE_VIDEO));
        let expected = RoleAcl::new("Video Uploader")
            .method(group_check("Video Uploaders"))
            .resource(
                "Video",
                ResourcePermission::new()
                    .create()
                    .read(["author", "categories", "description", "length", "name", "status"])
                    .update(["categories", "description", "name"]),
            )
            .resource(
                "VideoCategory",
                ResourcePermission::new().create().read(["category", "status", "video"]),
            );
        assert_eq!(calls, vec![expected]);
    }

    #[test]
    fn test_regional_manager_parametrized_check() {
        let calls = run_routine(roles::precor_regional_manager::setup, Features::new());
        let check = calls[0]
            .methods
            .iter()
            .find(|m| m.name == "general.actor_attribute_matches")
            .unwrap();
        assert_eq!(check.params.get("attribute"), Some(&serde_json::json!("is_regional_manager")));
        assert_eq!(check.params.get("value"), Some(&serde_json::json!(true)));
    }

    #[test]
    fn test_object_owner_without_features() {
        let acl = run_routine(roles::object_owner::setup, Features::new()).remove(0);
        assert_eq!(acl.methods.len(), 4);
        assert_eq!(
            acl.crud.resources().collect::<Vec<_>>(),
            vec!["Address", "Assignment", "ExamSession", "User"]
        );
    }

    #[test]
    fn test_object_owner_video_adds_one_method_and_resource() {
        let base = run_routine(roles::object_owner::setup, Features::new()).remove(0);
        let acl = run_routine(roles::object_owner::setup, Features::new().with(FEATURE_VIDEO)).remove(0);

        assert_eq!(acl.methods.len(), base.methods.len() + 1);
        assert_eq!(
            acl.methods.last().map(|m| m.name.as_str()),
            Some("ownership.actor_owns_video_session")
        );
        assert_eq!(acl.crud.len(), base.crud.len() + 1);
        assert_eq!(
            acl.crud.get("VideoSession"),
            Some(
                &ResourcePermission::new()
                    .create()
                    .read(["assignment", "date_completed", "date_started", "video"])
                    .update(["date_completed"])
            )
        );
        assert!(!acl.crud.contains("FileDownloadAttempt"));
        for (resource, permission) in base.crud.iter() {
            assert_eq!(acl.crud.get(resource), Some(permission));
        }
    }

    #[test]
    fn test_object_owner_file_tasks_adds_two_resources() {
        let base = run_routine(roles::object_owner::setup, Features::new()).remove(0);
        let acl =
            run_routine(roles::object_owner::setup, Features::new().with(FEATURE_FILE_TASKS)).remove(0);

        assert_eq!(acl.methods, base.methods);
        assert_eq!(acl.crud.len(), base.crud.len() + 2);
        assert_eq!(
            acl.crud.get("FileDownloadAttempt"),
            Some(
                &ResourcePermission::new()
                    .create()
                    .read(["assignment", "date_completed", "date_started", "file_download"])
            )
        );
        assert_eq!(
            acl.crud.get("FileUploadAttempt"),
            Some(
                &ResourcePermission::new()
                    .create()
                    .read(["assignment", "date_completed", "date_started", "file_upload"])
                    .update(["date_completed"])
            )
        );
        assert!(!acl.crud.contains("VideoSession"));
        for (resource, permission) in base.crud.iter() {
            assert_eq!(acl.crud.get(resource), Some(permission));
        }
    }

    #[test]
    fn test_object_owner_with_both_features() {
        let acl = run_routine(
            roles::object_owner::setup,
            Features::new().with(FEATURE_VIDEO).with(FEATURE_FILE_TASKS),
        )
        .remove(0);
        assert_eq!(acl.methods.len(), 5);
        assert_eq!(acl.crud.len(), 7);
    }

    #[test]
    fn test_omitted_update_and_delete_match_explicit() {
        let calls = run_routine(roles::everybody::setup, Features::new());
        let category = calls[0].crud.get("Category").unwrap();
        let explicit: ResourcePermission =
            serde_json::from_str(r#"{"c": false, "r": ["name", "parent"], "u": [], "d": false}"#).unwrap();
        assert_eq!(category, &explicit);
        assert!(category.u.is_empty());
        assert!(!category.d);
    }

    #[test]
    fn test_profile_parsing() {
        assert_eq!("base".parse::<Profile>().unwrap(), Profile::Base);
        assert_eq!("LEGACY".parse::<Profile>().unwrap(), Profile::Legacy);
        assert_eq!(" precor ".parse::<Profile>().unwrap(), Profile::Precor);
        assert!(matches!(
            "enterprise".parse::<Profile>(),
            Err(SetupError::UnknownProfile(_))
        ));
        assert_eq!(format!("{}", Profile::Precor), "precor");
    }

    #[test]
    fn test_profile_selection() {
        let default = Profile::select(&[]).unwrap();
        assert_eq!(default, DEFAULT_PROFILES.into_iter().collect::<BTreeSet<_>>());

        let precor = Profile::select(&["base", "legacy", "precor"]).unwrap();
        assert_eq!(precor.len(), 3);

        let err = Profile::select(&["base", "bogus"]).unwrap_err();
        assert!(matches!(err, AclSeedError::Setup(SetupError::UnknownProfile(_))));
    }

    #[test]
    fn test_select_routines_keeps_table_order() {
        let only_precor: BTreeSet<Profile> = [Profile::Precor].into_iter().collect();
        let names: Vec<&str> = select_routines(&only_precor).map(|r| r.name).collect();
        assert_eq!(names, vec!["precor_dealer", "precor_regional_manager"]);
    }

    #[test]
    fn test_run_setup_default_profiles() {
        let mut store = SeedStore::new();
        let output = CaptureBuffer::new();
        let mut console = Console::with_target(output.clone());

        let summary = run_setup(
            &mut store,
            &SetupContext::new(Features::all()),
            &[],
            &mut console,
            None,
        )
        .unwrap();

        assert_eq!(summary.registered.len(), 12);
        assert!(summary.skipped.is_empty());
        assert_eq!(summary.acl_count, 12);
        assert!(store.contains_role("Admin"));
        assert!(store.contains_role("Purchaser"));
        assert!(!store.contains_role("Dealer"));
        assert!(output.contents().starts_with("Running setup routine admin\n"));
    }

    #[test]
    fn test_run_setup_precor_profiles() {
        let mut store = SeedStore::new();
        let mut console = Console::with_target(CaptureBuffer::new());

        let summary = run_setup(
            &mut store,
            &SetupContext::new(Features::all()),
            &["base", "legacy", "precor"],
            &mut console,
            None,
        )
        .unwrap();

        assert_eq!(summary.acl_count, 14);
        assert!(store.contains_role("Dealer"));
        assert!(store.contains_role("Regional Manager"));
    }

    #[test]
    fn test_run_setup_reports_skipped_routines() {
        let mut store = SeedStore::new();
        let mut console = Console::with_target(CaptureBuffer::new());

        let summary = run_setup(
            &mut store,
            &SetupContext::default(),
            &[],
            &mut console,
            None,
        )
        .unwrap();

        assert_eq!(
            summary.skipped,
            vec!["exam_reviewer", "video_uploader", "file_task_reviewer", "purchaser"]
        );
        assert_eq!(summary.acl_count, 8);
        assert!(!store.contains_role("Video Uploader"));
    }

    #[test]
    fn test_run_setup_unknown_profile_registers_nothing() {
        let mut store = SeedStore::new();
        let mut console = Console::with_target(CaptureBuffer::new());

        let err = run_setup(
            &mut store,
            &SetupContext::default(),
            &["nope"],
            &mut console,
            None,
        )
        .unwrap_err();

        assert!(matches!(err, AclSeedError::Setup(SetupError::UnknownProfile(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_run_setup_propagates_registry_error() {
        let mut registry = RejectingRegistry;
        let output = CaptureBuffer::new();
        let mut console = Console::with_target(output.clone());

        let err = run_setup(
            &mut registry,
            &SetupContext::default(),
            &[],
            &mut console,
            None,
        )
        .unwrap_err();

        assert!(matches!(err, AclSeedError::Store(StoreError::EmptyRoleName)));
        // stopped at the first routine
        assert_eq!(output.contents(), "Running setup routine admin\n");
    }

    #[tokio::test]
    async fn test_run_setup_audits_each_routine() {
        let (audit, mut receiver) = AuditLogger::new();
        let mut store = SeedStore::new();
        let mut console = Console::with_target(CaptureBuffer::new());

        run_setup(
            &mut store,
            &SetupContext::default(),
            &["precor"],
            &mut console,
            Some(&audit),
        )
        .unwrap();
        drop(audit);

        let mut entries = Vec::new();
        while let Some(entry) = receiver.recv().await {
            entries.push(entry);
        }
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].routine, "precor_dealer");
        assert_eq!(entries[0].profile, "precor");
        assert_eq!(entries[1].outcome, "registered");
    }
}
