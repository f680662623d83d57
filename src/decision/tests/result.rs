use super::*;
use crate::decision::CommitDecision;
use crate::protocol::HookResult;

#[test]
fn committed_maps_to_success_data() {
    let result: HookResult = CommitDecision::Committed {
        file_path: "src/app.py".to_string(),
        message: "Auto-commit: Edit modified app.py".to_string(),
    }
    .into();

    let exit = result.to_exit();
    assert_eq!(exit.code, 0);
    let stdout: serde_json::Value = serde_json::from_str(exit.stdout.as_deref().unwrap()).unwrap();
    assert_eq!(
        stdout,
        json!({
            "message": "Successfully committed app.py",
            "filePath": "src/app.py",
            "commitMessage": "Auto-commit: Edit modified app.py"
        })
    );
}

#[test]
fn skipped_maps_to_success_message() {
    let result: HookResult = CommitDecision::Skipped {
        reason: "No changes to commit".to_string(),
    }
    .into();

    assert_eq!(result.success, Some(true));
    let exit = result.to_exit();
    assert_eq!(exit.code, 0);
    assert_eq!(
        exit.stdout.as_deref(),
        Some(r#"{"message":"No changes to commit"}"#)
    );
}

#[test]
fn failed_maps_to_error_exit_one() {
    let result: HookResult = CommitDecision::Failed {
        message: "File does not exist: x.rs".to_string(),
    }
    .into();

    assert_eq!(result.hook_name, "auto-commit");
    let exit = result.to_exit();
    assert_eq!(exit.code, 1);
    assert_eq!(exit.stderr.as_deref(), Some("File does not exist: x.rs"));
    assert!(exit.stdout.is_none());
}

#[test]
fn excluded_dotenv_scenario_end_to_end() {
    let dir = workspace();
    let git = FakeGit::default();
    let config = config_with(json!({"excludePatterns": ["*.env"]}));
    let result: HookResult = run(&edit_event(".env"), &config, &git, dir.path()).into();

    let exit = result.to_exit();
    assert_eq!(exit.code, 0);
    let stdout: serde_json::Value = serde_json::from_str(exit.stdout.as_deref().unwrap()).unwrap();
    assert_eq!(stdout["message"], "File excluded from auto-commit: .env");
}
