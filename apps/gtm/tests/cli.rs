use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

/// A `gtm` command isolated from the user's home, registry and runtime.
fn gtm(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gtm").unwrap();
    cmd.env("HOME", home)
        .env("USERPROFILE", home)
        .env("GTM_REGISTRY", "http://127.0.0.1:9/")
        .env("GTM_SKIP_UPDATE_CHECK", "1")
        .env("GTM_RUNTIME", "none")
        .env_remove("GTM_TARGET_PATH")
        .env_remove("GTM_CLI_HOME")
        .env_remove("GTM_LOG_LEVEL");
    cmd
}

fn write_plugin(dir: &Path, main: Option<&str>) {
    fs::create_dir_all(dir).unwrap();
    let manifest = match main {
        Some(main) => serde_json::json!({ "name": "init", "main": main }),
        None => serde_json::json!({ "name": "init" }),
    };
    fs::write(dir.join("package.json"), manifest.to_string()).unwrap();
}

#[test]
fn test_help_lists_options() {
    let home = tempfile::tempdir().unwrap();
    gtm(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--target-path"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_no_command_prints_overview() {
    let home = tempfile::tempdir().unwrap();
    gtm(home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("Examples:"));
}

#[test]
fn test_commands_lists_plugin_packages() {
    let home = tempfile::tempdir().unwrap();
    gtm(home.path())
        .arg("commands")
        .assert()
        .success()
        .stdout(predicate::str::contains("@gtm-cli/init@latest"));
}

#[test]
fn test_unknown_command_lists_available() {
    let home = tempfile::tempdir().unwrap();
    gtm(home.path())
        .arg("nonexistent-cmd")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Unknown command `nonexistent-cmd`, available commands: `init`",
        ));
    assert!(!home.path().join(".gtm-cli").exists());
}

#[test]
fn test_missing_entry_point_fails() {
    let home = tempfile::tempdir().unwrap();
    let plugin = home.path().join("plugin");
    write_plugin(&plugin, None);

    gtm(home.path())
        .arg("--target-path")
        .arg(&plugin)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No entry point"));
}

#[test]
fn test_unreachable_registry_fails() {
    let home = tempfile::tempdir().unwrap();
    gtm(home.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Registry unavailable"));
}

#[cfg(unix)]
mod unix {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn write_script(path: &Path, body: &str) {
        fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn test_plugin_exit_code_is_forwarded() {
        let home = tempfile::tempdir().unwrap();
        let plugin = home.path().join("plugin");
        write_plugin(&plugin, Some("index.sh"));
        write_script(&plugin.join("index.sh"), "exit 3");

        gtm(home.path())
            .env("GTM_RUNTIME", "sh")
            .arg("-t")
            .arg(&plugin)
            .arg("init")
            .assert()
            .code(3);
    }

    #[test]
    fn test_plugin_receives_context_as_one_argument() {
        let home = tempfile::tempdir().unwrap();
        let plugin = home.path().join("plugin");
        let out = home.path().join("context.json");
        write_plugin(&plugin, Some("run.sh"));
        write_script(
            &plugin.join("run.sh"),
            &format!("printf '%s' \"$1\" > '{}'", out.display()),
        );

        gtm(home.path())
            .env("GTM_TARGET_PATH", &plugin)
            .args(["init", "my-app", "--force"])
            .assert()
            .success();

        let context: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(context["commandName"], "init");
        assert_eq!(context["rawArgument"], "my-app");
        assert_eq!(context["options"]["force"], true);
        assert_eq!(context["metadata"]["package"], "@gtm-cli/init@latest");
    }
}
