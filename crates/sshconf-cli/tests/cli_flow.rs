use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const MASTER: &str = "cli-master-123";

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_sshconf"))
}

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("tempdir should be created"),
        }
    }

    fn store(&self) -> PathBuf {
        self.dir.path().join("ssh-config").join("ssh-config.tsv")
    }

    fn ssh_config(&self) -> PathBuf {
        self.dir.path().join("dot-ssh").join("config")
    }

    /// Command isolated from the caller's HOME, config and env overrides.
    fn bare(&self) -> Command {
        let mut cmd = Command::new(bin());
        cmd.env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join("xdg"))
            .env("NO_COLOR", "1")
            .env_remove("SSHCONFIG_PASSWORD")
            .env_remove("SSHCONF_FILE")
            .env_remove("SSHCONF_SSH_CONFIG")
            .env_remove("SSHCONF_CONFIG")
            .env_remove("SSHCONF_LOG");
        cmd
    }

    fn cmd(&self) -> Command {
        let mut cmd = self.bare();
        cmd.arg("--file")
            .arg(self.store())
            .arg("--ssh-config")
            .arg(self.ssh_config());
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.cmd().args(args).output().expect("binary should run")
    }

    fn run_with_password(&self, password: &str, args: &[&str]) -> Output {
        self.cmd()
            .env("SSHCONFIG_PASSWORD", password)
            .args(args)
            .output()
            .expect("binary should run")
    }

    fn initialized() -> Self {
        let ws = Self::new();
        let out = ws.run_with_password(MASTER, &["init"]);
        assert_success(&out);
        ws
    }
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).to_string()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).to_string()
}

fn assert_success(out: &Output) {
    assert!(
        out.status.success(),
        "expected success, got {:?}\nstdout: {}\nstderr: {}",
        out.status.code(),
        stdout(out),
        stderr(out)
    );
}

fn assert_exit(out: &Output, code: i32) {
    assert_eq!(
        out.status.code(),
        Some(code),
        "stdout: {}\nstderr: {}",
        stdout(out),
        stderr(out)
    );
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).expect("file should be readable")
}

#[test]
fn test_no_command_prints_help() {
    let ws = Workspace::new();
    let out = ws.run(&[]);
    assert_success(&out);
    assert!(stdout(&out).contains("Usage"));
}

#[test]
fn test_init_then_add_and_list() {
    let ws = Workspace::initialized();
    assert!(ws.dir.path().join("ssh-config").join("password").exists());

    let out = ws.run_with_password(
        MASTER,
        &[
            "add",
            "web1",
            "10.0.0.1",
            "--port",
            "8080",
            "--user",
            "deploy",
            "--host-password",
            "hunter2",
        ],
    );
    assert_success(&out);
    assert!(stdout(&out).contains("status=ok"));

    let config = read(&ws.ssh_config());
    assert_eq!(
        config,
        "Host web1\n    HostName 10.0.0.1\n    Port 8080\n    User deploy\n"
    );
    assert!(!read(&ws.store()).contains("hunter2"));

    let locked = ws.run(&["list"]);
    assert_success(&locked);
    assert!(stdout(&locked).contains("web1"));
    assert!(stdout(&locked).contains("[master password required]"));
    assert!(!stdout(&locked).contains("hunter2"));

    let unlocked = ws.run(&["-p", MASTER, "ls"]);
    assert_success(&unlocked);
    assert!(stdout(&unlocked).contains("hunter2"));
}

#[test]
fn test_list_json() {
    let ws = Workspace::initialized();
    assert_success(&ws.run_with_password(
        MASTER,
        &["add", "web1", "10.0.0.1", "--host-password", "hunter2", "--name", "frontend"],
    ));
    assert_success(&ws.run_with_password(MASTER, &["add", "db1", "10.0.0.2"]));

    let out = ws.run_with_password(MASTER, &["get", "front", "--json"]);
    assert_success(&out);
    let value: serde_json::Value =
        serde_json::from_str(&stdout(&out)).expect("output should be JSON");
    let hosts = value.as_array().expect("array");
    assert_eq!(hosts.len(), 1);
    assert_eq!(hosts[0]["Host"], "web1");
    assert_eq!(hosts[0]["Password"], "hunter2");
    assert_eq!(hosts[0]["User"], "root");
}

#[test]
fn test_wrong_password_is_auth_failure() {
    let ws = Workspace::initialized();

    let out = ws.run_with_password("wrong", &["add", "web1", "10.0.0.1"]);
    assert_exit(&out, 5);
    assert!(stderr(&out).contains("Master password validation failed"));
    assert!(read(&ws.store()).lines().count() <= 1);

    let out = ws.run(&["-p", "wrong", "list"]);
    assert_exit(&out, 5);
}

#[test]
fn test_mutation_without_password_fails() {
    let ws = Workspace::initialized();
    let out = ws.run(&["add", "web1", "10.0.0.1"]);
    assert_exit(&out, 5);
}

#[test]
fn test_add_before_init_fails() {
    let ws = Workspace::new();
    let out = ws.run_with_password(MASTER, &["add", "web1", "10.0.0.1"]);
    assert_exit(&out, 5);
    assert!(stderr(&out).contains("sshconf init"));
}

#[test]
fn test_init_twice_fails() {
    let ws = Workspace::initialized();
    let out = ws.run_with_password(MASTER, &["init"]);
    assert_exit(&out, 4);
}

#[test]
fn test_remove_rules() {
    let ws = Workspace::initialized();
    assert_success(&ws.run_with_password(MASTER, &["add", "web", "10.0.0.1"]));
    assert_success(&ws.run_with_password(MASTER, &["add", "web", "10.0.0.2"]));
    assert_success(&ws.run_with_password(MASTER, &["add", "db", "10.0.0.3"]));
    let before = read(&ws.store());

    let out = ws.run_with_password(MASTER, &["rm", "web"]);
    assert_exit(&out, 4);
    assert_eq!(read(&ws.store()), before);

    let out = ws.run_with_password(MASTER, &["remove", "nope"]);
    assert_exit(&out, 3);
    assert_eq!(read(&ws.store()), before);

    let out = ws.run_with_password(MASTER, &["delete", "db"]);
    assert_success(&out);
    assert!(!read(&ws.store()).contains("10.0.0.3"));
    assert!(!read(&ws.ssh_config()).contains("Host db"));
}

#[test]
fn test_update_applies_to_all_matches() {
    let ws = Workspace::initialized();
    assert_success(&ws.run_with_password(MASTER, &["add", "web", "10.0.0.1"]));
    assert_success(&ws.run_with_password(MASTER, &["add", "web", "10.0.0.2"]));

    let out = ws.run_with_password(MASTER, &["update", "web", "port", "2222"]);
    assert_success(&out);
    assert!(stdout(&out).contains("matched=2"));
    assert_eq!(read(&ws.ssh_config()).matches("Port 2222").count(), 2);

    let out = ws.run_with_password(MASTER, &["update", "web", "Color", "red"]);
    assert_exit(&out, 4);

    let out = ws.run_with_password(MASTER, &["update", "nope", "User", "x"]);
    assert_exit(&out, 3);
}

#[test]
fn test_update_password_is_encrypted() {
    let ws = Workspace::initialized();
    assert_success(&ws.run_with_password(MASTER, &["add", "web", "10.0.0.1"]));
    assert_success(&ws.run_with_password(MASTER, &["update", "web", "Password", "s3cret"]));

    assert!(!read(&ws.store()).contains("s3cret"));
    let out = ws.run_with_password(MASTER, &["list", "--json"]);
    let value: serde_json::Value =
        serde_json::from_str(&stdout(&out)).expect("output should be JSON");
    assert_eq!(value[0]["Password"], "s3cret");
}

#[test]
fn test_disabled_host_and_make_stdout() {
    let ws = Workspace::initialized();
    assert_success(&ws.run_with_password(
        MASTER,
        &["add", "db1", "10.0.0.2", "--disabled", "--no-make"],
    ));
    assert!(!ws.ssh_config().exists());

    let out = ws.run_with_password(MASTER, &["make", "--stdout"]);
    assert_success(&out);
    assert_eq!(
        stdout(&out),
        "# Host db1\n    # HostName 10.0.0.2\n    # User root\n"
    );
    assert!(!ws.ssh_config().exists());

    assert_success(&ws.run_with_password(MASTER, &["make"]));
    assert!(read(&ws.ssh_config()).starts_with("# Host db1"));
}

#[test]
fn test_passwd_rotates_master_password() {
    let ws = Workspace::initialized();
    assert_success(&ws.run_with_password(
        MASTER,
        &["add", "web1", "10.0.0.1", "--host-password", "hunter2"],
    ));

    assert_success(&ws.run_with_password(MASTER, &["passwd", "rotated-456"]));

    assert_exit(&ws.run(&["-p", MASTER, "list"]), 5);
    let out = ws.run(&["-p", "rotated-456", "list", "--json"]);
    assert_success(&out);
    assert!(stdout(&out).contains("hunter2"));
}

#[test]
fn test_clean_backups() {
    let ws = Workspace::initialized();
    assert_success(&ws.run_with_password(MASTER, &["add", "a", "10.0.0.1"]));
    assert_success(&ws.run_with_password(MASTER, &["add", "b", "10.0.0.2"]));

    let dry = ws.run(&["clean", "--dry-run"]);
    assert_success(&dry);
    assert_eq!(stdout(&dry).lines().count(), 2);

    assert_success(&ws.run(&["clean", "--yes"]));
    let after = ws.run(&["clean", "--dry-run"]);
    assert!(stdout(&after).trim().is_empty());
    assert!(read(&ws.store()).contains("10.0.0.2"));
}

#[test]
fn test_store_path_from_config_file() {
    let ws = Workspace::new();
    let store = ws.dir.path().join("custom").join("hosts.tsv");
    let config_dir = ws.dir.path().join("xdg").join("sshconf");
    std::fs::create_dir_all(&config_dir).expect("config dir should be created");
    std::fs::write(
        config_dir.join("config.toml"),
        format!(
            "[store]\npath = \"{}\"\n\n[ssh]\nconfig_path = \"{}\"\n",
            store.display(),
            ws.ssh_config().display()
        ),
    )
    .expect("config should be written");

    let out = ws
        .bare()
        .env("SSHCONFIG_PASSWORD", MASTER)
        .arg("init")
        .output()
        .expect("binary should run");
    assert_success(&out);
    assert!(store.exists());
    assert!(ws.dir.path().join("custom").join("password").exists());
}

#[test]
fn test_completions() {
    let ws = Workspace::new();
    let out = ws.run(&["completions", "bash"]);
    assert_success(&out);
    assert!(stdout(&out).contains("sshconf"));
}
