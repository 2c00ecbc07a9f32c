//! End-to-end tests for the provider-mirror binary over a filesystem store.
#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const DEST: &str = "mirror/registry.terraform.io/acme/widget";

/// `h1:` followed by the archive contents.
const FINGERPRINT_CONFIG: &str = r#"
[fingerprint]
program = "sh"
args = ["-c", 'printf h1:; cat "$0"']
"#;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new(buckets: &[&str]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        for bucket in buckets {
            std::fs::create_dir_all(dir.path().join("store").join(bucket)).unwrap();
        }
        std::fs::create_dir_all(dir.path().join("dist")).unwrap();
        std::fs::write(dir.path().join("provider-mirror.toml"), FINGERPRINT_CONFIG).unwrap();
        Self { dir }
    }

    fn archive(&self, name: &str, body: &str) -> String {
        let path = self.dir.path().join("dist").join(name);
        std::fs::write(&path, body).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn object(&self, bucket: &str, key: &str, body: &str) {
        let path = self.store().join(bucket).join(key);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, body).unwrap();
    }

    fn store(&self) -> std::path::PathBuf {
        self.dir.path().join("store")
    }

    fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.store().join(relative)).unwrap()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("provider-mirror").unwrap();
        cmd.current_dir(self.dir.path())
            .arg("--store-root")
            .arg(self.store())
            .env_remove("RUST_LOG");
        cmd
    }
}

fn exists(root: &Path, relative: &str) -> bool {
    root.join(relative).is_file()
}

#[test]
fn local_mirror_prints_progress_and_writes_documents() {
    let fx = Fixture::new(&["mirror"]);
    let linux = fx.archive("widget_1.0.0_linux_amd64.zip", "l");
    let darwin = fx.archive("widget_1.0.0_darwin_arm64.zip", "d");
    let notes = fx.archive("NOTES.txt", "n");

    fx.cmd()
        .args(["local", DEST])
        .args([&linux, &darwin, &notes])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "widget\n 1.0.0\n  + {d}/widget_1.0.0_darwin_arm64.zip h1:d\n  + {d}/widget_1.0.0_linux_amd64.zip h1:l\n  + {d}/1.0.0.json\n <2 archives>\n  + {d}/index.json\n",
            d = DEST
        )));

    assert_eq!(
        fx.read("mirror/registry.terraform.io/acme/widget/index.json"),
        "{\n  \"versions\": {\n    \"1.0.0\": {}\n  }\n}"
    );
    assert_eq!(
        fx.read("mirror/registry.terraform.io/acme/widget/1.0.0.json"),
        concat!(
            "{\n",
            "  \"archives\": {\n",
            "    \"darwin_arm64\": {\n",
            "      \"hashes\": [\n",
            "        \"h1:d\"\n",
            "      ],\n",
            "      \"url\": \"widget_1.0.0_darwin_arm64.zip\"\n",
            "    },\n",
            "    \"linux_amd64\": {\n",
            "      \"hashes\": [\n",
            "        \"h1:l\"\n",
            "      ],\n",
            "      \"url\": \"widget_1.0.0_linux_amd64.zip\"\n",
            "    }\n",
            "  }\n",
            "}"
        )
    );
    assert_eq!(fx.read("mirror/registry.terraform.io/acme/widget/widget_1.0.0_linux_amd64.zip"), "l");
}

#[test]
fn local_rerun_skips_current_archives() {
    let fx = Fixture::new(&["mirror"]);
    let linux = fx.archive("widget_1.0.0_linux_amd64.zip", "l");

    fx.cmd().args(["local", DEST, linux.as_str()]).assert().success();
    fx.cmd()
        .args(["local", DEST, linux.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "  = {}/widget_1.0.0_linux_amd64.zip h1:l\n",
            DEST
        )));
}

#[test]
fn remote_mirror_uses_per_version_layout() {
    let fx = Fixture::new(&["mirror", "releases"]);
    fx.object("releases", "widget/1.0.0/widget_1.0.0_linux_amd64.zip", "a");
    fx.object("releases", "widget/1.0.0/SHA256SUMS", "sums");
    fx.object("releases", "widget/1.1.0/widget_1.1.0_linux_amd64.zip", "b");

    fx.cmd()
        .args(["remote", "releases/widget/", DEST])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "  + {}/1.0.0/widget_1.0.0_linux_amd64.zip h1:a\n",
            DEST
        )))
        .stdout(predicate::str::contains(" <2 archives>\n"));

    let root = fx.store();
    assert!(exists(&root, "mirror/registry.terraform.io/acme/widget/1.1.0/widget_1.1.0_linux_amd64.zip"));
    assert!(!exists(&root, "mirror/registry.terraform.io/acme/widget/1.0.0/SHA256SUMS"));
    assert!(fx
        .read("mirror/registry.terraform.io/acme/widget/1.1.0.json")
        .contains("\"url\": \"1.1.0/widget_1.1.0_linux_amd64.zip\""));
}

#[test]
fn layout_flag_overrides_default() {
    let fx = Fixture::new(&["mirror", "releases"]);
    fx.object("releases", "widget/1.0.0/widget_1.0.0_linux_amd64.zip", "a");

    fx.cmd()
        .args(["remote", "releases/widget/", DEST, "--layout", "flat"])
        .assert()
        .success();

    assert!(exists(&fx.store(), "mirror/registry.terraform.io/acme/widget/widget_1.0.0_linux_amd64.zip"));
}

#[test]
fn missing_destination_bucket_fails_before_work() {
    let fx = Fixture::new(&[]);
    let linux = fx.archive("widget_1.0.0_linux_amd64.zip", "l");

    fx.cmd()
        .args(["local", DEST, linux.as_str()])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("cannot access bucket mirror"));
}

#[test]
fn fingerprint_failure_exits_with_one() {
    let fx = Fixture::new(&["mirror"]);
    let linux = fx.archive("widget_1.0.0_linux_amd64.zip", "l");

    fx.cmd()
        .args(["--fingerprint-program", "false", "local", DEST, linux.as_str()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed with code: 1"));

    assert!(!exists(&fx.store(), "mirror/registry.terraform.io/acme/widget/index.json"));
}

#[test]
fn unreadable_config_is_an_error() {
    let fx = Fixture::new(&["mirror"]);
    let linux = fx.archive("widget_1.0.0_linux_amd64.zip", "l");

    fx.cmd()
        .args(["--config", "nope.toml", "local", DEST, linux.as_str()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read config file"));
}
