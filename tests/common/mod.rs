#![allow(dead_code)]

use chrono::{Local, NaiveDate, TimeZone};
use linelog::{FiletypeDb, IgnoreConfig, ScanConfig};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::Command;

pub const ALICE: &str = "alice";
pub const BOB: &str = "bob";

pub const FIVE_LINES: &str = "import os\n\ndef main():\n    value = os.getcwd()\n    print(value)\n\nmain()\n";

pub const EIGHT_LINES: &str = "import os\nimport sys\n\ndef main():\n    value = os.getcwd()\n    print(value)\n    print(sys.argv)\n    return value\n\nmain()\n";

pub fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Epoch seconds of `hour:00` local time on `day`.
pub fn local_time(day: NaiveDate, hour: u32) -> i64 {
    let naive = day.and_hms_opt(hour, 0, 0).unwrap();
    Local.from_local_datetime(&naive).earliest().unwrap().timestamp()
}

fn git(dir: &Path, args: &[&str]) {
    assert!(Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

pub fn init_git_repo(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    git(dir, &["init", "-q"]);
    git(dir, &["config", "core.autocrlf", "false"]);
    git(dir, &["config", "core.safecrlf", "false"]);
    git(dir, &["config", "commit.gpgsign", "false"]);
    git(dir, &["config", "user.email", "you@example.com"]);
    git(dir, &["config", "user.name", "Your Name"]);
}

pub fn write_file(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut f = File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f.sync_all().unwrap();
}

/// Stages everything (ignored files included) and commits as `author` at `timestamp`.
pub fn commit_all(dir: &Path, author: &str, timestamp: i64, message: &str) {
    let stamp = format!("@{timestamp} +0000");
    let email = format!("{author}@example.com");
    git(dir, &["add", "-A", "-f", "."]);
    assert!(Command::new("git")
        .args(["commit", "-q", "--allow-empty", "-m", message])
        .env("GIT_AUTHOR_NAME", author)
        .env("GIT_AUTHOR_EMAIL", &email)
        .env("GIT_COMMITTER_NAME", author)
        .env("GIT_COMMITTER_EMAIL", &email)
        .env("GIT_AUTHOR_DATE", &stamp)
        .env("GIT_COMMITTER_DATE", &stamp)
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

pub fn commit_file(dir: &Path, name: &str, content: &str, author: &str, timestamp: i64) {
    write_file(dir, name, content);
    commit_all(dir, author, timestamp, &format!("add {name}"));
}

/// `git clone --depth 1` of `src` into `dst`; the file URL keeps git from ignoring the depth.
pub fn shallow_clone(src: &Path, dst: &Path) {
    let url = format!("file://{}", src.display());
    assert!(Command::new("git")
        .args(["clone", "-q", "--depth", "1"])
        .arg(&url)
        .arg(dst)
        .status()
        .unwrap()
        .success());
}

/// Python and Rust only, nothing ignored, no noise patterns.
pub fn plain_config() -> ScanConfig {
    config_with(IgnoreConfig::default())
}

pub fn config_with(ignore: IgnoreConfig) -> ScanConfig {
    let filetypes = FiletypeDb::new([("py", "Python"), ("rs", "Rust")]);
    ScanConfig::new(filetypes, &ignore).unwrap()
}
