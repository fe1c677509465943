use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn main() {
    println!("cargo:rustc-env=SIGPAD_GIT_HASH={}", short_hash());

    if let Some(git_dir) = git_dir() {
        for entry in ["HEAD", "refs", "packed-refs"] {
            watch(&git_dir.join(entry));
        }
    }
}

fn short_hash() -> String {
    Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| "unknown".into())
}

fn git_dir() -> Option<PathBuf> {
    if let Some(dir) = env::var_os("GIT_DIR") {
        return Some(PathBuf::from(dir));
    }

    let dot_git = PathBuf::from(".git");
    if dot_git.is_dir() {
        return Some(dot_git);
    }

    // Worktrees and submodules point at their git dir from a `.git` file
    let contents = fs::read_to_string(&dot_git).ok()?;
    let linked = PathBuf::from(contents.strip_prefix("gitdir:")?.trim());
    Some(if linked.is_relative() {
        Path::new(".").join(linked)
    } else {
        linked
    })
}

fn watch(path: &Path) {
    if let Some(display) = path.exists().then(|| path.to_str()).flatten() {
        println!("cargo:rerun-if-changed={display}");
    }
}
