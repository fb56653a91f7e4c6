use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.git/HEAD");

    let git_hash =
        command_stdout("git", &["rev-parse", "--short", "HEAD"]).unwrap_or_else(unknown);
    emit("HASH", &git_hash);

    let git_status = match command_stdout("git", &["status", "--porcelain"]) {
        Some(out) if out.is_empty() => "clean".to_string(),
        Some(_) => "dirty".to_string(),
        None => unknown(),
    };
    emit("STATUS", &git_status);

    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    emit("TIMESTAMP", &timestamp);

    emit("TARGET", &env::var("TARGET").unwrap_or_else(|_| unknown()));
    emit("PROFILE", &env::var("PROFILE").unwrap_or_else(|_| unknown()));
    emit(
        "RUSTC",
        &command_stdout("rustc", &["--version"]).unwrap_or_else(unknown),
    );
}

fn emit(key: &str, value: &str) {
    println!("cargo:rustc-env=MOVE_PLANNER_BUILD_{key}={value}");
}

fn unknown() -> String {
    "unknown".to_string()
}

/// Runs a command and returns its trimmed stdout, or `None` when the command
/// is unavailable or exits unsuccessfully.
fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}
