use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
    println!("cargo:rerun-if-env-changed=GIT_VERSION");

    let git_version = get_git_version();
    println!("cargo:rustc-env=GIT_VERSION={}", git_version);
}

fn get_git_version() -> String {
    // Docker/CI builds pass the version in explicitly
    if let Ok(version) = std::env::var("GIT_VERSION") {
        if !version.is_empty() && version != "dev" {
            return version;
        }
    }

    Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .unwrap_or_else(|| "dev".to_string())
}
