use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    let out = Command::new("git").args(args).output().ok()?;
    out.status
        .success()
        .then(|| String::from_utf8_lossy(&out.stdout).trim().to_string())
}

/// `--version` text: the package version on a release tag, otherwise the
/// package version plus the short commit it was built from.
fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    let package = std::env::var("CARGO_PKG_VERSION").unwrap_or_default();
    let tagged = git(&["describe", "--exact-match", "--tags", "HEAD"]).is_some();
    let version = match git(&["rev-parse", "--short", "HEAD"]) {
        _ if tagged => package,
        Some(hash) if !hash.is_empty() => format!("{package}+{hash}"),
        _ => format!("{package}+unknown"),
    };

    println!("cargo:rustc-env=RESPONSIVE_VARIANTS_VERSION={version}");
}
