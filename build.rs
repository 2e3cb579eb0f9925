use std::process::Command;

fn main() {
    // LOADVIZ_VERSION: release builds can set this env var at build time.
    // Falls back to CARGO_PKG_VERSION (from Cargo.toml) for local builds.
    let version = std::env::var("LOADVIZ_VERSION")
        .unwrap_or_else(|_| std::env::var("CARGO_PKG_VERSION").unwrap_or_default());
    println!("cargo:rustc-env=LOADVIZ_VERSION={version}");

    // LOADVIZ_COMMIT: falls back to `git rev-parse --short HEAD` for local builds.
    let commit = std::env::var("LOADVIZ_COMMIT").unwrap_or_else(|_| {
        let output = Command::new("git")
            .args(["rev-parse", "--short", "HEAD"])
            .output();
        match output {
            Ok(o) if o.status.success() => {
                String::from_utf8_lossy(&o.stdout).trim().to_string()
            }
            _ => "unknown".to_string(),
        }
    });
    println!("cargo:rustc-env=LOADVIZ_COMMIT={commit}");

    // Native pixel source lives next to the app; LOADVIZ_LIB_DIR points at it.
    if std::env::var_os("CARGO_FEATURE_LIBLOADVIZ").is_some() {
        if let Ok(dir) = std::env::var("LOADVIZ_LIB_DIR") {
            println!("cargo:rustc-link-search=native={dir}");
        }
        println!("cargo:rerun-if-env-changed=LOADVIZ_LIB_DIR");
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads/");
}
