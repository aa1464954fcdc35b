/// Build-time git commit SHA stamped by build.rs when available.
pub fn git_sha() -> Option<&'static str> {
    option_env!("BLOGDEX_BUILD_GIT_SHA")
}

/// Version string for `--version`, with the build SHA appended when known.
pub fn long_version() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match git_sha() {
        Some(sha) => format!("{version} ({sha})"),
        None => version.to_string(),
    }
}
