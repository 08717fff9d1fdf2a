use dm_core::SandboxMode;

/// Set by the OS for every process running inside an App Sandbox container.
pub const SANDBOX_CONTAINER_ENV: &str = "APP_SANDBOX_CONTAINER_ID";

/// Detect whether this process runs under the App Sandbox.
pub fn detect_sandbox_mode() -> SandboxMode {
    sandbox_mode_from(std::env::var(SANDBOX_CONTAINER_ENV).ok().as_deref())
}

fn sandbox_mode_from(container_id: Option<&str>) -> SandboxMode {
    match container_id {
        Some(id) if !id.trim().is_empty() => SandboxMode::Sandboxed,
        _ => SandboxMode::Unsandboxed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_id_means_sandboxed() {
        assert_eq!(
            sandbox_mode_from(Some("com.example.dynamic")),
            SandboxMode::Sandboxed
        );
        assert_eq!(sandbox_mode_from(Some(" ")), SandboxMode::Unsandboxed);
        assert_eq!(sandbox_mode_from(None), SandboxMode::Unsandboxed);
    }
}
