/// Whether the process runs inside the OS app sandbox.
///
/// Fixed for the lifetime of the process. Under sandbox mode scripts must live
/// in the per-app scripts directory; otherwise they are read straight from the
/// bundled resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SandboxMode {
    Sandboxed,
    Unsandboxed,
}

impl SandboxMode {
    pub fn is_on(self) -> bool {
        self == SandboxMode::Sandboxed
    }
}
