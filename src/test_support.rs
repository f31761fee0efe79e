//! Shared fixtures for unit tests.

use crate::cfn::ResourceRegistry;

/// A valid 1x1 transparent PNG.
pub const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, 0x00, 0x00,
    0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4, 0x89, 0x00, 0x00, 0x00,
    0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00, 0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D,
    0xB4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// Graphviz is an external binary; rendering tests skip themselves without it.
pub fn graphviz_available() -> bool {
    std::process::Command::new("dot")
        .arg("-V")
        .output()
        .is_ok_and(|out| out.status.success())
}

/// Temp icon tree holding PNGs for the resource types tests draw.
pub fn icon_tree() -> tempfile::TempDir {
    let root = tempfile::tempdir().unwrap();
    for resource_type in ["AWS::Lambda::Function", "AWS::RDS::DBInstance", "AWS::S3::Bucket", "AWS::SQS::Queue"] {
        let kind = ResourceRegistry::aws().get(resource_type).unwrap();
        let path = root.path().join(kind.icon_path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, TINY_PNG).unwrap();
    }
    root
}

/// A stand-in layout engine: a shell script invoked as `<engine> -Tsvg -o OUT IN`.
///
/// It records its working directory, then writes an SVG with one
/// `<image xlink:href=...>` per absolute `.png` path quoted in the DOT input.
/// That is the shape Graphviz gives icon nodes.
pub struct FakeEngine {
    dir: tempfile::TempDir,
}

impl FakeEngine {
    pub fn rendering() -> Self {
        Self::with_body(
            r#"{
  echo '<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">'
  grep -o '"/[^"]*\.png"' "$4" | while read -r icon; do echo "<image xlink:href=$icon width=\"58px\"/>"; done
  echo '</svg>'
} > "$3""#,
        )
    }

    pub fn failing() -> Self {
        Self::with_body("echo 'syntax error in line 1' >&2\nexit 3")
    }

    fn with_body(body: &str) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("fake-dot");
        let record = dir.path().join("workdir");
        let text = format!("#!/bin/sh\npwd > '{}'\n{body}\n", record.display());
        std::fs::write(&script, text).unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        Self { dir }
    }

    /// Path to pass as the renderer's engine.
    pub fn command(&self) -> String {
        self.dir.path().join("fake-dot").to_string_lossy().into_owned()
    }

    /// Working directory of the most recent invocation.
    pub fn last_workdir(&self) -> std::path::PathBuf {
        let recorded = std::fs::read_to_string(self.dir.path().join("workdir")).unwrap();
        std::path::PathBuf::from(recorded.trim())
    }
}
