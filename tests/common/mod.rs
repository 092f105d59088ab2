//! Shared test infrastructure for integration tests.

use serde::Deserialize;
use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Expected values stored next to a fixture manifest in fixture.json.
#[derive(Debug, Deserialize)]
pub struct FixtureConfig {
    pub org_label: String,
    pub total_types: u64,
    pub total_members: u64,
}

/// A fixture manifest plus a scratch output directory for one test.
pub struct TestFixture {
    pub fixture_dir: PathBuf,
    pub config: FixtureConfig,
    pub temp_dir: TempDir,
}

fn manifest_dir() -> PathBuf {
    PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into()))
}

/// Command for the built `mfr` binary.
pub fn mfr() -> Command {
    Command::new(env!("CARGO_BIN_EXE_mfr"))
}

/// Run `command`, optionally feeding `stdin`, and capture its output.
pub fn run_with_stdin(mut command: Command, stdin: Option<&str>) -> anyhow::Result<Output> {
    command
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = command.spawn()?;
    if let Some(text) = stdin {
        let mut pipe = child
            .stdin
            .take()
            .ok_or_else(|| anyhow::anyhow!("stdin not captured"))?;
        pipe.write_all(text.as_bytes())?;
    }
    Ok(child.wait_with_output()?)
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

impl TestFixture {
    /// Load a fixture by name from tests/fixtures/{name}/.
    pub fn load(name: &str) -> anyhow::Result<Self> {
        let fixture_dir = manifest_dir().join("tests/fixtures").join(name);
        let config_path = fixture_dir.join("fixture.json");
        let config: FixtureConfig =
            serde_json::from_str(&std::fs::read_to_string(&config_path).map_err(|e| {
                anyhow::anyhow!("Failed to read {}: {}", config_path.display(), e)
            })?)?;
        Ok(Self {
            fixture_dir,
            config,
            temp_dir: TempDir::new()?,
        })
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.fixture_dir.join("package.xml")
    }

    pub fn manifest_text(&self) -> String {
        std::fs::read_to_string(self.manifest_path()).expect("read fixture manifest")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.temp_dir.path().join("manifest")
    }

    /// Run `mfr generate --json` against the fixture and parse its summary.
    pub fn generate(&self) -> anyhow::Result<serde_json::Value> {
        let mut command = mfr();
        command
            .arg("generate")
            .arg("--input")
            .arg(self.manifest_path())
            .arg("--output-dir")
            .arg(self.output_dir())
            .arg("--org")
            .arg(&self.config.org_label)
            .arg("--json");
        let output = run_with_stdin(command, None)?;
        if !output.status.success() {
            return Err(anyhow::anyhow!(
                "mfr generate failed: {}",
                String::from_utf8_lossy(&output.stderr)
            ));
        }
        Ok(serde_json::from_slice(&output.stdout)?)
    }

    /// Uncheck the rows for `names` in the checklist at `path`.
    pub fn uncheck(&self, path: &Path, names: &[&str]) {
        let content = std::fs::read_to_string(path).expect("read checklist");
        let edited: Vec<String> = content
            .lines()
            .map(|line| {
                let hit = names
                    .iter()
                    .any(|name| line.contains(&format!("| {name} |")));
                if hit {
                    line.replacen("[x]", "[ ]", 1)
                } else {
                    line.to_string()
                }
            })
            .collect();
        std::fs::write(path, edited.join("\n")).expect("write checklist");
    }
}
