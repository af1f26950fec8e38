use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CaseClass {
    RuntimeSuccess,
    TranslateError,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExpectedOutcome {
    pub stdout_file: Option<String>,
    /// Per-strategy stdout files for strategies whose output legitimately differs.
    #[serde(default)]
    pub stdout_overrides: BTreeMap<String, String>,
    pub error_contains: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CaseSpec {
    pub class: CaseClass,
    pub strategies: Vec<String>,
    pub expected: ExpectedOutcome,
}

#[derive(Debug, Clone)]
pub struct Case {
    pub name: String,
    pub dir: PathBuf,
    pub program_path: PathBuf,
    pub spec: CaseSpec,
}

impl Case {
    pub fn read_text(&self, relative_path: &str) -> Result<String> {
        fs::read_to_string(self.dir.join(relative_path))
            .with_context(|| format!("Reading {} fixture file {}", self.name, relative_path))
    }

    pub fn stdout_file_for(&self, strategy: &str) -> Option<&str> {
        self.spec
            .expected
            .stdout_overrides
            .get(strategy)
            .or(self.spec.expected.stdout_file.as_ref())
            .map(String::as_str)
    }
}

pub fn load_cases(programs_dir: &Path) -> Result<Vec<Case>> {
    let mut cases = Vec::new();

    for entry in
        fs::read_dir(programs_dir).with_context(|| format!("Reading {}", programs_dir.display()))?
    {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }

        let case_path = path.join("case.yaml");
        if !case_path.exists() {
            continue;
        }

        let program_path = path.join("program.yaml");
        ensure!(
            program_path.exists(),
            "Missing program.yaml for case {}",
            path.display()
        );

        let case_name = path
            .file_name()
            .and_then(|value| value.to_str())
            .map(str::to_string)
            .with_context(|| format!("Invalid case directory name {}", path.display()))?;
        let case_raw = fs::read_to_string(&case_path)
            .with_context(|| format!("Reading {}", case_path.display()))?;
        let spec: CaseSpec = serde_yaml::from_str(&case_raw)
            .with_context(|| format!("Parsing {}", case_path.display()))?;
        ensure!(
            !spec.strategies.is_empty(),
            "Case {case_name} lists no strategies"
        );

        cases.push(Case {
            name: case_name,
            dir: path,
            program_path,
            spec,
        });
    }

    ensure!(
        !cases.is_empty(),
        "No test cases found in {}",
        programs_dir.display()
    );
    cases.sort_by(|left, right| left.name.cmp(&right.name));
    Ok(cases)
}

pub fn normalize_output(output: &str) -> String {
    output.replace("\r\n", "\n").trim_end().to_string()
}

fn parity_required() -> bool {
    std::env::var("NODE_PARITY_REQUIRED")
        .map(|value| value == "1")
        .unwrap_or(false)
}

pub fn run_node_startup(node: &str) -> Result<()> {
    let output = Command::new(node)
        .arg("-e")
        .arg("0")
        .output()
        .with_context(|| format!("Running '{node} -e 0'"))?;
    ensure!(output.status.success(), "node startup command failed");
    Ok(())
}

/// Finds a JavaScript runtime via `NODE` or `node` on the path.
///
/// Returns `None` when nothing is runnable, unless `NODE_PARITY_REQUIRED=1`.
pub fn detect_node() -> Result<Option<String>> {
    if let Ok(node) = std::env::var("NODE")
        && run_node_startup(&node).is_ok()
    {
        return Ok(Some(node));
    }

    for candidate in ["node", "nodejs"] {
        if run_node_startup(candidate).is_ok() {
            return Ok(Some(candidate.to_string()));
        }
    }

    if parity_required() {
        anyhow::bail!("Node parity required but no interpreter found. Set NODE or install node.");
    }

    eprintln!("Skipping JavaScript execution: no NODE env or node interpreter found.");
    Ok(None)
}

static SCRIPT_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn write_temp_script(source: &str) -> Result<PathBuf> {
    let mut dir = std::env::temp_dir();
    dir.push("lazyjs");
    fs::create_dir_all(&dir).context("Creating temp directory")?;

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let sequence = SCRIPT_COUNTER.fetch_add(1, Ordering::Relaxed);
    let path = dir.join(format!(
        "program_{}_{sequence}_{nanos}.js",
        std::process::id()
    ));
    fs::write(&path, source).context("Writing JavaScript source")?;
    Ok(path)
}

pub fn run_node_source(node: &str, source: &str) -> Result<String> {
    let path = write_temp_script(source)?;
    let output = Command::new(node)
        .arg(&path)
        .output()
        .with_context(|| format!("Running {node} on {}", path.display()));
    let _ = fs::remove_file(&path);
    let output = output?;
    ensure!(
        output.status.success(),
        "node failed for {}: {}",
        path.display(),
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
