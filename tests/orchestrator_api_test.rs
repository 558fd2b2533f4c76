//! Integration tests for detection and orchestration through the public API.

use std::rc::Rc;

use tempfile::TempDir;
use toolstrap::detection::{CheckStrategy, DetectionEngine, ToolDescriptor};
use toolstrap::installer::{InstallOptions, InstallerLog, InstallerRegistry, RecordingInstaller};
use toolstrap::orchestrator::Orchestrator;
use toolstrap::paths::FsProbe;
use toolstrap::platform::PlatformFamily;
use toolstrap::shell::ScriptedShell;
use toolstrap::store::ConfigStore;

#[test]
fn git_footprint_decides_without_running_anything() {
    let temp = TempDir::new().unwrap();
    let git = temp.path().join("bin").join("git").join("bin").join("git");
    std::fs::create_dir_all(git.parent().unwrap()).unwrap();

    let shell = ScriptedShell::new();
    let engine = DetectionEngine::new(&shell, &FsProbe);
    let tool = ToolDescriptor::new("git").with_path(&git);

    assert!(!engine.is_installed(&tool));
    std::fs::write(&git, "").unwrap();
    assert!(engine.is_installed(&tool));
    assert!(shell.calls().is_empty());
}

#[test]
fn missing_footprint_is_not_installed() {
    let temp = TempDir::new().unwrap();
    let shell = ScriptedShell::new();
    let engine = DetectionEngine::new(&shell, &FsProbe);
    let tool = ToolDescriptor::new("git").with_paths([
        temp.path().join("present"),
        temp.path().join("absent"),
    ]);
    std::fs::write(temp.path().join("present"), "").unwrap();

    assert!(!engine.is_installed(&tool));
}

#[test]
fn python_version_output_matches() {
    let shell = ScriptedShell::new();
    shell.respond("python3 --version", "\u{1b}[32mPython 3.11.4\u{1b}[0m", 0);
    let engine = DetectionEngine::new(&shell, &FsProbe);

    let tool = ToolDescriptor::new("python").with_check(
        CheckStrategy::pattern("python3 --version", r"/Python \d+\.\d+/").unwrap(),
    );
    assert!(engine.is_installed(&tool));
}

#[test]
fn bootstrap_installs_first_tool_only() {
    let temp = TempDir::new().unwrap();
    let home = temp.path().join("home");
    let marker = home.join("bin").join("first").join("bin").join("first");
    let log = InstallerLog::default();

    let tools = vec![
        ToolDescriptor::new("first").with_path(&marker),
        ToolDescriptor::new("second").with_check(CheckStrategy::predicate(|_| true)),
    ];
    let installers = InstallerRegistry::new()
        .with(
            "first",
            RecordingInstaller::new(log.clone()).with_files([&marker]),
        )
        .with("second", RecordingInstaller::new(log.clone()));

    let mut orchestrator =
        Orchestrator::new(&home, ConfigStore::new(temp.path().join("store.yml")))
            .with_tools(tools)
            .with_installers(installers)
            .with_shell(ScriptedShell::new());

    let report = orchestrator.bootstrap(&home, &mut |_| {}).unwrap();

    assert_eq!(log.entries(), vec!["remove:first", "install:first"]);
    assert_eq!(report.installed, vec!["first"]);
    assert_eq!(report.skipped, vec!["second"]);

    orchestrator.init().unwrap();
    assert!(orchestrator.all_installed());
}

#[test]
fn install_twice_leaves_one_installation() {
    let temp = TempDir::new().unwrap();
    let marker = temp.path().join("bin").join("tool");
    let log = InstallerLog::default();

    let mut orchestrator =
        Orchestrator::new(temp.path(), ConfigStore::new(temp.path().join("store.yml")))
            .with_tools(vec![ToolDescriptor::new("tool").with_path(&marker)])
            .with_installers(InstallerRegistry::new().with(
                "tool",
                RecordingInstaller::new(log.clone()).with_files([&marker]),
            ))
            .with_shell(ScriptedShell::new());

    for _ in 0..2 {
        orchestrator
            .install("tool", &InstallOptions::default(), &mut |_| {})
            .unwrap();
    }

    assert!(marker.exists());
    assert_eq!(
        log.entries(),
        vec!["remove:tool", "install:tool", "remove:tool", "install:tool"]
    );
}

#[test]
fn windows_order_puts_compiler_before_python_and_conda() {
    let temp = TempDir::new().unwrap();
    let shell = Rc::new(ScriptedShell::new());
    let mut orchestrator =
        Orchestrator::new(temp.path(), ConfigStore::new(temp.path().join("store.yml")))
            .with_platform(PlatformFamily::Windows)
            .with_shell(shell.clone());

    let names: Vec<_> = orchestrator
        .resolve()
        .unwrap()
        .iter()
        .map(|t| t.name.clone())
        .collect();

    let pos = |n: &str| names.iter().position(|x| x == n).unwrap();
    assert!(pos("win") < pos("python"));
    assert!(pos("win") < pos("conda"));
    assert!(!names.contains(&"homebrew".to_string()));
    assert!(shell.calls().is_empty());
}
