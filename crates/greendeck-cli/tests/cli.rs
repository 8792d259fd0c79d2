use assert_cmd::Command;
use predicates::str::contains;

fn cmd() -> Command {
    Command::cargo_bin("greendeck").unwrap()
}

#[test]
fn chart_list_shows_the_catalog() {
    cmd()
        .args(["chart", "--list"])
        .assert()
        .success()
        .stdout(contains("market-growth"))
        .stdout(contains("issuer-concentration"))
        .stdout(contains("esg-fund-flows"));
}

#[test]
fn chart_renders_one_svg() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .args(["chart", "market-growth", "--out-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(contains("[OK] market-growth"));

    let svg = std::fs::read_to_string(dir.path().join("market-growth.svg")).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Global Green Finance Market Growth"));
}

#[test]
fn chart_all_renders_the_full_catalog() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .args(["chart", "--all", "--out-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(contains("Rendered 24 charts"));

    let count = std::fs::read_dir(dir.path())
        .unwrap()
        .filter(|e| {
            e.as_ref()
                .unwrap()
                .path()
                .extension()
                .is_some_and(|ext| ext == "svg")
        })
        .count();
    assert_eq!(count, 24);
}

#[test]
fn chart_rejects_unknown_slug() {
    cmd()
        .args(["chart", "no-such-chart"])
        .assert()
        .failure()
        .stderr(contains("Unknown chart 'no-such-chart'"));
}

#[test]
fn chart_without_arguments_explains_usage() {
    cmd()
        .arg("chart")
        .assert()
        .failure()
        .stderr(contains("--list"));
}

#[test]
fn references_writes_the_curated_slide() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .args(["references", "--out-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(contains("15 references"));

    let tex = std::fs::read_to_string(dir.path().join("references_slide.tex")).unwrap();
    assert!(tex.contains("\\begin{frame}[t,allowframebreaks]{References}"));
    assert!(tex.contains("Zerbib, O.D. (2019)"));
}

#[test]
fn data_writes_all_three_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .args(["data", "--out-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(contains("corrections report"));

    let json = std::fs::read_to_string(dir.path().join("verified_statistics.json")).unwrap();
    assert!(json.contains("\"green_bonds_2024\""));

    let tex = std::fs::read_to_string(dir.path().join("data_macros.tex")).unwrap();
    assert!(tex.contains("\\newcommand{\\marketCAGR}{28.1\\%}"));

    let report =
        std::fs::read_to_string(dir.path().join("data_corrections_report.txt")).unwrap();
    assert!(report.contains("EMPIRICAL DATA CORRECTIONS REPORT"));
    assert!(report.contains("(+38.1%)"));
}

// fetch-citations needs the network; only its argument parsing is covered.
#[test]
fn fetch_citations_help_lists_options() {
    cmd()
        .args(["fetch-citations", "--help"])
        .assert()
        .success()
        .stdout(contains("--mailto"))
        .stdout(contains("--timeout-secs"));
}
