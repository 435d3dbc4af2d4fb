//! End-to-end CLI tests for the clicha binary.

#![allow(deprecated)]

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const REFERENCE_CORPUS: &str = "\
0-> Markets rally
Stocks rose as investors cheered the budget.
--------
1-> Budget talks
Lawmakers debated the budget late into the night.
--------
2-> Drought warning
Farmers fear drought as the river drops.
--------
3-> Factory output
Factory emissions fell while output grew.
--------
Articles crawled: 4
";

const YEAR_CORPUS: &str = "\
0-> Budget vote
Lawmakers passed the budget.
--------
1-> Dry summer
Drought and emissions worry farmers; drought spreads.
--------
Articles crawled: 2
";

/// Builds a command isolated from the user's config file and log settings.
fn clicha(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("clicha").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn write_config(config_home: &Path, contents: &str) {
    let dir = config_home.join("clicha");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), contents).unwrap();
}

/// Writes a reference corpus, builds its IDF model and a keyword list.
fn prepare_assets(dir: &Path) {
    fs::write(dir.join("reference.txt"), REFERENCE_CORPUS).unwrap();
    fs::write(dir.join("keywords.txt"), "emissions\ndrought\ncarbon dioxide\n").unwrap();
    clicha(dir)
        .args(["idf", "reference.txt", "-o", "idf.txt"])
        .current_dir(dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("from 4 documents"));
}

#[test]
fn test_binary_help_displays_usage() {
    let dir = TempDir::new().unwrap();
    clicha(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("climate-change awareness"));
}

#[test]
fn test_binary_version_displays_version() {
    let dir = TempDir::new().unwrap();
    clicha(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("clicha"));
}

#[test]
fn test_binary_invalid_flag_returns_error() {
    let dir = TempDir::new().unwrap();
    clicha(dir.path())
        .arg("--invalid-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_config_show_defaults_without_file() {
    let dir = TempDir::new().unwrap();
    clicha(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config_file = not found"))
        .stdout(predicate::str::contains("normalization = lower"))
        .stdout(predicate::str::contains("articles_per_year = 1500"))
        .stdout(predicate::str::contains("aware_min_distinct = 8"));
}

#[test]
fn test_config_show_file_values_and_cli_override() {
    let dir = TempDir::new().unwrap();
    write_config(
        dir.path(),
        "normalization = \"lemma\"\nconcurrency = 8\naware_min_cai = 0.05\n",
    );
    clicha(dir.path())
        .args(["-c", "3", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config_file = loaded"))
        .stdout(predicate::str::contains("normalization = lemma"))
        .stdout(predicate::str::contains("concurrency = 3"))
        .stdout(predicate::str::contains("aware_min_cai = 0.05"));
}

#[test]
fn test_unknown_config_key_is_fatal() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), "rate_limit = 100\n");
    clicha(dir.path())
        .args(["config", "show"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn test_score_writes_reports_and_partial_exit_for_missing_year() {
    let dir = TempDir::new().unwrap();
    prepare_assets(dir.path());
    let dataset = dir.path().join("dataset");
    fs::create_dir_all(&dataset).unwrap();
    fs::write(dataset.join("1990.txt"), YEAR_CORPUS).unwrap();

    clicha(dir.path())
        .args([
            "score", "dataset", "--from", "1990", "--to", "1991", "--idf", "idf.txt",
            "--keywords", "keywords.txt", "--report-dir", "reports", "--summary",
            "summary.txt", "--articles-per-year", "2",
        ])
        .current_dir(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("year,aware_count,cumulative_cai,total_processed"))
        .stdout(predicate::str::starts_with("year").and(predicate::str::contains("1990,0,")))
        .stderr(predicate::str::contains("Year 1991 failed"));

    let report = fs::read_to_string(dir.path().join("reports").join("1990.txt")).unwrap();
    assert_eq!(report.lines().count(), 1, "only the matching article is reported");
    assert!(report.starts_with("1,2,3,"));
    assert!(!dir.path().join("reports").join("1991.txt").exists());

    let summary = fs::read_to_string(dir.path().join("summary.txt")).unwrap();
    assert!(summary.starts_with("1990,0,"));
    assert!(summary.trim_end().ends_with(",2"));
}

#[test]
fn test_summarize_rebuilds_summary_from_reports() {
    let dir = TempDir::new().unwrap();
    prepare_assets(dir.path());
    let dataset = dir.path().join("dataset");
    fs::create_dir_all(&dataset).unwrap();
    fs::write(dataset.join("1990.txt"), YEAR_CORPUS).unwrap();
    clicha(dir.path())
        .args([
            "score", "dataset", "--from", "1990", "--to", "1990", "--idf", "idf.txt",
            "--keywords", "keywords.txt", "--report-dir", "reports",
        ])
        .current_dir(dir.path())
        .assert()
        .success();

    clicha(dir.path())
        .args([
            "summarize", "reports", "--from", "1990", "--to", "1990", "-o", "summary.txt",
        ])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1990,0,"));
    let summary = fs::read_to_string(dir.path().join("summary.txt")).unwrap();
    assert!(summary.trim_end().ends_with(",1500"));
}

#[test]
fn test_score_missing_idf_fails_before_scoring() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("keywords.txt"), "drought\n").unwrap();
    clicha(dir.path())
        .args([
            "score", "dataset", "--from", "1990", "--to", "1990", "--idf", "missing.txt",
            "--keywords", "keywords.txt", "--report-dir", "reports",
        ])
        .current_dir(dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to load IDF model"));
    assert!(!dir.path().join("reports").exists());
}

#[test]
fn test_score_rejects_reversed_year_range() {
    let dir = TempDir::new().unwrap();
    prepare_assets(dir.path());
    clicha(dir.path())
        .args([
            "score", "dataset", "--from", "1995", "--to", "1990", "--idf", "idf.txt",
            "--keywords", "keywords.txt", "--report-dir", "reports",
        ])
        .current_dir(dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid year range"));
}

#[test]
fn test_cai_scores_text_argument() {
    let dir = TempDir::new().unwrap();
    prepare_assets(dir.path());
    clicha(dir.path())
        .args([
            "cai", "Drought and emissions worry farmers; drought spreads.", "--idf", "idf.txt",
            "--keywords", "keywords.txt",
        ])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("index,distinct,total,cai,aware"))
        .stdout(predicate::str::contains("0,2,3,"))
        .stdout(predicate::str::contains(",false"));
}

#[test]
fn test_cai_reads_stdin() {
    let dir = TempDir::new().unwrap();
    prepare_assets(dir.path());
    clicha(dir.path())
        .args(["cai", "--idf", "idf.txt", "--keywords", "keywords.txt"])
        .current_dir(dir.path())
        .write_stdin("Budget talks stall.")
        .assert()
        .success()
        .stdout(predicate::str::contains("0,0,0,0,false"));
}

#[test]
fn test_compare_prints_ratios_for_common_years() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "1990,4,2,1500\n1991,6,3,1500\n").unwrap();
    fs::write(dir.path().join("b.txt"), "1991,3,0,1500\n1992,1,1,1500\n").unwrap();
    clicha(dir.path())
        .args(["compare", "a.txt", "b.txt"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("year,aware_ratio,cai_ratio"))
        .stdout(predicate::str::contains("1991,2.0000,n/a"))
        .stdout(predicate::str::contains("1990").not());
}

#[test]
fn test_compare_json_prints_one_object_per_year() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "1990,4,2,1500\n1991,6,3,1500\n").unwrap();
    fs::write(dir.path().join("b.txt"), "1991,3,0,1500\n1992,1,1,1500\n").unwrap();
    clicha(dir.path())
        .args(["compare", "a.txt", "b.txt", "--json"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::eq(
            "{\"year\":1991,\"aware_ratio\":2.0,\"cai_ratio\":null}\n",
        ));
}

#[test]
fn test_cai_json_includes_matches_and_verdict() {
    let dir = TempDir::new().unwrap();
    prepare_assets(dir.path());
    clicha(dir.path())
        .args(["cai", "--json", "--idf", "idf.txt", "--keywords", "keywords.txt"])
        .current_dir(dir.path())
        .write_stdin("Drought and emissions worry farmers; drought spreads.")
        .assert()
        .success()
        .stdout(predicate::str::contains("index,distinct").not())
        .stdout(predicate::str::contains("\"distinct\":2,\"total\":3"))
        .stdout(predicate::str::contains("[\"drought\",2]"))
        .stdout(predicate::str::contains("\"aware\":false"));
}

#[test]
fn test_idf_rejects_corpus_of_only_stopwords() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("reference.txt"),
        "0-> The\nthe and of\n--------\n",
    )
    .unwrap();
    clicha(dir.path())
        .args(["idf", "reference.txt", "-o", "idf.txt"])
        .current_dir(dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no terms after normalization"));
    assert!(!dir.path().join("idf.txt").exists());
}

#[test]
fn test_curate_applies_bundled_rules() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("candidates.txt"),
        "glacier,1000,60\nwarming,12.5,80\n",
    )
    .unwrap();
    clicha(dir.path())
        .args(["curate", "candidates.txt", "-o", "keywords.txt"])
        .current_dir(dir.path())
        .assert()
        .success();
    let keywords = fs::read_to_string(dir.path().join("keywords.txt")).unwrap();
    let lines: Vec<&str> = keywords.lines().collect();
    assert_eq!(lines.first(), Some(&"el niño"));
    assert!(lines.contains(&"glacier"));
    assert!(lines.contains(&"warming"));
}
