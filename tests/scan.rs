mod common;

use common::*;
use linelog::scan::discover_repositories;
use linelog::{scan, DateTotals, IgnoreConfig, IgnoreRules, LanguageTotals, LinelogError, Scanner};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const TEN_LINES: &str = "import os\nimport sys\nimport json\nimport re\n\ndef one():\n    return 1\n\ndef two():\n    return 2\n\nprint(one())\nprint(two())\n";

fn python(n: u64) -> LanguageTotals {
    [("Python".to_string(), n)].into_iter().collect()
}

fn repo_with_ten_lines(dir: &Path, day: chrono::NaiveDate) {
    init_git_repo(dir);
    commit_file(dir, "main.py", TEN_LINES, ALICE, local_time(day, 12));
}

#[test]
fn sibling_repositories_are_summed() {
    if !has_git() {
        return;
    }
    let root = tempdir().unwrap();
    let day = date(2024, 3, 15);
    repo_with_ten_lines(&root.path().join("one"), day);
    repo_with_ten_lines(&root.path().join("two"), day);

    let config = plain_config();
    let totals = scan(root.path(), day, date(2024, 3, 16), &config, None).unwrap();

    let expected: DateTotals = [(day, python(20))].into_iter().collect();
    assert_eq!(totals, expected);
}

#[test]
fn parallel_and_sequential_scans_agree() {
    if !has_git() {
        return;
    }
    let root = tempdir().unwrap();
    let first = date(2024, 3, 14);
    let second = date(2024, 3, 15);
    repo_with_ten_lines(&root.path().join("a"), first);
    repo_with_ten_lines(&root.path().join("nested/b"), second);
    repo_with_ten_lines(&root.path().join("nested/deeper/c"), second);

    let config = plain_config();
    let end = date(2024, 3, 17);
    let parallel = Scanner::new(&config).scan(root.path(), first, end).unwrap();
    let sequential = Scanner::new(&config)
        .parallel(false)
        .scan(root.path(), first, end)
        .unwrap();

    assert_eq!(parallel, sequential);
    let expected: DateTotals = [(first, python(10)), (second, python(20))].into_iter().collect();
    assert_eq!(parallel, expected);
}

#[test]
fn empty_days_are_left_out() {
    if !has_git() {
        return;
    }
    let root = tempdir().unwrap();
    let day = date(2024, 3, 15);
    repo_with_ten_lines(&root.path().join("one"), day);

    let config = plain_config();
    let totals = scan(root.path(), date(2024, 3, 10), date(2024, 3, 20), &config, None).unwrap();

    assert_eq!(totals.keys().copied().collect::<Vec<_>>(), vec![day]);
}

#[test]
fn unborn_repository_contributes_nothing() {
    if !has_git() {
        return;
    }
    let root = tempdir().unwrap();
    let day = date(2024, 3, 15);
    init_git_repo(&root.path().join("fresh"));

    let config = plain_config();
    let totals = scan(root.path(), day, date(2024, 3, 16), &config, None).unwrap();
    assert!(totals.is_empty());

    repo_with_ten_lines(&root.path().join("real"), day);
    let totals = scan(root.path(), day, date(2024, 3, 16), &config, None).unwrap();
    let expected: DateTotals = [(day, python(10))].into_iter().collect();
    assert_eq!(totals, expected);
}

#[test]
fn root_repository_is_scanned_directly() {
    if !has_git() {
        return;
    }
    let root = tempdir().unwrap();
    let day = date(2024, 3, 15);
    repo_with_ten_lines(root.path(), day);

    let config = plain_config();
    let totals = Scanner::new(&config)
        .recursive(false)
        .scan(root.path(), day, date(2024, 3, 16))
        .unwrap();

    let expected: DateTotals = [(day, python(10))].into_iter().collect();
    assert_eq!(totals, expected);
}

#[test]
fn author_filter_applies_across_repositories() {
    if !has_git() {
        return;
    }
    let root = tempdir().unwrap();
    let day = date(2024, 3, 15);
    let alice_repo = root.path().join("alice");
    let bob_repo = root.path().join("bob");
    init_git_repo(&alice_repo);
    commit_file(&alice_repo, "main.py", TEN_LINES, ALICE, local_time(day, 12));
    init_git_repo(&bob_repo);
    commit_file(&bob_repo, "main.py", TEN_LINES, BOB, local_time(day, 12));

    let config = plain_config();
    let totals = scan(root.path(), day, date(2024, 3, 16), &config, Some("ALICE")).unwrap();

    let expected: DateTotals = [(day, python(10))].into_iter().collect();
    assert_eq!(totals, expected);
}

#[test]
fn discovery_skips_hidden_ignored_and_nested_directories() {
    if !has_git() {
        return;
    }
    let root = tempdir().unwrap();
    let day = date(2024, 3, 15);
    repo_with_ten_lines(&root.path().join("visible"), day);
    repo_with_ten_lines(&root.path().join(".hidden/repo"), day);
    repo_with_ten_lines(&root.path().join("skipme/repo"), day);
    repo_with_ten_lines(&root.path().join("group/inner"), day);
    init_git_repo(&root.path().join("visible/sub/nested"));

    let rules = IgnoreConfig {
        ignore_paths: vec!["^skipme/".to_string()],
        ..IgnoreConfig::default()
    }
    .compile()
    .unwrap();

    let mut repos = discover_repositories(root.path(), &rules, true).unwrap();
    repos.sort();
    assert_eq!(
        repos,
        vec![root.path().join("group/inner"), root.path().join("visible")]
    );
}

#[test]
fn non_recursive_scan_finds_the_enclosing_repository() {
    if !has_git() {
        return;
    }
    let root = tempdir().unwrap();
    let day = date(2024, 3, 15);
    init_git_repo(root.path());
    write_file(root.path(), "src/util.py", "x = 1\n");
    commit_file(root.path(), "main.py", TEN_LINES, ALICE, local_time(day, 12));

    let config = plain_config();
    let totals = Scanner::new(&config)
        .recursive(false)
        .scan(&root.path().join("src"), day, date(2024, 3, 16))
        .unwrap();

    let expected: DateTotals = [(day, python(11))].into_iter().collect();
    assert_eq!(totals, expected);
}

#[test]
fn non_recursive_scan_of_plain_directory_finds_nothing() {
    let root = tempdir().unwrap();
    fs::create_dir_all(root.path().join("sub")).unwrap();

    let repos = discover_repositories(root.path(), &IgnoreRules::none(), false).unwrap();
    assert!(repos.is_empty());
}

#[test]
fn missing_root_is_a_path_error() {
    let root = tempdir().unwrap();
    let missing = root.path().join("does-not-exist");
    let config = plain_config();

    let err = scan(&missing, date(2024, 3, 15), date(2024, 3, 16), &config, None).unwrap_err();
    assert!(matches!(err, LinelogError::Path(_)));

    let file = root.path().join("file.txt");
    fs::write(&file, "not a directory").unwrap();
    let err = scan(&file, date(2024, 3, 15), date(2024, 3, 16), &config, None).unwrap_err();
    assert!(matches!(err, LinelogError::Path(_)));
}
