use assert_cmd::Command;
use predicates::prelude::*;

fn cli() -> Command {
    Command::cargo_bin("stepwise_pathfinding").unwrap()
}

#[test]
fn test_single_run_renders_grid_and_path() {
    cli()
        .args(["--rows", "3", "--cols", "3", "--algorithm", "bfs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== BFS ==="))
        .stdout(predicate::str::contains("SUCCESS"))
        .stdout(predicate::str::contains("Path: (0,0) -> (1,1) -> (2,2)"));
}

#[test]
fn test_unreachable_goal_is_not_an_error() {
    cli()
        .args([
            "--rows", "3", "--cols", "3", "--goal", "0,2", "--wall", "0,1", "--wall", "1,2",
            "--algorithm", "dfs",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("NO PATH"));
}

#[test]
fn test_invalid_configuration_exits_with_error() {
    cli()
        .args(["--rows", "3", "--cols", "3", "--wall", "0,0"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("start (0,0) is on a wall"));
}

#[test]
fn test_malformed_cell_is_rejected() {
    cli()
        .args(["--start", "zero,zero"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid cell"));
}

#[test]
fn test_all_prints_comparison() {
    cli()
        .args(["--rows", "5", "--cols", "5", "--algorithm", "all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ALGORITHM COMPARISON RESULTS"))
        .stdout(predicate::str::contains("IDDFS"))
        .stdout(predicate::str::contains("Bidirectional"));
}

#[test]
fn test_max_steps_cancels() {
    cli()
        .args(["--algorithm", "iddfs", "--max-steps", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CANCELLED"))
        .stdout(predicate::str::contains("Steps reported: 3"));
}

#[test]
fn test_csv_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    cli()
        .args(["--rows", "4", "--cols", "4", "--algorithm", "all", "--quiet", "--output-csv"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 7);
    assert!(text.contains("UCS,found,3,3,"));
}

#[test]
fn test_large_sealed_grid_dls_completes() {
    cli()
        .args([
            "--rows", "200", "--cols", "200", "--wall", "198,199", "--wall", "199,198", "--wall", "198,198",
            "--algorithm", "dls", "--no-visualization",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("NO PATH"));
}
