use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use skyslot_challenge::{
    solve_challenge, AttemptFailure, ChallengeError, ChallengeRunner, ColoringJob, Config,
};
use skyslot_core::{load_graph, Algorithm, CancelFlag, ColoringError, Graph};

const GRAPH_TEST0: &str = "\
3
11
1 2
1 4
1 7
1 9
2 3
2 6
2 8
3 5
3 7
3 10
4 5
4 6
4 10
5 8
5 9
6 11
7 11
8 11
9 11
10 11
";

fn fixed(conflicts: usize) -> ColoringJob {
    Box::new(move |_: &mut Graph, _: &CancelFlag| -> Result<usize, ColoringError> {
        Ok(conflicts)
    })
}

/// Spins until cancelled.
fn stalled() -> ColoringJob {
    Box::new(|_: &mut Graph, cancel: &CancelFlag| -> Result<usize, ColoringError> {
        while !cancel.is_cancelled() {
            std::thread::sleep(Duration::from_millis(5));
        }
        Err(ColoringError::Cancelled)
    })
}

fn triangle() -> Graph {
    load_graph("2\n3\na b\nb c\nc a\n".as_bytes(), "triangle.txt").unwrap()
}

fn fast_runner() -> ChallengeRunner {
    ChallengeRunner::new(Duration::from_millis(200))
}

#[tokio::test(flavor = "multi_thread")]
async fn timed_out_attempt_is_excluded() {
    let jobs = vec![
        (Algorithm::WelshPowell, stalled()),
        (Algorithm::Dsatur, fixed(5)),
        (Algorithm::RecursiveLargestFirst, fixed(3)),
    ];
    let outcome = fast_runner().solve_with(&triangle(), jobs).await.unwrap();
    assert_eq!(outcome.algorithm, Algorithm::RecursiveLargestFirst);
    assert_eq!(outcome.conflict_count, 3);
    assert_eq!(outcome.source_file_name, "triangle.txt");
}

#[tokio::test(flavor = "multi_thread")]
async fn ties_go_to_the_earlier_heuristic() {
    let jobs = vec![
        (Algorithm::WelshPowell, stalled()),
        (Algorithm::Dsatur, fixed(3)),
        (Algorithm::RecursiveLargestFirst, fixed(3)),
    ];
    let outcome = fast_runner().solve_with(&triangle(), jobs).await.unwrap();
    assert_eq!(outcome.algorithm, Algorithm::Dsatur);
}

#[tokio::test(flavor = "multi_thread")]
async fn all_attempts_timing_out_fails_the_graph() {
    let jobs = vec![
        (Algorithm::WelshPowell, stalled()),
        (Algorithm::Dsatur, stalled()),
        (Algorithm::RecursiveLargestFirst, stalled()),
    ];
    let err = fast_runner()
        .solve_with(&triangle(), jobs)
        .await
        .unwrap_err();
    match err {
        ChallengeError::AllAttemptsFailed { graph, source } => {
            assert_eq!(graph, "triangle.txt");
            assert_eq!(source, AttemptFailure::TimedOut(Duration::from_millis(200)));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_attempt_is_excluded() {
    let failing: ColoringJob =
        Box::new(|_: &mut Graph, _: &CancelFlag| -> Result<usize, ColoringError> {
            Err(ColoringError::InvalidKmax(0))
        });
    let jobs = vec![
        (Algorithm::WelshPowell, failing),
        (Algorithm::Dsatur, fixed(7)),
    ];
    let outcome = fast_runner().solve_with(&triangle(), jobs).await.unwrap();
    assert_eq!(outcome.algorithm, Algorithm::Dsatur);
    assert_eq!(outcome.conflict_count, 7);
}

#[tokio::test]
async fn graph_without_kmax_is_rejected() {
    let mut graph = Graph::new("bare");
    graph.add_edge("a", "b");
    let err = ChallengeRunner::default().solve(&graph).await.unwrap_err();
    assert!(matches!(err, ChallengeError::MissingKmax { graph } if graph == "bare"));
}

#[tokio::test]
async fn real_heuristics_pick_the_first_best() {
    let graph = load_graph(GRAPH_TEST0.as_bytes(), "graph-test0.txt").unwrap();
    let outcome = ChallengeRunner::default().solve(&graph).await.unwrap();
    assert_eq!(outcome.conflict_count, 1);
    assert_eq!(outcome.algorithm, Algorithm::WelshPowell);
    assert_eq!(outcome.graph.count_conflicts(), 1);
    assert!(outcome.graph.is_fully_colored());
    // The source graph is never coloured in place.
    assert!(graph.nodes().all(|n| n.color.is_none()));
}

#[tokio::test]
async fn run_keeps_input_order() {
    let results = ChallengeRunner::default()
        .run(vec![triangle(), Graph::new("bare"), triangle().with_kmax(3)])
        .await;
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().conflict_count, 1);
    assert!(matches!(results[1], Err(ChallengeError::MissingKmax { .. })));
    assert_eq!(results[2].as_ref().unwrap().conflict_count, 0);
}

fn scratch_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("skyslot-{test}-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[tokio::test(flavor = "multi_thread")]
async fn batch_writes_colourings_and_summary() {
    let root = scratch_dir("challenge");
    let graph_dir = root.join("graphs");
    let output_dir = root.join("out");
    fs::create_dir_all(&graph_dir).unwrap();
    fs::write(graph_dir.join("graph-eval0.txt"), GRAPH_TEST0).unwrap();
    fs::write(graph_dir.join("graph-eval1.txt"), "2\n3\na b\nb c\nc a\n").unwrap();

    let config = Config {
        graph_dir,
        output_dir: output_dir.clone(),
        graph_count: 3,
        attempt_timeout: Duration::from_secs(10),
        ..Config::default()
    };
    let summary = solve_challenge(&config).await.unwrap();

    assert_eq!(summary.solved.len(), 2);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].0, "graph-eval2.txt");
    assert!(matches!(summary.failed[0].1, ChallengeError::Load(_)));

    let summary_file = fs::read_to_string(output_dir.join("coloration-summary.csv")).unwrap();
    assert_eq!(summary_file, "graph-eval0.txt ; 1\ngraph-eval1.txt ; 1\n");

    let coloring = fs::read_to_string(output_dir.join("colo-eval1.txt")).unwrap();
    assert_eq!(coloring, "a; 1\nb; 2\nc; 1\n");
    let coloring = fs::read_to_string(output_dir.join("colo-eval0.txt")).unwrap();
    assert_eq!(coloring.lines().count(), 11);
    assert!(!output_dir.join("colo-eval2.txt").exists());

    fs::remove_dir_all(&root).ok();
}
