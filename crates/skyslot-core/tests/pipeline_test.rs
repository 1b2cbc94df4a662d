use std::fs;
use std::path::PathBuf;

use skyslot_core::{
    build_conflict_graph, export_coloring, export_graph, export_stats, load_airports,
    load_airports_from_path, load_flights, load_flights_from_path, load_graph_from_path,
    Algorithm, ConflictGraphBuilder, GraphStats,
};

const AIRPORTS: &str = "\
MRS;Marseille;43;26;8;N;5;12;49;E
BES;Brest;48;26;52;N;4;25;6;O
LYS;Lyon;45;43;34;N;5;5;27;E
BOD;Bordeaux;44;49;42;N;0;42;56;O
NCE;Nice;43;39;56;N;7;12;55;E
CDG;Paris;49;0;35;N;2;32;52;E
ORY;Orly;;;;;;;;
";

const FLIGHTS: &str = "\
AF000090;MRS;BES;7;33;81
AF000132;LYS;BOD;7;34;47
AF000200;NCE;CDG;7;40;90
AF000201;NCE;CDG;7;x;90
";

fn scratch_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("skyslot-{test}-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn schedule_to_coloring_and_stats() {
    let dir = scratch_dir("pipeline");
    let airports_path = dir.join("airports.csv");
    let flights_path = dir.join("flights.csv");
    fs::write(&airports_path, AIRPORTS).unwrap();
    fs::write(&flights_path, FLIGHTS).unwrap();

    let airports = load_airports_from_path(&airports_path).unwrap();
    let flights = load_flights_from_path(&flights_path).unwrap();
    assert_eq!(airports.len(), 6);
    assert_eq!(flights.len(), 3);

    let mut graph = build_conflict_graph(&airports, &flights).unwrap();
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 1);
    assert!(graph.has_edge("AF000090", "AF000132"));

    let stats = GraphStats::compute(&graph);
    assert_eq!(stats.connected_components, 2);
    assert_eq!(stats.diameter, None);
    assert_eq!(stats.conflicts, None);

    assert_eq!(Algorithm::Dsatur.color(&mut graph, 1).unwrap(), 1);
    assert_eq!(Algorithm::WelshPowell.color(&mut graph, 2).unwrap(), 0);

    let coloring_path = dir.join("coloring.txt");
    export_coloring(&graph, &coloring_path).unwrap();
    assert_eq!(
        fs::read_to_string(&coloring_path).unwrap(),
        "AF000090; 1\nAF000132; 2\nAF000200; 1\n"
    );

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn exported_graph_reloads_under_its_file_name() {
    let dir = scratch_dir("reload");
    let airports_path = dir.join("airports.csv");
    let flights_path = dir.join("flights.csv");
    fs::write(&airports_path, AIRPORTS).unwrap();
    fs::write(&flights_path, FLIGHTS).unwrap();

    let airports = load_airports_from_path(&airports_path).unwrap();
    let flights = load_flights_from_path(&flights_path).unwrap();
    let graph = ConflictGraphBuilder::new(15)
        .build(&airports, &flights)
        .unwrap()
        .with_kmax(2);

    let graph_path = dir.join("graph-eval0.txt");
    export_graph(&graph, &graph_path).unwrap();
    assert_eq!(
        fs::read_to_string(&graph_path).unwrap(),
        "2\n3\nAF000090 AF000132\n"
    );

    // The isolated flight is not part of the edge list.
    let mut reloaded = load_graph_from_path(&graph_path).unwrap();
    assert_eq!(reloaded.name(), "graph-eval0.txt");
    assert_eq!(reloaded.kmax(), Some(2));
    assert_eq!(reloaded.node_count(), 2);

    Algorithm::RecursiveLargestFirst
        .color_with_graph_kmax(&mut reloaded)
        .unwrap();
    let stats = GraphStats::compute(&reloaded);
    let stats_path = dir.join("stats.csv");
    export_stats(&stats, &stats_path).unwrap();
    assert_eq!(
        fs::read_to_string(&stats_path).unwrap(),
        "nomduFichier;noeuds;arret;degres;nbComposantes;diametre;nbConflits\n\
         graph-eval0.txt;2;1;1.0;1;1.0;0\n"
    );

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn tighter_deadline_drops_the_conflict() {
    let dir = scratch_dir("deadline");
    let airports_path = dir.join("airports.csv");
    let flights_path = dir.join("flights.csv");
    fs::write(&airports_path, AIRPORTS).unwrap();
    fs::write(&flights_path, FLIGHTS).unwrap();

    let airports = load_airports_from_path(&airports_path).unwrap();
    let flights = load_flights_from_path(&flights_path).unwrap();
    let graph = ConflictGraphBuilder::new(3).build(&airports, &flights).unwrap();
    assert_eq!(graph.edge_count(), 0);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn crossing_flights_form_one_component() {
    let airports = load_airports(AIRPORTS.as_bytes()).unwrap();
    let flights: Vec<_> = load_flights(FLIGHTS.as_bytes())
        .unwrap()
        .into_iter()
        .filter(|flight| flight.id != "AF000200")
        .collect();
    assert_eq!(flights.len(), 2);

    let graph = build_conflict_graph(&airports, &flights).unwrap();
    let stats = GraphStats::compute(&graph);
    assert_eq!(stats.node_count, 2);
    assert_eq!(stats.edge_count, 1);
    assert!((stats.average_degree - 1.0).abs() < 1e-12);
    assert_eq!(stats.connected_components, 1);
    assert_eq!(stats.diameter, Some(1.0));
}
