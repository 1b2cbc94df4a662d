pub mod collision;
pub mod coloring;
pub mod conflict;
pub mod error;
pub mod geo;
pub mod graph;
pub mod io;
pub mod models;
pub mod rules;
pub mod stats;

pub use collision::{eta_at_point, intersection_point, segments_intersect};
pub use coloring::{dsatur, recursive_largest_first, welsh_powell, Algorithm, CancelFlag};
pub use conflict::{build_conflict_graph, ConflictGraphBuilder};
pub use error::{ColoringError, CoordinateError, ExportError, LookupError, SourceError};
pub use geo::{dms_to_decimal, geo_to_planar, planar_to_geo};
pub use graph::{Graph, Node};
pub use io::{
    export_coloring, export_conflict_summary, export_graph, export_stats, load_airports,
    load_airports_from_path, load_flights, load_flights_from_path, load_graph,
    load_graph_from_path, write_coloring, write_conflict_summary, write_graph, write_stats,
};
pub use models::{Airport, Flight, Point};
pub use rules::{ConflictRules, DEFAULT_DEADLINE_MINUTES};
pub use stats::GraphStats;
