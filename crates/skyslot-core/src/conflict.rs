//! Conflict graph construction from a flight schedule.
//!
//! Two flights conflict when their straight departure→arrival paths cross on
//! the projected plane and both reach the crossing point within the
//! configured deadline of each other.

use std::collections::HashMap;

use crate::collision::{eta_at_point, flight_endpoints, intersection_point};
use crate::error::LookupError;
use crate::graph::Graph;
use crate::models::{Airport, Flight, Point};
use crate::rules::ConflictRules;

/// Builds conflict graphs whose nodes are flight ids.
#[derive(Debug, Clone, Default)]
pub struct ConflictGraphBuilder {
    pub rules: ConflictRules,
}

impl ConflictGraphBuilder {
    /// Create a builder with a custom deadline in minutes.
    pub fn new(deadline_minutes: i64) -> Self {
        Self {
            rules: ConflictRules { deadline_minutes },
        }
    }

    pub fn with_rules(rules: ConflictRules) -> Self {
        Self { rules }
    }

    /// Build the conflict graph for `flights`.
    ///
    /// Every flight becomes a node, even without conflicts. The returned graph
    /// carries no kmax. Fails if any flight references an unknown airport.
    pub fn build(
        &self,
        airports: &HashMap<String, Airport>,
        flights: &[Flight],
    ) -> Result<Graph, LookupError> {
        let mut graph = Graph::new("flight-conflicts");

        let mut segments: Vec<(Point, Point)> = Vec::with_capacity(flights.len());
        for flight in flights {
            let (departure, arrival) = flight_endpoints(flight, airports)?;
            segments.push((departure.position, arrival.position));
            graph.add_node(&flight.id);
        }

        // Pairwise by construction: every pair of paths may cross.
        for i in 0..flights.len() {
            for j in (i + 1)..flights.len() {
                let (a, b) = segments[i];
                let (c, d) = segments[j];
                let Some(crossing) = intersection_point(a, b, c, d) else {
                    continue;
                };

                let eta1 = eta_at_point(crossing, &flights[i], airports)?;
                let eta2 = eta_at_point(crossing, &flights[j], airports)?;
                let gap = (eta1 - eta2).num_minutes().abs();

                if gap < self.rules.deadline_minutes {
                    tracing::trace!(
                        flight1 = %flights[i].id,
                        flight2 = %flights[j].id,
                        gap_minutes = gap,
                        "flights conflict"
                    );
                    graph.add_edge(&flights[i].id, &flights[j].id);
                }
            }
        }

        Ok(graph)
    }
}

/// Build a conflict graph with the default 15 minute deadline.
pub fn build_conflict_graph(
    airports: &HashMap<String, Airport>,
    flights: &[Flight],
) -> Result<Graph, LookupError> {
    ConflictGraphBuilder::default().build(airports, flights)
}
