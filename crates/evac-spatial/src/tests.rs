//! Unit tests for evac-spatial.
//!
//! All tests use hand-crafted polyline fixtures so they run without any
//! shapefile input.

#[cfg(test)]
mod helpers {
    use evac_core::Point;

    use crate::{PathResult, RoadNetwork};

    pub fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    /// A 3×1 ladder with a shortcut:
    ///
    /// ```text
    /// (0,1)──(1,1)──(2,1)
    ///   │              │
    /// (0,0)──(1,0)──(2,0)
    /// ```
    ///
    /// All rungs/rails length 1.  Shortest 0,0 → 2,1 is length 3 along
    /// several equal-cost routes.
    pub fn ladder() -> RoadNetwork {
        RoadNetwork::from_polylines(&[
            vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)],
            vec![p(0.0, 1.0), p(1.0, 1.0), p(2.0, 1.0)],
            vec![p(0.0, 0.0), p(0.0, 1.0)],
            vec![p(2.0, 0.0), p(2.0, 1.0)],
        ])
    }

    /// Two separate components: a left segment and a right segment.
    pub fn disconnected() -> RoadNetwork {
        RoadNetwork::from_polylines(&[
            vec![p(0.0, 0.0), p(1.0, 0.0)],
            vec![p(10.0, 0.0), p(11.0, 0.0)],
        ])
    }

    /// Reference Dijkstra over the same CSR arrays, used to validate the A*
    /// heuristic never sacrifices optimality.
    pub fn dijkstra_length(net: &RoadNetwork, from: evac_core::NodeId, to: evac_core::NodeId) -> Option<f64> {
        let n = net.node_count();
        let mut dist = vec![f64::INFINITY; n];
        let mut done = vec![false; n];
        dist[from.index()] = 0.0;
        loop {
            let mut cur = None;
            let mut best = f64::INFINITY;
            for i in 0..n {
                if !done[i] && dist[i] < best {
                    best = dist[i];
                    cur = Some(i);
                }
            }
            let Some(u) = cur else { break };
            done[u] = true;
            for e in net.out_edges(evac_core::NodeId(u as u32)) {
                let v = net.edge_to[e.index()].index();
                let alt = dist[u] + net.edge_length[e.index()];
                if alt < dist[v] {
                    dist[v] = alt;
                }
            }
        }
        let d = dist[to.index()];
        d.is_finite().then_some(d)
    }

    pub fn path_length(result: &PathResult) -> f64 {
        match result {
            PathResult::Path { length, .. } => *length,
            PathResult::NoPath => panic!("expected a path"),
        }
    }
}

// ── PointIndex ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod index {
    use evac_core::Point;

    use super::helpers::p;
    use crate::PointIndex;

    #[test]
    fn empty_index_returns_none() {
        let idx = PointIndex::build(&[]);
        assert!(idx.is_empty());
        assert!(idx.nearest(p(0.0, 0.0)).is_none());
    }

    #[test]
    fn nearest_matches_brute_force() {
        let points: Vec<Point> = (0..20)
            .map(|i| p((i * 7 % 13) as f64, (i * 3 % 11) as f64))
            .collect();
        let idx = PointIndex::build(&points);

        for q in [p(0.3, 0.2), p(6.5, 9.1), p(12.0, 0.0), p(-4.0, 5.0)] {
            let (slot, _) = idx.nearest(q).unwrap();
            let best = points
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| q.distance(**a).total_cmp(&q.distance(**b)))
                .unwrap()
                .0;
            assert_eq!(
                q.distance(points[slot as usize]),
                q.distance(points[best]),
                "query {q}"
            );
        }
    }

    #[test]
    fn equidistant_tie_breaks_to_lowest_slot() {
        // Two points symmetric about the query.
        let points = vec![p(1.0, 0.0), p(-1.0, 0.0), p(0.0, 1.0), p(0.0, -1.0)];
        let idx = PointIndex::build(&points);
        let (slot, _) = idx.nearest(p(0.0, 0.0)).unwrap();
        assert_eq!(slot, 0);
    }

    #[test]
    fn within_radius_filters() {
        let points = vec![p(0.0, 0.0), p(3.0, 0.0), p(10.0, 0.0)];
        let idx = PointIndex::build(&points);
        let mut slots: Vec<u32> = idx.within_radius(p(0.0, 0.0), 5.0).map(|(s, _)| s).collect();
        slots.sort_unstable();
        assert_eq!(slots, vec![0, 1]);
    }
}

// ── Graph construction ────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::helpers::{ladder, p};
    use crate::RoadNetwork;

    #[test]
    fn shared_endpoints_are_one_node() {
        let net = ladder();
        assert_eq!(net.node_count(), 6);
        // 6 undirected segments → 12 directed edges.
        assert_eq!(net.edge_count(), 12);
    }

    #[test]
    fn repeated_edges_are_idempotent() {
        let once = RoadNetwork::from_polylines(&[vec![p(0.0, 0.0), p(1.0, 0.0)]]);
        let thrice = RoadNetwork::from_polylines(&[
            vec![p(0.0, 0.0), p(1.0, 0.0)],
            vec![p(0.0, 0.0), p(1.0, 0.0)],
            vec![p(1.0, 0.0), p(0.0, 0.0)], // reversed direction too
        ]);
        assert_eq!(once.edge_count(), thrice.edge_count());
        assert_eq!(once.fingerprint(), thrice.fingerprint());
    }

    #[test]
    fn degenerate_records_are_skipped() {
        let net = RoadNetwork::from_polylines(&[
            vec![],                                        // no points
            vec![p(5.0, 5.0)],                             // single point
            vec![p(0.0, 0.0), p(0.0, 0.0)],                // zero-length segment
            vec![p(0.0, 0.0), p(1.0, 0.0)],                // the only real road
        ]);
        assert_eq!(net.node_count(), 2);
        assert_eq!(net.edge_count(), 2);
    }

    #[test]
    fn csr_degrees() {
        let net = ladder();
        // Every ladder node has degree 2; the CSR row pointer must agree.
        for i in 0..net.node_count() {
            assert_eq!(net.out_degree(evac_core::NodeId(i as u32)), 2);
        }
        let total: usize = (0..net.node_count())
            .map(|i| net.out_degree(evac_core::NodeId(i as u32)))
            .sum();
        assert_eq!(total, net.edge_count());
    }

    #[test]
    fn snap_picks_nearest_node() {
        let net = ladder();
        let n = net.snap(p(0.1, -0.2)).unwrap();
        assert_eq!(net.node_pos[n.index()], p(0.0, 0.0));
        let n = net.snap(p(1.9, 1.3)).unwrap();
        assert_eq!(net.node_pos[n.index()], p(2.0, 1.0));
    }

    #[test]
    fn snap_empty_network_is_fatal() {
        let net = RoadNetwork::from_polylines(&[]);
        assert!(net.snap(p(0.0, 0.0)).is_err());
    }

    #[test]
    fn fingerprint_tracks_geometry() {
        let a = ladder();
        let b = ladder();
        assert_eq!(a.fingerprint(), b.fingerprint());

        let shifted = RoadNetwork::from_polylines(&[
            vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.5)], // one coordinate differs
            vec![p(0.0, 1.0), p(1.0, 1.0), p(2.0, 1.0)],
            vec![p(0.0, 0.0), p(0.0, 1.0)],
            vec![p(2.0, 0.5), p(2.0, 1.0)],
        ]);
        assert_ne!(a.fingerprint(), shifted.fingerprint());
    }
}

// ── A* routing ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod astar {
    use super::helpers::{dijkstra_length, disconnected, ladder, p, path_length};
    use crate::{PathCache, PathResult};

    #[test]
    fn trivial_same_node() {
        let net = ladder();
        let from = net.snap(p(0.0, 0.0)).unwrap();
        match net.astar(from, from) {
            PathResult::Path { points, length } => {
                assert_eq!(length, 0.0);
                assert_eq!(points, vec![p(0.0, 0.0)]);
            }
            PathResult::NoPath => panic!("same-node query must be a trivial path"),
        }
    }

    #[test]
    fn matches_dijkstra_on_all_pairs() {
        let net = ladder();
        for a in 0..net.node_count() {
            for b in 0..net.node_count() {
                let from = evac_core::NodeId(a as u32);
                let to = evac_core::NodeId(b as u32);
                let baseline = dijkstra_length(&net, from, to);
                match (net.astar(from, to), baseline) {
                    (PathResult::Path { length, .. }, Some(d)) => {
                        assert!((length - d).abs() < 1e-9, "{a}->{b}: {length} vs {d}");
                    }
                    (PathResult::NoPath, None) => {}
                    (got, want) => panic!("{a}->{b}: {got:?} vs {want:?}"),
                }
            }
        }
    }

    #[test]
    fn path_points_trace_graph_edges() {
        let net = ladder();
        let mut cache = PathCache::new();
        let result = net.shortest_path(&mut cache, p(0.0, 0.0), p(2.0, 1.0)).unwrap();
        let PathResult::Path { points, length } = result else {
            panic!("ladder is connected");
        };
        assert!((length - 3.0).abs() < 1e-9);
        // Consecutive points are unit-length neighbours on the ladder.
        for pair in points.windows(2) {
            assert!((pair[0].distance(pair[1]) - 1.0).abs() < 1e-9);
        }
        assert_eq!(points.first().copied(), Some(p(0.0, 0.0)));
        assert_eq!(points.last().copied(), Some(p(2.0, 1.0)));
    }

    #[test]
    fn disconnected_is_no_path() {
        let net = disconnected();
        let mut cache = PathCache::new();
        let result = net.shortest_path(&mut cache, p(0.0, 0.0), p(11.0, 0.0)).unwrap();
        assert_eq!(result, PathResult::NoPath);
        // And the negative result is cached, not recomputed into an error.
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn endpoints_snap_before_search() {
        let net = ladder();
        let mut cache = PathCache::new();
        // Off-network query points snap to (0,0) and (2,1).
        let snapped = net.shortest_path(&mut cache, p(-0.4, 0.1), p(2.3, 0.9)).unwrap();
        let exact = net.shortest_path(&mut cache, p(0.0, 0.0), p(2.0, 1.0)).unwrap();
        assert_eq!(snapped, exact);
        assert_eq!(cache.len(), 1, "both queries share one cache entry");
        assert!((path_length(&exact) - 3.0).abs() < 1e-9);
    }
}

// ── Cache behaviour & persistence ─────────────────────────────────────────────

#[cfg(test)]
mod cache {
    use super::helpers::{disconnected, ladder, p};
    use crate::{PathCache, PathResult, load_cache, save_cache};

    #[test]
    fn repeated_queries_return_first_computation() {
        let net = ladder();
        let mut cache = PathCache::new();
        let first = net.shortest_path(&mut cache, p(0.0, 0.0), p(2.0, 1.0)).unwrap();
        for _ in 0..3 {
            let again = net.shortest_path(&mut cache, p(0.0, 0.0), p(2.0, 1.0)).unwrap();
            assert_eq!(first, again);
        }
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn no_path_is_cached_too() {
        let net = disconnected();
        let mut cache = PathCache::new();
        let a = net.shortest_path(&mut cache, p(0.0, 0.0), p(10.0, 0.0)).unwrap();
        let b = net.shortest_path(&mut cache, p(0.0, 0.0), p(10.0, 0.0)).unwrap();
        assert_eq!(a, PathResult::NoPath);
        assert_eq!(b, PathResult::NoPath);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn batch_precompute_fills_cross_product() {
        let net = ladder();
        let mut cache = PathCache::new();
        let origins = [p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)];
        let destinations = [p(2.0, 0.0), p(2.0, 1.0)];
        net.batch_precompute(&mut cache, &origins, &destinations).unwrap();
        assert_eq!(cache.len(), 6);
        // Post-precompute queries are pure lookups: identical results.
        let hit = net.shortest_path(&mut cache, p(0.0, 0.0), p(2.0, 1.0)).unwrap();
        assert!(hit.is_path());
        assert_eq!(cache.len(), 6);
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("paths.json");

        let net = ladder();
        let mut cache = PathCache::new();
        net.batch_precompute(&mut cache, &[p(0.0, 0.0)], &[p(2.0, 1.0)]).unwrap();
        save_cache(&file, &net, &cache).unwrap();

        let loaded = load_cache(&file, &net).unwrap().expect("fingerprint matches");
        assert_eq!(loaded.len(), cache.len());
        let from = net.snap(p(0.0, 0.0)).unwrap();
        let to = net.snap(p(2.0, 1.0)).unwrap();
        assert_eq!(loaded.get(from, to), cache.get(from, to));
    }

    #[test]
    fn fingerprint_mismatch_forces_rebuild() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("paths.json");

        let net = ladder();
        let mut cache = PathCache::new();
        net.batch_precompute(&mut cache, &[p(0.0, 0.0)], &[p(2.0, 1.0)]).unwrap();
        save_cache(&file, &net, &cache).unwrap();

        // A different graph must refuse the persisted cache.
        let other = disconnected();
        assert!(load_cache(&file, &other).unwrap().is_none());
    }

    #[test]
    fn missing_and_corrupt_files_mean_rebuild() {
        let dir = tempfile::tempdir().unwrap();
        let net = ladder();

        let missing = dir.path().join("nope.json");
        assert!(load_cache(&missing, &net).unwrap().is_none());

        let corrupt = dir.path().join("corrupt.json");
        std::fs::write(&corrupt, b"{ not json").unwrap();
        assert!(load_cache(&corrupt, &net).unwrap().is_none());
    }
}
