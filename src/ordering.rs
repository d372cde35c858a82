//! Netlist ordering heuristics.
//!
//! The router claims grid cells greedily, so the order in which connections are
//! attempted decides which wires get the short paths. Every strategy here
//! returns a permutation of its input; ties keep their input order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashMap;

use crate::chip::ChipLayout;
use crate::error::{Error, Result};
use crate::types::{Connection, GateId, Location};

/// Heuristic used to order the netlist before routing
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum OrderStrategy {
    /// Uniform random permutation, fresh on every call
    Random,
    /// Input order reversed
    Reverse,
    /// Shortest gate-to-gate distance first
    Short,
    /// Longest gate-to-gate distance first
    Long,
    /// Lowest busiest-endpoint degree first
    LeastConnections,
    /// Highest busiest-endpoint degree first
    MostConnections,
    /// Lowest summed endpoint degree first
    SumLowest,
    /// Highest summed endpoint degree first
    SumHighest,
    /// Connections nearest the grid center first
    Middle,
    /// Connections furthest from the grid center first
    Outside,
    /// Same-quadrant connections first, longer ones leading
    IntraQuadrant,
    /// Cross-quadrant connections first, shorter ones leading
    InterQuadrant,
}

impl OrderStrategy {
    pub const ALL: [OrderStrategy; 12] = [
        OrderStrategy::Random,
        OrderStrategy::Reverse,
        OrderStrategy::Short,
        OrderStrategy::Long,
        OrderStrategy::LeastConnections,
        OrderStrategy::MostConnections,
        OrderStrategy::SumLowest,
        OrderStrategy::SumHighest,
        OrderStrategy::Middle,
        OrderStrategy::Outside,
        OrderStrategy::IntraQuadrant,
        OrderStrategy::InterQuadrant,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OrderStrategy::Random => "random",
            OrderStrategy::Reverse => "reverse",
            OrderStrategy::Short => "short",
            OrderStrategy::Long => "long",
            OrderStrategy::LeastConnections => "least-connections",
            OrderStrategy::MostConnections => "most-connections",
            OrderStrategy::SumLowest => "sum-lowest",
            OrderStrategy::SumHighest => "sum-highest",
            OrderStrategy::Middle => "middle",
            OrderStrategy::Outside => "outside",
            OrderStrategy::IntraQuadrant => "intra-quadrant",
            OrderStrategy::InterQuadrant => "inter-quadrant",
        }
    }

    /// Lenient lookup: `None` for names that match no strategy
    pub fn from_name(name: &str) -> Option<Self> {
        OrderStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.name() == name)
    }
}

impl fmt::Display for OrderStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OrderStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        OrderStrategy::from_name(s).ok_or_else(|| Error::UnknownStrategy { name: s.to_string() })
    }
}

/// Order `connections` by `name`, falling back to the input order when the
/// name is not a known strategy.
pub fn change_netlist_order(
    connections: &[Connection],
    name: &str,
    chip: &ChipLayout,
) -> Result<Vec<Connection>> {
    match OrderStrategy::from_name(name) {
        Some(strategy) => reorder(connections, strategy, chip),
        None => {
            tracing::debug!(name, "unknown order strategy, keeping netlist order");
            Ok(connections.to_vec())
        }
    }
}

/// Order `connections` with `strategy`, drawing randomness from the thread RNG.
pub fn reorder(
    connections: &[Connection],
    strategy: OrderStrategy,
    chip: &ChipLayout,
) -> Result<Vec<Connection>> {
    reorder_with_rng(connections, strategy, chip, &mut rand::rng())
}

/// Order `connections` with `strategy`. Only [`OrderStrategy::Random`] reads `rng`.
///
/// Fails with [`Error::UnknownGate`] when a location-based strategy meets a
/// gate missing from `chip`.
pub fn reorder_with_rng<R: Rng + ?Sized>(
    connections: &[Connection],
    strategy: OrderStrategy,
    chip: &ChipLayout,
    rng: &mut R,
) -> Result<Vec<Connection>> {
    tracing::debug!(
        strategy = strategy.name(),
        connections = connections.len(),
        "ordering netlist"
    );

    let ordered = match strategy {
        OrderStrategy::Random => {
            let mut shuffled = connections.to_vec();
            shuffled.shuffle(rng);
            shuffled
        }
        OrderStrategy::Reverse => connections.iter().rev().copied().collect(),
        OrderStrategy::Short | OrderStrategy::Long => {
            let keys = keyed(connections, |&(a, b)| {
                Ok(chip.require(a)?.distance_2d(&chip.require(b)?))
            })?;
            sorted(keys, |x, y| directed(x.total_cmp(y), strategy == OrderStrategy::Long))
        }
        OrderStrategy::LeastConnections | OrderStrategy::MostConnections => {
            let counts = degrees(connections);
            let keys = keyed(connections, |&(a, b)| {
                Ok(degree(&counts, a).max(degree(&counts, b)))
            })?;
            sorted(keys, |x, y| directed(x.cmp(y), strategy == OrderStrategy::MostConnections))
        }
        OrderStrategy::SumLowest | OrderStrategy::SumHighest => {
            let counts = degrees(connections);
            let keys = keyed(connections, |&(a, b)| Ok(degree(&counts, a) + degree(&counts, b)))?;
            sorted(keys, |x, y| directed(x.cmp(y), strategy == OrderStrategy::SumHighest))
        }
        OrderStrategy::Middle | OrderStrategy::Outside => {
            let (cx, cy) = chip.center();
            let keys = keyed(connections, |&(a, b)| {
                let da = chip.require(a)?.distance_to_point(cx, cy);
                let db = chip.require(b)?.distance_to_point(cx, cy);
                Ok(da.max(db))
            })?;
            sorted(keys, |x, y| directed(x.total_cmp(y), strategy == OrderStrategy::Outside))
        }
        OrderStrategy::IntraQuadrant | OrderStrategy::InterQuadrant => {
            let center = chip.center();
            let keys = keyed(connections, |&(a, b)| {
                let la = chip.require(a)?;
                let lb = chip.require(b)?;
                Ok(QuadrantKey {
                    same_quadrant: quadrant_index(&la, center) == quadrant_index(&lb, center),
                    distance: la.distance_2d(&lb),
                })
            })?;
            sorted(keys, |x, y| directed(x.intra_cmp(y), strategy == OrderStrategy::InterQuadrant))
        }
    };

    Ok(ordered)
}

/// Composite key for the quadrant strategies
#[derive(Clone, Copy, Debug)]
struct QuadrantKey {
    same_quadrant: bool,
    distance: f64,
}

impl QuadrantKey {
    /// Same-quadrant before cross-quadrant, then longer before shorter
    fn intra_cmp(&self, other: &Self) -> Ordering {
        other
            .same_quadrant
            .cmp(&self.same_quadrant)
            .then_with(|| other.distance.total_cmp(&self.distance))
    }
}

/// Quadrant 0-3 around `center`. Points on a center line belong to the lower half.
pub fn quadrant_index(location: &Location, center: (f64, f64)) -> u8 {
    let (cx, cy) = center;
    let upper_x = location.x as f64 > cx;
    let upper_y = location.y as f64 > cy;
    match (upper_x, upper_y) {
        (false, false) => 0,
        (true, false) => 1,
        (false, true) => 2,
        (true, true) => 3,
    }
}

/// Count how often each gate appears across the whole netlist
fn degrees(connections: &[Connection]) -> FxHashMap<GateId, usize> {
    let mut counts: FxHashMap<GateId, usize> = FxHashMap::default();
    for &(a, b) in connections {
        *counts.entry(a).or_insert(0) += 1;
        *counts.entry(b).or_insert(0) += 1;
    }
    counts
}

#[inline]
fn degree(degrees: &FxHashMap<GateId, usize>, gate: GateId) -> usize {
    degrees.get(&gate).copied().unwrap_or(0)
}

#[inline]
fn directed(ordering: Ordering, descending: bool) -> Ordering {
    if descending {
        ordering.reverse()
    } else {
        ordering
    }
}

/// Compute each connection's sort key once
fn keyed<K, F>(connections: &[Connection], mut key: F) -> Result<Vec<(K, Connection)>>
where
    F: FnMut(&Connection) -> Result<K>,
{
    connections
        .iter()
        .map(|connection| Ok((key(connection)?, *connection)))
        .collect()
}

/// Stable sort on precomputed keys
fn sorted<K, F>(mut keyed: Vec<(K, Connection)>, mut compare: F) -> Vec<Connection>
where
    F: FnMut(&K, &K) -> Ordering,
{
    keyed.sort_by(|x, y| compare(&x.0, &y.0));
    keyed.into_iter().map(|(_, connection)| connection).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Gates on the x axis: 1 at 0, 2 at 1, 3 at 3, 4 at 6
    fn line_layout() -> ChipLayout {
        ChipLayout::new(10, 10, 8).with_gates([
            (1, Location::new(0, 0, 0)),
            (2, Location::new(1, 0, 0)),
            (3, Location::new(3, 0, 0)),
            (4, Location::new(6, 0, 0)),
        ])
    }

    /// Center (5, 5); gates 1, 2 in quadrant 0 and 3, 4 in quadrant 3
    fn quadrant_layout() -> ChipLayout {
        ChipLayout::new(10, 10, 8).with_gates([
            (1, Location::new(1, 1, 0)),
            (2, Location::new(2, 2, 0)),
            (3, Location::new(9, 9, 0)),
            (4, Location::new(8, 8, 0)),
        ])
    }

    fn order(
        connections: &[Connection],
        strategy: OrderStrategy,
        chip: &ChipLayout,
    ) -> Vec<Connection> {
        let mut rng = StdRng::seed_from_u64(7);
        reorder_with_rng(connections, strategy, chip, &mut rng).unwrap()
    }

    fn multiset(connections: &[Connection]) -> Vec<Connection> {
        let mut sorted = connections.to_vec();
        sorted.sort_unstable();
        sorted
    }

    #[test]
    fn names_round_trip() {
        for strategy in OrderStrategy::ALL {
            assert_eq!(strategy.name().parse::<OrderStrategy>(), Ok(strategy));
            assert_eq!(strategy.to_string(), strategy.name());
        }
        assert_eq!(OrderStrategy::from_name("diagonal"), None);
        assert_eq!(
            "diagonal".parse::<OrderStrategy>(),
            Err(Error::UnknownStrategy { name: "diagonal".to_string() })
        );
    }

    #[test]
    fn every_strategy_is_a_permutation() {
        let layout = quadrant_layout();
        let connections = vec![(1, 3), (1, 2), (2, 4), (3, 4), (1, 2), (4, 1)];
        for strategy in OrderStrategy::ALL {
            let ordered = order(&connections, strategy, &layout);
            assert_eq!(ordered.len(), connections.len(), "{strategy}");
            assert_eq!(multiset(&ordered), multiset(&connections), "{strategy}");
        }
    }

    #[test]
    fn empty_netlist_stays_empty() {
        let layout = ChipLayout::new(0, 0, 0);
        for strategy in OrderStrategy::ALL {
            assert!(order(&[], strategy, &layout).is_empty());
        }
    }

    #[test]
    fn reverse_flips_input() {
        let connections = vec![(1, 2), (3, 4), (2, 3)];
        assert_eq!(
            order(&connections, OrderStrategy::Reverse, &line_layout()),
            vec![(2, 3), (3, 4), (1, 2)]
        );
    }

    #[test]
    fn short_and_long_by_distance() {
        let layout = line_layout();
        let connections = vec![(1, 4), (1, 2), (2, 3), (3, 4)];
        let short = order(&connections, OrderStrategy::Short, &layout);
        assert_eq!(short, vec![(1, 2), (2, 3), (3, 4), (1, 4)]);

        let mut long = order(&connections, OrderStrategy::Long, &layout);
        long.reverse();
        assert_eq!(long, short);
    }

    #[test]
    fn distance_ties_keep_input_order() {
        let layout = line_layout();
        // (1, 3) and (3, 4) are both 3 apart; (1, 2) and (2, 1) both 1
        let connections = vec![(1, 3), (1, 2), (2, 1), (3, 4)];
        assert_eq!(
            order(&connections, OrderStrategy::Short, &layout),
            vec![(1, 2), (2, 1), (1, 3), (3, 4)]
        );
        assert_eq!(
            order(&connections, OrderStrategy::Long, &layout),
            vec![(1, 3), (3, 4), (1, 2), (2, 1)]
        );
    }

    #[test]
    fn distance_uses_only_x_and_y() {
        let layout = ChipLayout::new(10, 10, 8).with_gates([
            (1, Location::new(0, 0, 0)),
            (2, Location::new(0, 0, 7)),
            (3, Location::new(1, 0, 0)),
        ]);
        // (1, 2) is stacked vertically, so it is the shortest pair
        assert_eq!(
            order(&[(1, 3), (1, 2)], OrderStrategy::Short, &layout),
            vec![(1, 2), (1, 3)]
        );
    }

    #[test]
    fn connection_degree_strategies() {
        // Gate 1 appears three times, everything else once
        let connections = vec![(1, 2), (5, 6), (1, 3), (1, 4)];
        let layout = ChipLayout::default();

        let least = order(&connections, OrderStrategy::LeastConnections, &layout);
        assert_eq!(least, vec![(5, 6), (1, 2), (1, 3), (1, 4)]);

        let most = order(&connections, OrderStrategy::MostConnections, &layout);
        assert_eq!(most, vec![(1, 2), (1, 3), (1, 4), (5, 6)]);

        let lowest = order(&connections, OrderStrategy::SumLowest, &layout);
        assert_eq!(lowest, least);
        let highest = order(&connections, OrderStrategy::SumHighest, &layout);
        assert_eq!(highest, most);
    }

    #[test]
    fn max_and_sum_degree_differ() {
        // degrees: 1 -> 3, 2 -> 2, 3 -> 2, 4 -> 1, 5 -> 1, 6 -> 1
        let connections = vec![(1, 4), (2, 3), (1, 2), (1, 3), (5, 6)];
        let layout = ChipLayout::default();
        // max: (1,4)=3 (2,3)=2 (1,2)=3 (1,3)=3 (5,6)=1
        assert_eq!(
            order(&connections, OrderStrategy::LeastConnections, &layout),
            vec![(5, 6), (2, 3), (1, 4), (1, 2), (1, 3)]
        );
        // sum: (1,4)=4 (2,3)=4 (1,2)=5 (1,3)=5 (5,6)=2
        assert_eq!(
            order(&connections, OrderStrategy::SumLowest, &layout),
            vec![(5, 6), (1, 4), (2, 3), (1, 2), (1, 3)]
        );
    }

    #[test]
    fn equal_degree_sums_leave_order_unchanged() {
        let connections = vec![(1, 2), (2, 3), (1, 3)];
        let layout = ChipLayout::default();
        assert_eq!(order(&connections, OrderStrategy::SumLowest, &layout), connections);
        assert_eq!(order(&connections, OrderStrategy::SumHighest, &layout), connections);
    }

    #[test]
    fn middle_and_outside_by_center_distance() {
        let layout = ChipLayout::new(10, 10, 8).with_gates([
            (1, Location::new(5, 5, 0)),
            (2, Location::new(6, 5, 0)),
            (3, Location::new(0, 0, 0)),
            (4, Location::new(9, 5, 0)),
        ]);
        let connections = vec![(3, 4), (1, 2), (1, 4)];
        let middle = order(&connections, OrderStrategy::Middle, &layout);
        assert_eq!(middle, vec![(1, 2), (1, 4), (3, 4)]);

        let mut outside = order(&connections, OrderStrategy::Outside, &layout);
        outside.reverse();
        assert_eq!(outside, middle);
    }

    #[test]
    fn quadrant_boundaries_fall_to_lower_half() {
        let center = (5.0, 5.0);
        assert_eq!(quadrant_index(&Location::new(5, 5, 0), center), 0);
        assert_eq!(quadrant_index(&Location::new(6, 5, 0), center), 1);
        assert_eq!(quadrant_index(&Location::new(5, 6, 0), center), 2);
        assert_eq!(quadrant_index(&Location::new(6, 6, 0), center), 3);
        // Fractional centers split odd grids
        assert_eq!(quadrant_index(&Location::new(3, 3, 0), (3.5, 3.5)), 0);
        assert_eq!(quadrant_index(&Location::new(4, 3, 0), (3.5, 3.5)), 1);
    }

    #[test]
    fn intra_quadrant_ranks_same_quadrant_first() {
        let layout = quadrant_layout();
        let connections = vec![(1, 3), (1, 2), (2, 4), (3, 4)];
        let ordered = order(&connections, OrderStrategy::IntraQuadrant, &layout);
        // Same-quadrant pairs tie on distance and keep input order; cross pairs go longest first
        assert_eq!(ordered, vec![(1, 2), (3, 4), (1, 3), (2, 4)]);
    }

    #[test]
    fn inter_quadrant_reverses_the_composite_key() {
        let layout = quadrant_layout();
        let connections = vec![(1, 3), (1, 2), (2, 4), (3, 4)];
        let ordered = order(&connections, OrderStrategy::InterQuadrant, &layout);
        assert_eq!(ordered, vec![(2, 4), (1, 3), (1, 2), (3, 4)]);
    }

    #[test]
    fn same_quadrant_pairs_sort_longest_first() {
        let layout = ChipLayout::new(10, 10, 8).with_gates([
            (1, Location::new(0, 0, 0)),
            (2, Location::new(1, 0, 0)),
            (3, Location::new(4, 4, 0)),
        ]);
        assert_eq!(
            order(&[(1, 2), (1, 3)], OrderStrategy::IntraQuadrant, &layout),
            vec![(1, 3), (1, 2)]
        );
    }

    #[test]
    fn random_is_reproducible_with_seeded_rng() {
        let connections: Vec<Connection> = (0..10).map(|i| (i, i + 1)).collect();
        let layout = ChipLayout::default();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(
            reorder_with_rng(&connections, OrderStrategy::Random, &layout, &mut a).unwrap(),
            reorder_with_rng(&connections, OrderStrategy::Random, &layout, &mut b).unwrap()
        );
    }

    #[test]
    fn random_changes_order_across_calls() {
        let connections: Vec<Connection> = (0..8).map(|i| (i, i + 1)).collect();
        let layout = ChipLayout::default();
        let changed = (0..20).any(|_| {
            reorder(&connections, OrderStrategy::Random, &layout).unwrap() != connections
        });
        assert!(changed);
    }

    #[test]
    fn unknown_gate_is_reported() {
        let layout = line_layout();
        for strategy in [
            OrderStrategy::Short,
            OrderStrategy::Middle,
            OrderStrategy::IntraQuadrant,
        ] {
            assert_eq!(
                reorder(&[(1, 2), (1, 99)], strategy, &layout),
                Err(Error::UnknownGate { gate: 99 })
            );
        }
        // Degree strategies never look gates up
        assert!(reorder(&[(1, 99)], OrderStrategy::SumLowest, &layout).is_ok());
    }

    #[test]
    fn unknown_name_keeps_input_order() {
        let connections = vec![(3, 4), (1, 2), (2, 3)];
        let layout = line_layout();
        assert_eq!(
            change_netlist_order(&connections, "zigzag", &layout).unwrap(),
            connections
        );
        assert_eq!(
            change_netlist_order(&connections, "reverse", &layout).unwrap(),
            vec![(2, 3), (1, 2), (3, 4)]
        );
    }
}
