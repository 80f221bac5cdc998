//! Breadth-first pathfinding over the tile grid.
//!
//! Paths are measured in cell count over the 4-neighborhood; there are no
//! edge weights. Neighbor expansion order is fixed, so results are
//! deterministic, though among equal-length paths the choice is arbitrary.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::grid::{Cell, TileLayer};

/// BFS neighbor expansion order: +x, -x, +y, -y.
const BFS_NEIGHBORS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Adjacency probe order around a target: west, east, north, south.
const ADJACENT_ORDER: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Finds a shortest path from `start` to `goal`.
///
/// The returned path excludes `start` and ends at `goal`; an empty path
/// means the avatar is already there. Returns `None` when `goal` cannot be
/// reached through walkable cells.
pub fn find_path(layer: &impl TileLayer, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
    let mut queue = VecDeque::from([start]);
    let mut discovered = HashSet::from([start]);
    let mut parent: HashMap<Cell, Cell> = HashMap::new();

    while let Some(cell) = queue.pop_front() {
        if cell == goal {
            return Some(reconstruct_path(&parent, start, goal));
        }

        for (dx, dy) in BFS_NEIGHBORS {
            let next = cell.offset(dx, dy);
            if layer.is_walkable(next) && !discovered.contains(&next) {
                discovered.insert(next);
                parent.insert(next, cell);
                queue.push_back(next);
            }
        }
    }

    None
}

/// Finds a path that stops on a walkable cell orthogonally adjacent to
/// `target`, for targets that are not meant to be stood on.
///
/// Probes the four neighbors in fixed order and returns the first that is
/// walkable and reachable. Returns `None` when every neighbor is blocked
/// or unreachable.
pub fn find_adjacent_path(layer: &impl TileLayer, start: Cell, target: Cell) -> Option<Vec<Cell>> {
    for (dx, dy) in ADJACENT_ORDER {
        let neighbor = target.offset(dx, dy);
        if layer.is_walkable(neighbor) {
            if let Some(path) = find_path(layer, start, neighbor) {
                return Some(path);
            }
        }
    }
    None
}

/// Routes toward a target cell: walkable-behind targets are entered
/// directly, anything else is approached to an adjacent cell.
pub fn find_route(layer: &impl TileLayer, start: Cell, target: Cell) -> Option<Vec<Cell>> {
    if layer.classify(target).is_behind() {
        find_path(layer, start, target)
    } else {
        find_adjacent_path(layer, start, target)
    }
}

/// Walks the parent map back from `goal`, yielding a start-exclusive path
/// in start-to-goal order.
fn reconstruct_path(parent: &HashMap<Cell, Cell>, start: Cell, goal: Cell) -> Vec<Cell> {
    let mut path = Vec::new();
    let mut current = goal;
    while current != start {
        path.push(current);
        current = parent[&current];
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::TileMap;

    #[test]
    fn test_find_path_straight_line() {
        // The concrete scenario from the kitchen scene: open 8x8 floor,
        // avatar two cells above the goal.
        let map = TileMap::filled(8, 8, 0);
        let path = find_path(&map, Cell::new(4, 5), Cell::new(4, 7)).unwrap();
        assert_eq!(path, vec![Cell::new(4, 6), Cell::new(4, 7)]);
    }

    #[test]
    fn test_find_path_start_equals_goal() {
        let map = TileMap::filled(4, 4, 0);
        let path = find_path(&map, Cell::new(2, 2), Cell::new(2, 2)).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn test_find_path_around_obstacle() {
        // A wall splits the map except for a gap at the bottom.
        let map = TileMap::from_csv(
            "0,24,0\n\
             0,24,0\n\
             0,0,0",
        )
        .unwrap();
        let path = find_path(&map, Cell::new(0, 0), Cell::new(2, 0)).unwrap();
        // Shortest route goes down, across the gap, and back up: 6 steps.
        assert_eq!(path.len(), 6);
        assert_eq!(*path.last().unwrap(), Cell::new(2, 0));
        // Every step is walkable and 4-adjacent to its predecessor.
        let mut previous = Cell::new(0, 0);
        for cell in &path {
            assert!(map.is_walkable(*cell));
            assert_eq!((cell.x - previous.x).abs() + (cell.y - previous.y).abs(), 1);
            previous = *cell;
        }
    }

    #[test]
    fn test_find_path_unreachable() {
        let map = TileMap::from_csv(
            "0,24,0\n\
             0,24,0\n\
             0,24,0",
        )
        .unwrap();
        assert!(find_path(&map, Cell::new(0, 0), Cell::new(2, 2)).is_none());
    }

    #[test]
    fn test_find_path_goal_not_walkable() {
        let map = TileMap::from_csv("0,24\n0,0").unwrap();
        assert!(find_path(&map, Cell::new(0, 0), Cell::new(1, 0)).is_none());
    }

    #[test]
    fn test_find_path_lengths_match_manhattan_on_open_grid() {
        // On an open grid the true graph distance is Manhattan distance.
        let map = TileMap::filled(6, 6, 0);
        let start = Cell::new(1, 1);
        for x in 0..6 {
            for y in 0..6 {
                let goal = Cell::new(x, y);
                let path = find_path(&map, start, goal).unwrap();
                let expected = (x - start.x).abs() + (y - start.y).abs();
                assert_eq!(path.len() as i32, expected, "goal {}", goal);
            }
        }
    }

    #[test]
    fn test_find_path_enters_behind_tiles() {
        let map = TileMap::from_csv("0,110\n0,0").unwrap();
        let path = find_path(&map, Cell::new(0, 0), Cell::new(1, 0)).unwrap();
        assert_eq!(path, vec![Cell::new(1, 0)]);
    }

    #[test]
    fn test_find_adjacent_path_stops_next_to_target() {
        // Target is a blocked counter tile in the middle of open floor.
        let map = TileMap::from_csv(
            "0,0,0\n\
             0,24,0\n\
             0,0,0",
        )
        .unwrap();
        let target = Cell::new(1, 1);
        let path = find_adjacent_path(&map, Cell::new(2, 2), target).unwrap();
        let end = *path.last().unwrap();
        assert_ne!(end, target);
        assert_eq!((end.x - target.x).abs() + (end.y - target.y).abs(), 1);
    }

    #[test]
    fn test_find_adjacent_path_prefers_west() {
        let map = TileMap::filled(3, 3, 0);
        let target = Cell::new(1, 1);
        // Starting adjacent on the east side, the west probe still wins the
        // fixed ordering, so the path walks around to (0, 1).
        let path = find_adjacent_path(&map, Cell::new(2, 1), target).unwrap();
        assert_eq!(*path.last().unwrap(), Cell::new(0, 1));
    }

    #[test]
    fn test_find_adjacent_path_skips_blocked_neighbors() {
        // West and east of the target are blocked; north is open.
        let map = TileMap::from_csv(
            "0,0,0\n\
             24,24,24\n\
             0,0,0",
        )
        .unwrap();
        let target = Cell::new(1, 1);
        let path = find_adjacent_path(&map, Cell::new(0, 0), target).unwrap();
        assert_eq!(*path.last().unwrap(), Cell::new(1, 0));
    }

    #[test]
    fn test_find_adjacent_path_all_neighbors_blocked() {
        let map = TileMap::from_csv(
            "0,24,0\n\
             24,24,24\n\
             0,24,0",
        )
        .unwrap();
        assert!(find_adjacent_path(&map, Cell::new(0, 0), Cell::new(1, 1)).is_none());
    }

    #[test]
    fn test_find_route_direct_for_behind_targets() {
        let map = TileMap::from_csv("0,110\n0,0").unwrap();
        let route = find_route(&map, Cell::new(0, 0), Cell::new(1, 0)).unwrap();
        assert_eq!(*route.last().unwrap(), Cell::new(1, 0));
    }

    #[test]
    fn test_find_route_adjacent_for_floor_targets() {
        let map = TileMap::filled(3, 3, 0);
        let target = Cell::new(1, 1);
        let route = find_route(&map, Cell::new(2, 2), target).unwrap();
        assert_ne!(*route.last().unwrap(), target);
    }
}
