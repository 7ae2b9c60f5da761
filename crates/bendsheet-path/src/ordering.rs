//! Path ordering by endpoint connectivity.
//!
//! The connectivity graph is an adjacency list over element indices:
//! two elements are adjacent when any pair of their endpoints lies
//! within the connectivity tolerance. Vertex degrees classify the
//! topology; a valid open path has exactly two degree-1 elements and
//! is traversed free-end to free-end.

use crate::direction::free_endpoint;
use crate::element::{ElementKind, PathElement};
use crate::error::{PathError, Result};
use bendsheet_math::{points_are_close, Point3};

/// Check whether two elements share an endpoint within tolerance.
pub fn elements_are_connected(a: &PathElement, b: &PathElement) -> bool {
    let (a0, a1) = a.endpoints();
    let (b0, b1) = b.endpoints();
    points_are_close(&a0, &b0)
        || points_are_close(&a0, &b1)
        || points_are_close(&a1, &b0)
        || points_are_close(&a1, &b1)
}

/// Build the adjacency list for a set of elements.
fn adjacency(elements: &[PathElement]) -> Vec<Vec<usize>> {
    let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); elements.len()];
    for i in 0..elements.len() {
        for j in (i + 1)..elements.len() {
            if elements_are_connected(&elements[i], &elements[j]) {
                neighbors[i].push(j);
                neighbors[j].push(i);
            }
        }
    }
    neighbors
}

/// Lexicographic (x, y, z) ordering of points, used only to pick a
/// deterministic traversal start between the two free ends.
fn lex_less(a: &Point3, b: &Point3) -> bool {
    (a.x, a.y, a.z) < (b.x, b.y, b.z)
}

/// Sort path elements into connected order.
///
/// Returns a permutation of the input traversed from one free end to
/// the other. Traversal starts at the free end whose free endpoint is
/// lexicographically smallest, so the result is reproducible for a
/// given adjacency structure. A single element is a valid path only
/// if it is an arc.
pub fn build_ordered_path(elements: &[PathElement]) -> Result<Vec<PathElement>> {
    if elements.is_empty() {
        return Err(PathError::Empty);
    }
    if elements.len() == 1 {
        return match elements[0].kind() {
            ElementKind::Arc => Ok(vec![elements[0].clone()]),
            ElementKind::Line => Err(PathError::SingleLine),
        };
    }

    let neighbors = adjacency(elements);

    let disconnected = neighbors.iter().filter(|n| n.is_empty()).count();
    if disconnected > 0 {
        return Err(PathError::Disconnected {
            count: disconnected,
        });
    }

    if let Some((index, n)) = neighbors.iter().enumerate().find(|(_, n)| n.len() > 2) {
        return Err(PathError::Junction {
            index: index + 1,
            degree: n.len(),
        });
    }

    let free_ends: Vec<usize> = (0..elements.len())
        .filter(|&i| neighbors[i].len() == 1)
        .collect();

    let start = match free_ends.len() {
        0 => return Err(PathError::ClosedLoop),
        1 => return Err(PathError::Dangling),
        2 => {
            let a = free_ends[0];
            let b = free_ends[1];
            let ep_a = free_endpoint(elements, a);
            let ep_b = free_endpoint(elements, b);
            if lex_less(&ep_b, &ep_a) {
                b
            } else {
                a
            }
        }
        n => return Err(PathError::Branching { free_ends: n }),
    };

    let mut ordered = Vec::with_capacity(elements.len());
    let mut visited = vec![false; elements.len()];
    let mut current = Some(start);

    while let Some(i) = current {
        ordered.push(elements[i].clone());
        visited[i] = true;
        current = neighbors[i].iter().copied().find(|&n| !visited[n]);
    }

    Ok(ordered)
}

/// Validate that an ordered path strictly alternates line/arc.
///
/// The first element fixes the pattern; the first mismatch is reported
/// by its 1-based position. A single-element path trivially passes.
pub fn validate_path_alternation(path: &[PathElement]) -> Result<()> {
    let first = match path.first() {
        Some(e) => e.kind(),
        None => return Err(PathError::Empty),
    };

    for (i, elem) in path.iter().enumerate() {
        let expected = if i % 2 == 0 { first } else { first.opposite() };
        if elem.kind() != expected {
            return Err(PathError::Alternation {
                position: i + 1,
                expected,
                actual: elem.kind(),
            });
        }
    }

    Ok(())
}
