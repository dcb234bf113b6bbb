// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Recursive extraction over host geometry trees.
//!
//! Hosts hand back element geometry as a tree of solids, curves and
//! placed instances. Extraction walks the tree depth-first, composing
//! instance placements so every result is in model coordinates.

use nalgebra::Isometry3;
use plankit_geometry::{tolerance, Segment, Solid};

/// One node of a host geometry tree.
#[derive(Debug, Clone)]
pub enum GeometryNode {
    Solid(Solid),
    Curve(Segment),
    /// A nested instance with its own placement applied to all children.
    Instance {
        placement: Isometry3<f64>,
        children: Vec<GeometryNode>,
    },
}

/// The first solid with nonzero volume, placed in model coordinates.
///
/// Hosts pad geometry trees with zero-volume stub solids; volume is
/// rounded to nine places before the emptiness test so numerical dust
/// does not pass as a real body.
pub fn flatten_solid(nodes: &[GeometryNode]) -> Option<Solid> {
    flatten_solid_placed(nodes, &Isometry3::identity())
}

fn flatten_solid_placed(nodes: &[GeometryNode], placement: &Isometry3<f64>) -> Option<Solid> {
    for node in nodes {
        match node {
            GeometryNode::Solid(solid) => {
                let placed = solid.transformed(placement);
                if tolerance::round_to(placed.volume(), 9) != 0.0 {
                    return Some(placed);
                }
            }
            GeometryNode::Instance {
                placement: nested,
                children,
            } => {
                if let Some(solid) = flatten_solid_placed(children, &(placement * nested)) {
                    return Some(solid);
                }
            }
            GeometryNode::Curve(_) => {}
        }
    }
    None
}

/// Every curve in the tree, placed in model coordinates.
pub fn flatten_curves(nodes: &[GeometryNode]) -> Vec<Segment> {
    let mut curves = Vec::new();
    collect_curves(nodes, &Isometry3::identity(), &mut curves);
    curves
}

fn collect_curves(
    nodes: &[GeometryNode],
    placement: &Isometry3<f64>,
    out: &mut Vec<Segment>,
) {
    for node in nodes {
        match node {
            GeometryNode::Curve(segment) => out.push(segment.transformed(placement)),
            GeometryNode::Instance {
                placement: nested,
                children,
            } => collect_curves(children, &(placement * nested), out),
            GeometryNode::Solid(_) => {}
        }
    }
}
