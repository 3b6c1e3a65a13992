//! Arrow/bubble collision detection and resolution
//!
//! Naive O(n*m) pairwise checking; object counts stay at or below 15 per
//! side, so no spatial partitioning is needed. Removal is a mark-and-compact
//! pass after the scan, never a splice mid-iteration.

use glam::Vec2;

use super::state::{Arrow, Bubble};
use crate::consts::HIT_MARGIN;

/// Strict circle containment: hit only when distance < hit_radius
#[inline]
pub fn circle_hit(point: Vec2, center: Vec2, hit_radius: f32) -> bool {
    point.distance(center) < hit_radius
}

/// Whether an arrow's tip is within a bubble's hit radius.
///
/// The hit radius is the visual radius plus a fixed margin, so near misses
/// still feel like hits.
#[inline]
pub fn arrow_hits_bubble(arrow: &Arrow, bubble: &Bubble) -> bool {
    circle_hit(arrow.pos, bubble.pos, bubble.radius + HIT_MARGIN)
}

/// Resolve all arrow/bubble hits for one tick.
///
/// Each arrow claims at most one bubble: bubbles are scanned in reverse
/// index order and the first match wins. Hits across different arrows
/// resolve independently, but a claimed bubble cannot be claimed twice.
/// Both collections are compacted once the scan completes. Returns the
/// number of popped bubbles.
pub fn resolve_hits(arrows: &mut Vec<Arrow>, bubbles: &mut Vec<Bubble>) -> u32 {
    let mut arrow_spent = vec![false; arrows.len()];
    let mut bubble_popped = vec![false; bubbles.len()];
    let mut pops = 0u32;

    for (ai, arrow) in arrows.iter().enumerate() {
        for bi in (0..bubbles.len()).rev() {
            if bubble_popped[bi] {
                continue;
            }
            if arrow_hits_bubble(arrow, &bubbles[bi]) {
                arrow_spent[ai] = true;
                bubble_popped[bi] = true;
                pops += 1;
                break;
            }
        }
    }

    let mut ai = 0;
    arrows.retain(|_| {
        let keep = !arrow_spent[ai];
        ai += 1;
        keep
    });
    let mut bi = 0;
    bubbles.retain(|_| {
        let keep = !bubble_popped[bi];
        bi += 1;
        keep
    });

    pops
}
