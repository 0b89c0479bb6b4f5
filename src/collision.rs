//! Collision and scoring checks between the bird and a pipe.
//!
//! Both checks are pure and order-independent; the orchestrator applies
//! their consequences (score mutation, termination).

use crate::bird::Bird;
use crate::pipe::Pipe;
use crate::ruleset::{Ruleset, ScoringThreshold};

/// True once the bird has cleared the pipe's scoring line.
///
/// Assisted mode awards at the gap midpoint, strict at the trailing edge, so
/// assisted play sees its points half a pipe earlier.
pub fn passed_scoring_line(bird: &Bird, pipe: &Pipe, rules: &Ruleset) -> bool {
    let line = match rules.scoring_threshold {
        ScoringThreshold::GapMidpoint => pipe.x + pipe.width / 2.0,
        ScoringThreshold::TrailingEdge => pipe.x + pipe.width,
    };
    bird.x > line
}

/// Axis-aligned overlap between the padded bird box and either pipe segment.
///
/// Always false when the ruleset disables collisions (assisted shield). The
/// padding shrinks both boxes symmetrically; it is forgiveness, not a
/// rendering artifact.
pub fn overlaps_pipe(bird: &Bird, pipe: &Pipe, rules: &Ruleset) -> bool {
    if !rules.collision_enabled {
        return false;
    }
    let pad = rules.hitbox_padding;
    bird.x + bird.width - pad > pipe.x + pad
        && bird.x + pad < pipe.x + pipe.width - pad
        && (bird.y + pad < pipe.gap_top - pad || bird.y + bird.height - pad > pipe.gap_bottom + pad)
}
