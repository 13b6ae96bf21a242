use crate::models::{MatchRequest, ScoreBreakdown, ScoringWeights, SkillProfile};

/// Compatibility score between a requester and a candidate with the default
/// weights
///
/// Scoring formula:
/// score = (
///     wanted_skill   # candidate offers something the requester wants
///   + offered_skill  # candidate wants something the requester offers
///   + location       # both locations present and exactly equal
/// )
///
/// The terms are independent; a bidirectional match earns both skill terms.
/// The result is not normalized or clamped.
pub fn score_candidate(requester: &MatchRequest, candidate: &SkillProfile) -> u32 {
    score_with_weights(requester, candidate, &ScoringWeights::default())
}

/// Compatibility score with caller-supplied weights
pub fn score_with_weights(
    requester: &MatchRequest,
    candidate: &SkillProfile,
    weights: &ScoringWeights,
) -> u32 {
    skill_overlap_score(requester, candidate, weights)
        .saturating_add(location_bonus(requester, candidate, weights))
}

/// Skill exchange terms of the score
#[inline]
pub fn skill_overlap_score(
    requester: &MatchRequest,
    candidate: &SkillProfile,
    weights: &ScoringWeights,
) -> u32 {
    let mut score = 0u32;

    // They teach what I want
    if !candidate.offered_skills.is_disjoint(&requester.wanted_skills) {
        score = score.saturating_add(weights.wanted_skill);
    }

    // I can teach what they want
    if !candidate.wanted_skills.is_disjoint(&requester.offered_skills) {
        score = score.saturating_add(weights.offered_skill);
    }

    score
}

/// Same-location bonus; exact, case-sensitive comparison
#[inline]
pub fn location_bonus(
    requester: &MatchRequest,
    candidate: &SkillProfile,
    weights: &ScoringWeights,
) -> u32 {
    if same_location(requester, candidate) {
        weights.location
    } else {
        0
    }
}

#[inline]
fn same_location(requester: &MatchRequest, candidate: &SkillProfile) -> bool {
    match (requester.location(), candidate.location()) {
        (Some(mine), Some(theirs)) => mine == theirs,
        _ => false,
    }
}

/// Which score terms fired, with the overlapping skills
pub fn score_breakdown(requester: &MatchRequest, candidate: &SkillProfile) -> ScoreBreakdown {
    ScoreBreakdown {
        they_teach: candidate
            .offered_skills
            .intersection(&requester.wanted_skills)
            .cloned()
            .collect(),
        they_learn: candidate
            .wanted_skills
            .intersection(&requester.offered_skills)
            .cloned()
            .collect(),
        same_location: same_location(requester, candidate),
    }
}

/// Score as a 0-100 display percentage of what `weights` can produce
///
/// Monotonic in `score`, so it never changes ranking.
pub fn match_percent(score: u32, weights: &ScoringWeights) -> u8 {
    let max = weights.max_score();
    if max == 0 {
        return 0;
    }

    let percent = (score as f64 * 100.0 / max as f64).round();
    percent.min(100.0) as u8
}
