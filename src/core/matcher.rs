use std::cmp::Ordering;

use crate::models::{FilterCriteria, MatchRequest, ScoredCandidate, ScoringWeights, SkillProfile, SortBy};
use crate::core::{
    categories::SkillCategories,
    filters::matches_criteria,
    scoring::{match_percent, score_breakdown, score_with_weights},
};

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<ScoredCandidate>,
    /// Survivors of the filter stages before the limit was applied
    pub total_results: usize,
    pub total_candidates: usize,
}

/// Main matching orchestrator - implements the filter-then-rank pipeline
///
/// # Pipeline Stages
/// 0. Excluded ids
/// 1. Free-text search
/// 2. Exact skill
/// 3. Skill category
/// 4. Minimum rating
/// 5. Location substring
/// 6. Scoring and ranking
///
/// Stages 0-5 only narrow and commute; stage 6 runs on the survivors.
/// Candidates are borrowed and never reordered in place.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    categories: SkillCategories,
}

impl Matcher {
    pub fn new(weights: ScoringWeights, categories: SkillCategories) -> Self {
        Self { weights, categories }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
            categories: SkillCategories::builtin(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn categories(&self) -> &SkillCategories {
        &self.categories
    }

    /// Compatibility score with this matcher's weights
    pub fn score_candidate(&self, requester: &MatchRequest, candidate: &SkillProfile) -> u32 {
        score_with_weights(requester, candidate, &self.weights)
    }

    /// Filter `candidates` by `criteria` and rank the survivors
    ///
    /// With a requester, survivors are scored and ordered by descending
    /// score, then descending rating, then input order. Without one they
    /// keep their input order and carry a zero score.
    pub fn filter_and_rank(
        &self,
        candidates: &[SkillProfile],
        criteria: &FilterCriteria,
        requester: Option<&MatchRequest>,
    ) -> Vec<ScoredCandidate> {
        let mut ranked: Vec<ScoredCandidate> = candidates
            .iter()
            .filter(|profile| matches_criteria(profile, criteria, &self.categories))
            .map(|profile| match requester {
                Some(requester) => self.scored(requester, profile),
                None => ScoredCandidate::unscored(profile.clone()),
            })
            .collect();

        // sort_by is stable, so equal keys keep input order
        match (criteria.sort_by, requester) {
            (SortBy::Score, Some(_)) => ranked.sort_by(|a, b| {
                b.score
                    .cmp(&a.score)
                    .then_with(|| compare_rating_desc(&a.profile, &b.profile))
            }),
            (SortBy::Score, None) => {}
            (SortBy::Rating, _) => {
                ranked.sort_by(|a, b| compare_rating_desc(&a.profile, &b.profile))
            }
        }

        tracing::debug!(
            "Ranked {} of {} candidates (scored: {})",
            ranked.len(),
            candidates.len(),
            requester.is_some()
        );

        ranked
    }

    /// Rank candidates for a requester, excluding the requester's own
    /// profile, and keep the best `limit`
    pub fn find_matches(
        &self,
        requester: &MatchRequest,
        candidates: &[SkillProfile],
        criteria: &FilterCriteria,
        limit: usize,
    ) -> MatchResult {
        let mut criteria = criteria.clone();
        if !criteria.exclude_ids.contains(&requester.id) {
            criteria.exclude_ids.push(requester.id.clone());
        }

        let matches = self.filter_and_rank(candidates, &criteria, Some(requester));
        truncated(matches, candidates.len(), limit)
    }

    /// Filter without a requester and keep the first `limit`
    pub fn search(
        &self,
        candidates: &[SkillProfile],
        criteria: &FilterCriteria,
        limit: usize,
    ) -> MatchResult {
        let matches = self.filter_and_rank(candidates, criteria, None);
        truncated(matches, candidates.len(), limit)
    }

    fn scored(&self, requester: &MatchRequest, profile: &SkillProfile) -> ScoredCandidate {
        let score = score_with_weights(requester, profile, &self.weights);

        ScoredCandidate {
            profile: profile.clone(),
            score,
            match_percent: match_percent(score, &self.weights),
            breakdown: score_breakdown(requester, profile),
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Filter and rank with the default weights and category table
pub fn filter_and_rank(
    candidates: &[SkillProfile],
    criteria: &FilterCriteria,
    requester: Option<&MatchRequest>,
) -> Vec<ScoredCandidate> {
    Matcher::with_default_weights().filter_and_rank(candidates, criteria, requester)
}

#[inline]
fn compare_rating_desc(a: &SkillProfile, b: &SkillProfile) -> Ordering {
    b.rating_or_zero().total_cmp(&a.rating_or_zero())
}

fn truncated(mut matches: Vec<ScoredCandidate>, total_candidates: usize, limit: usize) -> MatchResult {
    let total_results = matches.len();
    matches.truncate(limit);

    MatchResult {
        matches,
        total_results,
        total_candidates,
    }
}
