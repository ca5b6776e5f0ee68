use crate::dto::score_dto::AnsweredQuestion;
use crate::error::Result;
use crate::models::question::Category;
use crate::models::score::TransparencyScores;
use crate::services::inference::{ModelRegistry, SentimentLabel};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Classifier input is capped at this many characters.
const MAX_CLASSIFIER_CHARS: usize = 512;

/// Answer length at which the model-path completeness score saturates.
const COMPLETENESS_TARGET_CHARS: f64 = 50.0;

/// Answer length at which the fallback length score saturates.
const FALLBACK_TARGET_CHARS: f64 = 100.0;

/// Outcome of the model-backed scoring pass. `Unavailable` is an explicit
/// signal, so a legitimately low score is never mistaken for a failed pass.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringOutcome {
    Scored(TransparencyScores),
    Unavailable,
}

#[derive(Clone)]
pub struct ScoringService {
    models: Arc<ModelRegistry>,
}

impl ScoringService {
    pub fn new(models: Arc<ModelRegistry>) -> Self {
        Self { models }
    }

    /// Model-backed scoring first; the heuristic fallback covers an absent
    /// sentiment adapter or a pass that scored nothing.
    pub async fn score(&self, questions: &[AnsweredQuestion]) -> Result<TransparencyScores> {
        match self.score_with_model(questions).await {
            ScoringOutcome::Scored(scores) => Ok(scores),
            ScoringOutcome::Unavailable => Ok(score_fallback(questions)),
        }
    }

    async fn score_with_model(&self, questions: &[AnsweredQuestion]) -> ScoringOutcome {
        let Some(analyzer) = &self.models.sentiment_analyzer else {
            return ScoringOutcome::Unavailable;
        };
        if questions.is_empty() {
            return ScoringOutcome::Unavailable;
        }

        let mut total_score = 0.0;
        let mut buckets: HashMap<Category, Vec<f64>> = HashMap::new();

        for question in questions {
            let Some(answer) = question.first_answer().filter(|a| !a.is_empty()) else {
                continue;
            };

            let excerpt: String = answer.chars().take(MAX_CLASSIFIER_CHARS).collect();
            let label = match analyzer.classify(&excerpt).await {
                Ok(label) => label,
                Err(e) => {
                    tracing::warn!(error = %e, "sentiment classification failed, skipping answer");
                    continue;
                }
            };

            let score = answer_score(label, answer.chars().count());
            total_score += score;
            if let Some(category) = question.parsed_category() {
                buckets.entry(category).or_default().push(score);
            }
        }

        if total_score <= 0.0 {
            return ScoringOutcome::Unavailable;
        }

        let mut scores = TransparencyScores::ZERO;
        scores.transparency = (total_score / questions.len() as f64).min(1.0);
        if let Some(mean) = bucket_mean(&buckets, &[Category::Health, Category::Ingredients]) {
            scores.health = mean;
        }
        if let Some(mean) = bucket_mean(&buckets, &[Category::Environmental]) {
            scores.environmental = mean;
        }
        if let Some(mean) = bucket_mean(&buckets, &[Category::Social, Category::Manufacturing]) {
            scores.social = mean;
        }

        ScoringOutcome::Scored(scores)
    }
}

fn sentiment_weight(label: SentimentLabel) -> f64 {
    match label {
        SentimentLabel::Positive => 0.8,
        SentimentLabel::Negative => 0.2,
        SentimentLabel::Neutral => 0.5,
    }
}

/// Mean of the sentiment weight and a length-based completeness score.
fn answer_score(label: SentimentLabel, answer_chars: usize) -> f64 {
    let completeness = (answer_chars as f64 / COMPLETENESS_TARGET_CHARS).min(1.0);
    (sentiment_weight(label) + completeness) / 2.0
}

fn bucket_mean(buckets: &HashMap<Category, Vec<f64>>, categories: &[Category]) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for category in categories {
        if let Some(values) = buckets.get(category) {
            sum += values.iter().sum::<f64>();
            count += values.len();
        }
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Deterministic scoring used when the model pass is unavailable: a neutral
/// 0.5 baseline, answer-length transparency, and 0.6 bumps for dimensions the
/// question set touches at all.
pub fn score_fallback(questions: &[AnsweredQuestion]) -> TransparencyScores {
    let mut scores = TransparencyScores::neutral();

    if !questions.is_empty() {
        let answered_total: f64 = questions
            .iter()
            .filter_map(|q| q.first_answer())
            .filter(|a| !a.trim().is_empty())
            .map(|a| (a.chars().count() as f64 / FALLBACK_TARGET_CHARS).min(1.0))
            .sum();
        scores.transparency = answered_total / questions.len() as f64;
    }

    let categories: HashSet<Category> = questions
        .iter()
        .filter_map(|q| q.parsed_category())
        .collect();
    if categories.contains(&Category::Health) || categories.contains(&Category::Ingredients) {
        scores.health = 0.6;
    }
    if categories.contains(&Category::Environmental) {
        scores.environmental = 0.6;
    }
    if categories.contains(&Category::Social) || categories.contains(&Category::Manufacturing) {
        scores.social = 0.6;
    }

    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::score_dto::Answer;

    fn answered(category: &str, value: &str) -> AnsweredQuestion {
        AnsweredQuestion {
            text: Some("How transparent is this?".to_string()),
            category: Some(category.to_string()),
            answers: vec![Answer {
                value: Some(value.to_string()),
            }],
        }
    }

    fn unanswered(category: &str) -> AnsweredQuestion {
        AnsweredQuestion {
            text: Some("How transparent is this?".to_string()),
            category: Some(category.to_string()),
            answers: Vec::new(),
        }
    }

    #[test]
    fn sentiment_weights_match_contract() {
        assert_eq!(sentiment_weight(SentimentLabel::Positive), 0.8);
        assert_eq!(sentiment_weight(SentimentLabel::Negative), 0.2);
        assert_eq!(sentiment_weight(SentimentLabel::Neutral), 0.5);
    }

    #[test]
    fn completeness_saturates_at_target_length() {
        // 25 of 50 chars: completeness 0.5, neutral sentiment 0.5.
        assert_eq!(answer_score(SentimentLabel::Neutral, 25), 0.5);
        // Past the target the length contribution is capped at 1.0.
        assert_eq!(answer_score(SentimentLabel::Positive, 500), 0.9);
        assert_eq!(answer_score(SentimentLabel::Negative, 0), 0.1);
    }

    #[test]
    fn bucket_mean_spans_paired_categories() {
        let mut buckets: HashMap<Category, Vec<f64>> = HashMap::new();
        buckets.insert(Category::Health, vec![0.4]);
        buckets.insert(Category::Ingredients, vec![0.8, 0.6]);

        let mean = bucket_mean(&buckets, &[Category::Health, Category::Ingredients]).unwrap();
        assert!((mean - 0.6).abs() < 1e-9);
        assert_eq!(bucket_mean(&buckets, &[Category::Social]), None);
    }

    #[test]
    fn fallback_defaults_to_neutral_on_empty_input() {
        assert_eq!(score_fallback(&[]), TransparencyScores::neutral());
    }

    #[test]
    fn fallback_scores_answer_length_against_all_questions() {
        let questions = vec![
            answered("environmental", &"a".repeat(200)),
            unanswered("health"),
        ];
        let scores = score_fallback(&questions);
        // One saturated answer over two questions.
        assert!((scores.transparency - 0.5).abs() < 1e-9);
        assert_eq!(scores.environmental, 0.6);
        assert_eq!(scores.health, 0.6);
        assert_eq!(scores.social, 0.5);
        assert!(scores.in_bounds());
    }

    #[test]
    fn fallback_bumps_social_for_manufacturing_questions() {
        let scores = score_fallback(&[unanswered("manufacturing")]);
        assert_eq!(scores.social, 0.6);
        assert_eq!(scores.health, 0.5);
        assert_eq!(scores.environmental, 0.5);
        assert_eq!(scores.transparency, 0.0);
    }

    #[test]
    fn fallback_ignores_whitespace_answers() {
        let scores = score_fallback(&[answered("social", "   ")]);
        assert_eq!(scores.transparency, 0.0);
        assert_eq!(scores.social, 0.6);
    }

    #[test]
    fn fallback_stays_in_bounds() {
        let questions: Vec<AnsweredQuestion> = (0..5)
            .map(|i| answered("ingredients", &"x".repeat(i * 80)))
            .collect();
        assert!(score_fallback(&questions).in_bounds());
    }

    #[tokio::test]
    async fn empty_registry_uses_fallback() {
        let service = ScoringService::new(Arc::new(ModelRegistry::default()));
        let scores = service.score(&[]).await.unwrap();
        assert_eq!(scores, TransparencyScores::neutral());
    }
}
