use crate::state::AppState;
use crate::types::*;
use serde::{Deserialize, Serialize};

/// Who has answered the live question
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionStatus {
    pub question_id: QuestionId,
    pub answered: usize,
    pub total: usize,
    pub players: Vec<PlayerAnswerStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAnswerStatus {
    pub name: String,
    pub has_answered: bool,
}

impl AppState {
    /// Players ranked by total score (highest first, ties by name).
    /// `top` limits the number of rows returned.
    pub async fn leaderboard(&self, top: Option<usize>) -> Vec<LeaderboardEntry> {
        let submissions = self.submissions.read().await;

        let mut players: Vec<&PlayerRecord> = submissions.values().collect();
        players.sort_by(|a, b| {
            b.total_score
                .cmp(&a.total_score)
                .then_with(|| a.name.cmp(&b.name))
        });

        players
            .into_iter()
            .take(top.unwrap_or(usize::MAX))
            .enumerate()
            .map(|(index, p)| LeaderboardEntry {
                rank: index + 1,
                name: p.name.clone(),
                total_score: p.total_score,
                answered: p.answered_count(),
            })
            .collect()
    }

    /// Answer status for the live question, or None when no question is live
    pub async fn question_status(&self) -> Option<QuestionStatus> {
        let question_id = self.game.read().await.live_question()?;
        let submissions = self.submissions.read().await;

        let mut players: Vec<PlayerAnswerStatus> = submissions
            .values()
            .map(|p| PlayerAnswerStatus {
                name: p.name.clone(),
                has_answered: p.has_answered(question_id),
            })
            .collect();
        players.sort_by(|a, b| a.name.cmp(&b.name));

        Some(QuestionStatus {
            question_id,
            answered: players.iter().filter(|p| p.has_answered).count(),
            total: players.len(),
            players,
        })
    }
}
