use super::AppState;
use crate::config::SubmissionMode;
use crate::error::GameError;
use crate::guess::{sanitize_name, validate_guess};
use crate::questions;
use crate::scoring::calculate_score;
use crate::types::*;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The answer was stored and its score added to the player's total
    Recorded { score: u32 },
    /// The player had already answered this question; nothing changed
    AlreadyAnswered,
}

impl AppState {
    /// Submit one answer for the current question.
    ///
    /// The duplicate check and the write of both the answer and the new total
    /// happen under a single write lock, so repeated clicks or retries can
    /// never count a question twice.
    pub async fn submit_answer(
        &self,
        name: &str,
        session_token: Option<&str>,
        question_id: QuestionId,
        raw_guess: &str,
    ) -> Result<SubmitOutcome, GameError> {
        if self.config.submission_mode != SubmissionMode::PerQuestion {
            return Err(GameError::WrongSubmissionMode(
                self.config.submission_mode.describe(),
            ));
        }

        validate_guess(raw_guess).map_err(|source| GameError::InvalidGuess {
            question_id,
            source,
        })?;
        let question = questions::get(question_id).ok_or(GameError::UnknownQuestion(question_id))?;

        let game = self.game.read().await;
        Self::check_session(&game, session_token)?;
        if game.live_question() != Some(question_id) {
            return Err(GameError::QuestionNotOpen(question_id));
        }

        let mut submissions = self.submissions.write().await;
        let record = submissions
            .get_mut(&sanitize_name(name))
            .ok_or(GameError::UnknownPlayer)?;

        if record.has_answered(question_id) {
            tracing::debug!(
                "Ignoring repeat answer from {} for question {}",
                record.name,
                question_id
            );
            return Ok(SubmitOutcome::AlreadyAnswered);
        }

        let guess = raw_guess.trim().to_string();
        let score = calculate_score(Some(guess.as_str()), question.answer);
        record.answers.insert(question_id, guess);
        record.total_score += score;
        record.timestamp = chrono::Utc::now().to_rfc3339();
        let player_name = record.name.clone();
        drop(submissions);
        drop(game);

        tracing::info!("{} answered question {}", player_name, question_id);
        self.bump_revision();
        self.broadcast_host_status().await;
        Ok(SubmitOutcome::Recorded { score })
    }

    /// Submit a whole answer sheet at once (bulk mode).
    ///
    /// Blank entries are skipped. Every other entry is validated before
    /// anything is written; questions the player already answered are left
    /// untouched. Returns how many answers were newly recorded.
    pub async fn submit_all_answers(
        &self,
        name: &str,
        session_token: Option<&str>,
        answers: &BTreeMap<QuestionId, String>,
    ) -> Result<usize, GameError> {
        if self.config.submission_mode != SubmissionMode::Bulk {
            return Err(GameError::WrongSubmissionMode(
                self.config.submission_mode.describe(),
            ));
        }

        let mut accepted = Vec::new();
        for (question_id, raw) in answers {
            if raw.trim().is_empty() {
                continue;
            }
            let question =
                questions::get(*question_id).ok_or(GameError::UnknownQuestion(*question_id))?;
            validate_guess(raw).map_err(|source| GameError::InvalidGuess {
                question_id: *question_id,
                source,
            })?;
            accepted.push((question, raw.trim().to_string()));
        }

        let game = self.game.read().await;
        Self::check_session(&game, session_token)?;
        if !game.active || game.phase() == GamePhase::Finished {
            return Err(GameError::GameNotActive);
        }

        let mut submissions = self.submissions.write().await;
        let record = submissions
            .get_mut(&sanitize_name(name))
            .ok_or(GameError::UnknownPlayer)?;

        let mut recorded = 0;
        for (question, guess) in accepted {
            if record.has_answered(question.id) {
                continue;
            }
            record.total_score += calculate_score(Some(guess.as_str()), question.answer);
            record.answers.insert(question.id, guess);
            recorded += 1;
        }
        if recorded > 0 {
            record.timestamp = chrono::Utc::now().to_rfc3339();
        }
        let player_name = record.name.clone();
        drop(submissions);
        drop(game);

        tracing::info!("{} submitted {} answers", player_name, recorded);
        if recorded > 0 {
            self.bump_revision();
            self.broadcast_host_status().await;
        }
        Ok(recorded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::error::GuessError;
    use crate::scoring::calculate_total_score;

    async fn joined_state(config: GameConfig) -> AppState {
        let state = AppState::with_config(config);
        state.start_game().await.unwrap();
        state.join("Alice").await.unwrap();
        state
    }

    fn bulk_config() -> GameConfig {
        GameConfig {
            submission_mode: SubmissionMode::Bulk,
            ..GameConfig::default()
        }
    }

    #[tokio::test]
    async fn test_submit_records_answer_and_score() {
        let state = joined_state(GameConfig::default()).await;

        let outcome = state.submit_answer("Alice", None, 1, "300").await.unwrap();
        // percent_off = 36 / 336
        assert_eq!(outcome, SubmitOutcome::Recorded { score: 77 });

        let record = state.get_player("Alice").await.unwrap();
        assert_eq!(record.answers.get(&1).map(String::as_str), Some("300"));
        assert_eq!(record.total_score, 77);
    }

    #[tokio::test]
    async fn test_second_submission_is_ignored() {
        let state = joined_state(GameConfig::default()).await;
        state.submit_answer("Alice", None, 1, "336").await.unwrap();

        let outcome = state.submit_answer("Alice", None, 1, "100").await.unwrap();
        assert_eq!(outcome, SubmitOutcome::AlreadyAnswered);

        let record = state.get_player("Alice").await.unwrap();
        assert_eq!(record.answers.get(&1).map(String::as_str), Some("336"));
        assert_eq!(record.total_score, 100);
    }

    #[tokio::test]
    async fn test_concurrent_submissions_count_once() {
        let state = joined_state(GameConfig::default()).await;

        let mut handles = Vec::new();
        for guess in ["336", "335", "300", "100", "1"] {
            let state = state.clone();
            handles.push(tokio::spawn(async move {
                state.submit_answer("Alice", None, 1, guess).await.unwrap()
            }));
        }

        let mut recorded = 0;
        for handle in handles {
            if let SubmitOutcome::Recorded { .. } = handle.await.unwrap() {
                recorded += 1;
            }
        }
        assert_eq!(recorded, 1);

        let record = state.get_player("Alice").await.unwrap();
        assert_eq!(record.answers.len(), 1);
        assert_eq!(record.total_score, calculate_total_score(&record.answers));
    }

    #[tokio::test]
    async fn test_total_tracks_sum_across_questions() {
        let state = joined_state(GameConfig::default()).await;

        for guess in ["336", "50000", "100"] {
            let question_id = state.get_game().await.current_question;
            state
                .submit_answer("Alice", None, question_id, guess)
                .await
                .unwrap();
            state.advance_question().await.unwrap();
        }

        let record = state.get_player("Alice").await.unwrap();
        assert_eq!(record.answers.len(), 3);
        assert_eq!(record.total_score, calculate_total_score(&record.answers));
    }

    #[tokio::test]
    async fn test_invalid_guesses_are_rejected_without_change() {
        let state = joined_state(GameConfig::default()).await;

        for (raw, expected) in [
            ("", GuessError::Empty),
            ("abc", GuessError::NotANumber),
            ("2000000000", GuessError::OutOfRange),
            ("3e2", GuessError::ScientificNotation),
        ] {
            match state.submit_answer("Alice", None, 1, raw).await {
                Err(GameError::InvalidGuess { source, .. }) => assert_eq!(source, expected),
                other => panic!("Expected InvalidGuess for {:?}, got {:?}", raw, other),
            }
        }

        assert!(state.get_player("Alice").await.unwrap().answers.is_empty());
    }

    #[tokio::test]
    async fn test_only_current_question_is_open() {
        let state = joined_state(GameConfig::default()).await;

        let result = state.submit_answer("Alice", None, 2, "10").await;
        assert!(matches!(result, Err(GameError::QuestionNotOpen(2))));

        state.end_game().await;
        let result = state.submit_answer("Alice", None, 1, "10").await;
        assert!(matches!(result, Err(GameError::QuestionNotOpen(1))));
    }

    #[tokio::test]
    async fn test_unknown_question_and_player() {
        let state = joined_state(GameConfig::default()).await;

        assert!(matches!(
            state.submit_answer("Alice", None, 99, "10").await,
            Err(GameError::UnknownQuestion(99))
        ));
        assert!(matches!(
            state.submit_answer("Mallory", None, 1, "10").await,
            Err(GameError::UnknownPlayer)
        ));
    }

    #[tokio::test]
    async fn test_stale_session_must_rejoin() {
        let state = joined_state(GameConfig::default()).await;
        let old_token = state.clear_submissions().await;
        state.join("Alice").await.unwrap();
        state.clear_submissions().await;

        let result = state
            .submit_answer("Alice", Some(old_token.as_str()), 1, "336")
            .await;
        assert!(matches!(result, Err(GameError::SessionExpired)));

        // Rejoining under the new token works
        let (_, token) = state.join("Alice").await.unwrap();
        let outcome = state
            .submit_answer("Alice", token.as_deref(), 1, "336")
            .await
            .unwrap();
        assert_eq!(outcome, SubmitOutcome::Recorded { score: 100 });
    }

    #[tokio::test]
    async fn test_per_question_submit_rejected_in_bulk_mode() {
        let state = joined_state(bulk_config()).await;
        assert!(matches!(
            state.submit_answer("Alice", None, 1, "336").await,
            Err(GameError::WrongSubmissionMode(_))
        ));
    }

    #[tokio::test]
    async fn test_bulk_submission() {
        let state = joined_state(bulk_config()).await;

        let mut answers = BTreeMap::new();
        answers.insert(1, "336".to_string());
        answers.insert(2, "30000".to_string());
        answers.insert(3, " ".to_string());

        let recorded = state
            .submit_all_answers("Alice", None, &answers)
            .await
            .unwrap();
        assert_eq!(recorded, 2);

        let record = state.get_player("Alice").await.unwrap();
        assert_eq!(record.answers.len(), 2);
        assert_eq!(record.total_score, calculate_total_score(&answers));
    }

    #[tokio::test]
    async fn test_bulk_resubmission_keeps_first_answers() {
        let state = joined_state(bulk_config()).await;

        let mut first = BTreeMap::new();
        first.insert(1, "336".to_string());
        state.submit_all_answers("Alice", None, &first).await.unwrap();

        let mut second = BTreeMap::new();
        second.insert(1, "1".to_string());
        second.insert(3, "190".to_string());
        let recorded = state
            .submit_all_answers("Alice", None, &second)
            .await
            .unwrap();
        assert_eq!(recorded, 1);

        let record = state.get_player("Alice").await.unwrap();
        assert_eq!(record.answers.get(&1).map(String::as_str), Some("336"));
        assert_eq!(record.total_score, 200);
    }

    #[tokio::test]
    async fn test_bulk_rejects_whole_sheet_on_bad_entry() {
        let state = joined_state(bulk_config()).await;

        let mut answers = BTreeMap::new();
        answers.insert(1, "336".to_string());
        answers.insert(4, "1e3".to_string());

        match state.submit_all_answers("Alice", None, &answers).await {
            Err(GameError::InvalidGuess { question_id, .. }) => assert_eq!(question_id, 4),
            other => panic!("Expected InvalidGuess, got {:?}", other),
        }
        assert!(state.get_player("Alice").await.unwrap().answers.is_empty());

        answers.remove(&4);
        answers.insert(30, "5".to_string());
        assert!(matches!(
            state.submit_all_answers("Alice", None, &answers).await,
            Err(GameError::UnknownQuestion(30))
        ));
    }

    #[tokio::test]
    async fn test_bulk_requires_running_game() {
        let state = joined_state(bulk_config()).await;
        state.finish_game().await.unwrap();

        let mut answers = BTreeMap::new();
        answers.insert(1, "336".to_string());
        assert!(matches!(
            state.submit_all_answers("Alice", None, &answers).await,
            Err(GameError::GameNotActive)
        ));
    }
}
