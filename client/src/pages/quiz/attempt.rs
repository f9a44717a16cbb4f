use crate::api::{ApiError, Question, Quiz, QuizAnswer};

pub const SELECT_BEFORE_ADVANCING: &str = "Please select an option before proceeding.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the question at this index.
    Next(usize),
    /// The last question is answered; the attempt is ready to submit.
    Submit,
}

/// A quiz plus the student's in-progress selections, one slot per question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizAttempt {
    quiz: Quiz,
    selections: Vec<Option<usize>>,
    current: usize,
}

impl QuizAttempt {
    pub fn new(quiz: Quiz) -> Self {
        let selections = vec![None; quiz.questions.len()];
        Self {
            quiz,
            selections,
            current: 0,
        }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn question_count(&self) -> usize {
        self.quiz.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.quiz.questions.get(self.current)
    }

    pub fn is_last_question(&self) -> bool {
        self.current + 1 >= self.question_count()
    }

    pub fn selections(&self) -> &[Option<usize>] {
        &self.selections
    }

    /// Records (or overwrites) the chosen option for a question.
    pub fn select_option(
        &mut self,
        question_index: usize,
        option_index: usize,
    ) -> Result<(), ApiError> {
        let question = self
            .quiz
            .questions
            .get(question_index)
            .ok_or_else(|| ApiError::validation("That question does not exist."))?;
        if option_index >= question.options.len() {
            return Err(ApiError::validation("That option does not exist."));
        }
        self.selections[question_index] = Some(option_index);
        Ok(())
    }

    /// Blocks with a validation error while the current question is unanswered.
    pub fn advance(&mut self) -> Result<Advance, ApiError> {
        if self.question_count() == 0 {
            return Ok(Advance::Submit);
        }
        if self.selections[self.current].is_none() {
            return Err(ApiError::validation(SELECT_BEFORE_ADVANCING));
        }
        if self.is_last_question() {
            Ok(Advance::Submit)
        } else {
            self.current += 1;
            Ok(Advance::Next(self.current))
        }
    }

    /// One answer per question, in quiz order; unset selections become `null`.
    pub fn answers(&self) -> Vec<QuizAnswer> {
        self.quiz
            .questions
            .iter()
            .zip(&self.selections)
            .map(|(question, selected)| QuizAnswer {
                question_id: question.id.clone(),
                selected_option: selected
                    .and_then(|index| question.options.get(index))
                    .map(|option| option.text.clone()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::QuizOption;

    fn quiz(questions: usize) -> Quiz {
        Quiz {
            id: "quiz-1".into(),
            lesson: Some("l1".into()),
            questions: (0..questions)
                .map(|q| Question {
                    id: format!("q{}", q),
                    question_text: format!("Question {}?", q),
                    options: (0..3)
                        .map(|o| QuizOption {
                            id: format!("q{}o{}", q, o),
                            text: format!("answer {}-{}", q, o),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn selection_vector_starts_unset() {
        let attempt = QuizAttempt::new(quiz(3));
        assert_eq!(attempt.selections(), &[None, None, None]);
        assert_eq!(attempt.current_index(), 0);
    }

    #[test]
    fn advance_blocks_until_current_question_is_answered() {
        let mut attempt = QuizAttempt::new(quiz(2));

        let err = attempt.advance().unwrap_err();
        assert_eq!(err.user_message(), SELECT_BEFORE_ADVANCING);
        assert_eq!(attempt.current_index(), 0);

        attempt.select_option(0, 1).unwrap();
        assert_eq!(attempt.advance().unwrap(), Advance::Next(1));
        assert_eq!(attempt.current_index(), 1);
    }

    #[test]
    fn last_question_requests_submission() {
        let mut attempt = QuizAttempt::new(quiz(1));
        attempt.select_option(0, 2).unwrap();
        assert!(attempt.is_last_question());
        assert_eq!(attempt.advance().unwrap(), Advance::Submit);
        assert_eq!(attempt.current_index(), 0);
    }

    #[test]
    fn selections_can_be_overwritten() {
        let mut attempt = QuizAttempt::new(quiz(1));
        attempt.select_option(0, 0).unwrap();
        attempt.select_option(0, 2).unwrap();
        assert_eq!(attempt.selections(), &[Some(2)]);
    }

    #[test]
    fn out_of_range_selection_is_rejected() {
        let mut attempt = QuizAttempt::new(quiz(1));
        assert!(attempt.select_option(0, 3).is_err());
        assert!(attempt.select_option(4, 0).is_err());
        assert_eq!(attempt.selections(), &[None]);
    }

    #[test]
    fn answers_use_option_text_and_null_for_gaps() {
        let mut attempt = QuizAttempt::new(quiz(2));
        attempt.select_option(1, 0).unwrap();
        assert_eq!(
            attempt.answers(),
            vec![
                QuizAnswer {
                    question_id: "q0".into(),
                    selected_option: None,
                },
                QuizAnswer {
                    question_id: "q1".into(),
                    selected_option: Some("answer 1-0".into()),
                },
            ]
        );
    }

    #[test]
    fn empty_quiz_is_immediately_submittable() {
        let mut attempt = QuizAttempt::new(quiz(0));
        assert!(attempt.current_question().is_none());
        assert_eq!(attempt.advance().unwrap(), Advance::Submit);
        assert!(attempt.answers().is_empty());
    }
}
