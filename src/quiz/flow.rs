//! Quiz attempt state machine
//!
//! Answers are collected without feedback; correctness is only revealed
//! once every question has an answer and the attempt is finished.
//! Invalid transitions are ignored and reported through the return value
//! rather than raised as errors.

use super::models::{Mcq, OptionMark, QuizPhase, QuizScore, ReviewItem};

/// A single attempt over one quiz set
#[derive(Debug, Clone)]
pub struct QuizFlow {
    questions: Vec<Mcq>,
    answers: Vec<Option<usize>>,
    index: usize,
    phase: QuizPhase,
}

impl QuizFlow {
    pub fn new(questions: Vec<Mcq>) -> Self {
        let answers = vec![None; questions.len()];
        Self {
            questions,
            answers,
            index: 0,
            phase: QuizPhase::Answering,
        }
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase != QuizPhase::Answering
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// 0-based index of the question being shown
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Mcq> {
        self.questions.get(self.index)
    }

    /// The option chosen for the current question
    pub fn current_answer(&self) -> Option<usize> {
        self.answers.get(self.index).copied().flatten()
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn all_answered(&self) -> bool {
        self.answers.iter().all(Option::is_some)
    }

    pub fn unanswered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_none()).count()
    }

    /// Record `option` for the current question
    pub fn choose(&mut self, option: usize) -> bool {
        if self.is_finished() {
            return false;
        }
        let Some(question) = self.questions.get(self.index) else {
            return false;
        };
        if option >= question.options.len() {
            return false;
        }

        self.answers[self.index] = Some(option);
        true
    }

    pub fn next(&mut self) -> bool {
        if self.is_finished() || self.index + 1 >= self.questions.len() {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn prev(&mut self) -> bool {
        if self.is_finished() || self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Close the attempt and compute the score
    ///
    /// Rejected (returns `None`, state unchanged) while any question is
    /// unanswered or when there are no questions at all.
    pub fn finish(&mut self) -> Option<QuizScore> {
        if self.phase != QuizPhase::Answering || self.is_empty() || !self.all_answered() {
            return None;
        }

        self.phase = QuizPhase::Finished;
        let score = self.score();
        log::debug!("Quiz finished: {}/{}", score.score, score.total);
        Some(score)
    }

    /// Number of correct answers out of the question count
    pub fn score(&self) -> QuizScore {
        let score = self
            .questions
            .iter()
            .zip(&self.answers)
            .filter(|(q, a)| a.map_or(false, |choice| q.is_correct(choice)))
            .count();

        QuizScore {
            score,
            total: self.questions.len(),
        }
    }

    pub fn show_answer_key(&mut self) -> bool {
        if self.phase != QuizPhase::Finished {
            return false;
        }
        self.phase = QuizPhase::Reviewing;
        true
    }

    /// Leave the answer key and return to the score summary
    pub fn hide_answer_key(&mut self) -> bool {
        if self.phase != QuizPhase::Reviewing {
            return false;
        }
        self.phase = QuizPhase::Finished;
        true
    }

    /// The full answer key, available once the attempt is finished
    pub fn review(&self) -> Option<Vec<ReviewItem<'_>>> {
        if !self.is_finished() {
            return None;
        }

        let items = self
            .questions
            .iter()
            .zip(&self.answers)
            .enumerate()
            .map(|(i, (question, &chosen))| ReviewItem {
                number: i + 1,
                question,
                chosen,
                marks: (0..question.options.len())
                    .map(|o| {
                        if o == question.answer {
                            OptionMark::Correct
                        } else if chosen == Some(o) {
                            OptionMark::WrongChoice
                        } else {
                            OptionMark::Plain
                        }
                    })
                    .collect(),
            })
            .collect();

        Some(items)
    }

    /// Clear every answer and go back to the first question
    pub fn restart(&mut self) {
        self.answers = vec![None; self.questions.len()];
        self.index = 0;
        self.phase = QuizPhase::Answering;
    }
}
