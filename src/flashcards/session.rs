//! Active-recall study loop
//!
//! Cards are studied in a working queue. A card marked correct is left
//! behind; a card marked incorrect is pulled out and slipped back in at a
//! random position between the current slot and the end of the queue, so
//! it resurfaces soon but not at a predictable place.
//!
//! State machine:
//! - `Studying`: a current index into the working queue
//! - `Finished`: no cards are owed
//!
//! The random source is injected through [`PositionSource`] so callers can
//! replay an exact ordering.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::models::{Flashcard, StudyState};

/// Chooses where a missed card is reinserted
pub trait PositionSource {
    /// Pick a position in the inclusive range `low..=high`
    fn pick(&mut self, low: usize, high: usize) -> usize;
}

/// Uniform reinsertion positions drawn from a `rand` RNG
#[derive(Debug, Clone)]
pub struct RandomPositions<R = StdRng> {
    rng: R,
}

impl RandomPositions<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomPositions<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> PositionSource for RandomPositions<R> {
    fn pick(&mut self, low: usize, high: usize) -> usize {
        self.rng.gen_range(low..=high)
    }
}

/// A flashcard study session over one loaded card list
#[derive(Debug, Clone)]
pub struct FlashcardSession<P = RandomPositions> {
    cards: Vec<Flashcard>,
    /// Working queue of indices into `cards`
    queue: Vec<usize>,
    index: usize,
    state: StudyState,
    answer_shown: bool,
    positions: P,
}

impl FlashcardSession<RandomPositions> {
    pub fn new(cards: Vec<Flashcard>) -> Self {
        Self::with_positions(cards, RandomPositions::from_entropy())
    }
}

impl<P: PositionSource> FlashcardSession<P> {
    pub fn with_positions(cards: Vec<Flashcard>, positions: P) -> Self {
        let queue = (0..cards.len()).collect();
        let state = if cards.is_empty() {
            StudyState::Finished
        } else {
            StudyState::Studying
        };

        Self {
            cards,
            queue,
            index: 0,
            state,
            answer_shown: false,
            positions,
        }
    }

    pub fn state(&self) -> StudyState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == StudyState::Finished
    }

    /// The card being shown, if still studying
    pub fn current(&self) -> Option<&Flashcard> {
        if self.is_finished() {
            return None;
        }
        self.queue.get(self.index).map(|&i| &self.cards[i])
    }

    /// 1-based position of the current card, for "card i of n"
    pub fn position(&self) -> usize {
        self.index + 1
    }

    /// Number of cards in the working queue
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Cards in current queue order
    pub fn queue(&self) -> impl Iterator<Item = &Flashcard> + '_ {
        self.queue.iter().map(move |&i| &self.cards[i])
    }

    pub fn answer_shown(&self) -> bool {
        self.answer_shown
    }

    pub fn toggle_answer(&mut self) {
        if !self.is_finished() {
            self.answer_shown = !self.answer_shown;
        }
    }

    /// Advance past the current card. Returns false if already finished.
    pub fn mark_correct(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.answer_shown = false;

        let next = self.index + 1;
        if next >= self.queue.len() {
            self.finish();
        } else {
            self.index = next;
        }
        true
    }

    /// Requeue the current card. Returns false if already finished.
    pub fn mark_incorrect(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.answer_shown = false;

        let missed = self.queue.remove(self.index);
        if self.index >= self.queue.len() {
            // Nothing left after this card: it has nowhere to go but its own slot.
            self.queue.push(missed);
            self.finish();
            return true;
        }

        let high = self.queue.len();
        let pos = self.positions.pick(self.index, high).clamp(self.index, high);
        self.queue.insert(pos, missed);
        log::debug!(
            "Requeued card {} at position {} of {}",
            missed,
            pos + 1,
            self.queue.len()
        );
        true
    }

    /// Restore the original card order and start over
    pub fn reset(&mut self) {
        self.queue = (0..self.cards.len()).collect();
        self.index = 0;
        self.answer_shown = false;
        self.state = if self.cards.is_empty() {
            StudyState::Finished
        } else {
            StudyState::Studying
        };
    }

    fn finish(&mut self) {
        self.state = StudyState::Finished;
        log::debug!("Flashcard session finished ({} cards)", self.cards.len());
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    /// Replays fixed positions and records every range it was asked for
    struct Scripted {
        picks: VecDeque<usize>,
        calls: Vec<(usize, usize)>,
    }

    impl Scripted {
        fn new(picks: &[usize]) -> Self {
            Self {
                picks: picks.iter().copied().collect(),
                calls: Vec::new(),
            }
        }
    }

    impl PositionSource for Scripted {
        fn pick(&mut self, low: usize, high: usize) -> usize {
            self.calls.push((low, high));
            self.picks.pop_front().unwrap_or(low)
        }
    }

    fn deck(n: usize) -> Vec<Flashcard> {
        (0..n)
            .map(|i| Flashcard::new(format!("q{}", i), format!("a{}", i)))
            .collect()
    }

    fn order<P: PositionSource>(session: &FlashcardSession<P>) -> Vec<String> {
        session.queue().map(|c| c.question.clone()).collect()
    }

    #[test]
    fn test_all_correct_finishes_after_n_marks() {
        let mut session = FlashcardSession::with_positions(deck(4), Scripted::new(&[]));

        for i in 0..4 {
            assert_eq!(session.state(), StudyState::Studying);
            assert_eq!(session.current().unwrap().question, format!("q{}", i));
            assert!(session.mark_correct());
        }

        assert!(session.is_finished());
        assert!(session.current().is_none());
        assert!(!session.mark_correct());
    }

    #[test]
    fn test_incorrect_reinserts_at_picked_position() {
        let mut session = FlashcardSession::with_positions(deck(4), Scripted::new(&[2]));

        assert!(session.mark_incorrect());

        assert_eq!(order(&session), vec!["q1", "q2", "q0", "q3"]);
        assert_eq!(session.position(), 1);
        assert_eq!(session.current().unwrap().question, "q1");
        assert_eq!(session.positions.calls, vec![(0, 3)]);
    }

    #[test]
    fn test_incorrect_range_starts_at_current_index() {
        let mut session = FlashcardSession::with_positions(deck(5), Scripted::new(&[4]));

        session.mark_correct();
        session.mark_correct();
        session.mark_incorrect();

        assert_eq!(session.positions.calls, vec![(2, 4)]);
        assert_eq!(order(&session), vec!["q0", "q1", "q3", "q4", "q2"]);
        assert_eq!(session.current().unwrap().question, "q3");
    }

    #[test]
    fn test_out_of_range_pick_is_clamped() {
        let mut session = FlashcardSession::with_positions(deck(3), Scripted::new(&[99]));

        session.mark_incorrect();

        assert_eq!(order(&session), vec!["q1", "q2", "q0"]);
    }

    #[test]
    fn test_single_card_incorrect_finishes_immediately() {
        let mut session = FlashcardSession::with_positions(deck(1), Scripted::new(&[]));

        assert!(session.mark_incorrect());

        assert!(session.is_finished());
        assert_eq!(session.len(), 1);
        assert!(session.positions.calls.is_empty());
    }

    #[test]
    fn test_last_card_incorrect_finishes() {
        let mut session = FlashcardSession::with_positions(deck(3), Scripted::new(&[]));

        session.mark_correct();
        session.mark_correct();
        session.mark_incorrect();

        assert!(session.is_finished());
        assert!(session.positions.calls.is_empty());
    }

    #[test]
    fn test_missed_card_comes_back_before_finishing() {
        for seed in 0..50 {
            let mut session =
                FlashcardSession::with_positions(deck(5), RandomPositions::seeded(seed));

            session.mark_incorrect();

            let mut seen_again = false;
            let mut marks = 0;
            while let Some(card) = session.current() {
                if card.question == "q0" {
                    seen_again = true;
                }
                session.mark_correct();
                marks += 1;
            }

            assert!(seen_again, "seed {} dropped the missed card", seed);
            assert_eq!(marks, 5);
        }
    }

    #[test]
    fn test_reset_restores_original_order() {
        let mut session = FlashcardSession::with_positions(deck(4), Scripted::new(&[3, 1]));

        session.mark_incorrect();
        session.mark_incorrect();
        session.mark_correct();
        session.reset();

        assert_eq!(order(&session), vec!["q0", "q1", "q2", "q3"]);
        assert_eq!(session.position(), 1);
        assert_eq!(session.state(), StudyState::Studying);
    }

    #[test]
    fn test_reset_after_finish() {
        let mut session = FlashcardSession::with_positions(deck(1), Scripted::new(&[]));
        session.mark_correct();
        assert!(session.is_finished());

        session.reset();

        assert_eq!(session.current().unwrap().question, "q0");
    }

    #[test]
    fn test_answer_hidden_after_marking() {
        let mut session = FlashcardSession::with_positions(deck(2), Scripted::new(&[]));

        session.toggle_answer();
        assert!(session.answer_shown());

        session.mark_correct();
        assert!(!session.answer_shown());
    }

    #[test]
    fn test_empty_deck_starts_finished() {
        let mut session = FlashcardSession::with_positions(Vec::new(), Scripted::new(&[]));

        assert!(session.is_finished());
        assert!(session.current().is_none());
        assert!(!session.mark_incorrect());
    }
}
