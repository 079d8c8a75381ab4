//! Deck generation for both game modes.
//!
//! - Translation: one task per sentence of the phrase table, shuffled.
//! - Code assembly: independent random 6-element letter/number codes.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, instrument};

use crate::domain::{Deck, GameMode, Task};
use crate::numerals::number_to_greek;
use crate::seeds::{
  IndirectObject, Subject, CODE_PROMPT_LABEL, DIRECT_OBJECT_RU, FALLBACK_VERB_RU, GREEK_LETTERS, PHRASES,
  translation_deck_size, TRANSLATION_PROMPT_LABEL,
};

pub const DEFAULT_CODE_DECK_SIZE: usize = 30;
pub const CODE_LENGTH: usize = 6;
pub const MAX_CODE_NUMBER: i64 = 101;

/// Uniform in-place permutation (Fisher–Yates).
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
  items.shuffle(rng);
}

/// Russian gloss of a table sentence: subject, verb, indirect object, "книгу".
/// Words missing from the tables are copied as-is.
pub fn russian_gloss(sentence: &str) -> String {
  let mut words = sentence.split(' ');
  let subject_gr = words.next().unwrap_or_default();
  let object_gr = words.next().unwrap_or_default();

  let subject = Subject::from_greek(subject_gr);
  let subject_ru = subject.map(|s| s.russian()).unwrap_or(subject_gr);
  let verb_ru = subject.map(|s| s.russian_verb()).unwrap_or(FALLBACK_VERB_RU);
  let object_ru = IndirectObject::from_greek(object_gr)
    .map(|o| o.russian())
    .unwrap_or(object_gr);

  format!("{} {} {} {}", subject_ru, verb_ru, object_ru, DIRECT_OBJECT_RU)
}

#[instrument(level = "debug", skip(rng))]
pub fn generate_translation_tasks<R: Rng + ?Sized>(rng: &mut R) -> Deck {
  let mut tasks = Vec::with_capacity(translation_deck_size());
  tasks.extend(PHRASES.iter().flat_map(|(subject, sentences)| {
    sentences.iter().map(move |sentence| Task {
      mode: GameMode::Translation,
      prompt: russian_gloss(sentence),
      answer: (*sentence).to_string(),
      prompt_label: TRANSLATION_PROMPT_LABEL.to_string(),
      category: Some(subject.greek().to_string()),
    })
  }));

  shuffle(&mut tasks, rng);
  debug!(target: "game", count = tasks.len(), "Built translation deck");
  Deck::new(tasks)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ElementKind {
  Letter,
  Number,
}

/// One code task. At least one letter and one number are guaranteed.
pub fn generate_code_task<R: Rng + ?Sized>(rng: &mut R) -> Task {
  let mut plan = vec![ElementKind::Letter, ElementKind::Number];
  while plan.len() < CODE_LENGTH {
    plan.push(if rng.gen::<bool>() { ElementKind::Letter } else { ElementKind::Number });
  }
  shuffle(&mut plan, rng);

  let mut symbols = String::new();
  let mut names = Vec::with_capacity(CODE_LENGTH);
  for kind in plan {
    match kind {
      ElementKind::Letter => {
        let letter = GREEK_LETTERS[rng.gen_range(0..GREEK_LETTERS.len())];
        symbols.push_str(letter.symbol);
        names.push(letter.name.to_string());
      }
      ElementKind::Number => {
        let n = rng.gen_range(1..=MAX_CODE_NUMBER);
        symbols.push_str(&n.to_string());
        names.push(number_to_greek(n));
      }
    }
  }

  Task {
    mode: GameMode::CodeAssembly,
    prompt: names.join(" - "),
    answer: symbols,
    prompt_label: CODE_PROMPT_LABEL.to_string(),
    category: None,
  }
}

#[instrument(level = "debug", skip(rng))]
pub fn generate_code_tasks<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Deck {
  let tasks: Vec<Task> = (0..count).map(|_| generate_code_task(rng)).collect();
  debug!(target: "game", count = tasks.len(), "Built code deck");
  Deck::new(tasks)
}

/// Full fresh deck for `mode`.
pub fn build_deck<R: Rng + ?Sized>(mode: GameMode, code_deck_size: usize, rng: &mut R) -> Deck {
  match mode {
    GameMode::Translation => generate_translation_tasks(rng),
    GameMode::CodeAssembly => generate_code_tasks(code_deck_size, rng),
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use rand::rngs::StdRng;
  use rand::SeedableRng;

  use super::*;

  fn drain(mut deck: Deck) -> Vec<Task> {
    std::iter::from_fn(|| deck.draw()).collect()
  }

  // Splits a code answer back into its elements using the prompt's names.
  fn element_kinds(task: &Task) -> (usize, usize) {
    let names: Vec<&str> = task.prompt.split(" - ").collect();
    let letters = names
      .iter()
      .filter(|n| GREEK_LETTERS.iter().any(|l| l.name == **n))
      .count();
    (letters, names.len() - letters)
  }

  #[test]
  fn gloss_matches_known_sentence() {
    assert_eq!(russian_gloss("Εγώ σου δίνω το βιβλίο"), "Я даю тебе книгу");
    assert_eq!(russian_gloss("Αυτή του δίνει το βιβλίο"), "Она дает ему книгу");
    assert_eq!(russian_gloss("Αυτοί σας δίνουν το βιβλίο"), "Они дают вам книгу");
  }

  #[test]
  fn gloss_passes_unknown_words_through() {
    assert_eq!(russian_gloss("Κάποιος μου δίνει"), "Κάποιος даю мне книгу");
  }

  #[test]
  fn translation_deck_has_every_sentence_once() {
    let mut rng = StdRng::seed_from_u64(7);
    let deck = generate_translation_tasks(&mut rng);
    assert_eq!(deck.len(), translation_deck_size());
    let tasks = drain(deck);
    let answers: HashSet<&str> = tasks.iter().map(|t| t.answer.as_str()).collect();
    assert_eq!(answers.len(), translation_deck_size());
    for task in &tasks {
      assert_eq!(task.prompt, russian_gloss(&task.answer));
      assert_eq!(task.prompt_label, TRANSLATION_PROMPT_LABEL);
      assert!(task.category.is_some());
    }
  }

  #[test]
  fn code_tasks_mix_letters_and_numbers() {
    let mut rng = StdRng::seed_from_u64(11);
    let deck = generate_code_tasks(200, &mut rng);
    assert_eq!(deck.len(), 200);
    for task in &drain(deck) {
      let (letters, numbers) = element_kinds(task);
      assert_eq!(letters + numbers, CODE_LENGTH, "{}", task.prompt);
      assert!(letters >= 1 && numbers >= 1, "{}", task.prompt);
      assert_eq!(task.mode, GameMode::CodeAssembly);
      assert!(task.category.is_none());
    }
  }

  #[test]
  fn code_answer_is_concatenated_symbols() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..50 {
      let task = generate_code_task(&mut rng);
      let chars = task.answer.chars().count();
      assert!((CODE_LENGTH..=CODE_LENGTH * 3).contains(&chars), "{}", task.answer);
      assert!(task.answer.chars().any(|c| c.is_ascii_digit()));
      assert!(task.answer.chars().any(|c| !c.is_ascii_digit()));
      assert!(!task.answer.contains(' '));
    }
  }

  // Walks the answer left to right, consuming the symbol each spoken name stands for.
  fn resolves_to_answer(task: &Task) -> bool {
    let mut rest = task.answer.as_str();
    for name in task.prompt.split(" - ") {
      let candidates: Vec<String> = match (1..=MAX_CODE_NUMBER).find(|n| number_to_greek(*n) == name) {
        Some(n) => vec![n.to_string()],
        None => GREEK_LETTERS
          .iter()
          .filter(|l| l.name == name)
          .map(|l| l.symbol.to_string())
          .collect(),
      };
      match candidates.iter().find(|c| rest.starts_with(c.as_str())) {
        Some(symbol) => rest = &rest[symbol.len()..],
        None => return false,
      }
    }
    rest.is_empty()
  }

  #[test]
  fn code_answer_spells_out_the_prompt() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..100 {
      let task = generate_code_task(&mut rng);
      assert!(resolves_to_answer(&task), "{} / {}", task.prompt, task.answer);
    }
  }

  #[test]
  fn build_deck_respects_mode_and_size() {
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(build_deck(GameMode::Translation, 5, &mut rng).len(), translation_deck_size());
    assert_eq!(build_deck(GameMode::CodeAssembly, 5, &mut rng).len(), 5);
  }
}
