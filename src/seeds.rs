//! Static reference data: the phrase table, Russian glosses, the Greek alphabet
//! and the default player identities.

/// Greek subject pronouns that open every sentence in the phrase table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Subject {
  Ego,
  Esy,
  Aftos,
  Afti,
  Emeis,
  Eseis,
  Aftoi,
}

impl Subject {
  pub const ALL: [Subject; 7] = [
    Subject::Ego,
    Subject::Esy,
    Subject::Aftos,
    Subject::Afti,
    Subject::Emeis,
    Subject::Eseis,
    Subject::Aftoi,
  ];

  pub fn greek(&self) -> &'static str {
    match self {
      Subject::Ego => "Εγώ",
      Subject::Esy => "Εσύ",
      Subject::Aftos => "Αυτός",
      Subject::Afti => "Αυτή",
      Subject::Emeis => "Εμείς",
      Subject::Eseis => "Εσείς",
      Subject::Aftoi => "Αυτοί",
    }
  }

  pub fn russian(&self) -> &'static str {
    match self {
      Subject::Ego => "Я",
      Subject::Esy => "Ты",
      Subject::Aftos => "Он",
      Subject::Afti => "Она",
      Subject::Emeis => "Мы",
      Subject::Eseis => "Вы",
      Subject::Aftoi => "Они",
    }
  }

  /// "to give", conjugated for this subject.
  pub fn russian_verb(&self) -> &'static str {
    match self {
      Subject::Ego => "даю",
      Subject::Esy => "даешь",
      Subject::Aftos | Subject::Afti => "дает",
      Subject::Emeis => "даем",
      Subject::Eseis => "даете",
      Subject::Aftoi => "дают",
    }
  }

  pub fn from_greek(word: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|s| s.greek() == word)
  }
}

/// Indirect-object clitics in second position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndirectObject {
  Mou,
  Sou,
  Tou,
  Tis,
  Mas,
  Sas,
  Tous,
}

impl IndirectObject {
  pub const ALL: [IndirectObject; 7] = [
    IndirectObject::Mou,
    IndirectObject::Sou,
    IndirectObject::Tou,
    IndirectObject::Tis,
    IndirectObject::Mas,
    IndirectObject::Sas,
    IndirectObject::Tous,
  ];

  pub fn greek(&self) -> &'static str {
    match self {
      IndirectObject::Mou => "μου",
      IndirectObject::Sou => "σου",
      IndirectObject::Tou => "του",
      IndirectObject::Tis => "της",
      IndirectObject::Mas => "μας",
      IndirectObject::Sas => "σας",
      IndirectObject::Tous => "τους",
    }
  }

  pub fn russian(&self) -> &'static str {
    match self {
      IndirectObject::Mou => "мне",
      IndirectObject::Sou => "тебе",
      IndirectObject::Tou => "ему",
      IndirectObject::Tis => "ей",
      IndirectObject::Mas => "нам",
      IndirectObject::Sas => "вам",
      IndirectObject::Tous => "им",
    }
  }

  pub fn from_greek(word: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|o| o.greek() == word)
  }
}

/// "the book" in the accusative, shared by every gloss.
pub const DIRECT_OBJECT_RU: &str = "книгу";
/// Verb form used when the subject is not in the table.
pub const FALLBACK_VERB_RU: &str = "даю";

pub const TRANSLATION_PROMPT_LABEL: &str = "Переведи на греческий";
pub const CODE_PROMPT_LABEL: &str = "Собери код из 6 элементов";

/// Subject → full Greek sentences. 39 sentences in total.
pub const PHRASES: &[(Subject, &[&str])] = &[
  (
    Subject::Ego,
    &[
      "Εγώ σου δίνω το βιβλίο",
      "Εγώ του δίνω το βιβλίο",
      "Εγώ της δίνω το βιβλίο",
      "Εγώ σας δίνω το βιβλίο",
      "Εγώ τους δίνω το βιβλίο",
    ],
  ),
  (
    Subject::Esy,
    &[
      "Εσύ μου δίνεις το βιβλίο",
      "Εσύ του δίνεις το βιβλίο",
      "Εσύ της δίνεις το βιβλίο",
      "Εσύ μας δίνεις το βιβλίο",
      "Εσύ σας δίνεις το βιβλίο",
      "Εσύ τους δίνεις το βιβλίο",
    ],
  ),
  (
    Subject::Aftos,
    &[
      "Αυτός μου δίνει το βιβλίο",
      "Αυτός σου δίνει το βιβλίο",
      "Αυτός της δίνει το βιβλίο",
      "Αυτός μας δίνει το βιβλίο",
      "Αυτός σας δίνει το βιβλίο",
      "Αυτός τους δίνει το βιβλίο",
    ],
  ),
  (
    Subject::Afti,
    &[
      "Αυτή μου δίνει το βιβλίο",
      "Αυτή σου δίνει το βιβλίο",
      "Αυτή του δίνει το βιβλίο",
      "Αυτή μας δίνει το βιβλίο",
      "Αυτή σας δίνει το βιβλίο",
      "Αυτή τους δίνει το βιβλίο",
    ],
  ),
  (
    Subject::Emeis,
    &[
      "Εμείς σου δίνουμε το βιβλίο",
      "Εμείς του δίνουμε το βιβλίο",
      "Εμείς της δίνουμε το βιβλίο",
      "Εμείς σας δίνουμε το βιβλίο",
      "Εμείς τους δίνουμε το βιβλίο",
    ],
  ),
  (
    Subject::Eseis,
    &[
      "Εσείς μου δίνετε το βιβλίο",
      "Εσείς του δίνετε το βιβλίο",
      "Εσείς της δίνετε το βιβλίο",
      "Εσείς μας δίνετε το βιβλίο",
      "Εσείς τους δίνετε το βιβλίο",
    ],
  ),
  (
    Subject::Aftoi,
    &[
      "Αυτοί μου δίνουν το βιβλίο",
      "Αυτοί σου δίνουν το βιβλίο",
      "Αυτοί του δίνουν το βιβλίο",
      "Αυτοί της δίνουν το βιβλίο",
      "Αυτοί μας δίνουν το βιβλίο",
      "Αυτοί σας δίνουν το βιβλίο",
    ],
  ),
];

/// A Greek letter and its spoken name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Letter {
  pub symbol: &'static str,
  pub name: &'static str,
}

const fn letter(symbol: &'static str, name: &'static str) -> Letter {
  Letter { symbol, name }
}

/// Upper case then lower case; 48 entries.
pub const GREEK_LETTERS: [Letter; 48] = [
  letter("Α", "άλφα"), letter("Β", "βήτα"), letter("Γ", "γάμμα"), letter("Δ", "δέλτα"),
  letter("Ε", "έψιλον"), letter("Ζ", "ζήτα"), letter("Η", "ήτα"), letter("Θ", "θήτα"),
  letter("Ι", "ιώτα"), letter("Κ", "κάππα"), letter("Λ", "λάμδα"), letter("Μ", "μυ"),
  letter("Ν", "νυ"), letter("Ξ", "ξι"), letter("Ο", "όμικρον"), letter("Π", "πι"),
  letter("Ρ", "ρο"), letter("Σ", "σίγμα"), letter("Τ", "ταυ"), letter("Υ", "ύψιλον"),
  letter("Φ", "φι"), letter("Χ", "χι"), letter("Ψ", "ψι"), letter("Ω", "ωμέγα"),
  letter("α", "άλφα"), letter("β", "βήτα"), letter("γ", "γάμμα"), letter("δ", "δέλτα"),
  letter("ε", "έψιλον"), letter("ζ", "ζήτα"), letter("η", "ήτα"), letter("θ", "θήτα"),
  letter("ι", "ιώτα"), letter("κ", "κάππα"), letter("λ", "λάμδα"), letter("μ", "μυ"),
  letter("ν", "νυ"), letter("ξ", "ξι"), letter("ο", "όμικρον"), letter("π", "πι"),
  letter("ρ", "ρο"), letter("σ", "σίγμα"), letter("τ", "ταυ"), letter("υ", "ύψιλον"),
  letter("φ", "φι"), letter("χ", "χι"), letter("ψ", "ψι"), letter("ω", "ωμέγα"),
];

/// Number of tasks in a fresh translation deck.
pub fn translation_deck_size() -> usize {
  PHRASES.iter().map(|(_, sentences)| sentences.len()).sum()
}

/// Built-in identities for player 0 and player 1.
pub const DEFAULT_PLAYERS: [(&str, &str); 2] = [("Игрок 1", "indigo"), ("Игрок 2", "rose")];
