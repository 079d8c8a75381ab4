//! Integer → spoken Greek numeral, covering the 1..=101 range used by code tasks.
//!
//! Example:
//!   21  → "είκοσι ένα"
//!   101 → "εκατόν ένα"

const UNITS: [&str; 10] = ["", "ένα", "δύο", "τρία", "τέσσερα", "πέντε", "έξι", "εφτά", "οκτώ", "εννέα"];

const TEENS: [&str; 10] = [
  "δέκα",
  "έντεκα",
  "δώδεκα",
  "δεκατρία",
  "δεκατέσσερα",
  "δεκαπέντε",
  "δεκαέξι",
  "δεκαεπτά",
  "δεκαοκτώ",
  "δεκαεννέα",
];

// Indexed by tens digit; 0 and 1 are covered by UNITS/TEENS.
const TENS: [&str; 10] = [
  "", "", "είκοσι", "τριάντα", "σαράντα", "πενήντα", "εξήντα", "εβδομήντα", "ογδόντα", "ενενήντα",
];

/// Spoken Greek form of `value`.
///
/// Values outside 1..=101 are rendered as plain digits.
pub fn number_to_greek(value: i64) -> String {
  match value {
    1..=9 => UNITS[value as usize].to_string(),
    10..=19 => TEENS[(value - 10) as usize].to_string(),
    20..=99 => {
      let tens = TENS[(value / 10) as usize];
      match value % 10 {
        0 => tens.to_string(),
        unit => format!("{} {}", tens, UNITS[unit as usize]),
      }
    }
    100 => "εκατό".to_string(),
    101 => "εκατόν ένα".to_string(),
    _ => value.to_string(),
  }
}
