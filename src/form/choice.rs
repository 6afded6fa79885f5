/// The value of a selector that offers fixed options plus a free-text fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    None,
    Fixed(String),
    Custom(String),
}

impl Choice {
    /// Picks `Fixed` when `value` is one of `options`, `Custom` otherwise.
    /// Missing or blank values become `None`.
    pub fn resolve(value: Option<&str>, options: &[String]) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            None => Choice::None,
            Some(v) if options.iter().any(|option| option == v) => Choice::Fixed(v.to_string()),
            Some(v) => Choice::Custom(v.to_string()),
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Choice::None => None,
            Choice::Fixed(value) => Some(value.as_str()),
            Choice::Custom(value) => Some(value.trim()).filter(|v| !v.is_empty()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Empty,
    Option(usize),
    Custom,
}

/// Cycles through `[none?] options.. other`; typing only lands in the
/// free-text value while "other" is selected.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceField {
    options: Vec<String>,
    allow_none: bool,
    slot: Slot,
    custom_text: String,
}

impl ChoiceField {
    pub fn new(options: Vec<String>, allow_none: bool) -> Self {
        let slot = if allow_none {
            Slot::Empty
        } else if options.is_empty() {
            Slot::Custom
        } else {
            Slot::Option(0)
        };
        Self { options, allow_none, slot, custom_text: String::new() }
    }

    pub fn with_value(options: Vec<String>, allow_none: bool, value: Option<&str>) -> Self {
        let mut field = Self::new(options, allow_none);
        field.set_choice(Choice::resolve(value, &field.options));
        field
    }

    pub fn set_choice(&mut self, choice: Choice) {
        match choice {
            Choice::None if self.allow_none => self.slot = Slot::Empty,
            Choice::None => {}
            Choice::Fixed(value) => {
                if let Some(index) = self.options.iter().position(|option| *option == value) {
                    self.slot = Slot::Option(index);
                } else {
                    self.slot = Slot::Custom;
                    self.custom_text = value;
                }
            }
            Choice::Custom(value) => {
                self.slot = Slot::Custom;
                self.custom_text = value;
            }
        }
    }

    pub fn choice(&self) -> Choice {
        match self.slot {
            Slot::Empty => Choice::None,
            Slot::Option(index) => Choice::Fixed(self.options[index].clone()),
            Slot::Custom => Choice::Custom(self.custom_text.clone()),
        }
    }

    pub fn resolved(&self) -> Option<String> {
        self.choice().value().map(str::to_string)
    }

    pub fn is_custom(&self) -> bool {
        self.slot == Slot::Custom
    }

    pub fn custom_text(&self) -> &str {
        &self.custom_text
    }

    pub fn next(&mut self) {
        let slots = self.slot_count();
        self.slot = self.slot_at((self.slot_index() + 1) % slots);
    }

    pub fn prev(&mut self) {
        let slots = self.slot_count();
        self.slot = self.slot_at((self.slot_index() + slots - 1) % slots);
    }

    pub fn push_char(&mut self, c: char) {
        if self.is_custom() {
            self.custom_text.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if self.is_custom() {
            self.custom_text.pop();
        }
    }

    pub fn label(&self) -> String {
        match self.slot {
            Slot::Empty => "(none)".to_string(),
            Slot::Option(index) => self.options[index].clone(),
            Slot::Custom => format!("Other: {}", self.custom_text),
        }
    }

    fn offset(&self) -> usize {
        usize::from(self.allow_none)
    }

    fn slot_count(&self) -> usize {
        self.offset() + self.options.len() + 1
    }

    fn slot_index(&self) -> usize {
        match self.slot {
            Slot::Empty => 0,
            Slot::Option(index) => self.offset() + index,
            Slot::Custom => self.slot_count() - 1,
        }
    }

    fn slot_at(&self, index: usize) -> Slot {
        if self.allow_none && index == 0 {
            Slot::Empty
        } else if index == self.slot_count() - 1 {
            Slot::Custom
        } else {
            Slot::Option(index - self.offset())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instructors() -> Vec<String> {
        vec!["Prof. Shad".to_string(), "Prof. Sandeep".to_string()]
    }

    #[test]
    fn known_value_resolves_to_fixed() {
        let choice = Choice::resolve(Some("Prof. Shad"), &instructors());
        assert_eq!(choice, Choice::Fixed("Prof. Shad".to_string()));
    }

    #[test]
    fn unknown_value_resolves_to_custom() {
        let choice = Choice::resolve(Some("Dr. Who"), &instructors());
        assert_eq!(choice, Choice::Custom("Dr. Who".to_string()));
    }

    #[test]
    fn blank_value_resolves_to_none() {
        assert_eq!(Choice::resolve(Some("  "), &instructors()), Choice::None);
        assert_eq!(Choice::resolve(None, &instructors()), Choice::None);
    }

    #[test]
    fn custom_value_is_trimmed() {
        assert_eq!(Choice::Custom("  Genetics ".to_string()).value(), Some("Genetics"));
        assert_eq!(Choice::Custom("   ".to_string()).value(), None);
    }

    #[test]
    fn field_without_none_starts_on_first_option() {
        let field = ChoiceField::new(instructors(), false);
        assert_eq!(field.choice(), Choice::Fixed("Prof. Shad".to_string()));
    }

    #[test]
    fn field_without_options_starts_on_custom() {
        let field = ChoiceField::new(vec![], false);
        assert!(field.is_custom());
    }

    #[test]
    fn cycling_visits_none_options_and_other() {
        let mut field = ChoiceField::new(instructors(), true);
        assert_eq!(field.choice(), Choice::None);

        field.next();
        assert_eq!(field.choice(), Choice::Fixed("Prof. Shad".to_string()));
        field.next();
        assert_eq!(field.choice(), Choice::Fixed("Prof. Sandeep".to_string()));
        field.next();
        assert!(field.is_custom());
        field.next();
        assert_eq!(field.choice(), Choice::None);

        field.prev();
        assert!(field.is_custom());
    }

    #[test]
    fn typing_only_affects_custom_slot() {
        let mut field = ChoiceField::new(instructors(), true);
        field.push_char('x');
        assert_eq!(field.custom_text(), "");

        field.set_choice(Choice::Custom(String::new()));
        field.push_char('D');
        field.push_char('r');
        field.pop_char();
        assert_eq!(field.resolved(), Some("D".to_string()));
    }

    #[test]
    fn with_value_prefills_custom_text() {
        let field = ChoiceField::with_value(instructors(), true, Some("Dr. Who"));
        assert!(field.is_custom());
        assert_eq!(field.label(), "Other: Dr. Who");
    }
}
