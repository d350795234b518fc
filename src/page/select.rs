use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A selection list with a named default entry.
///
/// The default entry always leads the list and survives every
/// [`rebuild`](Select::rebuild); only the options after it are replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Select {
    default: SelectOption,
    options: Vec<SelectOption>,
    /// Value of the chosen option; `None` means the default entry.
    selected: Option<String>,
}

impl Select {
    pub fn new(default: SelectOption) -> Self {
        Self {
            default,
            options: Vec::new(),
            selected: None,
        }
    }

    pub fn default_entry(&self) -> &SelectOption {
        &self.default
    }

    /// Options following the default entry.
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Total entries, default included.
    pub fn len(&self) -> usize {
        1 + self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Replace every non-default option.
    ///
    /// A selection that is still listed afterwards is kept; otherwise the
    /// default entry becomes selected again.
    pub fn rebuild<I>(&mut self, options: I)
    where
        I: IntoIterator<Item = SelectOption>,
    {
        self.options = options.into_iter().collect();
        let still_listed = match &self.selected {
            Some(chosen) => self.options.iter().any(|o| &o.value == chosen),
            None => true,
        };
        if !still_listed {
            self.selected = None;
        }
    }

    /// Choose the option with `value`. The default entry's value selects it.
    /// Returns `false` if no such option exists.
    pub fn select(&mut self, value: &str) -> bool {
        if value == self.default.value {
            self.selected = None;
            return true;
        }
        if self.options.iter().any(|o| o.value == value) {
            self.selected = Some(value.to_string());
            true
        } else {
            false
        }
    }

    /// Value submitted with the form.
    pub fn value(&self) -> &str {
        self.selected.as_deref().unwrap_or(&self.default.value)
    }
}
