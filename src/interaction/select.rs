/// Country dropdown listing countries in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountrySelect {
    options: Vec<String>,
    selected: Option<String>,
}

impl CountrySelect {
    /// The first option starts selected.
    pub fn new(options: Vec<String>) -> Self {
        let selected = options.first().cloned();
        Self { options, selected }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Change the selection; returns whether `country` is one of the options.
    pub fn select(&mut self, country: &str) -> bool {
        self.selected = Some(country.to_string());
        self.options.iter().any(|o| o == country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_first_option() {
        let select = CountrySelect::new(vec!["Åland".to_string(), "Afghanistan".to_string()]);
        assert_eq!(select.selected(), Some("Åland"));

        assert_eq!(CountrySelect::new(Vec::new()).selected(), None);
    }

    #[test]
    fn test_select_unknown_country() {
        let mut select = CountrySelect::new(vec!["France".to_string()]);
        assert!(!select.select("Atlantis"));
        assert_eq!(select.selected(), Some("Atlantis"));
    }
}
