//! View model types representing renderable UI state.
//!
//! View models are computed from `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data.

use crate::domain::country::NONE_PLACEHOLDER;
use crate::domain::{Country, Region};

/// Primary message of the empty state, shared by failures and empty results.
pub const NO_RESULTS_MESSAGE: &str = "No results were found";

/// Message shown in the list area while the current request is in flight.
pub const LOADING_MESSAGE: &str = "Loading countries...";

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub search_bar: SearchBarInfo,
    pub filter_bar: FilterBarInfo,
    pub list: ListView,
    /// Present while the region dropdown is open.
    pub dropdown: Option<DropdownView>,
    /// Present while the detail modal is open.
    pub modal: Option<ModalView>,
    pub footer: FooterInfo,
}

/// Content of the list area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Loading,
    /// Visible window of cards, in list order.
    Cards(Vec<CardItem>),
    Empty(EmptyState),
}

/// One card row in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardItem {
    pub name: String,
    /// Population with grouped thousands.
    pub population: String,
    pub region: String,
    pub capital: String,
    pub is_selected: bool,

    /// Character ranges of `name` matching the search text.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

impl CardItem {
    #[must_use]
    pub fn from_country(country: &Country, is_selected: bool, highlight_ranges: Vec<(usize, usize)>) -> Self {
        Self {
            name: country.name.clone(),
            population: country.population_display(),
            region: country.region.clone(),
            capital: country.capital_display(),
            is_selected,
            highlight_ranges,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Theme indicator shown at the right end of the header.
    pub mode_label: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text for the current mode.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,

    /// Secondary text; the failure reason when the request failed.
    pub subtitle: String,
}

/// Search input box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current field text.
    pub query: String,
    pub focused: bool,
    /// Whether the `[x]` cancel control is shown.
    pub show_cancel: bool,
}

/// Region filter trigger row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBarInfo {
    /// Selected region name, or the all-regions prompt.
    pub label: String,
    pub show_cancel: bool,
}

/// Open region dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownView {
    pub options: Vec<DropdownOption>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOption {
    pub region: Region,
    pub label: String,
    /// Keyboard cursor position.
    pub is_cursor: bool,
    /// The region currently filtered on.
    pub is_active: bool,
}

/// Label/value line of the detail modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalField {
    pub label: &'static str,
    pub value: String,
}

/// Detail panel for one country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub title: String,
    /// Flag description, or the flag URL when no description is available.
    pub flag: String,
    /// Left column: names, population, and location.
    pub primary: Vec<ModalField>,
    /// Right column: domains, currencies, and languages.
    pub secondary: Vec<ModalField>,
    /// Border country codes; empty renders as the placeholder.
    pub borders: Vec<String>,
}

impl ModalView {
    /// Builds the detail panel from a country record.
    ///
    /// Every field comes from the record itself, so the panel always shows the
    /// card that was opened.
    #[must_use]
    pub fn from_country(country: &Country) -> Self {
        let flag = if country.alt.is_empty() {
            country.flag.clone()
        } else {
            country.alt.clone()
        };

        Self {
            title: country.name.clone(),
            flag,
            primary: vec![
                ModalField { label: "Native Name", value: country.name.clone() },
                ModalField { label: "Population", value: country.population_display() },
                ModalField { label: "Region", value: country.region.clone() },
                ModalField { label: "Sub Region", value: country.subregion.clone() },
                ModalField { label: "Capital", value: country.capital_display() },
            ],
            secondary: vec![
                ModalField { label: "Top Level Domain", value: country.tld.display() },
                ModalField { label: "Currencies", value: country.currencies_display() },
                ModalField { label: "Languages", value: country.languages_display() },
            ],
            borders: country.borders.clone(),
        }
    }

    /// Border countries line content.
    #[must_use]
    pub fn borders_display(&self) -> Vec<String> {
        if self.borders.is_empty() {
            vec![NONE_PLACEHOLDER.to_string()]
        } else {
            self.borders.clone()
        }
    }

    /// Looks up a field value by label across both columns.
    #[must_use]
    pub fn field(&self, label: &str) -> Option<&str> {
        self.primary
            .iter()
            .chain(&self.secondary)
            .find(|field| field.label == label)
            .map(|field| field.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Tld;

    fn france() -> Country {
        Country {
            flag: "https://flagcdn.com/w320/fr.png".into(),
            alt: String::new(),
            name: "France".into(),
            population: 67_391_582,
            region: "Europe".into(),
            subregion: "Western Europe".into(),
            capital: vec!["Paris".into()],
            tld: Tld::Single(".fr".into()),
            currencies: vec!["Euro".into()],
            languages: vec!["French".into()],
            borders: vec!["AND".into(), "BEL".into()],
        }
    }

    #[test]
    fn modal_reflects_record() {
        let modal = ModalView::from_country(&france());
        assert_eq!(modal.title, "France");
        assert_eq!(modal.flag, "https://flagcdn.com/w320/fr.png");
        assert_eq!(modal.field("Native Name"), Some("France"));
        assert_eq!(modal.field("Population"), Some("67,391,582"));
        assert_eq!(modal.field("Top Level Domain"), Some(".fr"));
        assert_eq!(modal.borders_display(), vec!["AND".to_string(), "BEL".to_string()]);
    }

    #[test]
    fn empty_lists_show_placeholder() {
        let country = Country {
            name: "Antarctica".into(),
            alt: "A white flag".into(),
            ..Country::default()
        };
        let modal = ModalView::from_country(&country);
        assert_eq!(modal.flag, "A white flag");
        assert_eq!(modal.field("Currencies"), Some("None"));
        assert_eq!(modal.field("Languages"), Some("None"));
        assert_eq!(modal.field("Capital"), Some(""));
        assert_eq!(modal.borders_display(), vec!["None".to_string()]);
    }

    #[test]
    fn card_shows_grouped_population() {
        let card = CardItem::from_country(&france(), true, vec![(0, 2)]);
        assert_eq!(card.population, "67,391,582");
        assert_eq!(card.capital, "Paris");
        assert!(card.is_selected);
    }
}
