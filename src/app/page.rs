use crate::core::engine;
use crate::core::query_codec::{decode, encode};
use crate::core::suggestions::{suggest, DEFAULT_SUGGESTION_LIMIT};
use crate::core::{
    normalizer, ConsultationMode, FieldUpdate, Navigator, PractitionerRecord, PractitionerSource,
    QueryDelta, QueryState, SortKey,
};

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch doctors. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Failed(String),
    Loaded,
}

/// What the result area shows.
#[derive(Debug, PartialEq)]
pub enum PageView<'a> {
    Loading,
    Error(&'a str),
    /// The fetch succeeded but nothing matches.
    Empty,
    Results(Vec<&'a PractitionerRecord>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelSection {
    Specialty,
    Consultation,
    Sort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSections {
    pub specialty: bool,
    pub consultation: bool,
    pub sort: bool,
}

impl Default for PanelSections {
    fn default() -> Self {
        Self {
            specialty: true,
            consultation: true,
            sort: true,
        }
    }
}

/// The listing page: fetched records, the search box and the filter panel,
/// all reading their selections from the navigator's current address.
pub struct DirectoryPage<N: Navigator> {
    navigator: N,
    records: Vec<PractitionerRecord>,
    load_state: LoadState,
    search_input: String,
    show_suggestions: bool,
    suggestion_limit: usize,
    panel: PanelSections,
}

impl<N: Navigator> DirectoryPage<N> {
    pub fn new(navigator: N) -> Self {
        let search_input = decode(navigator.current_query())
            .search_text
            .unwrap_or_default();

        Self {
            navigator,
            records: Vec::new(),
            load_state: LoadState::Loading,
            search_input,
            show_suggestions: false,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            panel: PanelSections::default(),
        }
    }

    pub fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = limit;
        self
    }

    /// Runs the one-time fetch. A failure leaves an empty record set and the
    /// page in [`LoadState::Failed`]; it is logged, never returned.
    pub async fn load_with(&mut self, source: &dyn PractitionerSource) {
        self.load_state = LoadState::Loading;

        match source.fetch().await {
            Ok(items) => {
                self.records = normalizer::normalize_records(&items);
                self.load_state = LoadState::Loaded;
                tracing::info!("Loaded {} practitioners", self.records.len());
            }
            Err(e) => {
                tracing::error!(
                    "Error fetching doctors: {} (Category: {:?})",
                    e,
                    e.category()
                );
                self.records.clear();
                self.load_state = LoadState::Failed(FETCH_FAILED_MESSAGE.to_string());
            }
        }
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn records(&self) -> &[PractitionerRecord] {
        &self.records
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Decoded fresh from the address on every call.
    pub fn query_state(&self) -> QueryState {
        decode(self.navigator.current_query())
    }

    pub fn view(&self) -> PageView<'_> {
        match &self.load_state {
            LoadState::Loading => PageView::Loading,
            LoadState::Failed(message) => PageView::Error(message),
            LoadState::Loaded => {
                let results = engine::apply(&self.records, &self.query_state());
                if results.is_empty() {
                    PageView::Empty
                } else {
                    PageView::Results(results)
                }
            }
        }
    }

    pub fn specialty_options(&self) -> Vec<String> {
        engine::specialty_options(&self.records)
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn edit_search(&mut self, text: &str) {
        self.search_input = text.to_string();
        self.show_suggestions = true;
    }

    /// Suggestions for the current input; empty while they are hidden.
    pub fn suggestions(&self) -> Vec<&PractitionerRecord> {
        if !self.show_suggestions {
            return Vec::new();
        }
        suggest(&self.records, &self.search_input, self.suggestion_limit)
    }

    pub fn submit_search(&mut self) {
        self.show_suggestions = false;
        let delta = QueryDelta::search(self.search_input.trim());
        self.commit(&delta);
    }

    /// Returns `false` if `index` is not a visible suggestion.
    pub fn select_suggestion(&mut self, index: usize) -> bool {
        let Some(name) = self.suggestions().get(index).map(|r| r.name.clone()) else {
            return false;
        };

        self.search_input = name;
        self.show_suggestions = false;
        let delta = QueryDelta::search(&self.search_input);
        self.commit(&delta);
        true
    }

    pub fn toggle_consultation(&mut self, mode: ConsultationMode) {
        let delta = self.query_state().toggled_consultation(mode);
        self.commit(&delta);
    }

    pub fn toggle_specialty(&mut self, specialty: &str) {
        let delta = self.query_state().toggled_specialty(specialty);
        self.commit(&delta);
    }

    pub fn toggle_sort(&mut self, key: SortKey) {
        let delta = self.query_state().toggled_sort(key);
        self.commit(&delta);
    }

    pub fn clear_filters(&mut self) {
        let delta = QueryDelta {
            consultation_mode: Some(FieldUpdate::Clear),
            specialties: Some(FieldUpdate::Clear),
            sort_key: Some(FieldUpdate::Clear),
            ..QueryDelta::default()
        };
        self.commit(&delta);
    }

    pub fn back(&mut self) -> bool {
        let moved = self.navigator.back();
        if moved {
            self.sync_search_input();
        }
        moved
    }

    pub fn forward(&mut self) -> bool {
        let moved = self.navigator.forward();
        if moved {
            self.sync_search_input();
        }
        moved
    }

    pub fn panel(&self) -> PanelSections {
        self.panel
    }

    pub fn toggle_section(&mut self, section: PanelSection) {
        let flag = match section {
            PanelSection::Specialty => &mut self.panel.specialty,
            PanelSection::Consultation => &mut self.panel.consultation,
            PanelSection::Sort => &mut self.panel.sort,
        };
        *flag = !*flag;
    }

    /// Writes the merged query as a full navigation.
    fn commit(&mut self, delta: &QueryDelta) {
        let query = encode(self.navigator.current_query(), delta);
        self.navigator.navigate(&query);
        self.sync_search_input();
    }

    fn sync_search_input(&mut self) {
        self.search_input = self.query_state().search_text.unwrap_or_default();
    }
}
