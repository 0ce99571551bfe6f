//! Pure projection of dashboard state into what the screen shows.

use shared::domain::UserRecord;

use crate::dashboard::DashboardState;

pub const LOAD_MORE_LABEL: &str = "Load More";
pub const LOADING_LABEL: &str = "Loading...";
pub const END_OF_RECORDS_NOTICE: &str = "No more records to load";
pub const SEARCH_HINT: &str = "Search by name or email...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadControl {
    Hidden,
    Enabled,
    Loading,
}

impl LoadControl {
    pub fn label(self) -> Option<&'static str> {
        match self {
            Self::Hidden => None,
            Self::Enabled => Some(LOAD_MORE_LABEL),
            Self::Loading => Some(LOADING_LABEL),
        }
    }

    pub fn is_clickable(self) -> bool {
        self == Self::Enabled
    }

    pub fn shows_spinner(self) -> bool {
        self == Self::Loading
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView<'a> {
    pub records: Vec<&'a UserRecord>,
    pub error_banner: Option<&'a str>,
    pub load_control: LoadControl,
    pub show_end_notice: bool,
    pub loaded: usize,
}

impl DashboardView<'_> {
    pub fn matched(&self) -> usize {
        self.records.len()
    }
}

pub fn derive_view(state: &DashboardState) -> DashboardView<'_> {
    let load_control = if !state.has_more {
        LoadControl::Hidden
    } else if state.loading {
        LoadControl::Loading
    } else {
        LoadControl::Enabled
    };

    DashboardView {
        records: filter_records(&state.loaded_records, &state.search_query),
        error_banner: state.error.as_deref(),
        load_control,
        show_end_notice: !state.has_more && !state.loaded_records.is_empty(),
        loaded: state.loaded_records.len(),
    }
}

/// Keeps load order; an empty query keeps everything.
pub fn filter_records<'a>(records: &'a [UserRecord], query: &str) -> Vec<&'a UserRecord> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| record.matches_lowercase(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(records: usize, has_more: bool, loading: bool) -> DashboardState {
        DashboardState {
            loaded_records: (1..=records as i64)
                .map(|i| {
                    UserRecord::new(
                        i,
                        format!("User {i}"),
                        format!("user{i}@example.com"),
                        30,
                    )
                })
                .collect(),
            loading,
            has_more,
            ..DashboardState::default()
        }
    }

    #[test]
    fn load_control_follows_has_more_and_loading() {
        assert_eq!(
            derive_view(&state_with(10, true, false)).load_control,
            LoadControl::Enabled
        );
        assert_eq!(
            derive_view(&state_with(10, true, true)).load_control,
            LoadControl::Loading
        );
        assert_eq!(
            derive_view(&state_with(100, false, false)).load_control,
            LoadControl::Hidden
        );
        assert_eq!(LoadControl::Loading.label(), Some("Loading..."));
        assert!(LoadControl::Loading.shows_spinner());
        assert!(!LoadControl::Loading.is_clickable());
    }

    #[test]
    fn end_notice_requires_loaded_records() {
        assert!(derive_view(&state_with(100, false, false)).show_end_notice);
        assert!(!derive_view(&state_with(0, false, false)).show_end_notice);
        assert!(!derive_view(&state_with(10, true, false)).show_end_notice);
    }

    #[test]
    fn filter_is_case_insensitive_on_name_and_email() {
        let state = state_with(20, true, false);
        let by_name: Vec<i64> = filter_records(&state.loaded_records, "USER 1")
            .iter()
            .map(|r| r.id.0)
            .collect();
        assert_eq!(by_name, vec![1, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19]);

        let by_email = filter_records(&state.loaded_records, "user20@EXAMPLE");
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].id.0, 20);
    }

    #[test]
    fn error_banner_borrows_state_message() {
        let mut state = state_with(10, true, false);
        state.error = Some("Failed to fetch data. Please try again.".to_string());
        assert_eq!(
            derive_view(&state).error_banner,
            Some("Failed to fetch data. Please try again.")
        );
    }
}
