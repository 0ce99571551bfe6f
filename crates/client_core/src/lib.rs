//! Client-side state for the paginated user dashboard: record source,
//! load controller, derived view and card presentation.

pub mod card;
pub mod config;
pub mod dashboard;
pub mod source;
pub mod view;

pub use card::{render_card, truncate_for_slot, CardField, UserCard};
pub use config::{load_settings, DashboardSettings, SettingsError};
pub use dashboard::{BatchRequest, DashboardController, DashboardState, LoadOutcome, LoadPhase};
pub use source::{fetch_with_latency, MockRecordSource, RecordSource};
pub use view::{derive_view, filter_records, DashboardView, LoadControl};
