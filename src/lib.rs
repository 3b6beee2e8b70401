//! Mailpulse - In-memory analytics for email-campaign interaction logs
//!
//! Mailpulse turns a raw interaction log (rows of `date` + `status`) into
//! smoothed per-day rate curves through a deterministic, single-pass
//! pipeline: date parsing → day bucketing → binarization → daily
//! aggregation → moving-average smoothing → chart rendering.
//!
//! Every transformation is value-returning; nothing is mutated in place and
//! nothing persists between calls. Rendering is behind the
//! [`plot::ChartRenderer`] trait so the aggregation stages stay testable
//! without a display.

pub mod aggregate;
pub mod binarize;
pub mod dates;
pub mod day;
pub mod error;
pub mod pipeline;
pub mod plot;
pub mod schema;
pub mod smooth;
pub mod types;

pub use error::AnalysisError;
pub use pipeline::{daily_rates, interaction_chart, interaction_series, plot_interactions, time_axis};
pub use plot::{ChartRenderer, InteractionChart, LabeledSeries, TerminalRenderer};
pub use schema::RecordAdapter;
pub use smooth::{EdgePolicy, Smoother};
pub use types::{DailyPoint, DailySeries, Interaction, Record, Table};

/// Mailpulse version reported by the CLI
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
