//! Pipeline orchestration
//!
//! This module provides the public API for mailpulse. It runs the full
//! linear pass over a campaign log:
//! day extraction → sort → binarize → daily mean → smooth → plot.
//!
//! The two data-producing halves — one interaction's smoothed series and
//! the shared time axis — are exposed independently so callers can build
//! custom visualizations without the four-series plot.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveTime};

use crate::aggregate::DailyAggregator;
use crate::binarize::Binarizer;
use crate::dates;
use crate::day::DayExtractor;
use crate::error::AnalysisError;
use crate::plot::{ChartRenderer, InteractionChart, LabeledSeries};
use crate::smooth::Smoother;
use crate::types::{DailySeries, Interaction, Table};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Per-day rate of one interaction type, unsmoothed.
///
/// Day extraction and aggregation only; useful when the caller wants the
/// raw rates next to the smoothed curve.
pub fn daily_rates(table: Table, interaction: Interaction) -> Result<DailySeries, AnalysisError> {
    let table = DayExtractor::with_day_column(table)?;
    let table = DayExtractor::sort_by_day(table)?;
    let table = Binarizer::with_indicator(table, interaction.as_str(), "status")?;
    DailyAggregator::daily_mean(&table, interaction.as_str())
}

/// Moving average of one interaction type's per-day rate.
///
/// # Example
/// ```ignore
/// let opens = interaction_series(table, Interaction::Opened, 7)?;
/// ```
pub fn interaction_series(
    table: Table,
    interaction: Interaction,
    window: usize,
) -> Result<Vec<f64>, AnalysisError> {
    let smoother = Smoother::new(window)?;
    let series = daily_rates(table, interaction)?;
    smoother.smooth(&series.rates())
}

/// The shared time axis: distinct days in the table, ascending, as
/// fractional days since the Unix epoch.
pub fn time_axis(table: Table) -> Result<Vec<f64>, AnalysisError> {
    let table = DayExtractor::with_day_column(table)?;
    let keys = table
        .day_keys()
        .ok_or_else(|| AnalysisError::MissingColumn("day".to_string()))?;
    axis_from_day_keys(keys)
}

/// Build the four-series chart: for each interaction type, a day-extracted,
/// sorted, binarized, aggregated, and smoothed series against the shared
/// time axis.
pub fn interaction_chart(table: Table, window: usize) -> Result<InteractionChart, AnalysisError> {
    let smoother = Smoother::new(window)?;
    let table = DayExtractor::with_day_column(table)?;
    let mut table = DayExtractor::sort_by_day(table)?;

    let axis = {
        let keys = table
            .day_keys()
            .ok_or_else(|| AnalysisError::MissingColumn("day".to_string()))?;
        axis_from_day_keys(keys)?
    };

    let mut series = Vec::with_capacity(Interaction::ALL.len());
    for interaction in Interaction::ALL {
        table = Binarizer::with_indicator(table, interaction.as_str(), "status")?;
        let daily = DailyAggregator::daily_mean(&table, interaction.as_str())?;
        series.push(LabeledSeries {
            label: interaction.label().to_string(),
            values: smoother.smooth(&daily.rates())?,
        });
    }

    Ok(InteractionChart { axis, series })
}

/// Render all four interaction types against the shared day axis.
///
/// A single blocking call: builds the chart and hands it to the injected
/// renderer.
pub fn plot_interactions<R: ChartRenderer>(
    table: Table,
    window: usize,
    renderer: &mut R,
) -> Result<(), AnalysisError> {
    let chart = interaction_chart(table, window)?;
    renderer.render(&chart)
}

fn axis_from_day_keys(keys: &[String]) -> Result<Vec<f64>, AnalysisError> {
    let distinct: BTreeSet<&str> = keys.iter().map(String::as_str).collect();
    distinct
        .into_iter()
        .map(|day| dates::parse_day(day).map(epoch_days))
        .collect()
}

fn epoch_days(day: NaiveDate) -> f64 {
    day.and_time(NaiveTime::MIN).and_utc().timestamp() as f64 / SECONDS_PER_DAY
}
