//! Daily strip: forecast samples grouped by calendar date.

use chrono::NaiveDate;

use crate::model::{DayAggregate, WeatherSample, round_temp};

pub const MAX_DAYS: usize = 5;

/// Groups samples by the date of their (city-local) timestamp, in first-seen
/// order, and reduces each of the first [`MAX_DAYS`] groups.
pub fn aggregate_daily(samples: &[WeatherSample]) -> Vec<DayAggregate> {
    let mut by_day: Vec<(NaiveDate, Vec<&WeatherSample>)> = Vec::new();

    for sample in samples {
        let day_key = sample.timestamp.date_naive();
        match by_day.iter_mut().find(|(d, _)| *d == day_key) {
            Some((_, group)) => group.push(sample),
            None => {
                if by_day.len() == MAX_DAYS {
                    // chronological input: a new date past the fifth only
                    // means later days follow
                    continue;
                }
                by_day.push((day_key, vec![sample]));
            }
        }
    }

    by_day
        .into_iter()
        .map(|(date, group)| summarize(date, &group))
        .collect()
}

fn summarize(date: NaiveDate, group: &[&WeatherSample]) -> DayAggregate {
    let (min_t, max_t) = group.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(mn, mx), s| (mn.min(s.temperature), mx.max(s.temperature)),
    );

    DayAggregate {
        date,
        weekday: date.format("%a").to_string(),
        min: round_temp(min_t),
        max: round_temp(max_t),
        condition: mode(group.iter().map(|s| s.condition.as_str())),
        icon: mode(group.iter().map(|s| s.icon.as_str())),
    }
}

/// Most frequent value; on a tie the one that occurred first wins.
fn mode<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for v in values {
        match counts.iter_mut().find(|(seen, _)| *seen == v) {
            Some((_, n)) => *n += 1,
            None => counts.push((v, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (v, n) in counts {
        if best.is_none_or(|(_, b)| n > b) {
            best = Some((v, n));
        }
    }
    best.map(|(v, _)| v.to_string()).unwrap_or_default()
}
