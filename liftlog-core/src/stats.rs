//! Aggregates over workout collections.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::fmt;

use crate::models::{Workout, WorkoutStatus};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutStats {
    pub total_workouts: usize,
    /// Minutes
    pub total_duration: u64,
    pub total_calories: u64,
    /// Whole minutes, averaged over workouts that recorded a duration.
    pub average_duration: u64,
    /// Weight times reps over completed sets.
    pub total_volume: f64,
}

impl WorkoutStats {
    pub fn from_workouts(workouts: &[Workout]) -> Self {
        let mut stats = Self {
            total_workouts: workouts.len(),
            ..Default::default()
        };
        let mut timed = 0u64;

        for workout in workouts {
            if let Some(duration) = workout.duration {
                stats.total_duration += u64::from(duration);
                timed += 1;
            }
            stats.total_calories += workout.calories.map(u64::from).unwrap_or(0);
            stats.total_volume += workout.volume();
        }

        if timed > 0 {
            stats.average_duration = stats.total_duration / timed;
        }
        stats
    }
}

impl fmt::Display for WorkoutStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Workouts:         {}", self.total_workouts)?;
        writeln!(f, "Total duration:   {} min", self.total_duration)?;
        writeln!(f, "Average duration: {} min", self.average_duration)?;
        writeln!(f, "Total calories:   {} kcal", self.total_calories)?;
        write!(f, "Total volume:     {}", self.total_volume)
    }
}

/// The `n` most recently created workouts, newest first. Ties keep collection order.
pub fn most_recent(workouts: &[Workout], n: usize) -> Vec<Workout> {
    let mut sorted: Vec<&Workout> = workouts.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted.into_iter().take(n).cloned().collect()
}

/// Completed workouts per ISO week (Monday start) for the `weeks` weeks ending
/// with the week containing `today`, oldest first.
///
/// The window stops at the earliest representable week.
pub fn weekly_frequency(workouts: &[Workout], weeks: usize, today: NaiveDate) -> Vec<(NaiveDate, usize)> {
    let current = week_start(today);
    let reachable = usize::try_from((current - NaiveDate::MIN).num_weeks())
        .map(|n| n + 1)
        .unwrap_or(0);
    let mut buckets: Vec<(NaiveDate, usize)> = (0..weeks.min(reachable))
        .map_while(|back| {
            let back = i64::try_from(back).ok()?;
            current.checked_sub_signed(Duration::weeks(back))
        })
        .map(|week| (week, 0))
        .collect();
    buckets.reverse();

    for workout in workouts.iter().filter(|w| w.status == WorkoutStatus::Completed) {
        let start = week_start(workout.date);
        if let Some(bucket) = buckets.iter_mut().find(|(week, _)| *week == start) {
            bucket.1 += 1;
        }
    }
    buckets
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date.checked_sub_signed(Duration::days(i64::from(date.weekday().num_days_from_monday())))
        .unwrap_or(date)
}
