//! Aggregations over a departure snapshot.
//!
//! Everything here is a pure function over a slice of departures: no I/O,
//! no failure, empty input gives empty or zero output. These feed the
//! chart and summary view models.

use std::collections::HashMap;

use crate::domain::Departure;

/// North/south counts for one platform.
///
/// Only these two directions get buckets; a departure whose direction
/// matches neither (an eastbound shuttle, free text) counts toward
/// neither.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionSplit {
    pub north: usize,
    pub south: usize,
}

/// One bar of the countdown histogram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownBucket {
    /// Literal label for the countdown value, e.g. `"4 min"`.
    pub label: String,
    pub count: usize,
}

/// Number of departures per destination.
pub fn count_by_destination(departures: &[Departure]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for departure in departures {
        *counts.entry(departure.destination.clone()).or_insert(0) += 1;
    }
    counts
}

/// Number of departures per platform. Feeds the proportional view.
pub fn count_by_platform(departures: &[Departure]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for departure in departures {
        *counts.entry(departure.platform.clone()).or_insert(0) += 1;
    }
    counts
}

/// North/south split per platform.
///
/// Direction matching is a case-insensitive substring test, so "North",
/// "Northbound" and "NORTH" all land in the north bucket. A platform
/// whose departures all match neither direction still appears, with both
/// counts zero.
pub fn direction_split_by_platform(departures: &[Departure]) -> HashMap<String, DirectionSplit> {
    let mut split: HashMap<String, DirectionSplit> = HashMap::new();
    for departure in departures {
        let entry = split.entry(departure.platform.clone()).or_default();
        let direction = departure.direction.to_lowercase();
        if direction.contains("north") {
            entry.north += 1;
        } else if direction.contains("south") {
            entry.south += 1;
        }
    }
    split
}

/// Mean delay in minutes over delayed departures only.
///
/// Returns 0.0 when no departure has a positive delay; on-time records do
/// not drag the average down.
pub fn average_delay(departures: &[Departure]) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for departure in departures {
        if departure.delay > 0.0 {
            sum += departure.delay;
            count += 1;
        }
    }
    if count == 0 {
        return 0.0;
    }
    sum / count as f64
}

/// Largest delay in the snapshot, 0.0 when empty.
pub fn max_delay(departures: &[Departure]) -> f64 {
    departures
        .iter()
        .fold(0.0, |largest, departure| departure.delay.max(largest))
}

/// Departure counts bucketed by countdown value.
///
/// Sorted by countdown ascending, one bucket per distinct value, labeled
/// with the literal countdown ("4 min"). Bucket order is first-seen order
/// after the sort, i.e. ascending.
pub fn countdown_histogram(departures: &[Departure]) -> Vec<CountdownBucket> {
    let mut by_countdown: Vec<&Departure> = departures.iter().collect();
    by_countdown.sort_by_key(|departure| departure.minutes);

    let mut buckets: Vec<CountdownBucket> = Vec::new();
    for departure in by_countdown {
        let label = format!("{} min", departure.minutes);
        match buckets.iter_mut().find(|bucket| bucket.label == label) {
            Some(bucket) => bucket.count += 1,
            None => buckets.push(CountdownBucket { label, count: 1 }),
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn departure(destination: &str, direction: &str, minutes: u32, platform: &str, delay: f64) -> Departure {
        Departure {
            destination: destination.into(),
            direction: direction.into(),
            minutes,
            platform: platform.into(),
            bike_flag: false,
            delay,
            color: "YELLOW".into(),
            length: 10,
            timestamp: None,
        }
    }

    #[test]
    fn empty_snapshot_gives_zeroes() {
        assert!(count_by_destination(&[]).is_empty());
        assert!(count_by_platform(&[]).is_empty());
        assert!(direction_split_by_platform(&[]).is_empty());
        assert!(countdown_histogram(&[]).is_empty());
        assert_eq!(average_delay(&[]), 0.0);
        assert_eq!(max_delay(&[]), 0.0);
    }

    #[test]
    fn two_richmond_trains_one_delayed() {
        // Matches the dashboard's canonical example: two Richmond trains on
        // platform 1, one five minutes late.
        let snapshot = [
            departure("Richmond", "North", 3, "1", 5.0),
            departure("Richmond", "South", 7, "1", 0.0),
        ];

        assert_eq!(average_delay(&snapshot), 5.0);
        assert_eq!(max_delay(&snapshot), 5.0);

        let by_destination = count_by_destination(&snapshot);
        assert_eq!(by_destination.len(), 1);
        assert_eq!(by_destination["Richmond"], 2);

        let split = direction_split_by_platform(&snapshot);
        assert_eq!(split["1"], DirectionSplit { north: 1, south: 1 });
    }

    #[test]
    fn average_ignores_on_time_trains() {
        let snapshot = [
            departure("Millbrae", "South", 2, "2", 6.0),
            departure("Millbrae", "South", 9, "2", 0.0),
            departure("Millbrae", "South", 17, "2", 2.0),
        ];
        // (6 + 2) / 2, not / 3
        assert_eq!(average_delay(&snapshot), 4.0);
    }

    #[test]
    fn all_on_time_average_is_zero() {
        let snapshot = [
            departure("Antioch", "North", 5, "3", 0.0),
            departure("Antioch", "North", 20, "3", 0.0),
        ];
        assert_eq!(average_delay(&snapshot), 0.0);
        assert_eq!(max_delay(&snapshot), 0.0);
    }

    #[test]
    fn direction_matching_is_substring_and_case_insensitive() {
        let snapshot = [
            departure("Richmond", "Northbound", 3, "1", 0.0),
            departure("Berryessa", "SOUTH", 5, "1", 0.0),
            departure("Oakland Airport", "Eastbound", 8, "1", 0.0),
        ];

        let split = direction_split_by_platform(&snapshot);
        // Eastbound increments neither bucket but still creates the
        // platform entry's zero state.
        assert_eq!(split["1"], DirectionSplit { north: 1, south: 1 });
    }

    #[test]
    fn unmatched_direction_still_creates_platform_entry() {
        let snapshot = [departure("Dublin", "Eastbound", 4, "9", 0.0)];
        let split = direction_split_by_platform(&snapshot);
        assert_eq!(split["9"], DirectionSplit { north: 0, south: 0 });
    }

    #[test]
    fn platform_counts() {
        let snapshot = [
            departure("Richmond", "North", 3, "1", 0.0),
            departure("Millbrae", "South", 4, "2", 0.0),
            departure("Berryessa", "South", 6, "2", 0.0),
        ];

        let by_platform = count_by_platform(&snapshot);
        assert_eq!(by_platform["1"], 1);
        assert_eq!(by_platform["2"], 2);
    }

    #[test]
    fn histogram_sorted_ascending_with_merged_buckets() {
        let snapshot = [
            departure("Richmond", "North", 12, "1", 0.0),
            departure("Millbrae", "South", 3, "2", 0.0),
            departure("Berryessa", "South", 12, "2", 0.0),
            departure("Antioch", "North", 7, "3", 0.0),
        ];

        let histogram = countdown_histogram(&snapshot);
        let labels: Vec<&str> = histogram.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["3 min", "7 min", "12 min"]);
        assert_eq!(histogram[2].count, 2);
    }
}
