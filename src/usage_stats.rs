use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::split::split_on_comma;
use crate::trip_types::TripType;

/// Completed trip as read from the `counted` relation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripUsage {
    pub uid: i64,
    pub username: String,
    /// Comma-separated material (vehicle/aircraft type) codes
    pub material_type: String,
    /// Comma-separated operator names
    pub operator: String,
    pub past: i64,
    pub planned_future: i64,
}

/// Reference aircraft record from the `airliners` relation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airliner {
    pub iata: String,
    pub manufacturer: String,
    pub model: String,
}

impl Airliner {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.manufacturer, self.model)
    }
}

/// Airliners indexed by IATA type code
pub type AirlinerLookup = HashMap<String, Airliner>;

/// One row of the material report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialUsage {
    pub material: String,
    pub past: i64,
    pub planned_future: i64,
    pub count: i64,
}

/// One row of the operator report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorUsage {
    pub operator: String,
    pub past: i64,
    pub planned_future: i64,
    pub count: i64,
}

/// Key a material token is reported under.
///
/// Aircraft codes of air and helicopter trips are shown as
/// "manufacturer model" when the code is known; anything else is shown as
/// the raw code.
pub fn display_key(trip_type: TripType, code: &str, lookup: &AirlinerLookup) -> String {
    if trip_type.resolves_aircraft()
        && let Some(airliner) = lookup.get(code)
    {
        return airliner.display_name();
    }
    code.to_string()
}

/// Running (past, planned_future) sums per key, remembering first-seen order
#[derive(Default)]
struct Tally {
    index: HashMap<String, usize>,
    rows: Vec<(String, i64, i64)>,
}

impl Tally {
    fn add(&mut self, key: String, past: i64, planned_future: i64) {
        match self.index.get(&key) {
            Some(&i) => {
                let row = &mut self.rows[i];
                row.1 = row.1.saturating_add(past);
                row.2 = row.2.saturating_add(planned_future);
            }
            None => {
                self.index.insert(key.clone(), self.rows.len());
                self.rows.push((key, past, planned_future));
            }
        }
    }

    /// Rows ordered by total count descending; ties keep first-seen order
    fn ranked(self) -> Vec<(String, i64, i64, i64)> {
        let mut rows: Vec<_> = self
            .rows
            .into_iter()
            .map(|(key, past, planned_future)| {
                (key, past, planned_future, past.saturating_add(planned_future))
            })
            .collect();
        rows.sort_by(|a, b| b.3.cmp(&a.3));
        rows
    }
}

/// Every (token, past, planned_future) element of a multi-valued field.
/// Each token carries the full counts of its trip.
fn expand<'a, F>(
    trips: &'a [TripUsage],
    field: F,
) -> impl Iterator<Item = (String, i64, i64)> + 'a
where
    F: Fn(&TripUsage) -> &str + 'a,
{
    trips.iter().flat_map(move |trip| {
        split_on_comma(field(trip))
            .into_iter()
            .map(move |token| (token, trip.past, trip.planned_future))
    })
}

/// Material report over already-filtered trips
pub fn aggregate_materials(
    trips: &[TripUsage],
    trip_type: TripType,
    lookup: &AirlinerLookup,
) -> Vec<MaterialUsage> {
    let mut tally = Tally::default();
    for (code, past, planned_future) in expand(trips, |t| t.material_type.as_str()) {
        tally.add(display_key(trip_type, &code, lookup), past, planned_future);
    }

    tally
        .ranked()
        .into_iter()
        .map(|(material, past, planned_future, count)| MaterialUsage {
            material,
            past,
            planned_future,
            count,
        })
        .collect()
}

/// Operator report over already-filtered trips
pub fn aggregate_operators(trips: &[TripUsage]) -> Vec<OperatorUsage> {
    let mut tally = Tally::default();
    for (operator, past, planned_future) in expand(trips, |t| t.operator.as_str()) {
        tally.add(operator, past, planned_future);
    }

    tally
        .ranked()
        .into_iter()
        .map(|(operator, past, planned_future, count)| OperatorUsage {
            operator,
            past,
            planned_future,
            count,
        })
        .collect()
}

/// Distinct material tokens of a set of trips, used to restrict the
/// airliner lookup query to codes that can actually match
pub fn material_codes(trips: &[TripUsage]) -> Vec<String> {
    let mut codes: Vec<String> = expand(trips, |t| t.material_type.as_str())
        .map(|(code, _, _)| code)
        .filter(|code| !code.is_empty())
        .collect();
    codes.sort();
    codes.dedup();
    codes
}
