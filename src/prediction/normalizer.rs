//! Normalization of prediction service responses.
//!
//! The prediction service is not trusted to keep a stable response format,
//! so the normalizer accepts several payload shapes and silently drops
//! anything it cannot make sense of. It never returns an error.

use super::slug::slugify_label;
use crate::emotions::KnownLabels;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// Object keys that may hold the list of predictions, in priority order.
const LIST_KEYS: [&str; 4] = ["predictions", "results", "output", "emotions"];

/// Object key that may hold a `label -> score` map.
const SCORES_KEY: &str = "scores";

/// Item fields that may hold the label, in priority order.
const LABEL_FIELDS: [&str; 5] = ["label", "emotion", "id", "name", "tag"];

/// Item fields that may hold the score, in priority order.
const SCORE_FIELDS: [&str; 4] = ["score", "confidence", "probability", "value"];

lazy_static! {
    static ref DECIMAL_PREFIX: Regex =
        Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").unwrap();
}

/// A single emotion score in canonical form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPrediction {
    /// Canonical slug of `raw_label`.
    pub id: String,
    /// Label as returned by the service, trimmed.
    pub raw_label: String,
    /// Score clamped into `[0, 1]`.
    pub score: f64,
}

/// A prediction candidate found in the payload, before field extraction.
#[derive(Debug, Clone, Copy)]
enum Candidate<'a> {
    /// An element of a predictions list.
    Item(&'a Value),
    /// A `label: score` entry of an object.
    Entry { label: &'a str, score: &'a Value },
}

/// Recognizes one payload shape and lists its candidates.
///
/// Returns `None` when the payload does not have that shape, in which case
/// the next detector is tried.
type ShapeDetector = for<'a> fn(&'a Value, &KnownLabels) -> Option<Vec<Candidate<'a>>>;

const SHAPE_DETECTORS: [ShapeDetector; 4] = [
    detect_bare_list,
    detect_wrapped_list,
    detect_score_map,
    detect_flat_labels,
];

fn list_candidates(items: &[Value]) -> Vec<Candidate<'_>> {
    items.iter().map(Candidate::Item).collect()
}

fn entry_candidates<'a>(
    entries: impl Iterator<Item = (&'a String, &'a Value)>,
) -> Vec<Candidate<'a>> {
    entries
        .map(|(label, score)| Candidate::Entry { label, score })
        .collect()
}

/// `[ {...}, {...} ]`
fn detect_bare_list<'a>(payload: &'a Value, _: &KnownLabels) -> Option<Vec<Candidate<'a>>> {
    payload.as_array().map(|items| list_candidates(items))
}

/// `{ "predictions": [ ... ] }` and the other list keys.
fn detect_wrapped_list<'a>(payload: &'a Value, _: &KnownLabels) -> Option<Vec<Candidate<'a>>> {
    let object = payload.as_object()?;
    LIST_KEYS
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_array))
        .map(|items| list_candidates(items))
}

/// `{ "scores": { "joy": 0.9, ... } }`
///
/// An array under `scores` is rejected, so such payloads fall through to the
/// flat-label shape.
fn detect_score_map<'a>(payload: &'a Value, _: &KnownLabels) -> Option<Vec<Candidate<'a>>> {
    payload
        .get(SCORES_KEY)
        .and_then(Value::as_object)
        .map(|scores| entry_candidates(scores.iter()))
}

/// `{ "joy": 0.9, "fear": "0.1", "status": "ok" }`
///
/// Only keys whose slug is a known label and whose value is a number or a
/// string are taken, so unrelated fields are not mistaken for scores.
fn detect_flat_labels<'a>(
    payload: &'a Value,
    known_labels: &KnownLabels,
) -> Option<Vec<Candidate<'a>>> {
    let object: &Map<String, Value> = payload.as_object()?;
    let candidates = entry_candidates(object.iter().filter(|(key, value)| {
        (value.is_number() || value.is_string()) && known_labels.contains(&slugify_label(key))
    }));

    if candidates.is_empty() {
        None
    } else {
        Some(candidates)
    }
}

/// Parses the longest decimal literal at the start of `value`, after
/// leading whitespace. `"0.5 points"` gives `0.5`, `"n/a"` gives `None`.
fn parse_decimal_prefix(value: &str) -> Option<f64> {
    DECIMAL_PREFIX
        .find(value.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

fn coerce_score(value: &Value) -> Option<f64> {
    let score = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_decimal_prefix(text),
        _ => None,
    }?;
    score.is_finite().then_some(score)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null => Some(String::new()),
        _ => None,
    }
}

/// Scalars become their text; an array of scalars becomes its elements
/// joined with `,` (`["joy"]` is `"joy"`). Objects and nested arrays have no
/// label.
fn coerce_label(value: &Value) -> Option<String> {
    let label = match value {
        Value::Array(items) => items
            .iter()
            .map(scalar_text)
            .collect::<Option<Vec<_>>>()?
            .join(","),
        Value::Object(_) => return None,
        scalar => scalar_text(scalar)?,
    };
    let label = label.trim();
    (!label.is_empty()).then(|| label.to_string())
}

fn extract_label(item: &Map<String, Value>) -> Option<String> {
    LABEL_FIELDS
        .iter()
        .find_map(|field| item.get(*field).filter(|value| !value.is_null()))
        .and_then(coerce_label)
}

/// Numeric fields win over numeric strings, whatever their position; only
/// when no field holds a number is the first string field parsed.
fn extract_score(item: &Map<String, Value>) -> Option<f64> {
    let field_value = |predicate: fn(&Value) -> bool| {
        SCORE_FIELDS
            .iter()
            .find_map(|field| item.get(*field).filter(|value| predicate(value)))
    };

    field_value(Value::is_number)
        .or_else(|| field_value(Value::is_string))
        .and_then(coerce_score)
}

fn clamp_score(score: f64) -> f64 {
    if score <= 0.0 {
        0.0
    } else if score >= 1.0 {
        1.0
    } else {
        score
    }
}

impl Candidate<'_> {
    fn into_prediction(self) -> Option<NormalizedPrediction> {
        let (raw_label, score) = match self {
            Candidate::Item(item) => {
                let fields = item.as_object()?;
                (extract_label(fields)?, extract_score(fields)?)
            }
            Candidate::Entry { label, score } => {
                let label = label.trim();
                if label.is_empty() {
                    return None;
                }
                (label.to_string(), coerce_score(score)?)
            }
        };

        Some(NormalizedPrediction {
            id: slugify_label(&raw_label),
            raw_label,
            score: clamp_score(score),
        })
    }
}

/// Turns a raw prediction service payload into predictions sorted by
/// descending score.
///
/// Accepted shapes, tried in order:
/// 1. a bare array of prediction objects;
/// 2. an object with an array under `predictions`, `results`, `output` or
///    `emotions`;
/// 3. an object with a `label -> score` object under `scores`;
/// 4. a flat object whose keys are known labels.
///
/// `null` and unrecognized payloads give an empty list. Items without a
/// usable label or a finite score are dropped. Equal scores keep their
/// original relative order.
pub fn normalize_predictions(
    payload: &Value,
    known_labels: &KnownLabels,
) -> Vec<NormalizedPrediction> {
    if payload.is_null() {
        return Vec::new();
    }

    let candidates = SHAPE_DETECTORS
        .iter()
        .find_map(|detect| detect(payload, known_labels))
        .unwrap_or_default();

    let mut predictions: Vec<NormalizedPrediction> = candidates
        .into_iter()
        .filter_map(Candidate::into_prediction)
        .collect();

    // sort_by is stable
    predictions.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    predictions
}
