//! Declarative expression graphs evaluated by the remote geospatial service.
//!
//! Every operation here is pure value construction: filters, joins, and style
//! transforms become JSON nodes that the service interprets server-side. The
//! gateway never evaluates any of them locally.

use serde::Serialize;
use serde_json::{Value, json};

use crownwatch_core::{
    LEAFING_NONE, MISSING_CROWN_COLOR, MISSING_CROWN_WIDTH, OBSERVED_CROWN_COLOR,
    OBSERVED_CROWN_WIDTH, TRANSPARENT_FILL, to_storage_form,
};

/// A node in the remote expression graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Expr(Value);

impl Expr {
    /// References the image archive asset by ID.
    #[must_use]
    pub fn image_collection(asset_id: &str) -> Self {
        Self(json!({ "imageCollection": asset_id }))
    }

    /// References a vector feature collection asset by ID.
    #[must_use]
    pub fn feature_collection(asset_id: &str) -> Self {
        Self(json!({ "featureCollection": asset_id }))
    }

    /// Keeps elements whose `field` equals `value`.
    #[must_use]
    pub fn filter_eq(self, field: &str, value: impl Into<Value>) -> Self {
        Self(json!({
            "filter": {
                "collection": self.0,
                "predicate": { "eq": { "field": field, "value": value.into() } },
            }
        }))
    }

    /// Keeps features whose `date` equals the storage form of `date`.
    #[must_use]
    pub fn filter_date(self, date: &str) -> Self {
        let storage = to_storage_form(date);
        self.filter_eq("date", storage)
    }

    /// Keeps features whose `field` is (or, negated, is not) in `values`.
    #[must_use]
    pub fn filter_in_list(self, field: &str, values: &[String], negate: bool) -> Self {
        Self(json!({
            "filter": {
                "collection": self.0,
                "predicate": {
                    "inList": { "field": field, "values": values, "negate": negate },
                },
            }
        }))
    }

    /// First element of the collection.
    #[must_use]
    pub fn first(self) -> Self {
        Self(json!({ "first": self.0 }))
    }

    /// Remote element count of the collection.
    #[must_use]
    pub fn size(self) -> Self {
        Self(json!({ "size": self.0 }))
    }

    /// Sets a fixed outline style on every feature. Fill stays transparent.
    #[must_use]
    pub fn set_style(self, color: &str, width: u32) -> Self {
        Self(json!({
            "map": {
                "collection": self.0,
                "set": {
                    "style": {
                        "color": color,
                        "width": width,
                        "fillColor": TRANSPARENT_FILL,
                    },
                },
            }
        }))
    }

    /// Recombines two collections into one.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self(json!({ "merge": [self.0, other.0] }))
    }

    /// Consumes the expression, yielding the raw graph for transport.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }
}

/// Save-all outer join of crowns against observation labels on equal
/// `GlobalID` and equal `date`, then a per-feature `leafing` attribute set to
/// the first match's `leafing_label`, or `"none"` when nothing matched.
#[must_use]
pub fn merge_crowns_with_labels(crowns: Expr, labels: Expr) -> Expr {
    let joined = json!({
        "join": {
            "primary": crowns.into_value(),
            "secondary": labels.into_value(),
            "mode": "saveAllOuter",
            "matchesKey": "matches",
            "condition": [
                { "leftField": "GlobalID", "rightField": "GlobalID" },
                { "leftField": "date", "rightField": "date" },
            ],
        }
    });
    Expr(json!({
        "map": {
            "collection": joined,
            "set": {
                "leafing": {
                    "firstMatchOr": {
                        "matchesKey": "matches",
                        "property": "leafing_label",
                        "default": LEAFING_NONE,
                    },
                },
            },
        }
    }))
}

/// Splits date-filtered crowns on membership of `GlobalID` in `observed_ids`
/// and tags each half with its fixed outline style: blue width 2 for crowns
/// that already have a plant record, red width 1 for the rest.
#[must_use]
pub fn partition_and_style(crowns: Expr, observed_ids: &[String]) -> Expr {
    let observed = crowns
        .clone()
        .filter_in_list("GlobalID", observed_ids, false)
        .set_style(OBSERVED_CROWN_COLOR, OBSERVED_CROWN_WIDTH);
    let missing = crowns
        .filter_in_list("GlobalID", observed_ids, true)
        .set_style(MISSING_CROWN_COLOR, MISSING_CROWN_WIDTH);
    observed.merge(missing)
}

/// Styles a collection by a categorical property against the fixed
/// phenology palette. No route uses this; it is kept for exploratory
/// rendering from the CLI or notebooks.
#[must_use]
pub fn style_by_property(collection: Expr, property: &str) -> Expr {
    Expr(json!({
        "map": {
            "collection": collection.into_value(),
            "set": {
                "style": {
                    "color": {
                        "match": {
                            "property": property,
                            "cases": {
                                "none": "#FF0000",
                                "Partially Leafed": "#00FF00",
                                "Out of Leafs": "#0000FF",
                                "Fully Leafed": "#FFFF00",
                            },
                            "default": "#FFFFFF",
                        },
                    },
                    "width": 1,
                    "fillColor": TRANSPARENT_FILL,
                },
            },
        }
    }))
}
