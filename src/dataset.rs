use std::{
    fs::{read_to_string, write},
    mem,
    path::Path,
};

use anyhow::{bail, Context, Result};
use geo::Point;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single restaurant, kept as the raw JSON object so fields we don't know
/// about survive the rewrite untouched and in their original order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Restaurant(Map<String, Value>);

impl Restaurant {
    pub fn name(&self) -> &str {
        self.0
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
    }

    pub fn address(&self) -> &str {
        self.text("address")
    }

    pub fn city(&self) -> &str {
        self.text("city")
    }

    pub fn state(&self) -> &str {
        self.text("state")
    }

    fn text(&self, key: &str) -> &str {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or_default()
    }

    /// Both `lat` and `lng` are present and non-null.
    pub fn is_resolved(&self) -> bool {
        [self.0.get("lat"), self.0.get("lng")]
            .into_iter()
            .all(|x| x.is_some_and(|x| !x.is_null()))
    }

    /// Stored coordinates as `(lat, lng)`.
    pub fn coordinates(&self) -> Option<Point> {
        let lat = self.0.get("lat")?.as_f64()?;
        let lng = self.0.get("lng")?.as_f64()?;
        Some(Point::new(lat, lng))
    }

    pub fn set_coordinates(&mut self, point: Point) {
        let (lat, lng) = point.x_y();
        self.0.insert("lat".to_string(), Value::from(lat));
        self.0.insert("lng".to_string(), Value::from(lng));
    }
}

impl From<Map<String, Value>> for Restaurant {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

/// The restaurants file, remembering whether it was a bare list or wrapped
/// in a `{"restaurants": [...]}` object.
#[derive(Debug)]
pub enum Dataset {
    List(Vec<Restaurant>),
    Envelope {
        payload: Map<String, Value>,
        restaurants: Vec<Restaurant>,
    },
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("Input file not found: {}", path.display());
        }

        let raw =
            read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let payload: Value = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Self::from_value(payload)
    }

    pub fn from_value(payload: Value) -> Result<Self> {
        match payload {
            Value::Array(items) => Ok(Self::List(parse_restaurants(items)?)),
            Value::Object(mut payload) => {
                // leave the key where it is so the envelope keeps its order on save
                let restaurants = match payload.get_mut("restaurants") {
                    Some(Value::Array(items)) => parse_restaurants(mem::take(items))?,
                    _ => bail!("Unrecognized JSON structure: no `restaurants` list"),
                };
                Ok(Self::Envelope {
                    payload,
                    restaurants,
                })
            }
            _ => bail!("Unrecognized JSON structure: expected a list or an object"),
        }
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        match self {
            Self::List(x) => x,
            Self::Envelope { restaurants, .. } => restaurants,
        }
    }

    pub fn restaurants_mut(&mut self) -> &mut [Restaurant] {
        match self {
            Self::List(x) => x,
            Self::Envelope { restaurants, .. } => restaurants,
        }
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(match self {
            Self::List(x) => serde_json::to_value(x)?,
            Self::Envelope {
                payload,
                restaurants,
            } => {
                let mut payload = payload.clone();
                payload.insert("restaurants".to_string(), serde_json::to_value(restaurants)?);
                Value::Object(payload)
            }
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let mut output = serde_json::to_string_pretty(&self.to_value()?)?;
        output.push('\n');
        write(path, output).with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(())
    }
}

fn parse_restaurants(items: Vec<Value>) -> Result<Vec<Restaurant>> {
    let mut output = Vec::with_capacity(items.len());
    for (idx, x) in items.into_iter().enumerate() {
        match x {
            Value::Object(x) => output.push(Restaurant(x)),
            _ => bail!("Restaurant #{} is not a JSON object", idx + 1),
        }
    }
    Ok(output)
}
