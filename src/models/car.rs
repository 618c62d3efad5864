use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize};

/// A car record.
///
/// The `id` is supplied by the client; the directory never generates ids.
/// On input it may arrive as a JSON integer, an integral float (`6.0`) or a
/// string holding a decimal integer. It is always written back as a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    /// Manufacturer, e.g. "Toyota".
    pub mark: String,
    pub model: String,
    pub color: String,
}

impl Car {
    pub fn new(
        id: i64,
        mark: impl Into<String>,
        model: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id,
            mark: mark.into(),
            model: model.into(),
            color: color.into(),
        }
    }
}

/// Input for a partial update. Fields left as `None` keep their stored value.
///
/// An explicit JSON `null` is treated the same as an absent field. An empty
/// string is a real value and is written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarPatch {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl CarPatch {
    /// A patch for `id` that changes nothing until fields are set.
    pub fn for_id(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn mark(mut self, mark: impl Into<String>) -> Self {
        self.mark = Some(mark.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Overwrite the fields of `car` that are set on this patch.
    pub fn apply_to(self, car: &mut Car) {
        if let Some(mark) = self.mark {
            car.mark = mark;
        }
        if let Some(model) = self.model {
            car.model = model;
        }
        if let Some(color) = self.color {
            car.color = color;
        }
    }
}

struct IdVisitor;

impl de::Visitor<'_> for IdVisitor {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a car id (an integer or a string holding one)")
    }

    fn visit_i64<E: de::Error>(self, id: i64) -> Result<i64, E> {
        Ok(id)
    }

    fn visit_u64<E: de::Error>(self, id: u64) -> Result<i64, E> {
        i64::try_from(id).map_err(|_| E::custom(format!("invalid car id: {}", id)))
    }

    // Integral floats like `6.0` are accepted; anything with a fraction is not.
    fn visit_f64<E: de::Error>(self, id: f64) -> Result<i64, E> {
        if id.fract() == 0.0 && id >= i64::MIN as f64 && id < i64::MAX as f64 {
            Ok(id as i64)
        } else {
            Err(E::custom(format!("invalid car id: {}", id)))
        }
    }

    fn visit_str<E: de::Error>(self, text: &str) -> Result<i64, E> {
        text.trim()
            .parse()
            .map_err(|_| E::custom(format!("invalid car id: {:?}", text)))
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(IdVisitor)
}
