use serde::{Deserialize, Serialize};

/// `{ "href": "..." }` link object used throughout the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Href {
    pub href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetLinks {
    pub editions: Option<Href>,
    pub latest_version: Option<Href>,
}

/// One entry of the dataset listing.
///
/// Links are optional on the wire (unpublished datasets carry none); the
/// edition resolver decides what a missing link means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub links: DatasetLinks,
}

/// One page of `GET /datasets?offset=N`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetPage {
    pub items: Vec<DatasetSummary>,
    /// Number of items in this page (not the grand total).
    pub count: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditionLinks {
    pub latest_version: Option<Href>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditionEntry {
    pub edition: String,
    #[serde(default)]
    pub links: EditionLinks,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditionsPage {
    /// Absent `items` is read as "no editions", which sends the resolver to its fallback.
    #[serde(default)]
    pub items: Vec<EditionEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsLink {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionLinks {
    pub options: OptionsLink,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionEntry {
    pub name: String,
    #[serde(default)]
    pub label: String,
    pub links: DimensionLinks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionsPage {
    pub items: Vec<DimensionEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionEntry {
    pub option: String,
    #[serde(default)]
    pub label: String,
}

/// One page of `GET {edition}/dimensions/{id}/options?limit=N`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsPage {
    pub items: Vec<OptionEntry>,
    #[serde(default)]
    pub count: usize,
    /// Total options for the dimension; only used to detect truncation.
    #[serde(default)]
    pub total_count: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeRef {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationDimensions {
    #[serde(rename = "Time")]
    pub time: TimeRef,
}

/// Raw entry of the `observations` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationEntry {
    pub dimensions: ObservationDimensions,
    /// The API serializes values as strings, but numbers and `null` occur too.
    #[serde(default, deserialize_with = "de_opt_string_from_any")]
    pub observation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationsResponse {
    pub observations: Option<Vec<ObservationEntry>>,
}

/// Serde helper: keep a scalar (string, number, bool) as its textual form; `null` is `None`.
fn de_opt_string_from_any<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct ScalarVisitor;

    impl<'de> Visitor<'de> for ScalarVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a string, number, or null")
        }

        fn visit_str<E: de::Error>(self, s: &str) -> Result<Self::Value, E> {
            Ok(Some(s.to_string()))
        }

        fn visit_string<E: de::Error>(self, s: String) -> Result<Self::Value, E> {
            Ok(Some(s))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }
    }

    deserializer.deserialize_any(ScalarVisitor)
}

/// Tidy structure used by this crate (one row = one time period).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationRow {
    /// Time-period identifier, e.g. `"2019"` or `"Jan-Mar 2019"`.
    pub id: String,
    pub observation: Option<String>,
}

impl From<ObservationEntry> for ObservationRow {
    fn from(e: ObservationEntry) -> Self {
        Self {
            id: e.dimensions.time.id,
            observation: e.observation,
        }
    }
}

impl ObservationRow {
    /// Year taken from the last four characters of `id`.
    pub fn year(&self) -> Option<i32> {
        let chars: Vec<char> = self.id.trim().chars().collect();
        if chars.len() < 4 {
            return None;
        }
        chars[chars.len() - 4..]
            .iter()
            .collect::<String>()
            .parse()
            .ok()
    }

    pub fn value_f64(&self) -> Option<f64> {
        self.observation
            .as_deref()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }
}

/// Two-column (`id`, `observation`) table in API response order.
///
/// Nothing here reorders rows implicitly; call [`ObservationTable::sort_by_year`]
/// or [`ObservationTable::sort_by_id`] when chronology matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObservationTable {
    rows: Vec<ObservationRow>,
}

impl ObservationTable {
    pub fn new(rows: Vec<ObservationRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ObservationRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<ObservationRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ObservationRow> {
        self.rows.iter()
    }

    /// Stable sort by derived year; rows without a year go last.
    pub fn sort_by_year(&mut self) {
        self.rows
            .sort_by_key(|r| (r.year().is_none(), r.year().unwrap_or_default()));
    }

    pub fn sort_by_id(&mut self) {
        self.rows.sort_by(|a, b| a.id.cmp(&b.id));
    }
}

impl FromIterator<ObservationRow> for ObservationTable {
    fn from_iter<I: IntoIterator<Item = ObservationRow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ObservationTable {
    type Item = &'a ObservationRow;
    type IntoIter = std::slice::Iter<'a, ObservationRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
