//! Record normalizer: one primary record (plus optional secondary) to one output row.

use crate::client::Fetched;
use crate::record::{PrimaryRecord, SecondaryRecord};
use serde::{Deserialize, Deserializer, Serialize};

/// One row of the output table. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    pub id: u32,
    pub name: String,
    pub type1: String,
    pub type2: Option<String>,
    pub height: u32,
    pub weight: u32,
    pub hp: Option<u32>,
    pub attack: Option<u32>,
    pub defense: Option<u32>,
    pub special_attack: Option<u32>,
    pub special_defense: Option<u32>,
    pub speed: Option<u32>,
    pub total_stats: u32,
    #[serde(deserialize_with = "flexible_bool")]
    pub is_legendary: bool,
}

/// Reads `true`/`false` as well as the `True`/`False` spelling pandas writes,
/// so checkpoints from older pandas-based exports load too.
fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim() {
        "true" | "True" | "TRUE" | "1" => Ok(true),
        "false" | "False" | "FALSE" | "0" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "expected a boolean, got {other:?}"
        ))),
    }
}

/// Column names, in order, as written in the header row.
pub const COLUMNS: [&str; 14] = [
    "id",
    "name",
    "type1",
    "type2",
    "height",
    "weight",
    "hp",
    "attack",
    "defense",
    "special_attack",
    "special_defense",
    "speed",
    "total_stats",
    "is_legendary",
];

/// Look up a stat by its API name (`special-attack` etc.).
fn stat(record: &PrimaryRecord, name: &str) -> Option<u32> {
    record
        .stats
        .iter()
        .find(|s| s.stat.name == name)
        .map(|s| s.base_stat)
}

/// Build the output row for `primary`.
///
/// With the secondary record unavailable, `is_legendary` is `false`. That
/// under-reports legendary status for those rows; the caller reports each
/// such degradation.
pub fn normalize(primary: &PrimaryRecord, secondary: Fetched<&SecondaryRecord>) -> OutputRow {
    let mut types = primary.types.iter().map(|t| t.type_.name.clone());
    let type1 = types.next().unwrap_or_default();
    let type2 = types.next();

    let hp = stat(primary, "hp");
    let attack = stat(primary, "attack");
    let defense = stat(primary, "defense");
    let special_attack = stat(primary, "special-attack");
    let special_defense = stat(primary, "special-defense");
    let speed = stat(primary, "speed");
    let total_stats = [hp, attack, defense, special_attack, special_defense, speed]
        .into_iter()
        .flatten()
        .sum();

    let is_legendary = match secondary {
        Fetched::Record(s) => s.is_legendary || s.is_mythical,
        Fetched::Unavailable => false,
    };

    OutputRow {
        id: primary.id,
        name: primary.name.clone(),
        type1,
        type2,
        height: primary.height,
        weight: primary.weight,
        hp,
        attack,
        defense,
        special_attack,
        special_defense,
        speed,
        total_stats,
        is_legendary,
    }
}
