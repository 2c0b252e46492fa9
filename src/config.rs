//! Macroregion Configuration Module
//! The static macroregion-to-regions mapping, with an optional JSON override.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// A named grouping of regions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Macroregion {
    pub name: String,
    pub regions: Vec<String>,
}

/// Ordered macroregion table, loaded once at startup and passed by
/// reference to the aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MacroregionTable {
    macroregions: Vec<Macroregion>,
}

impl MacroregionTable {
    /// Load the table from a JSON file if present, otherwise fall back to
    /// the built-in mapping.
    ///
    /// Expected format: `[{"name": "...", "regions": ["...", ...]}, ...]`
    pub fn load_or_default(file_path: &str) -> Self {
        if !Path::new(file_path).exists() {
            return Self::built_in();
        }

        match std::fs::read_to_string(file_path)
            .map_err(|e| e.to_string())
            .and_then(|text| serde_json::from_str::<Self>(&text).map_err(|e| e.to_string()))
        {
            Ok(table) if !table.is_empty() => {
                log::info!(
                    "loaded {} macroregions from {}",
                    table.len(),
                    file_path
                );
                table
            }
            Ok(_) => {
                log::warn!("{} defines no macroregions, using built-in table", file_path);
                Self::built_in()
            }
            Err(e) => {
                log::warn!("ignoring {}: {}", file_path, e);
                Self::built_in()
            }
        }
    }

    /// The built-in five-way macroregion split over Ukrainian oblasts.
    pub fn built_in() -> Self {
        fn entry(name: &str, regions: &[&str]) -> Macroregion {
            Macroregion {
                name: name.to_string(),
                regions: regions.iter().map(|r| r.to_string()).collect(),
            }
        }

        Self {
            macroregions: vec![
                entry(
                    "Захід",
                    &[
                        "Волинська",
                        "Закарпатська",
                        "Івано-Франківська",
                        "Львівська",
                        "Рівненська",
                        "Тернопільська",
                        "Хмельницька",
                        "Чернівецька",
                    ],
                ),
                entry(
                    "Центр",
                    &[
                        "Вінницька",
                        "Дніпропетровська",
                        "Кіровоградська",
                        "Полтавська",
                        "Черкаська",
                    ],
                ),
                entry(
                    "Північ",
                    &["Житомирська", "Київська", "Сумська", "Чернігівська"],
                ),
                entry(
                    "Південь",
                    &["Запорізька", "Миколаївська", "Одеська", "Херсонська"],
                ),
                entry("Схід", &["Донецька", "Луганська", "Харківська"]),
            ],
        }
    }

    /// Macroregions in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Macroregion> {
        self.macroregions.iter()
    }

    /// Look up a macroregion by its position in the table.
    pub fn get(&self, index: usize) -> Option<&Macroregion> {
        self.macroregions.get(index)
    }

    pub fn len(&self) -> usize {
        self.macroregions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macroregions.is_empty()
    }
}
