//! Unit template catalog loaded from TOML
//!
//! Templates describe the purchasable unit types: stats, point cost and the
//! type-keyed bonus tables. The shipped catalog lives in `data/units.toml`.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::battle::grid::FieldCoord;
use crate::battle::units::{AttackType, Unit};
use crate::core::error::{Result, WarlineError};
use crate::core::types::UnitId;

/// A purchasable unit type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitTemplate {
    pub unit_type: String,
    pub health: i32,
    pub base_attack: i32,
    pub cost: u32,
    #[serde(default)]
    pub attack_type: AttackType,
    /// Attack multipliers keyed by opposing unit type
    #[serde(default)]
    pub attack_bonuses: AHashMap<String, f32>,
    /// Defence multipliers keyed by opposing unit type
    #[serde(default)]
    pub defence_bonuses: AHashMap<String, f32>,
}

impl UnitTemplate {
    /// Stamp a combatant from this template. `index` is 1-based within the
    /// army and becomes part of the display name ("Knight 3").
    pub fn spawn(&self, index: usize, position: FieldCoord) -> Unit {
        Unit {
            id: UnitId::new(),
            name: format!("{} {}", self.unit_type, index),
            unit_type: self.unit_type.clone(),
            attack_type: self.attack_type,
            position,
            health: self.health,
            base_attack: self.base_attack,
            cost: self.cost,
            attack_bonuses: self.attack_bonuses.clone(),
            defence_bonuses: self.defence_bonuses.clone(),
        }
    }

    pub fn has_attack_bonus(&self) -> bool {
        !self.attack_bonuses.is_empty()
    }

    fn validate(&self) -> Result<()> {
        if self.cost == 0 {
            return Err(WarlineError::InvalidTemplate {
                name: self.unit_type.clone(),
                reason: "cost must be positive".to_string(),
            });
        }
        if self.health <= 0 {
            return Err(WarlineError::InvalidTemplate {
                name: self.unit_type.clone(),
                reason: "health must be positive".to_string(),
            });
        }
        if self.base_attack < 0 {
            return Err(WarlineError::InvalidTemplate {
                name: self.unit_type.clone(),
                reason: "base attack must not be negative".to_string(),
            });
        }
        for (versus, value) in self.attack_bonuses.iter().chain(self.defence_bonuses.iter()) {
            if *value <= 0.0 {
                return Err(WarlineError::InvalidTemplate {
                    name: self.unit_type.clone(),
                    reason: format!("bonus vs '{}' must be positive", versus),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    units: Vec<UnitTemplate>,
}

/// Parse a catalog from TOML text, validating every template
pub fn parse_catalog(text: &str) -> Result<Vec<UnitTemplate>> {
    let file: CatalogFile = toml::from_str(text)?;
    for template in &file.units {
        template.validate()?;
    }
    Ok(file.units)
}

/// Load the template catalog from a TOML file
pub fn load_catalog(path: &Path) -> Result<Vec<UnitTemplate>> {
    let contents = fs::read_to_string(path)?;
    let catalog = parse_catalog(&contents)?;
    tracing::info!(
        "loaded {} unit templates from {}",
        catalog.len(),
        path.display()
    );
    Ok(catalog)
}
