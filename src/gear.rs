//! Lance and skin catalog
//!
//! Static shop data plus pure lookups. Ownership and unlock state live in
//! the player profile; this module never mutates anything. Unknown ids fall
//! back to the starter item because ids often arrive through
//! loosely-validated cross-screen handoffs.

use crate::qte::QteParams;

/// Lance the player owns and wears from the first launch
pub const STARTER_LANCE_ID: &str = "training_lance";
/// Skin the player owns and wears from the first launch
pub const STARTER_SKIN_ID: &str = "classic_fleece";

/// An equippable lance. Heavier lances pay more but swing the meter faster
/// and widen the button alphabet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LanceSpec {
    pub id: &'static str,
    pub name: &'static str,
    /// Multiplier on the base indicator speed
    pub speed_modifier: f32,
    /// Timing meter width (px)
    pub meter_width: f32,
    /// Button alphabet size for round generation (2-4)
    pub active_buttons: usize,
    /// Shop price; 0 means owned from the start
    pub price: u32,
}

impl LanceSpec {
    /// Difficulty parameters handed to the QTE engine
    pub fn qte_params(&self) -> QteParams {
        QteParams {
            speed_modifier: self.speed_modifier,
            meter_width: self.meter_width,
            active_buttons: self.active_buttons,
        }
    }
}

/// A cosmetic skin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkinSpec {
    pub id: &'static str,
    pub name: &'static str,
    /// Shop price; 0 means owned from the start
    pub price: u32,
}

pub const LANCES: &[LanceSpec] = &[
    LanceSpec {
        id: "training_lance",
        name: "Training Lance",
        speed_modifier: 1.0,
        meter_width: 400.0,
        active_buttons: 2,
        price: 0,
    },
    LanceSpec {
        id: "oak_lance",
        name: "Oak Lance",
        speed_modifier: 1.2,
        meter_width: 400.0,
        active_buttons: 2,
        price: 150,
    },
    LanceSpec {
        id: "steel_lance",
        name: "Steel Lance",
        speed_modifier: 1.5,
        meter_width: 380.0,
        active_buttons: 3,
        price: 300,
    },
    LanceSpec {
        id: "tournament_lance",
        name: "Tournament Lance",
        speed_modifier: 1.8,
        meter_width: 360.0,
        active_buttons: 3,
        price: 500,
    },
    LanceSpec {
        id: "golden_lance",
        name: "Golden Lance",
        speed_modifier: 2.2,
        meter_width: 340.0,
        active_buttons: 4,
        price: 900,
    },
];

pub const SKINS: &[SkinSpec] = &[
    SkinSpec {
        id: "classic_fleece",
        name: "Classic Fleece",
        price: 0,
    },
    SkinSpec {
        id: "midnight_ram",
        name: "Midnight Ram",
        price: 120,
    },
    SkinSpec {
        id: "royal_wool",
        name: "Royal Wool",
        price: 250,
    },
    SkinSpec {
        id: "iron_fleece",
        name: "Iron Fleece",
        price: 400,
    },
    SkinSpec {
        id: "golden_fleece",
        name: "Golden Fleece",
        price: 800,
    },
];

/// Look up a lance by id, falling back to the starter lance (first entry)
pub fn lance(id: &str) -> &'static LanceSpec {
    LANCES.iter().find(|l| l.id == id).unwrap_or(&LANCES[0])
}

/// Look up a skin by id, falling back to the starter skin (first entry)
pub fn skin(id: &str) -> &'static SkinSpec {
    SKINS.iter().find(|s| s.id == id).unwrap_or(&SKINS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_ids_fall_back_to_starters() {
        assert_eq!(lance("excalibur").id, STARTER_LANCE_ID);
        assert_eq!(skin("???").id, STARTER_SKIN_ID);
    }

    #[test]
    fn test_catalog_params_in_range() {
        for lance in LANCES {
            assert!(lance.speed_modifier > 0.0, "{}", lance.id);
            assert!(lance.meter_width > 0.0, "{}", lance.id);
            assert!((2..=4).contains(&lance.active_buttons), "{}", lance.id);
        }
    }

    #[test]
    fn test_catalog_ids_unique() {
        for (i, a) in LANCES.iter().enumerate() {
            assert!(LANCES.iter().skip(i + 1).all(|b| b.id != a.id));
        }
        for (i, a) in SKINS.iter().enumerate() {
            assert!(SKINS.iter().skip(i + 1).all(|b| b.id != a.id));
        }
    }

    #[test]
    fn test_starters_are_free() {
        assert_eq!(lance(STARTER_LANCE_ID).price, 0);
        assert_eq!(skin(STARTER_SKIN_ID).price, 0);
    }
}
