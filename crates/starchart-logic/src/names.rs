//! Deterministic star name generation.
//!
//! Names are built from syllable tables keyed on the star id alone, so the
//! same star carries the same name in every galaxy and every session. Names
//! are flavor, not identity; collisions across the map are acceptable.

use crate::rng::mix;
use crate::StarId;

// Fixed key for the name stream, independent of any session seed.
const NAME_KEY: u64 = 0x4e41_4d45_5f4b_4559;

static ONSETS: &[&str] = &[
    "Al", "Be", "Ca", "Der", "El", "Fen", "Gal", "Hy", "Ia", "Kor", "Lum", "Mer", "Nol", "Or",
    "Pra", "Qua", "Rig", "Sar", "Tau", "Ul", "Vel", "Wex", "Xan", "Yor", "Zel",
];

static BRIDGES: &[&str] = &["a", "e", "i", "o", "u", "ar", "en", "il", "or", "ur"];

static CODAS: &[&str] = &[
    "dan", "fel", "gon", "ion", "kar", "lis", "mir", "nus", "phos", "rex", "sia", "thar", "vox",
    "wen", "zar",
];

/// Build the display name for a star.
pub fn star_name(star_id: StarId) -> String {
    let h = mix(NAME_KEY, star_id as u64);
    let onset = ONSETS[(h % ONSETS.len() as u64) as usize];
    let coda = CODAS[((h >> 8) % CODAS.len() as u64) as usize];

    let mut name = String::with_capacity(onset.len() + coda.len() + 2);
    name.push_str(onset);
    // Roughly a third of names get a middle syllable.
    if (h >> 16) % 3 == 0 {
        name.push_str(BRIDGES[((h >> 24) % BRIDGES.len() as u64) as usize]);
    }
    name.push_str(coda);
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_stable_per_star() {
        for id in [0, 1, 7, 500, 16_000] {
            assert_eq!(star_name(id), star_name(id));
        }
    }

    #[test]
    fn names_look_like_names() {
        for id in 0..500 {
            let name = star_name(id);
            assert!(name.len() >= 4, "star {id} named {name:?}");
            assert!(name.chars().next().is_some_and(|c| c.is_ascii_uppercase()));
            assert!(name.chars().skip(1).all(|c| c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn name_variety() {
        let unique: std::collections::HashSet<String> = (0..200).map(star_name).collect();
        assert!(unique.len() > 50, "only {} unique names", unique.len());
    }
}
