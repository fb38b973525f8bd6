//! Random name generation from seeded name parts.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::addons::NameParts;

/// Builds a name from one prefix, one stem and one suffix.
///
/// Parts are lowercased and joined, then the first letter is capitalised.
/// Returns `None` while any of the three lists is empty.
pub fn generate_name<R: Rng + ?Sized>(parts: &NameParts, rng: &mut R) -> Option<String> {
    let pre = parts.pre.choose(rng)?;
    let name = parts.name.choose(rng)?;
    let sur = parts.sur.choose(rng)?;

    let joined = format!("{}{}{}", pre, name, sur).to_lowercase();
    let mut chars = joined.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
}
