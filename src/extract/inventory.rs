//! File-extension inventory.

use super::resources::extension;
use std::collections::BTreeMap;

/// Count extracted files by lowercase extension. Files without an extension
/// are counted under `""`.
pub(crate) fn build(entry_names: &[String]) -> BTreeMap<String, usize> {
    let mut inventory = BTreeMap::new();
    for name in entry_names {
        let ext = extension(name).unwrap_or_default();
        *inventory.entry(ext).or_insert(0) += 1;
    }
    inventory
}
