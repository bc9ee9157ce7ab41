use strsim::levenshtein;

use super::options::OptionMap;

/// Suggest a method name close to one of the non-parameter option keys.
/// Returns Some(name) if a close match is found (distance <= 2).
pub(super) fn suggest_method<'a>(
    options: &OptionMap,
    methods: impl Iterator<Item = &'a str> + Clone,
) -> Option<&'a str> {
    let mut best_match: Option<(&str, usize)> = None;

    for key in options.keys().filter(|k| !k.starts_with('-')) {
        let key = key.to_lowercase();
        for name in methods.clone() {
            let distance = levenshtein(&key, &name.to_lowercase());
            if distance <= 2 && best_match.is_none_or(|(_, best)| distance < best) {
                best_match = Some((name, distance));
            }
        }
    }

    best_match.map(|(name, _)| name)
}
