//! Image location hints
//!
//! The core only produces hints; loading the asset and walking the fallback
//! chain on failure is the presentation layer's job.

use crate::config::RuleSet;
use crate::types::Species;
use crate::utils::slug::slugify;

fn is_rooted(location: &str) -> bool {
    location.starts_with('/') || location.contains("://")
}

fn under_image_dir(rules: &RuleSet, file: &str) -> String {
    format!("{}/{}", rules.image_dir.trim_end_matches('/'), file)
}

fn known_image_stem<'a>(rules: &'a RuleSet, name: &str, latin_name: &str) -> Option<&'a str> {
    rules
        .known_images
        .get(&name.to_lowercase())
        .or_else(|| rules.known_images.get(&latin_name.to_lowercase()))
        .map(String::as_str)
}

/// Single best-guess image location for a species.
///
/// Order: explicit source URL (as-is when rooted, otherwise a file under the
/// image directory), known-name table, transliterated display name, id.
pub fn resolve_image_path(
    id: &str,
    name: &str,
    latin_name: &str,
    explicit: Option<&str>,
    rules: &RuleSet,
) -> String {
    if let Some(url) = explicit.map(str::trim).filter(|u| !u.is_empty()) {
        if is_rooted(url) {
            return url.to_string();
        }
        return under_image_dir(rules, url);
    }

    if let Some(stem) = known_image_stem(rules, name, latin_name) {
        return under_image_dir(rules, &format!("{}.jpg", stem));
    }

    let slug = slugify(name);
    if !slug.is_empty() {
        return under_image_dir(rules, &format!("{}.jpg", slug));
    }

    tracing::warn!("No usable name for image of {}, falling back to id", id);
    under_image_dir(rules, &format!("{}.jpg", id))
}

/// Ranked, de-duplicated candidate locations for the presentation layer's
/// fallback chain, starting with the species' primary hint.
pub fn image_candidates(species: &Species, rules: &RuleSet) -> Vec<String> {
    let mut candidates = vec![species.image_path.clone()];

    let mut push_stem = |stem: &str| {
        for ext in ["jpg", "png"] {
            let candidate = under_image_dir(rules, &format!("{}.{}", stem, ext));
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
    };

    if let Some(stem) = known_image_stem(rules, &species.name, &species.latin_name) {
        push_stem(stem);
    }
    if !species.name.trim().is_empty() {
        push_stem(&species.name);
    }
    if let Some(first_word) = species.latin_name.to_lowercase().split_whitespace().next() {
        push_stem(first_word);
    }
    push_stem(&species.id);

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_url_wins() {
        let rules = RuleSet::builtin();
        assert_eq!(
            resolve_image_path("fish-1", "Гуппи", "", Some("https://cdn.example/guppy.webp"), &rules),
            "https://cdn.example/guppy.webp"
        );
        assert_eq!(
            resolve_image_path("fish-1", "Гуппи", "", Some("/img/g.jpg"), &rules),
            "/img/g.jpg"
        );
        assert_eq!(
            resolve_image_path("fish-1", "Гуппи", "", Some("guppy_red.jpg"), &rules),
            "/fish/guppy_red.jpg"
        );
    }

    #[test]
    fn test_known_table_then_slug_then_id() {
        let rules = RuleSet::builtin();
        assert_eq!(
            resolve_image_path("fish-2", "Неон голубой", "Paracheirodon innesi", None, &rules),
            "/fish/neon-tetra.jpg"
        );
        assert_eq!(
            resolve_image_path("fish-3", "Some Fish", "Poecilia reticulata", None, &rules),
            "/fish/guppy.jpg"
        );
        assert_eq!(
            resolve_image_path("fish-4", "Барбус суматранский", "Puntigrus tetrazona", Some("  "), &rules),
            "/fish/barbus-sumatranskiy.jpg"
        );
        assert_eq!(resolve_image_path("fish-5", "", "", None, &rules), "/fish/fish-5.jpg");
    }

    #[test]
    fn test_candidate_chain() {
        use crate::catalog::normalizer::normalize;
        use crate::data::ExternalSpeciesRecord;

        let rules = RuleSet::builtin();
        let record = ExternalSpeciesRecord {
            id: 1,
            name_local: "Неон голубой".to_string(),
            name_lat: "Paracheirodon innesi".to_string(),
            ..Default::default()
        };
        let neon = normalize(&record, &rules);

        assert_eq!(
            image_candidates(&neon, &rules),
            vec![
                "/fish/neon-tetra.jpg",
                "/fish/neon-tetra.png",
                "/fish/Неон голубой.jpg",
                "/fish/Неон голубой.png",
                "/fish/paracheirodon.jpg",
                "/fish/paracheirodon.png",
                "/fish/fish-1.jpg",
                "/fish/fish-1.png",
            ]
        );
    }
}
