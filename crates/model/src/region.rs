use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Sentinel for boundary features whose name has no canonical mapping.
pub const UNMARKED_ZONE: &str = "Sin demarcar";

#[derive(Clone, Copy)]
enum MatchKind {
    Exact,
    Prefix,
}

/// Ordered spelling rules for the emissions source. Matching runs on the
/// trimmed, lowercased input and the first hit wins, so the long Magallanes
/// spelling must stay above the bare `magallanes` rule.
const EMISSION_RULES: &[(&str, MatchKind, &str)] = &[
    ("metropolitana", MatchKind::Prefix, "Metropolitana de Santiago"),
    ("araucanía", MatchKind::Exact, "La Araucanía"),
    ("la araucanía", MatchKind::Exact, "La Araucanía"),
    ("ñuble", MatchKind::Exact, "Ñuble"),
    ("coquimbo", MatchKind::Exact, "Coquimbo"),
    ("tarapacá", MatchKind::Exact, "Tarapacá"),
    ("antofagasta", MatchKind::Exact, "Antofagasta"),
    ("los lagos", MatchKind::Exact, "Los Lagos"),
    ("los ríos", MatchKind::Exact, "Los Ríos"),
    ("atacama", MatchKind::Exact, "Atacama"),
    ("biobío", MatchKind::Exact, "Biobío"),
    ("maule", MatchKind::Exact, "Maule"),
    ("arica y parinacota", MatchKind::Exact, "Arica y Parinacota"),
    ("valparaíso", MatchKind::Exact, "Valparaíso"),
    (
        "magallanes y de la antártica chilena",
        MatchKind::Exact,
        "Magallanes y de la Antártica Chilena",
    ),
    ("magallanes", MatchKind::Exact, "Magallanes y de la Antártica Chilena"),
    ("o'higgins", MatchKind::Exact, "Libertador General Bernardo O'Higgins"),
    (
        "libertador gral. bernardo o'higgins",
        MatchKind::Exact,
        "Libertador General Bernardo O'Higgins",
    ),
    (
        "aysén del gral. carlos ibáñez del campo",
        MatchKind::Exact,
        "Aysén del General Carlos Ibáñez del Campo",
    ),
    (
        "aysén del general carlos ibáñez del campo",
        MatchKind::Exact,
        "Aysén del General Carlos Ibáñez del Campo",
    ),
];

/// The boundary dataset names regions with a `Región de …` convention that
/// never appears in the emissions data, so it gets its own exact lookup.
static BOUNDARY_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Región Metropolitana de Santiago", "Metropolitana de Santiago"),
        ("Región de La Araucanía", "La Araucanía"),
        ("Región de Ñuble", "Ñuble"),
        ("Región de Coquimbo", "Coquimbo"),
        ("Región de Tarapacá", "Tarapacá"),
        ("Región de Antofagasta", "Antofagasta"),
        ("Región de Los Lagos", "Los Lagos"),
        ("Región de Los Ríos", "Los Ríos"),
        ("Región de Atacama", "Atacama"),
        ("Región del Bío-Bío", "Biobío"),
        ("Región del Maule", "Maule"),
        ("Región de Arica y Parinacota", "Arica y Parinacota"),
        ("Región de Valparaíso", "Valparaíso"),
        (
            "Región de Magallanes y Antártica Chilena",
            "Magallanes y de la Antártica Chilena",
        ),
        (
            "Región de Aysén del Gral.Ibañez del Campo",
            "Aysén del General Carlos Ibáñez del Campo",
        ),
        (
            "Región del Libertador Bernardo O'Higgins",
            "Libertador General Bernardo O'Higgins",
        ),
        ("Zona sin demarcar", UNMARKED_ZONE),
    ])
});

/// Maps a free-text region name from the emissions source onto its
/// canonical spelling. Unknown names pass through trimmed; that is a soft
/// fallback, not an error.
pub fn normalize_region(raw: &str) -> String {
    let trimmed = raw.trim();
    let folded = trimmed.to_lowercase();
    for (pattern, kind, canonical) in EMISSION_RULES {
        let hit = match kind {
            MatchKind::Exact => folded == *pattern,
            MatchKind::Prefix => folded.starts_with(pattern),
        };
        if hit {
            return (*canonical).to_string();
        }
    }
    trimmed.to_string()
}

/// Maps a boundary-dataset region name onto its canonical spelling.
/// Unknown names collapse to the [`UNMARKED_ZONE`] sentinel.
pub fn normalize_boundary(raw: &str) -> String {
    BOUNDARY_MAP
        .get(raw.trim())
        .map_or_else(|| UNMARKED_ZONE.to_string(), |canonical| (*canonical).to_string())
}
