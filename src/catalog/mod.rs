//! Static reference catalog of celestial bodies.
//!
//! Used only to resolve a human-readable label and description for a target
//! identifier. IDs follow the JPL Horizons major-body numbering, so entries
//! can be fed straight back into the lookup endpoint.

/// A single catalog entry. Fixed at compile time, never mutated.
#[derive(Debug, Copy, Clone)]
pub struct CelestialBody {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: &'static str,
    pub description: &'static str,
}

/// Fallback description for identifiers the catalog does not know.
const GENERIC_DESCRIPTION: &str = "Celestial object data retrieved from JPL Horizon system.";

pub const CELESTIAL_BODIES: &[CelestialBody] = &[
    CelestialBody {
        id: "10",
        name: "Sun",
        kind: "Star",
        description: "The star at the center of the solar system. Do not observe without proper filtering.",
    },
    CelestialBody {
        id: "301",
        name: "Moon",
        kind: "Natural Satellite",
        description: "Earth's only natural satellite and the brightest object in the night sky.",
    },
    CelestialBody {
        id: "199",
        name: "Mercury",
        kind: "Planet",
        description: "The smallest planet, never far from the Sun and visible only near twilight.",
    },
    CelestialBody {
        id: "299",
        name: "Venus",
        kind: "Planet",
        description: "The brightest planet, appearing as the morning or evening star.",
    },
    CelestialBody {
        id: "499",
        name: "Mars",
        kind: "Planet",
        description: "The red planet, fourth from the Sun and a favorite target for small telescopes.",
    },
    CelestialBody {
        id: "599",
        name: "Jupiter",
        kind: "Planet",
        description: "The largest planet. Its four Galilean moons are visible in binoculars.",
    },
    CelestialBody {
        id: "699",
        name: "Saturn",
        kind: "Planet",
        description: "The ringed gas giant, sixth from the Sun.",
    },
    CelestialBody {
        id: "799",
        name: "Uranus",
        kind: "Planet",
        description: "An ice giant at the edge of naked-eye visibility under dark skies.",
    },
    CelestialBody {
        id: "899",
        name: "Neptune",
        kind: "Planet",
        description: "The outermost planet, resolvable only with optical aid.",
    },
    CelestialBody {
        id: "999",
        name: "Pluto",
        kind: "Dwarf Planet",
        description: "The best known dwarf planet, orbiting in the Kuiper belt.",
    },
    CelestialBody {
        id: "1;",
        name: "Ceres",
        kind: "Dwarf Planet",
        description: "The largest body in the asteroid belt between Mars and Jupiter.",
    },
    CelestialBody {
        id: "90000033",
        name: "Halley",
        kind: "Comet",
        description: "The most famous periodic comet, returning roughly every 76 years.",
    },
];

/// Display label and description resolved for a raw target identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBody<'a> {
    pub name: &'a str,
    pub id: &'a str,
    pub kind: Option<&'static str>,
    pub description: &'static str,
}

/// Resolves a target identifier to its catalog entry by exact ID match or
/// case-insensitive name match. Unknown identifiers are echoed back verbatim
/// with a generic description.
pub fn resolve(target: &str) -> ResolvedBody<'_> {
    CELESTIAL_BODIES
        .iter()
        .find(|body| body.id == target || body.name.eq_ignore_ascii_case(target))
        .map_or(
            ResolvedBody { name: target, id: target, kind: None, description: GENERIC_DESCRIPTION },
            |body| ResolvedBody {
                name: body.name,
                id: body.id,
                kind: Some(body.kind),
                description: body.description,
            },
        )
}

/// Catalog entries whose name or kind contains `term`, case-insensitively.
/// An empty term yields the full catalog.
pub fn search(term: &str) -> Vec<&'static CelestialBody> {
    let needle = term.to_ascii_lowercase();
    CELESTIAL_BODIES
        .iter()
        .filter(|body| {
            body.name.to_ascii_lowercase().contains(&needle)
                || body.kind.to_ascii_lowercase().contains(&needle)
        })
        .collect()
}
