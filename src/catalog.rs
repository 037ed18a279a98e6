//! Genre names offered when tagging a release.

pub struct GenreGroup {
    pub label: &'static str,
    pub genres: &'static [&'static str],
}

pub const MAX_SUGGESTIONS: usize = 5;

static CATALOG: &[GenreGroup] = &[
    GenreGroup {
        label: "Electronic",
        genres: &[
            "2-Step",
            "Acid House",
            "Ambient",
            "Big Beat",
            "Breakbeat",
            "Chillwave",
            "Chiptune",
            "Dance",
            "Deep House",
            "Downtempo",
            "Drum & Bass",
            "Dub",
            "Dubstep",
            "Electro",
            "Electronica",
            "Eurodance",
            "Garage",
            "Glitch",
            "House",
            "IDM",
            "Jungle",
            "Synthpop",
            "Synthwave",
            "Techno",
            "Trance",
            "Trip Hop",
            "UK Garage",
        ],
    },
    GenreGroup {
        label: "Hip-Hop / Rap",
        genres: &[
            "Abstract Hip Hop",
            "Alternative Rap",
            "Boom Bap",
            "Christian Hip Hop",
            "Conscious Hip Hop",
            "Crunk",
            "Drill",
            "Gangsta Rap",
            "Hip-Hop",
            "Instrumental Hip-Hop",
            "Pop Rap",
            "Trap",
        ],
    },
    GenreGroup {
        label: "Rock",
        genres: &[
            "Acid Rock",
            "Alternative Rock",
            "Art Rock",
            "Blues Rock",
            "Classic Rock",
            "Death Metal",
            "Experimental Rock",
            "Folk Rock",
            "Garage Rock",
            "Goth Rock",
            "Grunge",
            "Hard Rock",
            "Indie Rock",
            "Jam Band",
            "Krautrock",
            "Metal",
            "New Wave",
            "Post-Punk",
            "Post-Rock",
            "Progressive Rock",
            "Psychedelic Rock",
            "Punk",
            "Rock 'n' Roll",
            "Shoegaze",
            "Southern Rock",
            "Stoner Rock",
            "Surf Rock",
        ],
    },
    GenreGroup {
        label: "Pop",
        genres: &[
            "Art Pop",
            "Baroque Pop",
            "Bubblegum Pop",
            "Dance-Pop",
            "Dream Pop",
            "Indie Pop",
            "J-Pop",
            "K-Pop",
            "Pop",
            "Power Pop",
            "Sophisti-Pop",
        ],
    },
    GenreGroup {
        label: "Folk / Country",
        genres: &[
            "Acoustic",
            "Americana",
            "Bluegrass",
            "Contemporary Folk",
            "Country",
            "Folk",
            "Singer-Songwriter",
            "Traditional Folk",
            "Western Swing",
        ],
    },
    GenreGroup {
        label: "Jazz & Blues",
        genres: &[
            "Acid Jazz",
            "Acoustic Blues",
            "Avant-Garde Jazz",
            "Big Band",
            "Blues",
            "Chicago Blues",
            "Contemporary Jazz",
            "Cool Jazz",
            "Delta Blues",
            "Dixieland",
            "Fusion",
            "Jazz",
            "Smooth Jazz",
            "Swing",
        ],
    },
    GenreGroup {
        label: "R&B / Soul",
        genres: &[
            "Contemporary R&B",
            "Disco",
            "Doo Wop",
            "Funk",
            "Motown",
            "Neo-Soul",
            "Quiet Storm",
            "Soul",
        ],
    },
    GenreGroup {
        label: "Classical",
        genres: &[
            "Baroque",
            "Chamber Music",
            "Choral",
            "Classical",
            "Contemporary Classical",
            "Impressionist",
            "Medieval",
            "Minimalism",
            "Modern Composition",
            "Opera",
            "Orchestral",
            "Piano",
            "Renaissance",
            "Romantic",
        ],
    },
    GenreGroup {
        label: "World / Regional",
        genres: &[
            "African",
            "Bossa Nova",
            "Cajun",
            "Calypso",
            "Celtic",
            "Forró",
            "Latin",
            "Reggae",
            "Salsa",
            "Samba",
            "Ska",
            "World",
        ],
    },
    GenreGroup {
        label: "Other",
        genres: &[
            "Comedy",
            "Experimental",
            "Instrumental",
            "Soundtrack",
            "Spoken Word",
        ],
    },
];

pub fn catalog() -> &'static [GenreGroup] {
    CATALOG
}

pub fn all_genres() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().flat_map(|group| group.genres.iter().copied())
}

/// Catalog genres containing `input` (case-insensitive) that are not selected yet.
pub fn suggest<S: AsRef<str>>(input: &str, selected: &[S]) -> Vec<&'static str> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    all_genres()
        .filter(|genre| genre.to_lowercase().contains(&needle))
        .filter(|genre| !selected.iter().any(|chosen| chosen.as_ref() == *genre))
        .take(MAX_SUGGESTIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_groups() {
        let labels: Vec<_> = catalog().iter().map(|group| group.label).collect();
        assert_eq!(labels.first(), Some(&"Electronic"));
        assert_eq!(labels.last(), Some(&"Other"));
        assert!(all_genres().any(|genre| genre == "Synthwave"));
    }

    #[test]
    fn suggest_is_case_insensitive() {
        let result = suggest("synth", &[] as &[&str]);
        assert_eq!(result, vec!["Synthpop", "Synthwave"]);
    }

    #[test]
    fn suggest_skips_selected_and_caps_results() {
        let selected = vec!["Synthpop".to_owned()];
        assert_eq!(suggest("SYNTH", &selected), vec!["Synthwave"]);
        assert_eq!(suggest("rock", &selected).len(), MAX_SUGGESTIONS);
    }

    #[test]
    fn blank_input_suggests_nothing() {
        assert!(suggest("  ", &[] as &[&str]).is_empty());
    }
}
