//! Static browse catalog: Jikan genre ids and media types offered as filters.

/// A genre filter option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Genre {
    pub id: u32,
    pub name: &'static str,
}

const fn genre(id: u32, name: &'static str) -> Genre {
    Genre { id, name }
}

pub const GENRES: &[Genre] = &[
    genre(1, "Action"),
    genre(2, "Adventure"),
    genre(5, "Avant Garde"),
    genre(46, "Award Winning"),
    genre(28, "Boys Love"),
    genre(4, "Comedy"),
    genre(8, "Drama"),
    genre(10, "Fantasy"),
    genre(26, "Girls Love"),
    genre(47, "Gourmet"),
    genre(14, "Horror"),
    genre(7, "Mystery"),
    genre(22, "Romance"),
    genre(24, "Sci-Fi"),
    genre(36, "Slice of Life"),
    genre(30, "Sports"),
    genre(37, "Supernatural"),
    genre(41, "Suspense"),
    genre(9, "Ecchi"),
    genre(49, "Erotica"),
    genre(12, "Hentai"),
    genre(50, "Adult Cast"),
    genre(51, "Anthropomorphic"),
    genre(52, "CGDCT"),
    genre(53, "Childcare"),
    genre(54, "Combat Sports"),
    genre(55, "Crossdressing"),
    genre(39, "Detective"),
    genre(56, "Educational"),
    genre(57, "Gag Humor"),
    genre(58, "Gore"),
    genre(35, "Harem"),
    genre(59, "High Stakes Game"),
    genre(13, "Historical"),
    genre(60, "Idols (Female)"),
    genre(61, "Idols (Male)"),
    genre(62, "Isekai"),
    genre(63, "Iyashikei"),
    genre(64, "Love Polygon"),
    genre(65, "Magical Sex Shift"),
    genre(66, "Mahou Shoujo"),
    genre(17, "Martial Arts"),
    genre(67, "Mecha"),
    genre(18, "Military"),
    genre(38, "Music"),
    genre(19, "Parody"),
    genre(6, "Psychological"),
    genre(20, "School"),
    genre(68, "Space"),
    genre(69, "Strategy Game"),
    genre(70, "Super Power"),
    genre(71, "Survival"),
    genre(72, "Team Sports"),
    genre(73, "Time Travel"),
    genre(74, "Vampire"),
    genre(21, "Visual Arts"),
    genre(3, "Cars"),
    genre(40, "Workplace"),
];

pub const ANIME_TYPES: &[&str] = &["TV", "Movie", "OVA", "ONA", "Special", "Music"];

pub fn genre_name(id: u32) -> Option<&'static str> {
    GENRES.iter().find(|g| g.id == id).map(|g| g.name)
}

/// Canonical spelling of a media type, matched case-insensitively.
pub fn canonical_type(s: &str) -> Option<&'static str> {
    ANIME_TYPES
        .iter()
        .copied()
        .find(|t| t.eq_ignore_ascii_case(s.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_ids_unique() {
        let mut ids: Vec<u32> = GENRES.iter().map(|g| g.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), GENRES.len());
    }

    #[test]
    fn test_lookups() {
        assert_eq!(genre_name(62), Some("Isekai"));
        assert_eq!(genre_name(999), None);
        assert_eq!(canonical_type("ova"), Some("OVA"));
        assert_eq!(canonical_type("manga"), None);
    }
}
