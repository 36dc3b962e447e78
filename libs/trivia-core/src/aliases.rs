//! Alias table: accepted synonyms for canonical answers.
//!
//! The table is built once and read-only afterwards. Keys and variants are
//! stored in normalized form, so `"United States"` and `"united states"` name
//! the same entry and entries whose keys normalize alike are merged.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::normalize::normalize;

/// Built-in aliases: countries, US states, cities, people and shorthand titles.
const BUILTIN_ALIASES: &[(&str, &[&str])] = &[
    ("uk", &["united kingdom", "great britain", "britain"]),
    ("netherlands", &["holland", "the netherlands"]),
    ("robert downey jr", &["rdj", "robert downey junior"]),
    ("pokemon go", &["pokémon go", "pokemon-go"]),
    ("stranger things", &["strangerthings"]),
    (
        "united states",
        &["usa", "u s a", "u.s.", "us", "u.s.a", "united states of america"],
    ),
    ("new york city", &["nyc", "new york", "ny"]),
    ("007", &["james bond", "bond"]),
    ("bible", &["the bible", "holy bible"]),
    ("Alabama", &["AL"]),
    ("Alaska", &["AK"]),
    ("Arizona", &["AZ"]),
    ("Arkansas", &["AR"]),
    ("California", &["CA"]),
    ("Colorado", &["CO"]),
    ("Connecticut", &["CT"]),
    ("Delaware", &["DE"]),
    ("Florida", &["FL"]),
    ("Georgia", &["GA"]),
    ("Hawaii", &["HI"]),
    ("Idaho", &["ID"]),
    ("Illinois", &["IL"]),
    ("Indiana", &["IN"]),
    ("Iowa", &["IA"]),
    ("Kansas", &["KS"]),
    ("Kentucky", &["KY"]),
    ("Louisiana", &["LA"]),
    ("Maine", &["ME"]),
    ("Maryland", &["MD"]),
    ("Massachusetts", &["MA"]),
    ("Michigan", &["MI"]),
    ("Minnesota", &["MN"]),
    ("Mississippi", &["MS"]),
    ("Missouri", &["MO"]),
    ("Montana", &["MT"]),
    ("Nebraska", &["NE"]),
    ("Nevada", &["NV"]),
    ("New Hampshire", &["NH"]),
    ("New Jersey", &["NJ"]),
    ("New Mexico", &["NM"]),
    ("New York", &["NY"]),
    ("North Carolina", &["NC"]),
    ("North Dakota", &["ND"]),
    ("Ohio", &["OH"]),
    ("Oklahoma", &["OK"]),
    ("Oregon", &["OR"]),
    ("Pennsylvania", &["PA"]),
    ("Rhode Island", &["RI"]),
    ("South Carolina", &["SC"]),
    ("South Dakota", &["SD"]),
    ("Tennessee", &["TN"]),
    ("Texas", &["TX"]),
    ("Utah", &["UT"]),
    ("Vermont", &["VT"]),
    ("Virginia", &["VA"]),
    ("Washington", &["WA"]),
    ("West Virginia", &["WV"]),
    ("Wisconsin", &["WI"]),
    ("Wyoming", &["WY"]),
    ("Washington, DC", &["DC", "Washington DC", "District of Columbia"]),
    ("United Kingdom", &["UK", "U.K.", "Great Britain", "Britain"]),
    ("United Arab Emirates", &["UAE"]),
    ("Soviet Union", &["USSR", "Union of Soviet Socialist Republics"]),
    ("European Union", &["EU"]),
    ("United Nations", &["UN"]),
    ("Ivory Coast", &["Cote d'Ivoire", "Côte d'Ivoire"]),
    ("Netherlands", &["Holland", "The Netherlands"]),
    ("Myanmar", &["Burma"]),
    ("Czechia", &["Czech Republic"]),
    ("Eswatini", &["Swaziland"]),
    ("Cape Verde", &["Cabo Verde"]),
    ("East Timor", &["Timor-Leste", "Timor Leste"]),
    ("South Korea", &["ROK", "Republic of Korea"]),
    ("North Korea", &["DPRK", "Democratic People's Republic of Korea"]),
    ("Los Angeles", &["LA", "L.A."]),
    ("San Francisco", &["SF", "S.F.", "San Fran"]),
    ("Philadelphia", &["Philly"]),
    ("Las Vegas", &["Vegas"]),
    ("New Orleans", &["NOLA"]),
    ("Atlanta", &["ATL"]),
    ("Saint Louis", &["St Louis", "St. Louis"]),
    ("Saint Petersburg", &["St Petersburg", "St. Petersburg"]),
    ("John F. Kennedy", &["JFK"]),
    ("Franklin D. Roosevelt", &["FDR"]),
    (
        "Martin Luther King Jr.",
        &["MLK", "Dr Martin Luther King Jr", "Dr. Martin Luther King Jr"],
    ),
    ("Lord of the Rings", &["LOTR"]),
    ("Game of Thrones", &["GOT"]),
    ("Harry Potter", &["HP"]),
    ("Back to the Future", &["BTTF"]),
    ("AC/DC", &["ACDC"]),
];

/// Alias file layout:
///
/// ```toml
/// [aliases]
/// "United States" = ["usa", "u.s."]
/// ```
#[derive(Debug, Deserialize)]
struct AliasFile {
    #[serde(default)]
    aliases: BTreeMap<String, Vec<String>>,
}

/// Canonical answer -> accepted variants, keyed and valued by normalized form.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: HashMap<String, HashSet<String>>,
}

impl AliasTable {
    /// An empty table: nothing is alias-equivalent.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table.
    pub fn builtin() -> Self {
        Self::from_entries(
            BUILTIN_ALIASES
                .iter()
                .map(|&(canonical, variants)| (canonical, variants.iter().copied())),
        )
    }

    /// Build a table from `(canonical, variants)` pairs.
    pub fn from_entries<I, K, V, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table: HashMap<String, HashSet<String>> = HashMap::new();
        for (canonical, variants) in entries {
            let key = normalize(canonical.as_ref());
            if key.is_empty() {
                tracing::warn!(
                    canonical = canonical.as_ref(),
                    "skipping alias entry with empty key"
                );
                continue;
            }
            table
                .entry(key)
                .or_default()
                .extend(variants.into_iter().map(|v| normalize(v.as_ref())));
        }
        Self { entries: table }
    }

    /// Parse a TOML file holding an `[aliases]` table of canonical answer to
    /// variant list.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: AliasFile = toml::from_str(content)?;
        Ok(Self::from_entries(file.aliases))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let table = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), entries = table.len(), "loaded alias table");
        Ok(table)
    }

    /// Number of distinct canonical keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Normalized variants registered for a raw canonical answer.
    pub fn variants_of(&self, correct_raw: &str) -> Option<&HashSet<String>> {
        self.entries.get(&normalize(correct_raw))
    }

    /// Whether an already-normalized user answer is a registered variant of
    /// the raw canonical answer. No entry for the answer is simply `false`.
    pub fn equivalent(&self, user_normalized: &str, correct_raw: &str) -> bool {
        self.variants_of(correct_raw)
            .is_some_and(|variants| variants.contains(user_normalized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_country_aliases() {
        let table = AliasTable::builtin();
        assert!(table.equivalent("usa", "United States"));
        assert!(table.equivalent("us", "United States"));
        assert!(table.equivalent("uk", "United Kingdom"));
        assert!(table.equivalent("holland", "The Netherlands"));
        assert!(!table.equivalent("france", "United States"));
    }

    #[test]
    fn variants_are_normalized() {
        let table = AliasTable::builtin();
        assert!(table.equivalent(&normalize("U.S.A."), "United States"));
        assert!(table.equivalent(&normalize("Timor-Leste"), "East Timor"));
        assert!(table.equivalent(&normalize("St. Petersburg"), "Saint Petersburg"));
    }

    #[test]
    fn keys_merge_when_normalized_alike() {
        // "netherlands" and "Netherlands" are listed separately
        let table = AliasTable::builtin();
        let variants = table.variants_of("NETHERLANDS").unwrap();
        assert!(variants.contains("holland"));
        assert!(variants.contains("netherlands"));
    }

    #[test]
    fn alias_is_one_directional() {
        let table = AliasTable::builtin();
        assert!(table.equivalent("ok", "Oklahoma"));
        assert!(!table.equivalent("oklahoma", "OK"));
    }

    #[test]
    fn missing_entry_is_not_equivalent() {
        let table = AliasTable::new();
        assert!(table.is_empty());
        assert!(!table.equivalent("usa", "United States"));
    }

    #[test]
    fn custom_table_from_entries() {
        let table = AliasTable::from_entries([("Mount Everest", ["Chomolungma", "Sagarmatha"])]);
        assert_eq!(table.len(), 1);
        assert!(table.equivalent("sagarmatha", "Mt. Everest"));
    }

    #[test]
    fn table_from_toml() {
        let content = r#"
[aliases]
"Leonardo da Vinci" = ["Leonardo", "da Vinci"]
"H2O" = ["water"]
"#;
        let table = AliasTable::from_toml_str(content).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.equivalent("leonardo", "Leonardo da Vinci"));
        assert!(table.equivalent("water", "h2o"));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let result = AliasTable::from_toml_str("[aliases]\n\"x\" = 3");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }
}
