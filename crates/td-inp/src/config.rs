//! Parse options.

/// Where the condensed-products section begins.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CondensedStart {
    /// The first product with this name opens the condensed section.
    Species(String),
    /// The first product with a non-zero phase flag opens it.
    FirstCondensedPhase,
}

impl Default for CondensedStart {
    fn default() -> Self {
        // First condensed species of the NASA Glenn file.
        CondensedStart::Species("Ag(cr)".to_string())
    }
}

/// Sentinel lines and markers that delimit the database sections.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SectionMarkers {
    pub end_products: String,
    pub end_reactants: String,
    pub condensed_start: CondensedStart,
}

impl Default for SectionMarkers {
    fn default() -> Self {
        Self {
            end_products: "END PRODUCTS".to_string(),
            end_reactants: "END REACTANTS".to_string(),
            condensed_start: CondensedStart::default(),
        }
    }
}

impl SectionMarkers {
    /// Markers for files written by [`write_database`](crate::write_database),
    /// whose condensed section may not start with the default species.
    pub fn positional() -> Self {
        Self {
            condensed_start: CondensedStart::FirstCondensedPhase,
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParseOptions {
    pub markers: SectionMarkers,
}
