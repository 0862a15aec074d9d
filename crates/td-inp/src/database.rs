//! The loaded database and name lookup.

use crate::error::LookupError;
use crate::reader::Header;
use crate::species::SpeciesRecord;
use std::collections::HashMap;
use std::fmt;

/// Section a species belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Category {
    GasProducts,
    CondensedProducts,
    Reactants,
}

impl Category {
    /// File order.
    pub const ALL: [Category; 3] = [
        Category::GasProducts,
        Category::CondensedProducts,
        Category::Reactants,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Category::GasProducts => "gas_products",
            Category::CondensedProducts => "condensed_products",
            Category::Reactants => "reactants",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Species partitioned into the three categories, in file order.
///
/// Built once per load by the classifier; every name appears in exactly one
/// category.
#[derive(Clone, Debug, PartialEq)]
pub struct Database {
    header: Option<Header>,
    gas_products: Vec<SpeciesRecord>,
    condensed_products: Vec<SpeciesRecord>,
    reactants: Vec<SpeciesRecord>,
    index: HashMap<String, (Category, usize)>,
}

impl Database {
    /// Assemble a database from already partitioned species.
    ///
    /// Callers guarantee names are unique across categories.
    pub(crate) fn from_parts(
        header: Option<Header>,
        gas_products: Vec<SpeciesRecord>,
        condensed_products: Vec<SpeciesRecord>,
        reactants: Vec<SpeciesRecord>,
    ) -> Self {
        let mut index = HashMap::new();
        for (category, list) in [
            (Category::GasProducts, &gas_products),
            (Category::CondensedProducts, &condensed_products),
            (Category::Reactants, &reactants),
        ] {
            for (i, sp) in list.iter().enumerate() {
                index.insert(sp.name().to_string(), (category, i));
            }
        }
        Self {
            header,
            gas_products,
            condensed_products,
            reactants,
            index,
        }
    }

    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    pub fn category(&self, category: Category) -> &[SpeciesRecord] {
        match category {
            Category::GasProducts => &self.gas_products,
            Category::CondensedProducts => &self.condensed_products,
            Category::Reactants => &self.reactants,
        }
    }

    /// Exact, case-sensitive lookup across all categories.
    pub fn lookup(&self, name: &str) -> Result<&SpeciesRecord, LookupError> {
        self.index
            .get(name)
            .map(|&(category, i)| &self.category(category)[i])
            .ok_or_else(|| LookupError::NotFound {
                name: name.to_string(),
            })
    }

    pub fn category_of(&self, name: &str) -> Option<Category> {
        self.index.get(name).map(|&(category, _)| category)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// All species with their category, in file order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &SpeciesRecord)> + '_ {
        Category::ALL
            .into_iter()
            .flat_map(move |c| self.category(c).iter().map(move |sp| (c, sp)))
    }

    /// Species whose name starts with `prefix`, in file order.
    pub fn search<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (Category, &'a SpeciesRecord)> + 'a {
        self.iter().filter(move |(_, sp)| sp.name().starts_with(prefix))
    }

    pub fn names(&self, category: Category) -> Vec<&str> {
        self.category(category).iter().map(SpeciesRecord::name).collect()
    }

    /// New database holding the species that satisfy `keep`, categories and
    /// order preserved.
    pub fn subset<F>(&self, mut keep: F) -> Database
    where
        F: FnMut(Category, &SpeciesRecord) -> bool,
    {
        let mut pick = |c: Category| -> Vec<SpeciesRecord> {
            self.category(c)
                .iter()
                .filter(|sp| keep(c, *sp))
                .cloned()
                .collect()
        };
        let gas = pick(Category::GasProducts);
        let condensed = pick(Category::CondensedProducts);
        let reactants = pick(Category::Reactants);
        Database::from_parts(self.header.clone(), gas, condensed, reactants)
    }

    /// New database holding exactly the named species.
    ///
    /// Fails on the first name that is not present.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Database, LookupError> {
        for name in names {
            self.lookup(name.as_ref())?;
        }
        Ok(self.subset(|_, sp| names.iter().any(|n| n.as_ref() == sp.name())))
    }
}

/// Free-function form of [`Database::lookup`].
pub fn lookup<'a>(db: &'a Database, name: &str) -> Result<&'a SpeciesRecord, LookupError> {
    db.lookup(name)
}
