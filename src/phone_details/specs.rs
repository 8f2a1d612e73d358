use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

#[derive(Serialize, Default, Debug, Clone, PartialEq, Eq)]
/// A single specification (key-value pair) of a phone.
pub struct Specification {
    /// The label (key) of the specification, e.g. `Chipset`.
    pub name: String,
    /// The value of the specification.
    pub value: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
/// Specifications represents one section of the spec sheet.
pub struct Specifications {
    /// The section name.
    /// For example: `Display`, `Platform`, `Main Camera` etc.
    pub category: String,
    /// The specifications, in document order.
    pub specifications: Vec<Specification>,
}

impl Specifications {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            specifications: Vec::new(),
        }
    }

    /// Value stored under exactly `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.specifications
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| spec.value.as_str())
    }

    /// First value whose label matches one of the lowercase `aliases`, ignoring case.
    pub fn find_alias(&self, aliases: &[&str]) -> Option<&str> {
        self.specifications
            .iter()
            .find(|spec| {
                let name = spec.name.to_lowercase();
                aliases.iter().any(|alias| *alias == name)
            })
            .map(|spec| spec.value.as_str())
    }

    /// Inserts a field, overwriting the value of an existing label in place.
    pub fn insert(&mut self, name: String, value: String) {
        match self.specifications.iter_mut().find(|spec| spec.name == name) {
            Some(spec) => spec.value = value,
            None => self.specifications.push(Specification { name, value }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.specifications.is_empty()
    }

    pub fn len(&self) -> usize {
        self.specifications.len()
    }
}

impl Serialize for Specifications {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.specifications.len()))?;
        for spec in &self.specifications {
            map.serialize_entry(&spec.name, &spec.value)?;
        }
        map.end()
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
/// All sections of a phone's spec sheet, in document order.
///
/// Serializes as a JSON object of objects: `{"Battery": {"Type": "5000 mAh"}}`.
pub struct SpecSheet {
    sections: Vec<Specifications>,
}

impl SpecSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Section named exactly `category`.
    pub fn section(&self, category: &str) -> Option<&Specifications> {
        self.sections.iter().find(|s| s.category == category)
    }

    /// Section named `category`, appended empty if missing.
    pub fn section_mut(&mut self, category: &str) -> &mut Specifications {
        let idx = match self.sections.iter().position(|s| s.category == category) {
            Some(idx) => idx,
            None => {
                self.sections.push(Specifications::new(category));
                self.sections.len() - 1
            }
        };
        &mut self.sections[idx]
    }

    /// Value of `name` in section `category`, both matched exactly.
    pub fn get(&self, category: &str, name: &str) -> Option<&str> {
        self.section(category).and_then(|section| section.get(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Specifications> {
        self.sections.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }
}

impl Serialize for SpecSheet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for section in &self.sections {
            map.serialize_entry(&section.category, section)?;
        }
        map.end()
    }
}

impl<C, N, V> FromIterator<(C, Vec<(N, V)>)> for SpecSheet
where
    C: Into<String>,
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (C, Vec<(N, V)>)>>(iter: I) -> Self {
        let mut sheet = SpecSheet::new();
        for (category, fields) in iter {
            let category: String = category.into();
            let section = sheet.section_mut(&category);
            for (name, value) in fields {
                section.insert(name.into(), value.into());
            }
        }
        sheet
    }
}
