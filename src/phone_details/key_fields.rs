use crate::phone_details::{PhoneDetails, SpecSheet};
use serde::Serialize;

/// Labels tried, in order, for the main camera setup.
const MAIN_CAMERA_LABELS: &[&str] = &["Single", "Dual", "Triple", "Quad", "Modules"];
/// Labels tried, in order, for the selfie camera setup.
const SELFIE_CAMERA_LABELS: &[&str] = &["Single", "Dual", "Triple", "Modules"];

/// A field whose label drifts between page generations.
///
/// Searched by alias in the preferred sections first, then in every section.
struct AliasRule {
    /// Lowercase label spellings.
    aliases: &'static [&'static str],
    preferred_sections: &'static [&'static str],
}

const OS: AliasRule = AliasRule {
    aliases: &["os"],
    preferred_sections: &["Platform"],
};
const CHIPSET: AliasRule = AliasRule {
    aliases: &["chipset"],
    preferred_sections: &["Platform"],
};
const MEMORY: AliasRule = AliasRule {
    aliases: &["internal"],
    preferred_sections: &["Memory"],
};

#[derive(Serialize, Default, Debug, Clone, PartialEq, Eq)]
/// The commercially relevant summary of a phone.
///
/// Built from `PhoneDetails` with `KeyFields::from_details`. Field order is the
/// column order of the CSV export.
pub struct KeyFields {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub url: Option<String>,
    /// Display panel type, e.g. `Dynamic AMOLED 2X, 120Hz, HDR10+`.
    pub display: Option<String>,
    pub chipset: Option<String>,
    /// Storage and RAM variants.
    pub memory: Option<String>,
    pub main_camera: Option<String>,
    pub selfie_camera: Option<String>,
    /// Battery capacity and chemistry.
    pub battery: Option<String>,
    pub charging: Option<String>,
    pub os: Option<String>,
    pub price: Option<String>,
}

impl KeyFields {
    /// Column names, in serialization order.
    pub const FIELDS: [&'static str; 12] = [
        "brand",
        "model",
        "url",
        "display",
        "chipset",
        "memory",
        "main_camera",
        "selfie_camera",
        "battery",
        "charging",
        "os",
        "price",
    ];

    pub fn from_details(details: &PhoneDetails) -> Self {
        let specs = &details.specs;
        let exact = |category: &str, name: &str| specs.get(category, name).map(String::from);

        KeyFields {
            brand: details.brand.clone(),
            model: details.model.clone(),
            url: Some(details.url.clone()),
            display: exact("Display", "Type"),
            chipset: find_value(specs, &CHIPSET),
            memory: find_value(specs, &MEMORY),
            main_camera: first_label(specs, "Main Camera", MAIN_CAMERA_LABELS),
            selfie_camera: first_label(specs, "Selfie camera", SELFIE_CAMERA_LABELS),
            battery: exact("Battery", "Type"),
            charging: exact("Battery", "Charging"),
            os: find_value(specs, &OS),
            price: exact("Misc", "Price"),
        }
    }

    /// Values in `FIELDS` order, `None` as an empty cell.
    pub fn to_row(&self) -> Vec<String> {
        [
            &self.brand,
            &self.model,
            &self.url,
            &self.display,
            &self.chipset,
            &self.memory,
            &self.main_camera,
            &self.selfie_camera,
            &self.battery,
            &self.charging,
            &self.os,
            &self.price,
        ]
        .into_iter()
        .map(|value| value.clone().unwrap_or_default())
        .collect()
    }
}

fn find_value(specs: &SpecSheet, rule: &AliasRule) -> Option<String> {
    rule.preferred_sections
        .iter()
        .filter_map(|category| specs.section(category))
        .chain(specs.iter())
        .find_map(|section| section.find_alias(rule.aliases))
        .map(String::from)
}

fn first_label(specs: &SpecSheet, category: &str, labels: &[&str]) -> Option<String> {
    let section = specs.section(category)?;
    labels
        .iter()
        .find_map(|label| section.get(label))
        .map(String::from)
}
