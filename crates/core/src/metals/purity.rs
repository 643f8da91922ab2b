//! Fixed purity grades offered for each metal.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::metals_model::MetalType;
use crate::errors::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Purity {
    pub label: &'static str,
    pub fraction_of_pure: Decimal,
}

impl Purity {
    /// Leading token of the label, e.g. `14K` or `.925`.
    pub fn short_code(&self) -> &'static str {
        self.label.split_whitespace().next().unwrap_or(self.label)
    }
}

const GOLD: &[Purity] = &[
    Purity { label: "24K (99.9%)", fraction_of_pure: dec!(0.999) },
    Purity { label: "22K (91.7%)", fraction_of_pure: dec!(0.917) },
    Purity { label: "18K (75%)", fraction_of_pure: dec!(0.750) },
    Purity { label: "14K (58.3%)", fraction_of_pure: dec!(0.583) },
    Purity { label: "10K (41.7%)", fraction_of_pure: dec!(0.417) },
    Purity { label: "9K (37.5%)", fraction_of_pure: dec!(0.375) },
];

const SILVER: &[Purity] = &[
    Purity { label: ".999 (99.9%)", fraction_of_pure: dec!(0.999) },
    Purity { label: ".925 (92.5%)", fraction_of_pure: dec!(0.925) },
];

const PLATINUM: &[Purity] = &[
    Purity { label: ".999 (99.9%)", fraction_of_pure: dec!(0.999) },
    Purity { label: ".950 (95%)", fraction_of_pure: dec!(0.950) },
    Purity { label: ".900 (90%)", fraction_of_pure: dec!(0.900) },
];

const PALLADIUM: &[Purity] = &[
    Purity { label: ".999 (99.9%)", fraction_of_pure: dec!(0.999) },
    Purity { label: ".950 (95%)", fraction_of_pure: dec!(0.950) },
    Purity { label: ".500 (50%)", fraction_of_pure: dec!(0.500) },
];

/// Purity grades for a metal, finest first.
pub fn purity_table(metal: MetalType) -> &'static [Purity] {
    match metal {
        MetalType::Xau => GOLD,
        MetalType::Xag => SILVER,
        MetalType::Xpt => PLATINUM,
        MetalType::Xpd => PALLADIUM,
    }
}

/// Looks up a purity by its full label, or by its short code ignoring case.
pub fn find_purity(metal: MetalType, label: &str) -> Result<&'static Purity> {
    let wanted = label.trim();
    let table = purity_table(metal);
    table
        .iter()
        .find(|p| p.label == wanted)
        .or_else(|| {
            table
                .iter()
                .find(|p| p.short_code().eq_ignore_ascii_case(wanted))
        })
        .ok_or_else(|| {
            Error::invalid_input(format!(
                "Unknown purity '{}' for {}",
                label,
                metal.display_name()
            ))
        })
}
