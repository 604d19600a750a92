use serde::{Deserialize, Serialize};

/// ISO currency code used by payout amounts.
///
/// The platform only settles in Brazilian reais, but the currency is kept
/// explicit so formatting never hardcodes separators at the call site.
///
/// ## Minor units
///
/// Amounts are stored as an `i64` number of **minor units** (see `Money`).
/// `minor_units()` returns how many decimal digits separate:
/// - major units (human input/output, e.g. `R$ 10,50`)
/// - minor units (stored integers, e.g. `1050` centavos)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Brl,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Brl => "BRL",
        }
    }

    /// Symbol printed before formatted amounts.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::Brl => "R$",
        }
    }

    /// Number of fraction digits used when formatting/parsing amounts.
    #[must_use]
    pub const fn minor_units(self) -> u8 {
        match self {
            Currency::Brl => 2,
        }
    }

    /// Separator between groups of three integer digits.
    #[must_use]
    pub const fn thousands_separator(self) -> char {
        match self {
            Currency::Brl => '.',
        }
    }

    /// Separator between the integer part and the fraction.
    #[must_use]
    pub const fn decimal_separator(self) -> char {
        match self {
            Currency::Brl => ',',
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

