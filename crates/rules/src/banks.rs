//! Bank directory used by the bank picker.
//!
//! The list itself comes from the server; this module only indexes it.
//! Search ignores case and accents, so `itau` finds `Itaú Unibanco`.

use api_types::bank::{BankListResponse, BankView};
use serde::{Deserialize, Serialize};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Number of digits in a COMPE bank code.
pub const BANK_CODE_LEN: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    pub code: String,
    pub name: String,
}

impl Bank {
    /// `341 - Itaú Unibanco`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }
}

impl From<BankView> for Bank {
    fn from(value: BankView) -> Self {
        Self {
            code: value.code,
            name: value.name,
        }
    }
}

/// Returns `true` for a 3-digit bank code.
#[must_use]
pub fn is_valid_bank_code(code: &str) -> bool {
    code.len() == BANK_CODE_LEN && code.chars().all(|c| c.is_ascii_digit())
}

/// Lower-cases, strips accents and collapses punctuation into single spaces.
fn normalize_key(input: &str) -> String {
    let mut out = String::new();
    let mut prev_space = true;
    for ch in input.trim().nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
            prev_space = false;
        } else if !prev_space {
            out.push(' ');
            prev_space = true;
        }
    }
    out.trim_end().to_string()
}

#[derive(Clone, Debug)]
struct Indexed {
    bank: Bank,
    key: String,
}

/// Searchable list of banks.
#[derive(Clone, Debug, Default)]
pub struct BankDirectory {
    banks: Vec<Indexed>,
}

impl BankDirectory {
    /// Indexes `banks`, dropping entries with malformed codes and keeping the
    /// first entry for duplicated codes. Entries are sorted by code.
    #[must_use]
    pub fn new(banks: impl IntoIterator<Item = Bank>) -> Self {
        let mut indexed: Vec<Indexed> = Vec::new();
        for bank in banks {
            if !is_valid_bank_code(&bank.code) {
                continue;
            }
            if indexed.iter().any(|i| i.bank.code == bank.code) {
                continue;
            }
            let key = normalize_key(&bank.name);
            indexed.push(Indexed { bank, key });
        }
        indexed.sort_by(|a, b| a.bank.code.cmp(&b.bank.code));
        Self { banks: indexed }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.banks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.banks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bank> {
        self.banks.iter().map(|i| &i.bank)
    }

    #[must_use]
    pub fn by_code(&self, code: &str) -> Option<&Bank> {
        self.banks
            .binary_search_by(|i| i.bank.code.as_str().cmp(code))
            .ok()
            .map(|idx| &self.banks[idx].bank)
    }

    /// Banks whose code starts with `query` (digits) or whose name contains
    /// every word of `query`. An empty query returns every bank.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Bank> {
        let trimmed = query.trim();
        if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
            return self
                .iter()
                .filter(|bank| bank.code.starts_with(trimmed))
                .collect();
        }

        let key = normalize_key(trimmed);
        let words: Vec<&str> = key.split_whitespace().collect();
        self.banks
            .iter()
            .filter(|i| words.iter().all(|w| i.key.contains(w)))
            .map(|i| &i.bank)
            .collect()
    }
}

impl From<BankListResponse> for BankDirectory {
    fn from(value: BankListResponse) -> Self {
        Self::new(value.banks.into_iter().map(Bank::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank(code: &str, name: &str) -> Bank {
        Bank {
            code: code.to_string(),
            name: name.to_string(),
        }
    }

    fn directory() -> BankDirectory {
        BankDirectory::new([
            bank("341", "Itaú Unibanco S.A."),
            bank("001", "Banco do Brasil S.A."),
            bank("237", "Banco Bradesco S.A."),
            bank("260", "Nu Pagamentos S.A."),
            bank("104", "Caixa Econômica Federal"),
        ])
    }

    #[test]
    fn normalizes_accents_case_and_punctuation() {
        assert_eq!(normalize_key("  Itaú Unibanco S.A. "), "itau unibanco s a");
        assert_eq!(normalize_key("Caixa Econômica"), "caixa economica");
        assert_eq!(normalize_key(""), "");
    }

    #[test]
    fn search_by_name_ignores_accents() {
        let dir = directory();
        let hits: Vec<_> = dir.search("itau").iter().map(|b| b.code.as_str()).collect();
        assert_eq!(hits, ["341"]);
        let hits: Vec<_> = dir
            .search("ECONOMICA federal")
            .iter()
            .map(|b| b.code.as_str())
            .collect();
        assert_eq!(hits, ["104"]);
    }

    #[test]
    fn search_by_code_prefix() {
        let dir = directory();
        let hits: Vec<_> = dir.search("2").iter().map(|b| b.code.as_str()).collect();
        assert_eq!(hits, ["237", "260"]);
    }

    #[test]
    fn empty_query_lists_all_sorted() {
        let dir = directory();
        let codes: Vec<_> = dir.search("").iter().map(|b| b.code.as_str()).collect();
        assert_eq!(codes, ["001", "104", "237", "260", "341"]);
    }

    #[test]
    fn lookup_and_filtering() {
        let dir = BankDirectory::new([
            bank("341", "Itaú"),
            bank("341", "Duplicate"),
            bank("12", "Too short"),
            bank("abc", "Not digits"),
        ]);
        assert_eq!(dir.len(), 1);
        assert_eq!(dir.by_code("341").map(Bank::label).as_deref(), Some("341 - Itaú"));
        assert!(dir.by_code("001").is_none());
    }
}
