use std::collections::BTreeMap;

/// Site → billing code lookup. Keys are matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostCodeTable {
    codes: BTreeMap<String, String>,
    default_code: String,
}

impl CostCodeTable {
    pub fn new(codes: &BTreeMap<String, String>, default_code: &str) -> Self {
        let codes = codes
            .iter()
            .map(|(site, code)| (normalize_site(site), code.trim().to_string()))
            .collect();

        Self {
            codes,
            default_code: default_code.trim().to_string(),
        }
    }

    pub fn lookup(&self, branch: &str) -> &str {
        self.codes
            .get(&normalize_site(branch))
            .map(String::as_str)
            .unwrap_or(&self.default_code)
    }
}

fn normalize_site(site: &str) -> String {
    site.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CostCodeTable {
        let mut m = BTreeMap::new();
        m.insert("ALEX".to_string(), "KFC-0001-0001-0001".to_string());
        m.insert("Mobile 3".to_string(), "KFC-0001-0001-0003".to_string());
        CostCodeTable::new(&m, "KFC-0001-0001-0003")
    }

    #[test]
    fn lookup_ignores_case_and_padding() {
        let t = table();
        assert_eq!(t.lookup("alex"), "KFC-0001-0001-0001");
        assert_eq!(t.lookup("  MOBILE 3 "), "KFC-0001-0001-0003");
    }

    #[test]
    fn unknown_site_falls_back_to_default() {
        assert_eq!(table().lookup("WATERFORD"), "KFC-0001-0001-0003");
    }
}
