//! Registrable root domain extraction.

use std::fmt;

/// Public suffixes made of two labels, e.g. `example.co.uk` is registrable under `co.uk`.
const TWO_LEVEL_SUFFIXES: &[&str] = &[
    "co.uk", "co.jp", "com.au", "com.br", "co.nz", "co.za", "org.uk", "net.au", "ac.uk",
    "gov.uk", "co.in", "co.kr", "com.mx", "com.ar", "com.cn", "com.tw", "co.il", "co.th",
];

/// The minimal registrable form of a hostname (`app.example.co.uk` → `example.co.uk`).
///
/// Always lowercase and never starts with `www.`. Derived once per discovery request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RootDomain(String);

impl RootDomain {
    /// Reduces a hostname to its root domain.
    ///
    /// # Rules
    ///
    /// 1. A single leading `www.` label is stripped
    /// 2. If the last two labels form a known two-level suffix and at least three labels
    ///    remain, the last three labels are kept
    /// 3. Otherwise, if at least two labels remain, the last two are kept
    /// 4. Otherwise the stripped input is returned unchanged (`localhost`)
    ///
    /// Never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use subdomain_recon::domain::entities::RootDomain;
    ///
    /// assert_eq!(RootDomain::extract("mail.example.co.uk").as_str(), "example.co.uk");
    /// assert_eq!(RootDomain::extract("www.example.com").as_str(), "example.com");
    /// ```
    pub fn extract(hostname: &str) -> Self {
        let lowered = hostname.trim().trim_end_matches('.').to_ascii_lowercase();
        let stripped = lowered.strip_prefix("www.").unwrap_or(&lowered);

        let labels: Vec<&str> = stripped.split('.').collect();
        let keep = match labels.len() {
            n if n >= 3 && TWO_LEVEL_SUFFIXES.contains(&labels[n - 2..].join(".").as_str()) => 3,
            n if n >= 2 => 2,
            _ => return Self(stripped.to_string()),
        };

        Self(labels[labels.len() - keep..].join("."))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when `hostname` is this domain or one of its subdomains.
    ///
    /// Expects an already lowercased hostname.
    pub fn covers(&self, hostname: &str) -> bool {
        hostname == self.0
            || hostname
                .strip_suffix(self.0.as_str())
                .is_some_and(|prefix| prefix.ends_with('.') && prefix.len() > 1)
    }

    /// Returns `true` when `hostname` is a proper subdomain (not the root itself).
    pub fn is_parent_of(&self, hostname: &str) -> bool {
        hostname != self.0 && self.covers(hostname)
    }

    /// Builds `{label}.{root}`.
    pub fn child(&self, label: &str) -> String {
        format!("{}.{}", label, self.0)
    }
}

impl fmt::Display for RootDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RootDomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
