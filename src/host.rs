/// Host name used when the operating system lookup fails.
pub const DEFAULT_HOSTNAME: &str = "localhost";

/// Resolve the machine's host name.
///
/// A successful, non-empty lookup is kept as-is; anything else falls back to
/// [`DEFAULT_HOSTNAME`]. Callers resolve this once and store the result.
pub fn resolve_hostname() -> String {
    hostname_or_default(sysinfo::System::host_name())
}

fn hostname_or_default(lookup: Option<String>) -> String {
    match lookup {
        Some(name) if !name.trim().is_empty() => name,
        _ => DEFAULT_HOSTNAME.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_lookup_keeps_the_name() {
        assert_eq!(hostname_or_default(Some("web-01".into())), "web-01");
    }

    #[test]
    fn failed_or_empty_lookup_falls_back() {
        assert_eq!(hostname_or_default(None), DEFAULT_HOSTNAME);
        assert_eq!(hostname_or_default(Some("  ".into())), DEFAULT_HOSTNAME);
    }

    #[test]
    fn resolve_never_returns_empty() {
        assert!(!resolve_hostname().is_empty());
    }
}
