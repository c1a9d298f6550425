//! Game URL normalisation and private-address detection.
//!
//! Game URLs are stored without a scheme (`games.example.com`,
//! `192.168.1.20:8080`). The scheme is derived when a link is resolved.

use std::net::Ipv4Addr;

const KNOWN_SCHEMES: &[&str] = &["https://", "http://", "wss://", "ws://"];

/// Strip the scheme and trailing slashes from a user-supplied game URL.
pub fn trim_url(raw: &str) -> String {
    let mut url = raw.trim();
    for scheme in KNOWN_SCHEMES {
        if let Some(rest) = url.strip_prefix(scheme) {
            url = rest;
            break;
        }
    }
    url.trim_end_matches('/').to_string()
}

/// Whether the URL's host is an RFC 1918 address
/// (`10.0.0.0/8`, `172.16.0.0/12`, `192.168.0.0/16`).
///
/// Servers on private networks are trusted without any remote checks.
pub fn is_local_address(url: &str) -> bool {
    host_of(url)
        .parse::<Ipv4Addr>()
        .is_ok_and(|addr| addr.is_private())
}

/// Build the base URL for a trimmed game URL.
pub fn base_url(tls: bool, url: &str) -> String {
    if tls {
        format!("https://{url}")
    } else {
        format!("http://{url}")
    }
}

/// Host portion of a trimmed URL: everything before the first `/`, with a
/// numeric `:port` suffix removed.
fn host_of(url: &str) -> &str {
    let authority = url.split('/').next().unwrap_or_default();
    match authority.rsplit_once(':') {
        Some((host, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => {
            host
        }
        _ => authority,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_ranges_are_local() {
        for url in ["10.0.0.1", "172.16.0.1", "172.31.255.255", "192.168.1.1"] {
            assert!(is_local_address(url), "{url} should be local");
        }
    }

    #[test]
    fn neighbouring_ranges_are_remote() {
        for url in ["172.32.0.1", "11.0.0.1", "172.15.255.255", "192.169.0.1", "127.0.0.1"] {
            assert!(!is_local_address(url), "{url} should be remote");
        }
    }

    #[test]
    fn hostnames_and_garbage_are_remote() {
        assert!(!is_local_address("games.example.com"));
        assert!(!is_local_address("10.0.0"));
        assert!(!is_local_address("10.0.0.256"));
        assert!(!is_local_address(""));
    }

    #[test]
    fn ports_and_paths_are_ignored() {
        assert!(is_local_address("192.168.1.1:8080"));
        assert!(is_local_address("10.1.2.3/game"));
        assert!(is_local_address("10.1.2.3:80/game/"));
        assert!(!is_local_address("172.32.0.1:8080"));
    }

    #[test]
    fn trims_scheme_and_trailing_slashes() {
        assert_eq!(trim_url("https://games.example.com/"), "games.example.com");
        assert_eq!(trim_url("http://10.0.0.5:8080//"), "10.0.0.5:8080");
        assert_eq!(trim_url("  wss://games.example.com/sub "), "games.example.com/sub");
        assert_eq!(trim_url("games.example.com"), "games.example.com");
    }

    #[test]
    fn base_url_picks_scheme() {
        assert_eq!(base_url(true, "games.example.com"), "https://games.example.com");
        assert_eq!(base_url(false, "10.0.0.5:8080"), "http://10.0.0.5:8080");
    }
}
