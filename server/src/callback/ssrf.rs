//! SSRF Protection
//!
//! Callback URLs come from the request payload, so they are resolved and
//! checked against private/reserved ranges before anything is sent.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use super::error::CallbackError;

/// Hostnames that always mean "this machine".
const LOOPBACK_HOSTNAMES: &[&str] = &[
    "localhost",
    "localhost.localdomain",
    "ip6-localhost",
    "ip6-loopback",
];

/// Check if an IP address is private, loopback, link-local, or otherwise reserved.
pub fn is_private_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_private_v4(*v4),
        IpAddr::V6(v6) => is_private_v6(v6),
    }
}

fn is_private_v4(v4: Ipv4Addr) -> bool {
    if v4.is_loopback()
        || v4.is_private()
        || v4.is_link_local()
        || v4.is_broadcast()
        || v4.is_unspecified()
        || v4.is_documentation()
    {
        return true;
    }

    match v4.octets() {
        // 100.64.0.0/10 (CGN)
        [100, b, ..] if (b & 0xC0) == 64 => true,
        // 198.18.0.0/15 (benchmark)
        [198, b, ..] if (b & 0xFE) == 18 => true,
        // 192.0.0.0/24 (IETF)
        [192, 0, 0, _] => true,
        // 224.0.0.0/4 (multicast) + 240.0.0.0/4 (reserved)
        [a, ..] => a >= 224,
    }
}

fn is_private_v6(v6: &Ipv6Addr) -> bool {
    let first = v6.segments()[0];
    v6.is_loopback()
        || v6.is_unspecified()
        || (first & 0xFE00) == 0xFC00 // fc00::/7 (ULA)
        || (first & 0xFFC0) == 0xFE80 // fe80::/10 (link-local)
        || v6
            .to_ipv4_mapped()
            .is_some_and(is_private_v4)
}

/// Static check of a hostname or IP literal, without DNS.
pub fn is_blocked_host(host: &str) -> bool {
    let lower = host.to_ascii_lowercase();
    if LOOPBACK_HOSTNAMES.contains(&lower.as_str()) {
        return true;
    }

    let literal = lower.trim_start_matches('[').trim_end_matches(']');
    literal
        .parse::<IpAddr>()
        .is_ok_and(|ip| is_private_ip(&ip))
}

/// Callback URL with the address it was verified against.
#[derive(Debug, Clone)]
pub struct CallbackTarget {
    /// URL as given in the interaction.
    pub url: reqwest::Url,
    /// Hostname from the URL.
    pub host: String,
    /// First resolved address; requests are pinned to it to avoid DNS rebinding.
    pub addr: SocketAddr,
}

/// Parse and resolve a callback URL.
///
/// Only `http` and `https` are accepted. Unless `allow_private` is set, every
/// resolved address must be public.
pub async fn resolve_callback_target(
    url: &str,
    allow_private: bool,
) -> Result<CallbackTarget, CallbackError> {
    let parsed = reqwest::Url::parse(url).map_err(|e| CallbackError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(CallbackError::UnsupportedScheme(other.to_string())),
    }

    let host = parsed
        .host_str()
        .ok_or_else(|| CallbackError::InvalidUrl("URL has no host".to_string()))?
        .to_string();
    let port = parsed.port_or_known_default().unwrap_or(443);

    if !allow_private && is_blocked_host(&host) {
        return Err(CallbackError::BlockedHost(host));
    }

    let literal = host.trim_start_matches('[').trim_end_matches(']');
    let addrs: Vec<SocketAddr> = if let Ok(ip) = literal.parse::<IpAddr>() {
        vec![SocketAddr::new(ip, port)]
    } else {
        tokio::net::lookup_host((host.as_str(), port))
            .await
            .map_err(|e| CallbackError::Resolve {
                host: host.clone(),
                reason: e.to_string(),
            })?
            .collect()
    };

    let Some(&addr) = addrs.first() else {
        return Err(CallbackError::Resolve {
            host,
            reason: "no addresses returned".to_string(),
        });
    };

    if !allow_private {
        if let Some(private) = addrs.iter().find(|a| is_private_ip(&a.ip())) {
            return Err(CallbackError::PrivateAddress {
                host,
                ip: private.ip(),
            });
        }
    }

    Ok(CallbackTarget {
        url: parsed,
        host,
        addr,
    })
}
