//! Guarded download of asset images for export.
//!
//! Only `http`/`https` URLs whose host resolves to public addresses are
//! fetched. Redirects are not followed and reading stops at the size cap.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{StatusCode, Url};

/// Errors from [`check_url`] and [`download`].
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The URL is malformed, uses another scheme, or points at a
    /// non-public host.
    #[error("Image URL is not exportable: {0}")]
    Rejected(String),

    #[error("Failed to resolve image host '{host}': {source}")]
    Resolve {
        host: String,
        source: std::io::Error,
    },

    #[error("Image host answered {0}")]
    Status(StatusCode),

    #[error("Image exceeds the {0} byte export limit")]
    TooLarge(usize),

    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

/// Downloaded image body and the content type the host reported.
#[derive(Debug)]
pub struct ExportedImage {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// HTTP client for export downloads. Redirect responses are returned
/// as-is and fail the status check in [`download`].
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::none())
        .build()
}

/// Parse `raw` and verify it may be fetched.
///
/// With `allow_private_hosts` only the scheme is checked.
pub async fn check_url(raw: &str, allow_private_hosts: bool) -> Result<Url, ExportError> {
    let rejected = || ExportError::Rejected(raw.to_string());

    let url = Url::parse(raw).map_err(|_| rejected())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(rejected());
    }
    let host = url.host_str().ok_or_else(rejected)?.to_string();
    if allow_private_hosts {
        return Ok(url);
    }

    let literal = host.trim_start_matches('[').trim_end_matches(']');
    let addrs: Vec<IpAddr> = match literal.parse::<IpAddr>() {
        Ok(ip) => vec![ip],
        Err(_) => {
            let port = url.port_or_known_default().unwrap_or(80);
            tokio::net::lookup_host((host.as_str(), port))
                .await
                .map_err(|source| ExportError::Resolve {
                    host: host.clone(),
                    source,
                })?
                .map(|addr| addr.ip())
                .collect()
        }
    };

    if addrs.is_empty() || !addrs.into_iter().all(is_public_ip) {
        return Err(rejected());
    }
    Ok(url)
}

/// Fetch `url`, reading at most `max_bytes` of body.
pub async fn download(
    client: &reqwest::Client,
    url: Url,
    max_bytes: usize,
) -> Result<ExportedImage, ExportError> {
    let mut response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(ExportError::Status(response.status()));
    }
    if response
        .content_length()
        .is_some_and(|len| len > max_bytes as u64)
    {
        return Err(ExportError::TooLarge(max_bytes));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let mut bytes = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if bytes.len() + chunk.len() > max_bytes {
            return Err(ExportError::TooLarge(max_bytes));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(ExportedImage {
        content_type,
        bytes,
    })
}

/// Whether `ip` is a globally routable unicast address.
pub fn is_public_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_public_v4(v4),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => is_public_v4(v4),
            None => is_public_v6(v6),
        },
    }
}

fn is_public_v4(ip: Ipv4Addr) -> bool {
    let [a, b, ..] = ip.octets();
    let shared = a == 100 && (64..128).contains(&b);
    !(ip.is_private()
        || ip.is_loopback()
        || ip.is_link_local()
        || ip.is_unspecified()
        || ip.is_broadcast()
        || ip.is_documentation()
        || ip.is_multicast()
        || shared
        || a == 0
        || a >= 240)
}

fn is_public_v6(ip: Ipv6Addr) -> bool {
    let first = ip.segments()[0];
    let unique_local = first & 0xfe00 == 0xfc00;
    let link_local = first & 0xffc0 == 0xfe80;
    !(ip.is_loopback() || ip.is_unspecified() || ip.is_multicast() || unique_local || link_local)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn classifies_internal_addresses() {
        for ip in [
            "127.0.0.1",
            "10.1.2.3",
            "172.16.0.1",
            "192.168.1.1",
            "169.254.169.254",
            "100.64.0.1",
            "0.0.0.0",
            "::1",
            "fe80::1",
            "fd00::1",
            "::ffff:127.0.0.1",
        ] {
            assert!(!is_public_ip(ip.parse().unwrap()), "{ip} should be internal");
        }
    }

    #[test]
    fn classifies_public_addresses() {
        for ip in ["93.184.216.34", "8.8.8.8", "2606:4700::1111"] {
            assert!(is_public_ip(ip.parse().unwrap()), "{ip} should be public");
        }
    }

    #[tokio::test]
    async fn rejects_other_schemes() {
        assert_matches!(
            check_url("file:///etc/passwd", false).await,
            Err(ExportError::Rejected(_))
        );
        assert_matches!(
            check_url("ftp://93.184.216.34/x.png", true).await,
            Err(ExportError::Rejected(_))
        );
        assert_matches!(check_url("not a url", false).await, Err(ExportError::Rejected(_)));
    }

    #[tokio::test]
    async fn rejects_internal_ip_literals() {
        for raw in [
            "http://127.0.0.1:9/x",
            "http://[::1]/x",
            "http://169.254.169.254/latest/meta-data",
            "http://10.0.0.5:5432/",
        ] {
            assert_matches!(check_url(raw, false).await, Err(ExportError::Rejected(_)));
        }
    }

    #[tokio::test]
    async fn accepts_public_ip_literal() {
        let url = check_url("https://93.184.216.34/img.png", false).await.unwrap();
        assert_eq!(url.path(), "/img.png");
    }

    #[tokio::test]
    async fn private_hosts_allowed_when_configured() {
        assert!(check_url("http://127.0.0.1:9/x", true).await.is_ok());
    }
}
