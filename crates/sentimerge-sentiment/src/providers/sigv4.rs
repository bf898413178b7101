//! AWS Signature Version 4 for JSON POST requests.
//!
//! Covers the subset Comprehend needs: a POST with no query string, a JSON
//! body, and a handful of headers that are all signed.
//!
//! Reference: <https://docs.aws.amazon.com/IAM/latest/UserGuide/create-signed-request.html>

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::Url;
use sentimerge_core::AwsCredentials;
use sha2::{Digest, Sha256};

use crate::error::SentimentError;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Who signs, for which service, and when.
pub(crate) struct SigningParams<'a> {
    pub credentials: &'a AwsCredentials,
    pub region: &'a str,
    pub service: &'a str,
    pub timestamp: DateTime<Utc>,
}

/// Header values to attach to the signed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SignedHeaders {
    pub amz_date: String,
    pub authorization: String,
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<[u8; 32], SentimentError> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|e| SentimentError::Signing(e.to_string()))?;
    mac.update(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}

fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Derive the per-day, per-region, per-service signing key.
pub(crate) fn derive_signing_key(
    secret_access_key: &str,
    date: &str,
    region: &str,
    service: &str,
) -> Result<[u8; 32], SentimentError> {
    let k_date = hmac_sha256(format!("AWS4{secret_access_key}").as_bytes(), date.as_bytes())?;
    let k_region = hmac_sha256(&k_date, region.as_bytes())?;
    let k_service = hmac_sha256(&k_region, service.as_bytes())?;
    hmac_sha256(&k_service, b"aws4_request")
}

/// `host[:port]` exactly as reqwest will send it in the `Host` header.
fn host_header(url: &Url) -> Result<String, SentimentError> {
    let host = url.host_str().ok_or_else(|| SentimentError::InvalidEndpoint {
        url: url.to_string(),
        reason: "missing host".to_string(),
    })?;
    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// Sign a POST to `url` carrying `payload`.
///
/// `headers` are extra headers to sign, as `(lowercase-name, value)`; `host`
/// and `x-amz-date` are always added. The caller must send every signed
/// header with exactly the given value.
pub(crate) fn sign_post(
    params: &SigningParams<'_>,
    url: &Url,
    headers: &[(&str, &str)],
    payload: &[u8],
) -> Result<SignedHeaders, SentimentError> {
    let amz_date = params.timestamp.format("%Y%m%dT%H%M%SZ").to_string();
    let date = params.timestamp.format("%Y%m%d").to_string();
    let host = host_header(url)?;

    let mut signed: Vec<(String, String)> = headers
        .iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), value.trim().to_string()))
        .collect();
    signed.push(("host".to_string(), host));
    signed.push(("x-amz-date".to_string(), amz_date.clone()));
    signed.sort();

    let canonical_headers: String = signed
        .iter()
        .map(|(name, value)| format!("{name}:{value}\n"))
        .collect();
    let signed_header_names = signed
        .iter()
        .map(|(name, _)| name.as_str())
        .collect::<Vec<_>>()
        .join(";");

    let canonical_request = format!(
        "POST\n{path}\n{query}\n{canonical_headers}\n{signed_header_names}\n{payload_hash}",
        path = url.path(),
        query = url.query().unwrap_or_default(),
        payload_hash = sha256_hex(payload),
    );

    let scope = format!(
        "{date}/{region}/{service}/aws4_request",
        region = params.region,
        service = params.service
    );
    let string_to_sign = format!(
        "{ALGORITHM}\n{amz_date}\n{scope}\n{}",
        sha256_hex(canonical_request.as_bytes())
    );

    let signing_key = derive_signing_key(
        &params.credentials.secret_access_key,
        &date,
        params.region,
        params.service,
    )?;
    let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes())?);

    let authorization = format!(
        "{ALGORITHM} Credential={access_key}/{scope}, SignedHeaders={signed_header_names}, Signature={signature}",
        access_key = params.credentials.access_key_id,
    );

    Ok(SignedHeaders {
        amz_date,
        authorization,
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn example_credentials() -> AwsCredentials {
        AwsCredentials {
            access_key_id: "AKIDEXAMPLE".to_string(),
            secret_access_key: "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".to_string(),
        }
    }

    #[test]
    fn signing_key_matches_aws_documentation_example() {
        let key = derive_signing_key(
            "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
            "20120215",
            "us-east-1",
            "iam",
        )
        .expect("derive");
        assert_eq!(
            hex::encode(key),
            "f4780e2d9f65fa895f9c67b32ce1baf0b0d8a43505a000a1a9e090d414db404d"
        );
    }

    #[test]
    fn post_vanilla_matches_aws_test_suite() {
        let credentials = example_credentials();
        let params = SigningParams {
            credentials: &credentials,
            region: "us-east-1",
            service: "service",
            timestamp: Utc.with_ymd_and_hms(2015, 8, 30, 12, 36, 0).unwrap(),
        };
        let url = Url::parse("https://example.amazonaws.com/").unwrap();
        let signed = sign_post(&params, &url, &[], b"").expect("sign");

        assert_eq!(signed.amz_date, "20150830T123600Z");
        assert_eq!(
            signed.authorization,
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/service/aws4_request, \
             SignedHeaders=host;x-amz-date, \
             Signature=5da7c1a2acd57cee7505fc6676e4e544621c30862966e37dddb68e92efbe5d6b"
        );
    }

    #[test]
    fn extra_headers_are_sorted_into_signed_headers() {
        let credentials = example_credentials();
        let params = SigningParams {
            credentials: &credentials,
            region: "us-west-2",
            service: "comprehend",
            timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        };
        let url = Url::parse("https://comprehend.us-west-2.amazonaws.com/").unwrap();
        let signed = sign_post(
            &params,
            &url,
            &[
                ("X-Amz-Target", "Comprehend_20171127.DetectTargetedSentiment"),
                ("content-type", "application/x-amz-json-1.1"),
            ],
            br#"{"Text":"hi","LanguageCode":"en"}"#,
        )
        .expect("sign");

        assert!(signed.authorization.contains(
            "Credential=AKIDEXAMPLE/20240102/us-west-2/comprehend/aws4_request"
        ));
        assert!(signed
            .authorization
            .contains("SignedHeaders=content-type;host;x-amz-date;x-amz-target,"));
    }

    #[test]
    fn host_header_keeps_non_default_port() {
        let url = Url::parse("http://127.0.0.1:8080/").unwrap();
        assert_eq!(host_header(&url).unwrap(), "127.0.0.1:8080");

        let url = Url::parse("https://comprehend.us-west-2.amazonaws.com/").unwrap();
        assert_eq!(
            host_header(&url).unwrap(),
            "comprehend.us-west-2.amazonaws.com"
        );
    }

    #[test]
    fn signature_changes_with_payload() {
        let credentials = example_credentials();
        let params = SigningParams {
            credentials: &credentials,
            region: "us-west-2",
            service: "comprehend",
            timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        };
        let url = Url::parse("https://comprehend.us-west-2.amazonaws.com/").unwrap();
        let a = sign_post(&params, &url, &[], b"a").unwrap();
        let b = sign_post(&params, &url, &[], b"b").unwrap();
        assert_ne!(a.authorization, b.authorization);
    }
}
