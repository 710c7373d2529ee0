//! Scalar coercion shared by every codec.
//!
//! Functions here never know where a value came from; they return errors
//! located at the root and the caller attaches the field path.

use tracing::debug;

use k8_config::ProtocolPolicy;
use k8_types::core::pod::Protocol;
use k8_types::core::pod::UriScheme;
use k8_types::EnumValue;
use k8_types::IntOrString;

use crate::CodecError;

const MIN_PORT: i64 = 1;
const MAX_PORT: i64 = u16::MAX as i64;
const MAX_LABEL_LEN: usize = 63;

fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// lowercase alphanumerics and '-', starting and ending with an alphanumeric
fn is_dns_label(s: &str) -> bool {
    let alnum = |b: u8| b.is_ascii_lowercase() || b.is_ascii_digit();
    let bytes = s.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(first), Some(last)) => {
            bytes.len() <= MAX_LABEL_LEN
                && alnum(*first)
                && alnum(*last)
                && bytes.iter().all(|b| alnum(*b) || *b == b'-')
        }
        _ => false,
    }
}

/// range check for a port given as an integer
pub fn port_number(value: i64) -> Result<u16, CodecError> {
    u16::try_from(value)
        .ok()
        .filter(|port| *port as i64 >= MIN_PORT)
        .ok_or_else(|| CodecError::out_of_range(value.to_string(), MIN_PORT, MAX_PORT))
}

/// decimal digits only, value in 1..=65535
pub fn parse_port(s: &str) -> Result<u16, CodecError> {
    if !is_decimal(s) {
        return Err(CodecError::invalid_format(s, "a decimal port number"));
    }
    match s.parse::<i64>() {
        Ok(value) => port_number(value),
        Err(_) => Err(CodecError::out_of_range(s, MIN_PORT, MAX_PORT)),
    }
}

pub fn format_port(port: u16) -> String {
    port.to_string()
}

/// optionally signed decimal integer
pub fn parse_int(s: &str) -> Result<i64, CodecError> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if !is_decimal(digits) {
        return Err(CodecError::invalid_format(s, "an integer"));
    }
    s.parse::<i64>()
        .map_err(|_| CodecError::out_of_range(s, i64::MIN, i64::MAX))
}

pub fn parse_bool(s: &str) -> Result<bool, CodecError> {
    match s {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(CodecError::invalid_format(s, "true or false")),
    }
}

/// case-insensitive TCP or UDP; empty or unrecognized input is TCP
pub fn parse_protocol(s: &str) -> Protocol {
    match Protocol::from_any_case(s) {
        Some(protocol) => protocol,
        None => {
            if !s.is_empty() {
                debug!(protocol = s, "unrecognized protocol, using TCP");
            }
            Protocol::Tcp
        }
    }
}

/// protocol parsing under the configured policy.
/// Strict rejects unrecognized values but still maps empty input to TCP
pub fn parse_protocol_with(s: &str, policy: ProtocolPolicy) -> Result<Protocol, CodecError> {
    match policy {
        ProtocolPolicy::Lenient => Ok(parse_protocol(s)),
        ProtocolPolicy::Strict if s.is_empty() => Ok(Protocol::Tcp),
        ProtocolPolicy::Strict => Protocol::from_any_case(s)
            .ok_or_else(|| CodecError::invalid_enum(s, Protocol::names())),
    }
}

/// case-insensitive HTTP or HTTPS
pub fn parse_scheme(s: &str) -> Result<UriScheme, CodecError> {
    UriScheme::from_any_case(s).ok_or_else(|| CodecError::invalid_enum(s, UriScheme::names()))
}

/// exact match against the wire spelling of `E`
pub fn parse_enum<E: EnumValue>(s: &str) -> Result<E, CodecError> {
    E::from_exact(s).ok_or_else(|| CodecError::invalid_enum(s, E::names()))
}

/// digits select the numeric form, a dns label selects the name form
pub fn decode_int_or_string(s: &str) -> Result<IntOrString, CodecError> {
    if is_decimal(s) {
        return s
            .parse::<i32>()
            .map(IntOrString::Int)
            .map_err(|_| CodecError::out_of_range(s, 0, i32::MAX as i64));
    }
    if is_dns_label(s) {
        return Ok(IntOrString::String(s.to_owned()));
    }
    Err(CodecError::invalid_format(s, "a port number or a port name"))
}

pub fn encode_int_or_string(value: &IntOrString) -> String {
    match value {
        IntOrString::Int(number) => number.to_string(),
        IntOrString::String(name) => name.clone(),
    }
}
