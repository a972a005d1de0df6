/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! String and numeric coercion tables for configuration enumerations.
//!
//! Every enumerated configuration value can arrive in three shapes:
//! - a bare token (`"RSSL_SOCKET"`), resolved by [`ConfigEnum::from_token`]
//! - a prefixed token as written in XML (`"ChannelType::RSSL_SOCKET"`),
//!   resolved by [`ConfigEnum::from_prefixed`]
//! - a numeric code from a decoded programmatic map, resolved by
//!   [`ConfigEnum::from_code`]
//!
//! Directory values that are stored as raw wire numbers (QoS, capabilities,
//! stream/data state and status codes) are resolved by free functions.

use crate::error::{ConfigError, Result};
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between an enumeration prefix and its token.
pub const PREFIX_SEPARATOR: &str = "::";

/// An enumeration that can be coerced from configuration text or codes.
pub trait ConfigEnum: Sized + Copy + fmt::Debug + FromPrimitive {
    /// Prefix used in the `Prefix::Token` form.
    const PREFIX: &'static str;

    /// Resolves a bare token.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` naming the token and the accepted inputs.
    fn from_token(token: &str) -> Result<Self>;

    /// Human-readable list of accepted `Prefix::Token` values.
    fn accepted() -> &'static str;

    /// Resolves a numeric code, returning `None` when out of range.
    #[must_use]
    fn from_code(code: u16) -> Option<Self> {
        Self::from_u16(code)
    }

    /// Resolves a `Prefix::Token` value.
    ///
    /// Returns `None` when the value does not have exactly two parts or the
    /// prefix does not match, and `Some(Err(..))` when the token is unknown.
    #[must_use]
    fn from_prefixed(value: &str) -> Option<Result<Self>> {
        split_prefixed(value, Self::PREFIX).map(Self::from_token)
    }
}

/// Splits `Prefix::Token`, returning the token when the prefix matches.
///
/// # Arguments
/// * `value` - The full attribute value
/// * `prefix` - The expected prefix
#[must_use]
pub fn split_prefixed<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let mut parts = value.split(PREFIX_SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(head), Some(token), None) if head == prefix => Some(token),
        _ => None,
    }
}

fn not_recognized(label: &str, token: &str, accepted: &str) -> ConfigError {
    ConfigError::invalid(format!(
        "{label}: {token} not recognized. Acceptable inputs: {accepted}."
    ))
}

/// Transport connection type of a client channel.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromPrimitive, ToPrimitive,
)]
#[repr(u8)]
pub enum ConnectionType {
    /// Plain TCP socket.
    Socket = 0,
    /// TLS-encrypted socket.
    Encrypted = 1,
}

impl ConfigEnum for ConnectionType {
    const PREFIX: &'static str = "ChannelType";

    /// Connection type tokens are matched after upper-casing the input.
    fn from_token(token: &str) -> Result<Self> {
        match token.to_uppercase().as_str() {
            "RSSL_SOCKET" => Ok(Self::Socket),
            "RSSL_ENCRYPTED" => Ok(Self::Encrypted),
            _ => Err(not_recognized(
                "Connection Type",
                token,
                "\"RSSL_SOCKET\", \"RSSL_ENCRYPTED\"",
            )),
        }
    }

    fn accepted() -> &'static str {
        "\"ChannelType::RSSL_SOCKET\" or \"ChannelType::RSSL_ENCRYPTED\""
    }
}

/// Transport type of a server (interactive provider) binding.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromPrimitive, ToPrimitive,
)]
#[repr(u8)]
pub enum ServerType {
    /// Plain TCP socket.
    Socket = 0,
    /// TLS-encrypted socket.
    Encrypted = 1,
}

impl ConfigEnum for ServerType {
    const PREFIX: &'static str = "ServerType";

    fn from_token(token: &str) -> Result<Self> {
        ConnectionType::from_token(token).map(|ty| match ty {
            ConnectionType::Socket => Self::Socket,
            ConnectionType::Encrypted => Self::Encrypted,
        })
    }

    fn accepted() -> &'static str {
        "\"ServerType::RSSL_SOCKET\" or \"ServerType::RSSL_ENCRYPTED\""
    }
}

/// Inner transport carried by an encrypted connection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromPrimitive, ToPrimitive,
)]
#[repr(u8)]
pub enum EncryptedProtocolType {
    /// TCP socket underneath TLS.
    Socket = 0,
}

impl ConfigEnum for EncryptedProtocolType {
    const PREFIX: &'static str = "EncryptedProtocolType";

    fn from_token(token: &str) -> Result<Self> {
        match token.to_uppercase().as_str() {
            "RSSL_SOCKET" => Ok(Self::Socket),
            _ => Err(not_recognized(
                "Encrypted Protocol Type",
                token,
                "\"RSSL_SOCKET\"",
            )),
        }
    }

    fn accepted() -> &'static str {
        "\"EncryptedProtocolType::RSSL_SOCKET\""
    }
}

/// Payload compression negotiated on a channel.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromPrimitive, ToPrimitive,
)]
#[repr(u8)]
pub enum CompressionType {
    /// No compression.
    None = 0,
    /// zlib compression.
    ZLib = 1,
    /// LZ4 compression.
    Lz4 = 2,
}

impl ConfigEnum for CompressionType {
    const PREFIX: &'static str = "CompressionType";

    fn from_token(token: &str) -> Result<Self> {
        match token {
            "None" => Ok(Self::None),
            "ZLib" => Ok(Self::ZLib),
            "LZ4" => Ok(Self::Lz4),
            _ => Err(not_recognized(
                "Compression Type",
                token,
                "\"None\", \"ZLib\", \"LZ4\"",
            )),
        }
    }

    fn accepted() -> &'static str {
        "\"CompressionType::None\", \"CompressionType::ZLib\" or \"CompressionType::LZ4\""
    }
}

/// Minimum severity written by the API logger.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    FromPrimitive, ToPrimitive,
)]
#[repr(u8)]
pub enum LoggerLevel {
    /// Everything, including verbose tracing.
    Trace = 0,
    /// Debug and above. Only reachable through a numeric code.
    Debug = 1,
    /// Informational and above ("Success").
    Info = 2,
    /// Warnings and errors.
    Warning = 3,
    /// Errors only.
    Error = 4,
    /// Logging disabled.
    Off = 5,
}

impl ConfigEnum for LoggerLevel {
    const PREFIX: &'static str = "LoggerSeverity";

    fn from_token(token: &str) -> Result<Self> {
        match token {
            "Trace" | "Verbose" => Ok(Self::Trace),
            "Info" | "Success" => Ok(Self::Info),
            "Warning" => Ok(Self::Warning),
            "Error" => Ok(Self::Error),
            "NoLogMsg" => Ok(Self::Off),
            _ => Err(not_recognized(
                "Logger Severity",
                token,
                "\"Trace\", \"Info\" or \"Success\", \"Warning\", \"Error\" or \"Verbose\", \"NoLogMsg\"",
            )),
        }
    }

    fn accepted() -> &'static str {
        "\"LoggerSeverity::<Trace, Info or Success, Warning, Error or Verbose, NoLogMsg>\""
    }
}

/// Destination of the API logger.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromPrimitive, ToPrimitive,
)]
#[repr(u8)]
pub enum LoggerType {
    /// Rolling log file.
    File = 0,
    /// Standard output.
    Stdout = 1,
}

impl ConfigEnum for LoggerType {
    const PREFIX: &'static str = "LoggerType";

    fn from_token(token: &str) -> Result<Self> {
        match token {
            "File" => Ok(Self::File),
            "Stdout" => Ok(Self::Stdout),
            _ => Err(not_recognized(
                "Logger Type",
                token,
                "\"File\", \"Stdout\"",
            )),
        }
    }

    fn accepted() -> &'static str {
        "\"LoggerType::File\" or \"LoggerType::Stdout\""
    }
}

/// Where the field and enumeration dictionaries are loaded from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromPrimitive, ToPrimitive,
)]
#[repr(u8)]
pub enum DictionaryMode {
    /// Local dictionary files.
    File = 0,
    /// Downloaded over the channel.
    Channel = 1,
}

impl ConfigEnum for DictionaryMode {
    const PREFIX: &'static str = "DictionaryType";

    fn from_token(token: &str) -> Result<Self> {
        match token {
            "FileDictionary" => Ok(Self::File),
            "ChannelDictionary" => Ok(Self::Channel),
            _ => Err(not_recognized(
                "Dictionary Type",
                token,
                "\"FileDictionary\", \"ChannelDictionary\"",
            )),
        }
    }

    fn accepted() -> &'static str {
        "\"DictionaryType::FileDictionary\" or \"DictionaryType::ChannelDictionary\""
    }
}

/// Item stream state advertised in a service status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromPrimitive, ToPrimitive,
)]
#[repr(u8)]
pub enum StreamState {
    /// Stream is open.
    Open = 1,
    /// Snapshot only.
    NonStreaming = 2,
    /// Closed, may be recovered.
    ClosedRecover = 3,
    /// Closed.
    Closed = 4,
    /// Closed and redirected.
    ClosedRedirected = 5,
}

impl ConfigEnum for StreamState {
    const PREFIX: &'static str = "StreamState";

    fn from_token(token: &str) -> Result<Self> {
        match token {
            "Open" => Ok(Self::Open),
            "NonStreaming" => Ok(Self::NonStreaming),
            "Closed" => Ok(Self::Closed),
            "ClosedRecover" => Ok(Self::ClosedRecover),
            "ClosedRedirected" => Ok(Self::ClosedRedirected),
            _ => Err(not_recognized(
                "StreamState",
                token,
                "\"Open\", \"NonStreaming\", \"Closed\", \"ClosedRecover\", \"ClosedRedirected\"",
            )),
        }
    }

    fn accepted() -> &'static str {
        "\"StreamState::<Open, NonStreaming, Closed, ClosedRecover, or ClosedRedirected>\""
    }
}

/// Data state advertised in a service status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromPrimitive, ToPrimitive,
)]
#[repr(u8)]
pub enum DataState {
    /// Unchanged from the previous state.
    NoChange = 0,
    /// Data is good.
    Ok = 1,
    /// Data may be stale.
    Suspect = 2,
}

impl ConfigEnum for DataState {
    const PREFIX: &'static str = "DataState";

    fn from_token(token: &str) -> Result<Self> {
        match token {
            "NoChange" => Ok(Self::NoChange),
            "Ok" => Ok(Self::Ok),
            "Suspect" => Ok(Self::Suspect),
            _ => Err(not_recognized(
                "DataState",
                token,
                "\"NoChange\", \"Ok\", \"Suspect\"",
            )),
        }
    }

    fn accepted() -> &'static str {
        "\"DataState::<NoChange, Ok, Suspect>\""
    }
}

/// Status code advertised in a service status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromPrimitive, ToPrimitive,
)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum StatusCode {
    None = 0,
    NotFound = 1,
    Timeout = 2,
    NotAuthorized = 3,
    InvalidArgument = 4,
    UsageError = 5,
    Preempted = 6,
    JustInTimeConflationStarted = 7,
    RealTimeResumed = 8,
    FailoverStarted = 9,
    FailoverCompleted = 10,
    GapDetected = 11,
    NoResources = 12,
    TooManyItems = 13,
    AlreadyOpen = 14,
    SourceUnknown = 15,
    NotOpen = 16,
    NonUpdatingItem = 19,
    UnsupportedViewType = 20,
    InvalidView = 21,
    FullViewProvided = 22,
    UnableToRequestAsBatch = 23,
    NoBatchViewSupportInReq = 26,
    ExceededMaxMountsPerUser = 27,
    Error = 28,
    DacsDown = 29,
    UserUnknownToPermSys = 30,
    DacsMaxLoginsReached = 31,
    DacsUserAccessToAppDenied = 32,
    GapFill = 34,
    AppAuthorizationFailed = 35,
}

impl ConfigEnum for StatusCode {
    const PREFIX: &'static str = "StatusCode";

    fn from_token(token: &str) -> Result<Self> {
        Ok(match token {
            "None" => Self::None,
            "NotFound" => Self::NotFound,
            "Timeout" => Self::Timeout,
            "NotAuthorized" => Self::NotAuthorized,
            "InvalidArgument" => Self::InvalidArgument,
            "UsageError" => Self::UsageError,
            "Preempted" => Self::Preempted,
            "JustInTimeConflationStarted" => Self::JustInTimeConflationStarted,
            "RealTimeResumed" => Self::RealTimeResumed,
            "FailoverStarted" => Self::FailoverStarted,
            "FailoverCompleted" => Self::FailoverCompleted,
            "GapDetected" => Self::GapDetected,
            "NoResources" => Self::NoResources,
            "TooManyItems" => Self::TooManyItems,
            "AlreadyOpen" => Self::AlreadyOpen,
            "SourceUnknown" => Self::SourceUnknown,
            "NotOpen" => Self::NotOpen,
            "NonUpdatingItem" => Self::NonUpdatingItem,
            "UnsupportedViewType" => Self::UnsupportedViewType,
            "InvalidView" => Self::InvalidView,
            "FullViewProvided" => Self::FullViewProvided,
            "UnableToRequestAsBatch" => Self::UnableToRequestAsBatch,
            "NoBatchViewSupportInReq" => Self::NoBatchViewSupportInReq,
            "ExceededMaxMountsPerUser" => Self::ExceededMaxMountsPerUser,
            "Error" => Self::Error,
            "DacsDown" => Self::DacsDown,
            "UserUnknownToPermSys" => Self::UserUnknownToPermSys,
            "DacsMaxLoginsReached" => Self::DacsMaxLoginsReached,
            "DacsUserAccessToAppDenied" => Self::DacsUserAccessToAppDenied,
            "GapFill" => Self::GapFill,
            "AppAuthorizationFailed" => Self::AppAuthorizationFailed,
            _ => {
                return Err(not_recognized(
                    "StatusCode",
                    token,
                    "the status code names of OmmState",
                ));
            }
        })
    }

    fn accepted() -> &'static str {
        "\"StatusCode::<status code name>\""
    }
}

/// QoS timeliness value for real-time data.
pub const TIMELINESS_REALTIME: u32 = 0;
/// QoS timeliness value for delayed data of unknown delay.
pub const TIMELINESS_INEXACT_DELAYED: u32 = 0xFFFF_FFFF;
/// QoS rate value for tick-by-tick data.
pub const RATE_TICK_BY_TICK: u32 = 0;
/// QoS rate value for conflated data with unknown interval.
pub const RATE_JUST_IN_TIME_CONFLATED: u32 = 0xFFFF_FF00;

/// Resolves a QoS timeliness token.
///
/// # Errors
/// Returns `InvalidConfiguration` for any token other than `RealTime` or
/// `InexactDelayed`.
pub fn timeliness_from_token(token: &str) -> Result<u32> {
    match token {
        "RealTime" => Ok(TIMELINESS_REALTIME),
        "InexactDelayed" => Ok(TIMELINESS_INEXACT_DELAYED),
        _ => Err(not_recognized(
            "Timeliness",
            token,
            "\"RealTime\", \"InexactDelayed\"",
        )),
    }
}

/// Resolves a QoS rate token.
///
/// # Errors
/// Returns `InvalidConfiguration` for any token other than `TickByTick` or
/// `JustInTimeConflated`.
pub fn rate_from_token(token: &str) -> Result<u32> {
    match token {
        "TickByTick" => Ok(RATE_TICK_BY_TICK),
        "JustInTimeConflated" => Ok(RATE_JUST_IN_TIME_CONFLATED),
        _ => Err(not_recognized(
            "Rate",
            token,
            "\"TickByTick\", \"JustInTimeConflated\"",
        )),
    }
}

/// Highest numeric message model type accepted as a capability.
pub const MMT_MAX_VALUE: u64 = 255;

const CAPABILITIES: &[(&str, u64)] = &[
    ("MMT_LOGIN", 1),
    ("MMT_SOURCE", 4),
    ("MMT_DICTIONARY", 5),
    ("MMT_MARKET_PRICE", 6),
    ("MMT_MARKET_BY_ORDER", 7),
    ("MMT_MARKET_BY_PRICE", 8),
    ("MMT_MARKET_MAKER", 9),
    ("MMT_SYMBOL_LIST", 10),
    ("MMT_SERVICE_PROVIDER_STATUS", 11),
    ("MMT_HISTORY", 12),
    ("MMT_HEADLINE", 13),
    ("MMT_STORY", 14),
    ("MMT_REPLAYHEADLINE", 15),
    ("MMT_REPLAYSTORY", 16),
    ("MMT_TRANSACTION", 17),
    ("MMT_YIELD_CURVE", 22),
    ("MMT_CONTRIBUTION", 27),
    ("MMT_PROVIDER_ADMIN", 29),
    ("MMT_ANALYTICS", 30),
    ("MMT_REFERENCE", 31),
    ("MMT_NEWS_TEXT_ANALYTICS", 33),
    ("MMT_SYSTEM", 127),
];

/// Resolves a capability (message model type) name to its domain number.
///
/// # Errors
/// Returns `InvalidConfiguration` when the name is unknown.
pub fn capability_from_token(token: &str) -> Result<u64> {
    CAPABILITIES
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, value)| *value)
        .ok_or_else(|| {
            ConfigError::invalid(format!(
                "Capability: {token} not recognized. Acceptable inputs: a numeric value 0-{MMT_MAX_VALUE} or an MMT_* domain name."
            ))
        })
}

/// Resolves a capability given either as a number or a domain name.
///
/// # Errors
/// Returns `InvalidConfiguration` when a number exceeds [`MMT_MAX_VALUE`]
/// or a name is unknown.
pub fn capability_from_str(value: &str) -> Result<u64> {
    match value.trim().parse::<i64>() {
        Ok(number) if (0..=MMT_MAX_VALUE as i64).contains(&number) => Ok(number as u64),
        Ok(_) => Err(ConfigError::invalid(
            "Invalid Service CapabilitiesEntry element value. Correct numeric values are 0-255.",
        )),
        Err(_) => capability_from_token(value.trim()),
    }
}

/// TLS 1.2 protocol flag.
pub const TLS_V1_2: u32 = 0x08;
/// TLS 1.3 protocol flag.
pub const TLS_V1_3: u32 = 0x10;
/// Every supported TLS protocol flag.
pub const TLS_ALL: u32 = TLS_V1_2 | TLS_V1_3;

/// Validates and masks a security protocol bit set.
///
/// Zero is accepted unchanged. A nonzero value must contain at least one
/// supported TLS flag; unsupported bits are dropped.
///
/// # Errors
/// Returns `InvalidConfiguration` for a nonzero value with no supported flag.
pub fn security_protocol_from_u64(value: u64) -> Result<u32> {
    let bits = u32::try_from(value).map_err(|_| security_protocol_error(value))?;
    if bits != 0 && bits & TLS_ALL == 0 {
        return Err(security_protocol_error(value));
    }
    Ok(bits & TLS_ALL)
}

fn security_protocol_error(value: u64) -> ConfigError {
    ConfigError::invalid(format!(
        "Invalid SecurityProtocol value {value}. Valid flags are TLS 1.2 (0x08) and TLS 1.3 (0x10)."
    ))
}

const CIPHER_SUITES: &[(&str, u16)] = &[
    ("TLS_AES_128_GCM_SHA256", 0x1301),
    ("TLS_AES_256_GCM_SHA384", 0x1302),
    ("TLS_CHACHA20_POLY1305_SHA256", 0x1303),
    ("TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256", 0xC02B),
    ("TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384", 0xC02C),
    ("TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256", 0xC02F),
    ("TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384", 0xC030),
    ("TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256", 0xCCA8),
    ("TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256", 0xCCA9),
];

/// Parses a comma-separated list of cipher suite names or numbers.
///
/// Empty tokens are skipped and duplicates are kept once.
///
/// # Errors
/// Returns `InvalidConfiguration` for an unknown name or an out-of-range number.
pub fn cipher_suites_from_str(value: &str) -> Result<Vec<u16>> {
    let mut suites = Vec::new();
    for token in value.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let suite = match token.parse::<u16>() {
            Ok(number) => number,
            Err(_) => CIPHER_SUITES
                .iter()
                .find(|(name, _)| *name == token)
                .map(|(_, number)| *number)
                .ok_or_else(|| {
                    ConfigError::invalid(format!(
                        "Invalid CipherSuite entry: {token}. Entries must be cipher suite names or numbers."
                    ))
                })?,
        };
        if !suites.contains(&suite) {
            suites.push(suite);
        }
    }
    Ok(suites)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_type_case_insensitive() {
        assert_eq!(
            ConnectionType::from_token("RSSL_SOCKET").unwrap(),
            ConnectionType::Socket
        );
        assert_eq!(
            ConnectionType::from_token("rssl_socket").unwrap(),
            ConnectionType::Socket
        );
        assert_eq!(
            ConnectionType::from_token("rssl_encrypted").unwrap(),
            ConnectionType::Encrypted
        );
    }

    #[test]
    fn test_connection_type_rejects_unknown() {
        let err = ConnectionType::from_token("RSSL_BOGUS").unwrap_err();
        assert!(err.is_invalid_configuration());
        assert!(err.to_string().contains("RSSL_BOGUS"));
        assert!(err.to_string().contains("\"RSSL_SOCKET\""));
    }

    #[test]
    fn test_compression_type_is_case_sensitive() {
        assert_eq!(
            CompressionType::from_token("LZ4").unwrap(),
            CompressionType::Lz4
        );
        assert_eq!(
            CompressionType::from_token("ZLib").unwrap(),
            CompressionType::ZLib
        );
        assert!(CompressionType::from_token("lz4").is_err());
        assert!(CompressionType::from_token("bad_comp_type").is_err());
    }

    #[test]
    fn test_logger_level_tokens() {
        assert_eq!(LoggerLevel::from_token("Verbose").unwrap(), LoggerLevel::Trace);
        assert_eq!(LoggerLevel::from_token("Success").unwrap(), LoggerLevel::Info);
        assert_eq!(LoggerLevel::from_token("NoLogMsg").unwrap(), LoggerLevel::Off);

        let err = LoggerLevel::from_token("Debug").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Logger Severity: Debug not recognized. Acceptable inputs: \"Trace\", \"Info\" or \"Success\", \"Warning\", \"Error\" or \"Verbose\", \"NoLogMsg\"."
        );
    }

    #[test]
    fn test_logger_type_and_dictionary_mode() {
        assert_eq!(LoggerType::from_token("Stdout").unwrap(), LoggerType::Stdout);
        assert!(LoggerType::from_token("bad_log_type").is_err());
        assert_eq!(
            DictionaryMode::from_token("FileDictionary").unwrap(),
            DictionaryMode::File
        );
        assert!(DictionaryMode::from_token("bad_dictionary_type").is_err());
    }

    #[test]
    fn test_from_prefixed() {
        assert_eq!(
            CompressionType::from_prefixed("CompressionType::LZ4")
                .unwrap()
                .unwrap(),
            CompressionType::Lz4
        );
        assert!(CompressionType::from_prefixed("ChannelType::LZ4").is_none());
        assert!(CompressionType::from_prefixed("CompressionType::LZ4::x").is_none());
        assert!(CompressionType::from_prefixed("LZ4").is_none());
        assert!(matches!(
            CompressionType::from_prefixed("CompressionType::Snappy"),
            Some(Err(_))
        ));
    }

    #[test]
    fn test_from_code_range_checked() {
        assert_eq!(CompressionType::from_code(2), Some(CompressionType::Lz4));
        assert_eq!(CompressionType::from_code(3), None);
        assert_eq!(LoggerLevel::from_code(1), Some(LoggerLevel::Debug));
        assert_eq!(StatusCode::from_code(17), None);
        assert_eq!(StatusCode::from_code(35), Some(StatusCode::AppAuthorizationFailed));
    }

    #[test]
    fn test_directory_tokens() {
        assert_eq!(StreamState::from_token("ClosedRecover").unwrap(), StreamState::ClosedRecover);
        assert_eq!(DataState::from_token("Suspect").unwrap(), DataState::Suspect);
        assert_eq!(StatusCode::from_token("DacsDown").unwrap(), StatusCode::DacsDown);
        assert_eq!(timeliness_from_token("InexactDelayed").unwrap(), TIMELINESS_INEXACT_DELAYED);
        assert_eq!(rate_from_token("TickByTick").unwrap(), RATE_TICK_BY_TICK);
        assert!(rate_from_token("Fast").is_err());
    }

    #[test]
    fn test_capabilities() {
        assert_eq!(capability_from_str("6").unwrap(), 6);
        assert_eq!(capability_from_str("MMT_MARKET_BY_PRICE").unwrap(), 8);
        assert!(capability_from_str("256").is_err());
        assert!(capability_from_str("-1").is_err());
        assert!(capability_from_str("MMT_UNKNOWN").is_err());
    }

    #[test]
    fn test_security_protocol() {
        assert_eq!(security_protocol_from_u64(0).unwrap(), 0);
        assert_eq!(security_protocol_from_u64(0x18).unwrap(), TLS_ALL);
        assert_eq!(security_protocol_from_u64(0x09).unwrap(), TLS_V1_2);
        assert!(security_protocol_from_u64(0x04).is_err());
    }

    #[test]
    fn test_cipher_suites() {
        let suites =
            cipher_suites_from_str("TLS_AES_128_GCM_SHA256, 49199 ,TLS_AES_128_GCM_SHA256").unwrap();
        assert_eq!(suites, vec![0x1301, 49199]);
        assert!(cipher_suites_from_str("NOT_A_SUITE").is_err());
    }
}
