//! Resource record set model.
//!
//! Records are modeled as a tagged union (`RecordData`) rather than a bag
//! of optional fields so that categorization logic can match exhaustively.
//! The serde representation, however, must stay bit-compatible with the
//! JSON shape the exporter captures from the provider API (`Name`, `Type`,
//! `TTL`, `ResourceRecords`, `AliasTarget`, routing-policy fields), so
//! (de)serialization goes through a wire struct with `TryFrom` validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// DNS record types supported in snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordType {
    A,
    Aaaa,
    Caa,
    Cname,
    Ds,
    Mx,
    Naptr,
    Ns,
    Ptr,
    Soa,
    Spf,
    Srv,
    Txt,
}

impl RecordType {
    /// Uppercase form used by the provider API.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Caa => "CAA",
            RecordType::Cname => "CNAME",
            RecordType::Ds => "DS",
            RecordType::Mx => "MX",
            RecordType::Naptr => "NAPTR",
            RecordType::Ns => "NS",
            RecordType::Ptr => "PTR",
            RecordType::Soa => "SOA",
            RecordType::Spf => "SPF",
            RecordType::Srv => "SRV",
            RecordType::Txt => "TXT",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(RecordType::A),
            "AAAA" => Ok(RecordType::Aaaa),
            "CAA" => Ok(RecordType::Caa),
            "CNAME" => Ok(RecordType::Cname),
            "DS" => Ok(RecordType::Ds),
            "MX" => Ok(RecordType::Mx),
            "NAPTR" => Ok(RecordType::Naptr),
            "NS" => Ok(RecordType::Ns),
            "PTR" => Ok(RecordType::Ptr),
            "SOA" => Ok(RecordType::Soa),
            "SPF" => Ok(RecordType::Spf),
            "SRV" => Ok(RecordType::Srv),
            "TXT" => Ok(RecordType::Txt),
            other => Err(format!("unrecognized record type '{}'", other)),
        }
    }
}

/// Alias target: a pointer to another zone/resource instead of literal values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AliasTarget {
    #[serde(rename = "HostedZoneId")]
    pub hosted_zone_id: String,

    #[serde(rename = "DNSName")]
    pub dns_name: String,

    #[serde(rename = "EvaluateTargetHealth")]
    pub evaluate_target_health: bool,
}

/// Geographic location for geolocation routing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeoLocation {
    #[serde(rename = "ContinentCode", skip_serializing_if = "Option::is_none")]
    pub continent_code: Option<String>,

    #[serde(rename = "CountryCode", skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,

    #[serde(rename = "SubdivisionCode", skip_serializing_if = "Option::is_none")]
    pub subdivision_code: Option<String>,
}

/// Failover role for failover routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailoverRole {
    Primary,
    Secondary,
}

impl FailoverRole {
    fn as_str(&self) -> &'static str {
        match self {
            FailoverRole::Primary => "PRIMARY",
            FailoverRole::Secondary => "SECONDARY",
        }
    }
}

/// Routing policy. Exactly one variant applies to a record set; all
/// non-simple variants require a set identifier on the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingPolicy {
    Simple,
    Weighted { weight: i64 },
    Latency { region: String },
    Failover(FailoverRole),
    Geolocation(GeoLocation),
    MultiValueAnswer,
}

impl RoutingPolicy {
    pub fn is_simple(&self) -> bool {
        matches!(self, RoutingPolicy::Simple)
    }
}

/// Record payload: either literal values or an alias target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    /// Plain record: optional TTL plus one or more value strings.
    /// Value order is significant for display but not for equality.
    Values { ttl: Option<i64>, values: Vec<String> },

    /// Alias record: no TTL, points at another resource.
    Alias(AliasTarget),
}

impl RecordData {
    pub fn is_alias(&self) -> bool {
        matches!(self, RecordData::Alias(_))
    }
}

/// Identity key matching a snapshot record to a live record.
///
/// Two records sharing a key are "the same slot" even when one side is
/// an alias and the other is not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    /// Canonical record name (lowercased, trailing dot)
    pub name: String,
    pub record_type: RecordType,
    pub set_identifier: Option<String>,
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.record_type)?;
        if let Some(id) = &self.set_identifier {
            write!(f, " (Set: {})", id)?;
        }
        Ok(())
    }
}

/// One DNS record set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RecordSetWire", into = "RecordSetWire")]
pub struct RecordSet {
    /// Record name as captured (comparisons are case-insensitive)
    pub name: String,
    pub record_type: RecordType,
    pub set_identifier: Option<String>,
    pub routing: RoutingPolicy,
    pub health_check_id: Option<String>,
    pub data: RecordData,
}

impl RecordSet {
    /// Identity key: (canonical name, type, set-identifier-or-absent).
    pub fn key(&self) -> RecordKey {
        RecordKey {
            name: canonical_name(&self.name),
            record_type: self.record_type,
            set_identifier: self.set_identifier.clone(),
        }
    }

    /// Human-readable record label for reports and logs.
    pub fn display_name(&self) -> String {
        match &self.set_identifier {
            Some(id) => format!("{} {} (Set: {})", self.name, self.record_type, id),
            None => format!("{} {}", self.name, self.record_type),
        }
    }

    pub fn is_alias(&self) -> bool {
        self.data.is_alias()
    }

    /// Structural equality against a live record at the same key.
    ///
    /// Plain records compare TTL and the *set* of values (order is
    /// insignificant, duplicates are not collapsed); alias records compare
    /// target zone, target name and the evaluate-health flag. Routing
    /// policy and health-check id always participate.
    pub fn structurally_equal(&self, other: &RecordSet) -> bool {
        if self.record_type != other.record_type
            || self.routing != other.routing
            || self.health_check_id != other.health_check_id
        {
            return false;
        }

        match (&self.data, &other.data) {
            (
                RecordData::Values { ttl: a_ttl, values: a_vals },
                RecordData::Values { ttl: b_ttl, values: b_vals },
            ) => {
                if a_ttl != b_ttl || a_vals.len() != b_vals.len() {
                    return false;
                }
                let mut a_sorted = a_vals.clone();
                let mut b_sorted = b_vals.clone();
                a_sorted.sort_unstable();
                b_sorted.sort_unstable();
                a_sorted == b_sorted
            }
            (RecordData::Alias(a), RecordData::Alias(b)) => {
                a.hosted_zone_id == b.hosted_zone_id
                    && canonical_name(&a.dns_name) == canonical_name(&b.dns_name)
                    && a.evaluate_target_health == b.evaluate_target_health
            }
            // Alias on one side, plain values on the other: same slot,
            // different shape. Never equal.
            _ => false,
        }
    }
}

/// Canonical form of a DNS name: ASCII-lowercased with a trailing dot.
pub fn canonical_name(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    if lower.ends_with('.') {
        lower
    } else {
        format!("{}.", lower)
    }
}

// ---------------------------------------------------------------------------
// Wire representation
// ---------------------------------------------------------------------------

/// Provider-API JSON shape of a record set, as written by the exporter.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RecordSetWire {
    #[serde(rename = "Name")]
    name: String,

    #[serde(rename = "Type")]
    record_type: String,

    #[serde(rename = "SetIdentifier", skip_serializing_if = "Option::is_none")]
    set_identifier: Option<String>,

    #[serde(rename = "Weight", skip_serializing_if = "Option::is_none")]
    weight: Option<i64>,

    #[serde(rename = "Region", skip_serializing_if = "Option::is_none")]
    region: Option<String>,

    #[serde(rename = "GeoLocation", skip_serializing_if = "Option::is_none")]
    geo_location: Option<GeoLocation>,

    #[serde(rename = "Failover", skip_serializing_if = "Option::is_none")]
    failover: Option<String>,

    #[serde(rename = "MultiValueAnswer", skip_serializing_if = "Option::is_none")]
    multi_value_answer: Option<bool>,

    #[serde(rename = "TTL", skip_serializing_if = "Option::is_none")]
    ttl: Option<i64>,

    #[serde(rename = "ResourceRecords", skip_serializing_if = "Option::is_none")]
    resource_records: Option<Vec<ResourceRecordWire>>,

    #[serde(rename = "AliasTarget", skip_serializing_if = "Option::is_none")]
    alias_target: Option<AliasTarget>,

    #[serde(rename = "HealthCheckId", skip_serializing_if = "Option::is_none")]
    health_check_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResourceRecordWire {
    #[serde(rename = "Value")]
    value: String,
}

impl TryFrom<RecordSetWire> for RecordSet {
    type Error = String;

    fn try_from(wire: RecordSetWire) -> Result<Self, Self::Error> {
        let record_type: RecordType = wire
            .record_type
            .parse()
            .map_err(|e| format!("record '{}': {}", wire.name, e))?;

        let data = match (wire.alias_target, wire.resource_records) {
            (Some(_), Some(_)) => {
                return Err(format!(
                    "record '{}' has both AliasTarget and ResourceRecords",
                    wire.name
                ));
            }
            (Some(alias), None) => RecordData::Alias(alias),
            (None, Some(records)) => RecordData::Values {
                ttl: wire.ttl,
                values: records.into_iter().map(|r| r.value).collect(),
            },
            (None, None) => {
                return Err(format!(
                    "record '{}' has neither AliasTarget nor ResourceRecords",
                    wire.name
                ));
            }
        };

        let mut policies = Vec::new();
        if let Some(weight) = wire.weight {
            policies.push(RoutingPolicy::Weighted { weight });
        }
        if let Some(region) = wire.region {
            policies.push(RoutingPolicy::Latency { region });
        }
        if let Some(role) = wire.failover {
            let role = match role.as_str() {
                "PRIMARY" => FailoverRole::Primary,
                "SECONDARY" => FailoverRole::Secondary,
                other => {
                    return Err(format!(
                        "record '{}': invalid failover role '{}'",
                        wire.name, other
                    ));
                }
            };
            policies.push(RoutingPolicy::Failover(role));
        }
        if let Some(geo) = wire.geo_location {
            policies.push(RoutingPolicy::Geolocation(geo));
        }
        if wire.multi_value_answer == Some(true) {
            policies.push(RoutingPolicy::MultiValueAnswer);
        }

        if policies.len() > 1 {
            return Err(format!(
                "record '{}' mixes multiple routing policies",
                wire.name
            ));
        }
        let routing = policies.pop().unwrap_or(RoutingPolicy::Simple);

        if !routing.is_simple() && wire.set_identifier.is_none() {
            return Err(format!(
                "record '{}' has a routing policy but no SetIdentifier",
                wire.name
            ));
        }

        Ok(RecordSet {
            name: wire.name,
            record_type,
            set_identifier: wire.set_identifier,
            routing,
            health_check_id: wire.health_check_id,
            data,
        })
    }
}

impl From<RecordSet> for RecordSetWire {
    fn from(record: RecordSet) -> Self {
        let mut wire = RecordSetWire {
            name: record.name,
            record_type: record.record_type.as_str().to_string(),
            set_identifier: record.set_identifier,
            weight: None,
            region: None,
            geo_location: None,
            failover: None,
            multi_value_answer: None,
            ttl: None,
            resource_records: None,
            alias_target: None,
            health_check_id: record.health_check_id,
        };

        match record.routing {
            RoutingPolicy::Simple => {}
            RoutingPolicy::Weighted { weight } => wire.weight = Some(weight),
            RoutingPolicy::Latency { region } => wire.region = Some(region),
            RoutingPolicy::Failover(role) => wire.failover = Some(role.as_str().to_string()),
            RoutingPolicy::Geolocation(geo) => wire.geo_location = Some(geo),
            RoutingPolicy::MultiValueAnswer => wire.multi_value_answer = Some(true),
        }

        match record.data {
            RecordData::Values { ttl, values } => {
                wire.ttl = ttl;
                wire.resource_records = Some(
                    values
                        .into_iter()
                        .map(|value| ResourceRecordWire { value })
                        .collect(),
                );
            }
            RecordData::Alias(alias) => wire.alias_target = Some(alias),
        }

        wire
    }
}
