//! Translation between flat records and Leaseweb record sets
//!
//! Callers describe DNS state as single-value [`Record`]s, the Leaseweb API
//! as [`RecordSet`]s carrying every value of one name and type under a single
//! TTL. Records are merged into sets keyed by `(canonical name, type)`; sets
//! are expanded back into one record per value.
//!
//! Everything here is pure: no I/O, no shared state.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, warn};

use crate::api::models::RecordSet;
use crate::errors::{DnsError, TtlConflict};
use crate::providers::traits::Record;

/// TTLs accepted by the Leaseweb API
///
/// https://developer.leaseweb.com/api-docs/domains_v2.html#tag/DNS/operation/domains-resourcerecordsets-post
pub const SUPPORTED_TTLS: [u32; 8] = [60, 300, 1800, 3600, 14400, 28800, 43200, 86400];

/// TTL used when a record asks for none or for an unsupported one
pub const DEFAULT_TTL: u32 = SUPPORTED_TTLS[0];

/// Zone without its trailing dot, as used in API path segments
pub fn domain_name(zone: &str) -> &str {
    zone.strip_suffix('.').unwrap_or(zone)
}

fn strip_suffix_ignore_case<'a>(value: &'a str, suffix: &str) -> Option<&'a str> {
    let split = value.len().checked_sub(suffix.len())?;
    if !value.is_char_boundary(split) {
        return None;
    }
    let (head, tail) = value.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}

/// Canonical, fully-qualified and dot-terminated name of `name` within `zone`
///
/// `name` may be relative (`sub`, `sub.`), zone-qualified (`sub.example.com`)
/// or fully-qualified (`sub.example.com.`); all of them map to
/// `sub.example.com.`. The apex (`""`, `"@"`, or the zone itself) maps to the
/// zone's fully-qualified name. The zone may be given with or without its
/// trailing dot.
pub fn canonical_name(zone: &str, name: &str) -> String {
    let domain = domain_name(zone);
    let trimmed = name.strip_suffix('.').unwrap_or(name);

    let relative = if trimmed.eq_ignore_ascii_case(domain) {
        ""
    } else {
        strip_suffix_ignore_case(trimmed, domain)
            .and_then(|head| head.strip_suffix('.'))
            .unwrap_or(trimmed)
    };

    match (relative, domain) {
        ("" | "@", "") => ".".to_string(),
        ("" | "@", _) => format!("{}.", domain),
        (_, "") => format!("{}.", relative),
        _ => format!("{}.{}.", relative, domain),
    }
}

/// TTL the API will accept for `record`
///
/// An unset TTL (zero) falls back to [`DEFAULT_TTL`] quietly; any other value
/// outside [`SUPPORTED_TTLS`] falls back with a warning.
pub fn effective_ttl(record: &Record) -> u32 {
    let requested = record.ttl_secs();
    if SUPPORTED_TTLS.contains(&requested) {
        return requested;
    }

    if requested == 0 {
        debug!("No TTL set for {}, using {}s", record.name, DEFAULT_TTL);
    } else {
        warn!(
            "TTL {}s for {} is not supported by Leaseweb, using {}s",
            requested, record.name, DEFAULT_TTL
        );
    }
    DEFAULT_TTL
}

/// Records sharing one `(canonical name, type)` key
struct MergeGroup<'a> {
    name: String,
    record_type: String,
    members: Vec<&'a Record>,
}

/// Merge `records` into record sets for `zone`
///
/// Record types are upper-cased, so `txt` and `TXT` land in the same set.
/// Sets come out in the order their first record appears, values in input
/// order. Every group whose members disagree on the effective TTL is reported
/// in one [`DnsError::TtlConflicts`]; no sets are returned in that case.
pub fn to_record_sets(zone: &str, records: &[Record]) -> Result<Vec<RecordSet>, DnsError> {
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut groups: Vec<MergeGroup<'_>> = Vec::new();

    for record in records {
        let key = (
            canonical_name(zone, &record.name),
            record.record_type.to_ascii_uppercase(),
        );
        match index.get(&key) {
            Some(&position) => groups[position].members.push(record),
            None => {
                index.insert(key.clone(), groups.len());
                let (name, record_type) = key;
                groups.push(MergeGroup {
                    name,
                    record_type,
                    members: vec![record],
                });
            }
        }
    }

    let mut conflicts = Vec::new();
    let mut sets = Vec::with_capacity(groups.len());

    for group in groups {
        let ttl = effective_ttl(group.members[0]);
        for member in &group.members[1..] {
            let other_ttl = effective_ttl(member);
            if other_ttl != ttl {
                conflicts.push(TtlConflict {
                    name: group.name.clone(),
                    record_type: group.record_type.clone(),
                    first_ttl: ttl,
                    other_ttl,
                });
            }
        }

        sets.push(RecordSet {
            name: group.name,
            record_type: group.record_type,
            content: group.members.iter().map(|r| r.value.clone()).collect(),
            ttl,
        });
    }

    if !conflicts.is_empty() {
        return Err(DnsError::TtlConflicts(conflicts));
    }

    debug!(
        "Merged {} records into {} record sets for zone {}",
        records.len(),
        sets.len(),
        zone
    );

    Ok(sets)
}

/// Expand record sets into one record per value
pub fn from_record_sets(sets: &[RecordSet]) -> Vec<Record> {
    sets.iter()
        .flat_map(|set| {
            set.content.iter().map(move |value| Record {
                name: set.name.clone(),
                record_type: set.record_type.clone(),
                value: value.clone(),
                ttl: Duration::from_secs(u64::from(set.ttl)),
            })
        })
        .collect()
}
