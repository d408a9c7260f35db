use std::net::IpAddr;

/// Checks whether `candidate` is an IPv4 or IPv6 literal.
///
/// IPv4 must be a strict dotted quad (four decimal octets, no leading zeros).
/// IPv6 follows RFC 4291 text form, including `::` compression and an
/// embedded IPv4 tail.
#[must_use]
pub fn is_valid_ip(candidate: &str) -> bool {
  candidate.parse::<IpAddr>().is_ok()
}
