use {crate::StatementError, ipnet::IpNet, log::debug, std::net::IpAddr};

/// IP address operation names.
pub(super) const IP_ADDRESS_DISPLAY_NAMES: [&str; 4] =
    ["IpAddress", "IpAddressIfExists", "NotIpAddress", "NotIpAddressIfExists"];

/// IP address operators take a CIDR block or a single IPv4 or IPv6 address.
pub(super) fn validate_ip_address(value: &str) -> Result<(), StatementError> {
    if value.parse::<IpNet>().is_ok() || value.parse::<IpAddr>().is_ok() {
        return Ok(());
    }

    debug!("Condition value {value} is not an IP address or CIDR block");
    Err(StatementError::InvalidConditionValue(format!("{value} is not an IP address or CIDR block")))
}
