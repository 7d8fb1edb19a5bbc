//! Plain-text tables for command-line output

use crate::controller::{DeviceRecord, InterfaceRecord};

const RULE_WIDTH: usize = 80;

fn header(out: &mut String, title: &str, columns: String) {
    out.push('\n');
    out.push_str(title);
    out.push('\n');
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str(&columns);
    out.push('\n');
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
}

/// Fixed-width device table
pub fn device_table(devices: &[DeviceRecord]) -> String {
    if devices.is_empty() {
        return "No devices found!\n".to_string();
    }

    let mut out = String::new();
    header(
        &mut out,
        "Network Devices",
        format!("{:20}{:15}{:20}{:10}", "Hostname", "IP Address", "Platform", "Status"),
    );

    for device in devices {
        out.push_str(&format!(
            "{:20}{:15}{:20}{:10}\n",
            device.hostname(),
            device.management_ip(),
            device.platform(),
            device.reachability()
        ));
    }

    out
}

/// Fixed-width interface table
pub fn interface_table(interfaces: &[InterfaceRecord]) -> String {
    if interfaces.is_empty() {
        return "No interfaces found!\n".to_string();
    }

    let mut out = String::new();
    header(
        &mut out,
        "Device Interfaces",
        format!("{:20}{:10}{:10}{:10}", "Interface", "Status", "VLAN", "Speed"),
    );

    for interface in interfaces {
        out.push_str(&format!(
            "{:20}{:10}{:10}{:10}\n",
            interface.port_name(),
            interface.status(),
            interface.vlan(),
            interface.speed()
        ));
    }

    out
}
