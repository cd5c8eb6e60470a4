//! Enumerations shared by several PGN definitions.

pub const YES_NO: &[(u64, &str)] = &[(0, "No"), (1, "Yes")];

pub const OFF_ON: &[(u64, &str)] = &[(0, "Off"), (1, "On")];

pub const OFF_ON_ERROR: &[(u64, &str)] = &[(0, "Off"), (1, "On"), (2, "Error")];

pub const INDUSTRY_CODE: &[(u64, &str)] = &[
    (0, "Global"),
    (1, "Highway"),
    (2, "Agriculture"),
    (3, "Construction"),
    (4, "Marine"),
    (5, "Industrial"),
];

pub const ISO_CONTROL: &[(u64, &str)] = &[
    (0, "ACK"),
    (1, "NAK"),
    (2, "Access Denied"),
    (3, "Address Busy"),
];

pub const PGN_LIST_FUNCTION: &[(u64, &str)] = &[(0, "Transmit PGN list"), (1, "Receive PGN list")];

pub const ALERT_TYPE: &[(u64, &str)] = &[
    (1, "Emergency Alarm"),
    (2, "Alarm"),
    (5, "Warning"),
    (8, "Caution"),
];

pub const ALERT_CATEGORY: &[(u64, &str)] = &[(0, "Navigational"), (1, "Technical")];

pub const ALERT_TRIGGER_CONDITION: &[(u64, &str)] = &[
    (0, "Manual"),
    (1, "Auto"),
    (2, "Test"),
    (3, "Disabled"),
];

pub const ALERT_THRESHOLD_STATUS: &[(u64, &str)] = &[
    (0, "Normal"),
    (1, "Threshold Exceeded"),
    (2, "Extreme Threshold Exceeded"),
    (3, "Low Threshold Exceeded"),
    (4, "Acknowledged"),
    (5, "Awaiting Acknowledge"),
];

pub const ALERT_STATE: &[(u64, &str)] = &[
    (0, "Disabled"),
    (1, "Normal"),
    (2, "Active"),
    (3, "Silenced"),
    (4, "Acknowledged"),
    (5, "Awaiting Acknowledge"),
];

pub const ALERT_RESPONSE_COMMAND: &[(u64, &str)] = &[
    (0, "Acknowledge"),
    (1, "Temporary Silence"),
    (2, "Test Command off"),
    (3, "Test Command on"),
];

pub const CONTROLLER_STATE: &[(u64, &str)] = &[
    (0, "Error Active"),
    (1, "Error Passive"),
    (2, "Bus Off"),
];

pub const EQUIPMENT_STATUS: &[(u64, &str)] = &[(0, "Operational"), (1, "Fault")];

pub const DIRECTION_REFERENCE: &[(u64, &str)] = &[
    (0, "True"),
    (1, "Magnetic"),
    (2, "Error"),
];

pub const ENGINE_INSTANCE: &[(u64, &str)] = &[
    (0, "Single Engine or Dual Engine Port"),
    (1, "Dual Engine Starboard"),
];

pub const GNS_TYPE: &[(u64, &str)] = &[
    (0, "GPS"),
    (1, "GLONASS"),
    (2, "GPS+GLONASS"),
    (3, "GPS+SBAS/WAAS"),
    (4, "GPS+SBAS/WAAS+GLONASS"),
    (5, "Chayka"),
    (6, "integrated"),
    (7, "surveyed"),
    (8, "Galileo"),
];

pub const GNS_METHOD: &[(u64, &str)] = &[
    (0, "no GNSS"),
    (1, "GNSS fix"),
    (2, "DGNSS fix"),
    (3, "Precise GNSS"),
    (4, "RTK Fixed Integer"),
    (5, "RTK float"),
    (6, "Estimated (DR) mode"),
    (7, "Manual Input"),
    (8, "Simulate mode"),
];

pub const GNS_INTEGRITY: &[(u64, &str)] = &[
    (0, "No integrity checking"),
    (1, "Safe"),
    (2, "Caution"),
];

pub const WIND_REFERENCE: &[(u64, &str)] = &[
    (0, "True (ground referenced to North)"),
    (1, "Magnetic (ground referenced to Magnetic North)"),
    (2, "Apparent"),
    (3, "True (boat referenced)"),
    (4, "True (water referenced)"),
];
