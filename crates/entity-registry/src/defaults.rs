//! Per-device-class presentation fallbacks applied when a sensor entry
//! leaves unit or state class unspecified.

pub fn default_unit(device_class: &str) -> Option<&'static str> {
    match device_class {
        "temperature" => Some("°C"),
        "power" => Some("W"),
        "energy" => Some("kWh"),
        "frequency" => Some("Hz"),
        "current" => Some("A"),
        "voltage" => Some("V"),
        "pressure" => Some("bar"),
        "volume_flow_rate" => Some("L/min"),
        "duration" => Some("h"),
        _ => None,
    }
}

pub fn default_state_class(device_class: &str) -> Option<&'static str> {
    match device_class {
        "temperature" | "power" | "frequency" | "current" | "voltage" | "pressure"
        | "volume_flow_rate" => Some("measurement"),
        "energy" | "duration" => Some("total_increasing"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_classes_have_paired_defaults() {
        assert_eq!(default_unit("temperature"), Some("°C"));
        assert_eq!(default_state_class("temperature"), Some("measurement"));
        assert_eq!(default_state_class("energy"), Some("total_increasing"));
    }

    #[test]
    fn unknown_class_has_no_defaults() {
        assert_eq!(default_unit("running"), None);
        assert_eq!(default_state_class("running"), None);
    }
}
