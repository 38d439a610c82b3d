//! JSON wire form of alerts
//!
//! ```json
//! {"patient_id":"bed-7","message":"...","reasons":["..."],"severity":"high","timestamp":1740787200000}
//! ```

use vitalguard_core::AlertEvent;

use crate::ConnectorError;

/// Encode an alert as compact JSON
pub fn encode_alert(alert: &AlertEvent) -> Result<Vec<u8>, ConnectorError> {
    serde_json::to_vec(alert).map_err(|e| ConnectorError::Encoding(e.to_string()))
}

/// Decode an alert produced by [`encode_alert`]
pub fn decode_alert(bytes: &[u8]) -> Result<AlertEvent, ConnectorError> {
    serde_json::from_slice(bytes).map_err(|e| ConnectorError::Encoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitalguard_core::{SeverityBand, ThresholdViolation};

    #[test]
    fn severity_and_reasons_on_the_wire() {
        let violations = [ThresholdViolation::LowOxygenSaturation { value: 89.0, min: 92.0 }];
        let alert = AlertEvent::emergency("bed-7", &violations, Some(SeverityBand::High), 42);

        let json: serde_json::Value = serde_json::from_slice(&encode_alert(&alert).unwrap()).unwrap();
        assert_eq!(json["patient_id"], "bed-7");
        assert_eq!(json["severity"], "high");
        assert_eq!(json["timestamp"], 42);
        assert_eq!(json["reasons"][0], "Low oxygen saturation: 89.0% (minimum 92%)");

        assert_eq!(decode_alert(&encode_alert(&alert).unwrap()).unwrap(), alert);
    }

    #[test]
    fn garbage_is_an_encoding_error() {
        assert!(matches!(decode_alert(b"not json"), Err(ConnectorError::Encoding(_))));
    }
}
