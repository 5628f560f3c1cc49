#[cfg(test)]
mod tests {
    use super::super::envelope::{self, Envelope};
    use super::super::transport::RawResponse;
    use crate::error::{ApiError, ErrorKind};
    use crate::models::{Retention, RetentionType};
    use serde_json::json;
    use std::io::{self, Read};

    struct BrokenBody;

    impl Read for BrokenBody {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"))
        }
    }

    #[test]
    fn test_parse_ok_status() {
        let response = RawResponse::from_bytes(200, r#"{"status":"ok","id":42}"#);

        match envelope::parse(response).unwrap() {
            Envelope::Success(fields) => {
                assert_eq!(Envelope::assigned_id(&fields), Some(42));
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_status_carries_message() {
        let response =
            RawResponse::from_bytes(200, r#"{"status":"error","message":"name already taken"}"#);

        let envelope = envelope::parse(response).unwrap();
        assert_eq!(
            envelope,
            Envelope::Failure {
                message: "name already taken".to_string()
            }
        );

        let err = envelope.into_result().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Remote);
        assert_eq!(err.remote_message(), Some("name already taken"));
    }

    #[test]
    fn test_parse_missing_status_is_anomaly() {
        let response = RawResponse::from_bytes(200, r#"{"id":42}"#);

        let err = envelope::parse(response)
            .unwrap()
            .into_result()
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ProtocolAnomaly);
        assert!(err.to_string().contains(r#"{"id":42}"#));
    }

    #[test]
    fn test_parse_non_string_status_is_anomaly() {
        let response = RawResponse::from_bytes(200, r#"{"status":1}"#);

        let envelope = envelope::parse(response).unwrap();
        assert!(matches!(envelope, Envelope::Anomaly { .. }));
    }

    #[test]
    fn test_parse_invalid_json_is_decode_error_with_body() {
        let response = RawResponse::from_bytes(200, "<html>oops</html>");

        let err = envelope::parse(response).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert!(err.to_string().contains("<html>oops</html>"));
    }

    #[test]
    fn test_parse_non_2xx_with_error_envelope() {
        let response =
            RawResponse::from_bytes(404, r#"{"status":"error","message":"not found"}"#);

        assert_eq!(
            envelope::parse(response).unwrap(),
            Envelope::Failure {
                message: "not found".to_string()
            }
        );
    }

    #[test]
    fn test_parse_non_2xx_with_ok_status_is_anomaly() {
        let response = RawResponse::from_bytes(500, r#"{"status":"ok"}"#);

        let envelope = envelope::parse(response).unwrap();
        assert!(matches!(envelope, Envelope::Anomaly { .. }));
    }

    #[test]
    fn test_failure_without_envelope_names_status_and_body() {
        let err = envelope::failure(502, b"Bad Gateway");

        assert_eq!(err.kind(), ErrorKind::ProtocolAnomaly);
        let text = err.to_string();
        assert!(text.contains("502"));
        assert!(text.contains("Bad Gateway"));
    }

    #[test]
    fn test_parse_record_decodes_typed_body() {
        let body = json!({"id": 3, "name": "keep-7", "retentionType": 1, "count": 7});
        let response = RawResponse::from_bytes(200, body.to_string());

        let retention: Retention = envelope::parse_record(response).unwrap();
        assert_eq!(retention.id, 3);
        assert_eq!(retention.retention_type, RetentionType::ByDays);
        assert_eq!(retention.count, 7);
    }

    #[test]
    fn test_parse_record_404_with_envelope_is_remote_error() {
        let response =
            RawResponse::from_bytes(404, r#"{"status":"error","message":"not found"}"#);

        let err = envelope::parse_record::<Retention>(response).unwrap_err();
        assert!(matches!(&err, ApiError::Remote { message } if message == "not found"));
    }

    #[test]
    fn test_parse_record_404_without_status_is_anomaly() {
        let response = RawResponse::from_bytes(404, r#"{"detail":"missing"}"#);

        let err = envelope::parse_record::<Retention>(response).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ProtocolAnomaly);
    }

    #[test]
    fn test_parse_record_invalid_body_is_decode_error() {
        let response = RawResponse::from_bytes(200, r#"{"name":"missing fields"}"#);

        let err = envelope::parse_record::<Retention>(response).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_unreadable_body_is_io_error() {
        let response = RawResponse::new(200, Box::new(BrokenBody));

        let err = envelope::parse(response).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_parse_bytes_returns_raw_body() {
        let response = RawResponse::from_bytes(200, "#!/bin/bash\necho hi\n");

        let bytes = envelope::parse_bytes(response).unwrap();
        assert_eq!(bytes, b"#!/bin/bash\necho hi\n");
    }

    #[test]
    fn test_parse_bytes_rejects_error_status() {
        let response = RawResponse::from_bytes(403, r#"{"status":"error","message":"forbidden"}"#);

        let err = envelope::parse_bytes(response).unwrap_err();
        assert_eq!(err.remote_message(), Some("forbidden"));
    }

    #[test]
    fn test_assigned_id_accepts_float_and_ignores_strings() {
        let fields = json!({"id": 7.0}).as_object().cloned().unwrap();
        assert_eq!(Envelope::assigned_id(&fields), Some(7));

        let fields = json!({"id": "7"}).as_object().cloned().unwrap();
        assert_eq!(Envelope::assigned_id(&fields), None);
    }
}
