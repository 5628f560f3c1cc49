#[cfg(test)]
mod tests {
    use super::super::signer::{
        Credentials, Signer, ACCESS_KEY_HEADER, AUTHORIZATION_HEADER, DATE_HEADER, MESSAGE_HEADER,
    };
    use super::super::transport::{Method, Request};
    use chrono::{DateTime, TimeZone, Utc};

    const URL: &str = "https://panel.example.com/api/servers";

    fn create_test_signer() -> Signer {
        Signer::new(Credentials::new("access-123", "secret-456").unwrap())
    }

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2017, 6, 2, 15, 4, 5).unwrap()
    }

    #[test]
    fn test_date_format() {
        assert_eq!(Signer::format_date(test_time()), "2017-06-02T15:04:05+0000");
    }

    #[test]
    fn test_body_digest() {
        assert_eq!(Signer::body_digest(b"hello"), "5d41402abc4b2a76b9719d911017c592");
    }

    #[test]
    fn test_canonical_message_without_body() {
        let message =
            Signer::canonical_message("GET", URL, "2017-06-02T15:04:05+0000", "access-123", None);

        assert_eq!(
            message,
            "GET\nhttps://panel.example.com/api/servers\n2017-06-02T15:04:05+0000\naccess-123\n"
        );
    }

    #[test]
    fn test_canonical_message_with_body() {
        let message = Signer::canonical_message(
            "POST",
            URL,
            "2017-06-02T15:04:05+0000",
            "access-123",
            Some(b"hello"),
        );

        assert_eq!(
            message,
            "POST\nhttps://panel.example.com/api/servers\n2017-06-02T15:04:05+0000\naccess-123\n\
             5d41402abc4b2a76b9719d911017c592"
        );
    }

    #[test]
    fn test_signature_is_deterministic() {
        let signer = create_test_signer();
        let body = br#"{"name":"db1"}"#;

        let first = signer.signature("POST", URL, test_time(), Some(body)).unwrap();
        let second = signer.signature("POST", URL, test_time(), Some(body)).unwrap();

        assert_eq!(first, second);
        assert!(!first.value.is_empty());
    }

    #[test]
    fn test_signature_changes_with_every_input() {
        let signer = create_test_signer();
        let body: &[u8] = br#"{"name":"db1"}"#;
        let base = signer.signature("POST", URL, test_time(), Some(body)).unwrap().value;

        let other_method = signer.signature("GET", URL, test_time(), Some(body)).unwrap();
        let other_url = signer
            .signature("POST", "https://panel.example.com/api/schedules", test_time(), Some(body))
            .unwrap();
        let later = test_time() + chrono::Duration::seconds(1);
        let other_time = signer.signature("POST", URL, later, Some(body)).unwrap();
        let other_body = signer
            .signature("POST", URL, test_time(), Some(br#"{"name":"db2"}"#))
            .unwrap();
        let no_body = signer.signature("POST", URL, test_time(), None).unwrap();

        let other_access = Signer::new(Credentials::new("access-999", "secret-456").unwrap())
            .signature("POST", URL, test_time(), Some(body))
            .unwrap();
        let other_secret = Signer::new(Credentials::new("access-123", "secret-999").unwrap())
            .signature("POST", URL, test_time(), Some(body))
            .unwrap();

        for changed in [
            other_method,
            other_url,
            other_time,
            other_body,
            no_body,
            other_access,
            other_secret,
        ] {
            assert_ne!(changed.value, base);
        }
    }

    #[test]
    fn test_sign_adds_headers() {
        let signer = create_test_signer();
        let mut request = Request::new(Method::Get, URL, None);

        let signature = signer.sign(&mut request, test_time()).unwrap();

        assert_eq!(request.header(DATE_HEADER), Some("2017-06-02T15:04:05+0000"));
        assert_eq!(request.header(ACCESS_KEY_HEADER), Some("access-123"));
        assert_eq!(
            request.header(AUTHORIZATION_HEADER),
            Some(format!("BL {}", signature.value).as_str())
        );
        assert_eq!(
            request.header(MESSAGE_HEADER),
            Some(
                "GET\\nhttps://panel.example.com/api/servers\\n2017-06-02T15:04:05+0000\\naccess-123\\n"
            )
        );
    }

    #[test]
    fn test_sign_leaves_body_untouched() {
        let signer = create_test_signer();
        let body = br#"{"id":0,"name":"db1"}"#.to_vec();
        let mut request = Request::new(Method::Post, URL, Some(body.clone()));

        signer.sign(&mut request, test_time()).unwrap();

        assert_eq!(request.body.as_deref(), Some(body.as_slice()));
        let digest = Signer::body_digest(&body);
        assert!(request.header(MESSAGE_HEADER).unwrap().ends_with(&digest));
    }

    #[test]
    fn test_credentials_reject_empty_keys() {
        assert!(Credentials::new("", "secret").is_err());
        assert!(Credentials::new("access", "").is_err());
    }

    #[test]
    fn test_credentials_debug_masks_secret() {
        let credentials = Credentials::new("access-123", "supersecret-abcd").unwrap();
        let debug = format!("{:?}", credentials);

        assert!(debug.contains("access-123"));
        assert!(debug.contains("****abcd"));
        assert!(!debug.contains("supersecret"));
    }
}
